//! 应用状态

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;
use warden_auth_core::{
    AnnotationKind, AuthorizationResolver, KindRegistry, ResolverConfig, SessionBinder,
    SessionRealm,
};
use warden_config::{AuthorizationConfig, IdentityConfig};

use crate::application::{AccessEngine, RestPipeline, service};

/// 请求间共享的只读状态
#[derive(Clone)]
pub struct AppState {
    pub pipeline: RestPipeline,
    pub identity: Arc<IdentityConfig>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// 装配：解析一次角色要求表，之后只读共享
    pub fn new(
        authorization: &AuthorizationConfig,
        identity: IdentityConfig,
        engine: Arc<dyn AccessEngine>,
        realm: Arc<dyn SessionRealm>,
    ) -> Self {
        let resolver = AuthorizationResolver::new(resolver_config(authorization));
        let requirements = Arc::new(resolver.resolve(&service::descriptor()));
        info!(
            operations = requirements.len(),
            session_binding = authorization.session_binding,
            "Authorization pipeline wired"
        );

        let binder = SessionBinder::new(realm).with_enabled(authorization.session_binding);

        Self {
            pipeline: RestPipeline::new(requirements, binder, engine),
            identity: Arc::new(identity),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

fn resolver_config(authorization: &AuthorizationConfig) -> ResolverConfig {
    let config = ResolverConfig::default();
    match authorization.role_annotation.as_deref() {
        Some(name) => config.configure(name, &kind_registry(authorization)),
        None => config,
    }
}

fn kind_registry(authorization: &AuthorizationConfig) -> KindRegistry {
    let mut registry = KindRegistry::default();
    for name in &authorization.annotation_kinds {
        registry.register(AnnotationKind::new(name.clone()));
    }
    registry
}
