//! 会话绑定
//!
//! 保证进入访问控制引擎的每个请求都带有安全会话

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};
use warden_common::{RequestEnvelope, ResultEnvelope, Session};
use warden_errors::{SecurityError, codes};

use crate::CallerPrincipal;

/// 从传输层 principal 还原安全会话
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRealm: Send + Sync {
    /// 反序列化 principal 的字符串形式
    async fn deserialize(&self, principal: &str) -> Result<Option<Session>, SecurityError>;
}

/// 会话绑定器
#[derive(Clone)]
pub struct SessionBinder {
    realm: Arc<dyn SessionRealm>,
    enabled: bool,
}

impl SessionBinder {
    pub fn new(realm: Arc<dyn SessionRealm>) -> Self {
        Self {
            realm,
            enabled: true,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// 为请求绑定会话
    ///
    /// 失败时返回应直接回给调用方的错误信封
    #[allow(clippy::result_large_err)]
    pub async fn bind(
        &self,
        request: &mut RequestEnvelope,
        principal: Option<&CallerPrincipal>,
    ) -> Result<(), ResultEnvelope> {
        if !self.enabled || request.has_session() {
            return Ok(());
        }

        let Some(principal) = principal else {
            warn!("No transport identity context to bind a session from");
            metrics::counter!("session_bind_failures_total", "reason" => "missing_context")
                .increment(1);
            return Err(ResultEnvelope::error(
                codes::MISSING_TRANSPORT_CONTEXT,
                "no security context available on the transport",
            ));
        };

        match self.realm.deserialize(&principal.to_string()).await {
            Ok(Some(session)) => {
                debug!(user = %principal.name, session_id = %session.session_id, "Session bound");
                request.session = Some(session);
                Ok(())
            }
            Ok(None) => {
                warn!(user = %principal.name, "Realm returned no session");
                metrics::counter!("session_bind_failures_total", "reason" => "unavailable")
                    .increment(1);
                Err(ResultEnvelope::error(
                    codes::SESSION_UNAVAILABLE,
                    format!("no session available for {}", principal.name),
                )
                .with_http_status(403))
            }
            Err(e) => {
                warn!(user = %principal.name, error_id = e.error_id, error = %e.message, "Realm rejected principal");
                metrics::counter!("session_bind_failures_total", "reason" => "security")
                    .increment(1);
                Err(ResultEnvelope::error(e.error_id, e.message).with_http_status(e.http_status))
            }
        }
    }
}
