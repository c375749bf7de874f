//! 单次调用的处理流程
//!
//! 会话绑定 -> 角色检查 -> 引擎调用

use std::sync::Arc;

use tracing::{info, warn};
use warden_auth_core::{AuthorizationEnforcer, CallerPrincipal, RoleRequirementMap, SessionBinder};
use warden_common::{RequestEnvelope, ResultEnvelope};
use warden_errors::{AppError, AppResult, codes};

use super::catalog::{INVALID, Operation};
use super::ports::{AccessEngine, EngineError};

#[derive(Clone)]
pub struct RestPipeline {
    enforcer: AuthorizationEnforcer,
    binder: SessionBinder,
    engine: Arc<dyn AccessEngine>,
}

impl RestPipeline {
    pub fn new(
        requirements: Arc<RoleRequirementMap>,
        binder: SessionBinder,
        engine: Arc<dyn AccessEngine>,
    ) -> Self {
        Self {
            enforcer: AuthorizationEnforcer::new(requirements),
            binder,
            engine,
        }
    }

    pub fn requirements(&self) -> &RoleRequirementMap {
        self.enforcer.requirements()
    }

    /// 执行一次调用
    ///
    /// 会话绑定失败和引擎返回的安全失败写入信封；授权失败和引擎不可用返回错误
    pub async fn invoke(
        &self,
        operation: &Operation,
        mut request: RequestEnvelope,
        principal: Option<&CallerPrincipal>,
        path: &str,
    ) -> AppResult<ResultEnvelope> {
        if operation.binds_session()
            && let Err(envelope) = self.binder.bind(&mut request, principal).await
        {
            return Ok(envelope);
        }

        self.enforcer.authorize(operation.name, principal)?;

        if operation.name == INVALID {
            let user = principal.map(|p| p.name.as_str()).unwrap_or_default();
            let message = format!(
                "Could not find a matching service. HTTP request URI: {path}. User: {user}"
            );
            warn!(%path, %user, "No matching operation");
            return Ok(ResultEnvelope::error(codes::OPERATION_NOT_FOUND, message));
        }

        match self.engine.invoke(operation.name, request).await {
            Ok(envelope) => Ok(envelope),
            Err(EngineError::Security(e)) => {
                info!(
                    operation = %operation.name,
                    error_id = e.error_id,
                    "Access engine reported a security failure"
                );
                Ok(ResultEnvelope::error(e.error_id, e.message))
            }
            Err(EngineError::Transport(msg)) => Err(AppError::external_service(msg)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use warden_auth_core::{RoleSet, SessionRealm};
    use warden_common::Session;
    use warden_errors::SecurityError;

    use super::*;
    use crate::application::catalog::lookup;

    /// 记录收到的请求
    #[derive(Default)]
    struct RecordingEngine {
        calls: Mutex<Vec<(String, RequestEnvelope)>>,
        failure: Option<fn() -> EngineError>,
    }

    impl RecordingEngine {
        fn failing(failure: fn() -> EngineError) -> Self {
            Self {
                failure: Some(failure),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<(String, RequestEnvelope)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AccessEngine for RecordingEngine {
        async fn invoke(
            &self,
            operation: &str,
            request: RequestEnvelope,
        ) -> Result<ResultEnvelope, EngineError> {
            self.calls
                .lock()
                .unwrap()
                .push((operation.to_string(), request));
            match self.failure {
                Some(failure) => Err(failure()),
                None => Ok(ResultEnvelope::success()),
            }
        }
    }

    struct FixedRealm;

    #[async_trait]
    impl SessionRealm for FixedRealm {
        async fn deserialize(&self, principal: &str) -> Result<Option<Session>, SecurityError> {
            Ok(Some(Session::new(principal, "s-1")))
        }
    }

    fn pipeline(engine: Arc<RecordingEngine>) -> RestPipeline {
        let map: RoleRequirementMap = [
            ("addUser", RoleSet::parse("admin")),
            ("createSession", RoleSet::parse("access")),
            (INVALID, RoleSet::parse("admin access")),
        ]
        .into_iter()
        .collect();
        RestPipeline::new(
            Arc::new(map),
            SessionBinder::new(Arc::new(FixedRealm)),
            engine,
        )
    }

    fn admin() -> CallerPrincipal {
        CallerPrincipal::new("root", ["admin"])
    }

    #[tokio::test]
    async fn test_session_is_bound_before_engine() {
        let engine = Arc::new(RecordingEngine::default());
        let op = lookup("addUser").unwrap();

        let result = pipeline(engine.clone())
            .invoke(op, RequestEnvelope::default(), Some(&admin()), "/rest/addUser")
            .await
            .unwrap();

        assert!(result.is_success());
        let calls = engine.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "addUser");
        assert_eq!(calls[0].1.session.as_ref().unwrap().user_id, "root");
    }

    #[tokio::test]
    async fn test_access_operation_skips_binding() {
        let engine = Arc::new(RecordingEngine::default());
        let op = lookup("createSession").unwrap();
        let caller = CallerPrincipal::new("svc", ["access"]);

        pipeline(engine.clone())
            .invoke(op, RequestEnvelope::default(), Some(&caller), "/rest/createSession")
            .await
            .unwrap();

        assert!(engine.calls()[0].1.session.is_none());
    }

    #[tokio::test]
    async fn test_denied_caller_never_reaches_engine() {
        let engine = Arc::new(RecordingEngine::default());
        let op = lookup("addUser").unwrap();
        let guest = CallerPrincipal::new("guest", ["guest"]);

        let err = pipeline(engine.clone())
            .invoke(op, RequestEnvelope::default(), Some(&guest), "/rest/addUser")
            .await
            .unwrap_err();

        assert!(err.is_access_denied());
        assert!(engine.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_context_returns_envelope() {
        let engine = Arc::new(RecordingEngine::default());
        let op = lookup("addUser").unwrap();

        let result = pipeline(engine.clone())
            .invoke(op, RequestEnvelope::default(), None, "/rest/addUser")
            .await
            .unwrap();

        assert_eq!(result.error_code, codes::MISSING_TRANSPORT_CONTEXT);
        assert!(engine.calls().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_operation_does_not_call_engine() {
        let engine = Arc::new(RecordingEngine::default());
        let op = lookup(INVALID).unwrap();

        let result = pipeline(engine.clone())
            .invoke(op, RequestEnvelope::default(), Some(&admin()), "/rest/nope")
            .await
            .unwrap();

        assert_eq!(result.error_code, codes::OPERATION_NOT_FOUND);
        assert!(result.error_message.unwrap().contains("/rest/nope"));
        assert!(engine.calls().is_empty());
    }

    #[tokio::test]
    async fn test_engine_security_failure_is_folded_into_envelope() {
        let engine = Arc::new(RecordingEngine::failing(|| {
            SecurityError::new(1033, "user locked").with_http_status(401).into()
        }));
        let op = lookup("addUser").unwrap();

        let result = pipeline(engine)
            .invoke(op, RequestEnvelope::default(), Some(&admin()), "/rest/addUser")
            .await
            .unwrap();

        assert_eq!(result.error_code, 1033);
        assert_eq!(result.error_message.as_deref(), Some("user locked"));
        assert!(result.http_status.is_none());
    }

    #[tokio::test]
    async fn test_engine_transport_failure_is_a_fault() {
        let engine = Arc::new(RecordingEngine::failing(|| {
            EngineError::Transport("connection refused".into())
        }));
        let op = lookup("addUser").unwrap();

        let err = pipeline(engine)
            .invoke(op, RequestEnvelope::default(), Some(&admin()), "/rest/addUser")
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 500);
    }
}
