//! 调用前角色检查

use std::sync::Arc;

use tracing::{debug, warn};
use warden_errors::{AppError, AppResult};

use crate::{CallerPrincipal, RoleRequirementMap};

/// 按解析好的映射检查调用方角色
#[derive(Debug, Clone)]
pub struct AuthorizationEnforcer {
    requirements: Arc<RoleRequirementMap>,
}

impl AuthorizationEnforcer {
    pub fn new(requirements: Arc<RoleRequirementMap>) -> Self {
        Self { requirements }
    }

    pub fn requirements(&self) -> &RoleRequirementMap {
        &self.requirements
    }

    /// 检查调用方是否可以调用操作
    ///
    /// 不在映射中的操作直接放行
    pub fn authorize(&self, operation: &str, principal: Option<&CallerPrincipal>) -> AppResult<()> {
        let Some(required) = self.requirements.get(operation) else {
            debug!(%operation, "Operation has no role requirement");
            metrics::counter!("authz_decisions_total", "outcome" => "unrestricted").increment(1);
            return Ok(());
        };

        let Some(principal) = principal else {
            warn!(%operation, "Protected operation invoked without a caller principal");
            metrics::counter!("authz_decisions_total", "outcome" => "unauthenticated").increment(1);
            return Err(AppError::unauthenticated(format!(
                "operation {operation} requires an authenticated caller"
            )));
        };

        if required.intersects(principal.roles()) {
            debug!(%operation, user = %principal.name, "Caller authorized");
            metrics::counter!("authz_decisions_total", "outcome" => "granted").increment(1);
            Ok(())
        } else {
            warn!(
                %operation,
                user = %principal.name,
                required = %required,
                "Caller holds none of the required roles"
            );
            metrics::counter!("authz_decisions_total", "outcome" => "denied").increment(1);
            Err(AppError::access_denied(format!(
                "{} may not invoke {operation}",
                principal.name
            )))
        }
    }
}
