//! 外部协作方接口

use async_trait::async_trait;
use thiserror::Error;
use warden_common::{RequestEnvelope, ResultEnvelope};
use warden_errors::SecurityError;

/// 访问控制引擎错误
#[derive(Debug, Error)]
pub enum EngineError {
    /// 业务层安全失败，结果写回信封
    #[error(transparent)]
    Security(#[from] SecurityError),

    /// 引擎不可达或响应无法解析
    #[error("access engine unavailable: {0}")]
    Transport(String),
}

/// 访问控制引擎
///
/// 实际执行目录中的操作
#[async_trait]
pub trait AccessEngine: Send + Sync {
    async fn invoke(
        &self,
        operation: &str,
        request: RequestEnvelope,
    ) -> Result<ResultEnvelope, EngineError>;
}
