//! warden-errors - 统一错误处理
//!
//! 安全域错误与传输层状态码的对应关系

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 错误码
///
/// 写入 ResultEnvelope 的 `error_code` 字段，0 表示成功
pub mod codes {
    pub const NO_ERROR: i32 = 0;

    /// 会话绑定时缺少传输层身份上下文
    pub const MISSING_TRANSPORT_CONTEXT: i32 = 1001;

    /// Realm 没有返回可用的会话
    pub const SESSION_UNAVAILABLE: i32 = 1002;

    /// 请求路径没有匹配的操作
    pub const OPERATION_NOT_FOUND: i32 = 1003;

    /// 传输层 principal 无法解码为会话
    pub const PRINCIPAL_DECODE_FAILED: i32 = 1004;
}

/// 默认的安全错误 HTTP 状态
pub const DEFAULT_SECURITY_STATUS: u16 = 403;

/// 访问控制引擎 / Realm 抛出的安全错误
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[error("{message} (error id {error_id})")]
pub struct SecurityError {
    pub error_id: i32,
    pub message: String,
    #[serde(default = "default_security_status")]
    pub http_status: u16,
}

fn default_security_status() -> u16 {
    DEFAULT_SECURITY_STATUS
}

impl SecurityError {
    pub fn new(error_id: i32, message: impl Into<String>) -> Self {
        Self {
            error_id,
            message: message.into(),
            http_status: DEFAULT_SECURITY_STATUS,
        }
    }

    pub fn with_http_status(mut self, http_status: u16) -> Self {
        self.http_status = http_status;
        self
    }
}

/// 应用错误类型
///
/// 只有在调用无法继续时才以 AppError 形式抛出；业务错误写入 ResultEnvelope
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error(transparent)]
    Security(#[from] SecurityError),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("External service error: {0}")]
    ExternalService(String),
}

impl AppError {
    pub fn access_denied(msg: impl Into<String>) -> Self {
        Self::AccessDenied(msg.into())
    }

    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn external_service(msg: impl Into<String>) -> Self {
        Self::ExternalService(msg.into())
    }

    /// 是否属于安全域错误
    pub fn is_security(&self) -> bool {
        matches!(
            self,
            Self::AccessDenied(_) | Self::Unauthenticated(_) | Self::Security(_)
        )
    }

    /// 是否为访问拒绝
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied(_))
    }

    /// 转换为 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            Self::AccessDenied(_) => 403,
            Self::Unauthenticated(_) | Self::Security(_) => 401,
            Self::Internal(_) | Self::ExternalService(_) => 500,
        }
    }
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;
