//! 故障状态码映射

use http::StatusCode;
use tracing::error;
use warden_errors::AppError;

/// 故障分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultClass {
    /// 非安全域错误
    Generic,
    AccessDenied,
    /// 其他安全域错误
    Unauthenticated,
}

impl FaultClass {
    pub fn classify(err: &AppError) -> Self {
        if !err.is_security() {
            Self::Generic
        } else if err.is_access_denied() {
            Self::AccessDenied
        } else {
            Self::Unauthenticated
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            Self::Generic => StatusCode::INTERNAL_SERVER_ERROR,
            Self::AccessDenied => StatusCode::FORBIDDEN,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::AccessDenied => "access_denied",
            Self::Unauthenticated => "unauthenticated",
        }
    }
}

/// 故障响应：状态码 + 纯文本响应体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultResponse {
    pub status: StatusCode,
    pub body: String,
}

/// 把调用失败映射为传输层响应，不再序列化信封
pub fn map_fault(err: &AppError) -> FaultResponse {
    let class = FaultClass::classify(err);
    error!(class = class.as_str(), error = %err, "Request failed");
    metrics::counter!("faults_total", "class" => class.as_str()).increment(1);

    FaultResponse {
        status: class.status(),
        body: err.to_string(),
    }
}
