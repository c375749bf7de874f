//! 出站状态码

use http::StatusCode;
use tracing::warn;
use warden_common::ResultEnvelope;

/// 在序列化响应体之前决定传输层状态码
///
/// 信封带有合法的期望状态时使用它，否则沿用默认值
pub fn resolve_status(envelope: Option<&ResultEnvelope>, default: StatusCode) -> StatusCode {
    let Some(requested) = envelope.and_then(|env| env.http_status) else {
        return default;
    };

    match StatusCode::from_u16(requested) {
        Ok(status) => status,
        Err(_) => {
            warn!(status = requested, "Ignoring invalid response status");
            default
        }
    }
}
