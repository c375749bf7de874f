//! 响应映射

use std::any::Any;

use axum::{
    Json,
    body::Body,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use warden_auth_core::{map_fault, resolve_status};
use warden_common::ResultEnvelope;
use warden_errors::AppError;

/// 正常结果：先决定状态码，再序列化信封
pub struct Outbound(pub ResultEnvelope);

impl IntoResponse for Outbound {
    fn into_response(self) -> Response {
        let status = resolve_status(Some(&self.0), StatusCode::OK);
        (status, Json(self.0)).into_response()
    }
}

/// 调用失败：纯文本响应体，不序列化信封
#[derive(Debug)]
pub struct ApiFault(pub AppError);

impl From<AppError> for ApiFault {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiFault {
    fn into_response(self) -> Response {
        let fault = map_fault(&self.0);
        (
            fault.status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            fault.body,
        )
            .into_response()
    }
}

/// CatchPanicLayer 的处理函数，panic 按普通故障处理
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    ApiFault(AppError::internal(detail)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_errors::SecurityError;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_outbound_uses_envelope_status() {
        let response = Outbound(ResultEnvelope::error(7, "missing").with_http_status(404))
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("\"errorCode\":7"));

        let response = Outbound(ResultEnvelope::success()).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_fault_body_is_raw_message() {
        let response = ApiFault(AppError::access_denied("guest")).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert_eq!(body_text(response).await, "Access denied: guest");

        let response = ApiFault(SecurityError::new(3, "expired").into()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = ApiFault(AppError::external_service("down")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_panic_is_generic_fault() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Internal error: boom");
    }
}
