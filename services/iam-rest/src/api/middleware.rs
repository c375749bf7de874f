//! 中间件

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::{debug, info_span};
use uuid::Uuid;
use warden_auth_core::CallerPrincipal;
use warden_config::IdentityConfig;

/// 追踪信息
#[derive(Debug, Clone)]
pub struct TraceInfo {
    pub trace_id: String,
}

/// 提取或生成追踪 ID
pub async fn trace_middleware(mut request: Request, next: Next) -> Response {
    let headers = request.headers();
    let trace_id = ["x-trace-id", "x-request-id", "x-correlation-id"]
        .iter()
        .find_map(|name| headers.get(*name).and_then(|v| v.to_str().ok()))
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::now_v7().to_string());

    request.extensions_mut().insert(TraceInfo { trace_id });
    next.run(request).await
}

/// TraceLayer 使用的请求 span
pub fn request_span(request: &Request) -> tracing::Span {
    let trace_id = request
        .extensions()
        .get::<TraceInfo>()
        .map(|t| t.trace_id.as_str())
        .unwrap_or("unknown");

    info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        trace_id = %trace_id
    )
}

/// 从认证代理写入的请求头中读取调用方身份
///
/// 没有用户头时视为匿名调用
pub fn extract_principal(headers: &HeaderMap, identity: &IdentityConfig) -> Option<CallerPrincipal> {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

    let user = header(&identity.user_header)?.trim();
    if user.is_empty() {
        return None;
    }

    let roles = header(&identity.roles_header)
        .map(|raw| {
            raw.split(|c: char| c == ',' || c.is_whitespace())
                .filter(|r| !r.is_empty())
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let principal = CallerPrincipal::new(user, roles);
    Some(match header(&identity.principal_header) {
        Some(serialized) => principal.with_serialized(serialized),
        None => principal,
    })
}

/// 身份中间件
///
/// 把调用方身份注入到请求扩展中
pub async fn identity_middleware(
    State(identity): State<Arc<IdentityConfig>>,
    mut request: Request,
    next: Next,
) -> Response {
    match extract_principal(request.headers(), &identity) {
        Some(principal) => {
            debug!(user = %principal.name, roles = principal.roles.len(), "Caller identified");
            request.extensions_mut().insert(principal);
        }
        None => debug!("Anonymous caller"),
    }
    next.run(request).await
}

/// 调用方身份提取器
///
/// 应该在 identity_middleware 之后使用；匿名调用时为 None
pub struct Caller(pub Option<CallerPrincipal>);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Caller(parts.extensions.get::<CallerPrincipal>().cloned()))
    }
}
