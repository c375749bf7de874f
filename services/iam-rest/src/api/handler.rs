//! 操作调用处理器

use axum::{
    Json,
    extract::{OriginalUri, State},
};
use tracing::debug;
use warden_common::RequestEnvelope;

use super::middleware::Caller;
use super::response::{ApiFault, Outbound};
use crate::application::catalog;
use crate::state::AppState;

/// 操作路径前缀
const REST_PREFIX: &str = "/rest";

/// `POST /rest/{*path}`
///
/// 路径中的操作名允许带结尾的 `/`，其余无法匹配的路径都分派到兜底操作
pub async fn invoke(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Caller(caller): Caller,
    Json(request): Json<RequestEnvelope>,
) -> Result<Outbound, ApiFault> {
    let requested = operation_name(uri.path());
    let op = catalog::dispatch(requested);
    debug!(%requested, dispatched = %op.name, "Dispatching operation");

    let envelope = state
        .pipeline
        .invoke(op, request, caller.as_ref(), uri.path())
        .await?;

    Ok(Outbound(envelope))
}

/// 取出前缀之后的操作名
fn operation_name(path: &str) -> &str {
    path.strip_prefix(REST_PREFIX)
        .unwrap_or(path)
        .trim_start_matches('/')
        .trim_end_matches('/')
}
