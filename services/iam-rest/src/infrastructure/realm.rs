//! 序列化 principal Realm

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use tracing::debug;
use warden_auth_core::SessionRealm;
use warden_common::Session;
use warden_errors::{SecurityError, codes};

/// principal 的字符串形式为 base64 编码的会话 JSON
///
/// JSON `null` 表示没有会话
#[derive(Debug, Clone, Copy, Default)]
pub struct SerializedPrincipalRealm;

impl SerializedPrincipalRealm {
    fn decode(principal: &str) -> Result<Option<Session>, SecurityError> {
        let bytes = STANDARD.decode(principal.trim()).map_err(|e| {
            SecurityError::new(
                codes::PRINCIPAL_DECODE_FAILED,
                format!("principal is not valid base64: {e}"),
            )
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            SecurityError::new(
                codes::PRINCIPAL_DECODE_FAILED,
                format!("principal does not carry a session: {e}"),
            )
        })
    }

    /// 把会话编码为 principal 字符串形式
    pub fn encode(session: &Session) -> Result<String, serde_json::Error> {
        Ok(STANDARD.encode(serde_json::to_vec(session)?))
    }
}

#[async_trait]
impl SessionRealm for SerializedPrincipalRealm {
    async fn deserialize(&self, principal: &str) -> Result<Option<Session>, SecurityError> {
        let session = Self::decode(principal)?;
        debug!(found = session.is_some(), "Decoded serialized principal");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_encoded_session_is_restored() {
        let session = Session::new("jdoe", "s-42");
        let principal = SerializedPrincipalRealm::encode(&session).unwrap();

        let restored = SerializedPrincipalRealm.deserialize(&principal).await.unwrap();
        assert_eq!(restored, Some(session));
    }

    #[tokio::test]
    async fn test_null_means_no_session() {
        let principal = STANDARD.encode("null");
        let restored = SerializedPrincipalRealm.deserialize(&principal).await.unwrap();
        assert!(restored.is_none());
    }

    #[tokio::test]
    async fn test_garbage_is_rejected() {
        let err = SerializedPrincipalRealm
            .deserialize("jdoe")
            .await
            .unwrap_err();
        assert_eq!(err.error_id, codes::PRINCIPAL_DECODE_FAILED);

        let err = SerializedPrincipalRealm
            .deserialize(&STANDARD.encode("{\"userId\": 1}"))
            .await
            .unwrap_err();
        assert_eq!(err.error_id, codes::PRINCIPAL_DECODE_FAILED);
    }
}
