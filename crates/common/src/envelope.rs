//! 请求 / 响应信封

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ContextId, Session};

/// 入站请求信封
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    /// 调用方已附带的会话
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_id: Option<ContextId>,
    /// 主业务载荷
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<Value>,
    /// 次业务载荷
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity2: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default)]
    pub flag: bool,
    /// 结果数量上限
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl RequestEnvelope {
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }
}

/// 响应业务载荷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Payload {
    Entity(Value),
    Entities(Vec<Value>),
    Values(Vec<String>),
    ValueSet(BTreeSet<String>),
}

/// 出站结果信封
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope {
    /// 0 表示成功
    pub error_code: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// 期望的传输层状态码，为空时沿用传输层默认值
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
}

impl ResultEnvelope {
    /// 成功响应
    pub fn success() -> Self {
        Self::default()
    }

    /// 错误响应
    pub fn error(error_code: i32, message: impl Into<String>) -> Self {
        Self {
            error_code,
            error_message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn is_success(&self) -> bool {
        self.error_code == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_envelope_defaults() {
        let request: RequestEnvelope = serde_json::from_str("{}").unwrap();
        assert!(!request.has_session());
        assert!(!request.flag);
        assert!(request.limit.is_none());
    }

    #[test]
    fn test_request_envelope_camel_case() {
        let request: RequestEnvelope = serde_json::from_value(json!({
            "contextId": "acme",
            "entity": {"userId": "jdoe"},
            "value": "x",
            "flag": true,
            "limit": 10
        }))
        .unwrap();
        assert_eq!(request.context_id, Some(ContextId::new("acme")));
        assert_eq!(request.entity, Some(json!({"userId": "jdoe"})));
        assert!(request.flag);
        assert_eq!(request.limit, Some(10));
    }

    #[test]
    fn test_error_envelope() {
        let envelope = ResultEnvelope::error(12, "bad").with_http_status(404);
        assert!(!envelope.is_success());

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json, json!({"errorCode": 12, "errorMessage": "bad", "httpStatus": 404}));
    }

    #[test]
    fn test_payload_is_tagged() {
        let envelope = ResultEnvelope::success()
            .with_payload(Payload::ValueSet(["b".to_string(), "a".to_string()].into()));
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["payload"], json!({"valueSet": ["a", "b"]}));
        assert!(json.get("httpStatus").is_none());
    }
}
