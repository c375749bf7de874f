//! 安全会话

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 单次调用的安全会话
///
/// 对本服务不透明：由 Realm 从传输层 principal 反序列化，或由调用方随请求携带。
/// 只随请求信封流转，调用结束即丢弃。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub session_id: String,
    #[serde(default)]
    pub is_authenticated: bool,
    /// 引擎定义的其余字段，原样透传
    #[serde(default, flatten)]
    pub attributes: Map<String, Value>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            session_id: session_id.into(),
            is_authenticated: true,
            attributes: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_fields_are_preserved() {
        let json = r#"{"userId":"jdoe","sessionId":"s-1","isAuthenticated":true,"roles":["a","b"]}"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.user_id, "jdoe");
        assert!(session.is_authenticated);
        assert_eq!(session.attributes["roles"], serde_json::json!(["a", "b"]));

        let back = serde_json::to_value(&session).unwrap();
        assert_eq!(back["roles"], serde_json::json!(["a", "b"]));
    }
}
