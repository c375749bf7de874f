//! 调用方身份

use std::collections::HashSet;
use std::fmt;

/// 单次调用的调用方身份，由认证层提供
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerPrincipal {
    pub name: String,
    pub roles: HashSet<String>,
    /// 传输层 principal 的序列化形式，供 Realm 还原会话
    pub serialized: Option<String>,
}

impl CallerPrincipal {
    pub fn new<I, S>(name: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            roles: roles.into_iter().map(Into::into).collect(),
            serialized: None,
        }
    }

    pub fn with_serialized(mut self, serialized: impl Into<String>) -> Self {
        self.serialized = Some(serialized.into());
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(String::as_str)
    }
}

/// 写出 principal 的字符串形式：优先使用序列化形式，否则为用户名
impl fmt::Display for CallerPrincipal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.serialized.as_deref().unwrap_or(&self.name))
    }
}
