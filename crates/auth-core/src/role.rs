//! 角色集合

use std::collections::BTreeSet;
use std::fmt;

/// 一个操作所需的角色集合
///
/// 内部以空白分隔的字符串保存；消费方必须按空白切分，角色之间无顺序。
#[derive(Debug, Clone, Default)]
pub struct RoleSet(String);

impl RoleSet {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = names
            .into_iter()
            .flat_map(|name| {
                name.as_ref()
                    .split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>()
            .join(" ");
        Self(joined)
    }

    /// 从已拼接的字符串构造
    pub fn parse(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }

    pub fn contains(&self, role: &str) -> bool {
        self.iter().any(|r| r == role)
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// 是否与调用方持有的角色有交集
    pub fn intersects<'a, I>(&self, held: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        held.into_iter().any(|role| self.contains(role))
    }

    fn tokens(&self) -> BTreeSet<&str> {
        self.iter().collect()
    }
}

impl PartialEq for RoleSet {
    fn eq(&self, other: &Self) -> bool {
        self.tokens() == other.tokens()
    }
}

impl Eq for RoleSet {}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
