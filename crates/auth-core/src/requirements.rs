//! 操作 -> 角色 映射

use std::collections::HashMap;

use crate::RoleSet;

/// 装配时解析得到的角色要求表，构造后只读
///
/// 不在表中的操作不受限制
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleRequirementMap {
    entries: HashMap<String, RoleSet>,
}

impl RoleRequirementMap {
    pub fn get(&self, operation: &str) -> Option<&RoleSet> {
        self.entries.get(operation)
    }

    pub fn is_protected(&self, operation: &str) -> bool {
        self.entries.contains_key(operation)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RoleSet)> {
        self.entries.iter().map(|(op, roles)| (op.as_str(), roles))
    }
}

impl<K: Into<String>> FromIterator<(K, RoleSet)> for RoleRequirementMap {
    fn from_iter<T: IntoIterator<Item = (K, RoleSet)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(op, roles)| (op.into(), roles))
                .collect(),
        }
    }
}
