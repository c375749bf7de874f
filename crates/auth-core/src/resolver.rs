//! 授权解析器
//!
//! 装配时遍历服务类型的声明式元数据，生成 操作 -> 角色 映射。
//! 查找顺序：类型自身 -> 父类型 -> 各接口（按声明顺序），第一个非空结果即为最终结果。

use tracing::{debug, info, warn};

use crate::metadata::{Annotation, AnnotationKind, KindRegistry, TypeDescriptor};
use crate::{RoleRequirementMap, RoleSet};

/// 不参与授权映射的通用操作名
pub const SKIP_OPERATIONS: [&str; 6] = [
    "wait",
    "notify",
    "notifyAll",
    "equals",
    "toString",
    "hashCode",
];

/// 解析器配置，构造后不可变
#[derive(Debug, Clone, Default)]
pub struct ResolverConfig {
    annotation_kind: AnnotationKind,
}

impl ResolverConfig {
    pub fn annotation_kind(&self) -> &AnnotationKind {
        &self.annotation_kind
    }

    /// 选择声明角色所用的注解类型
    ///
    /// 未登记的类型名会被拒绝，保留当前值
    pub fn configure(self, name: &str, registry: &KindRegistry) -> Self {
        info!(annotation = %name, "Configuring role annotation kind");
        match registry.lookup(name) {
            Some(annotation_kind) => Self { annotation_kind },
            None => {
                warn!(
                    annotation = %name,
                    retained = %self.annotation_kind.name(),
                    "Unknown role annotation kind, keeping current"
                );
                self
            }
        }
    }
}

/// 声明来源
enum AnnotationSource<'a> {
    SelfType(&'a TypeDescriptor),
    Supertype(&'a TypeDescriptor),
    Interface(&'a TypeDescriptor),
}

impl AnnotationSource<'_> {
    fn declarations(&self, resolver: &AuthorizationResolver) -> RoleRequirementMap {
        match self {
            Self::SelfType(ty) => resolver.own_declarations(ty),
            Self::Supertype(ty) | Self::Interface(ty) => resolver.resolve_hierarchy(ty),
        }
    }
}

/// 授权解析器
#[derive(Debug, Clone, Default)]
pub struct AuthorizationResolver {
    config: ResolverConfig,
}

impl AuthorizationResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// 解析服务类型的角色要求表
    pub fn resolve(&self, service: &TypeDescriptor) -> RoleRequirementMap {
        info!(service = %service.name(), "Resolving role requirements");
        let map = self.resolve_hierarchy(service);

        if map.is_empty() {
            warn!(
                service = %service.name(),
                "Role requirement map is empty, the service is not protected"
            );
        } else {
            for (operation, roles) in map.iter() {
                debug!(%operation, %roles, "Operation role requirement");
            }
        }
        map
    }

    fn resolve_hierarchy(&self, ty: &TypeDescriptor) -> RoleRequirementMap {
        let sources = std::iter::once(AnnotationSource::SelfType(ty))
            .chain(ty.supertype().map(AnnotationSource::Supertype))
            .chain(ty.interfaces().map(AnnotationSource::Interface));

        sources
            .map(|source| source.declarations(self))
            .find(|map| !map.is_empty())
            .unwrap_or_default()
    }

    /// 类型自身直接声明的公开操作
    fn own_declarations(&self, ty: &TypeDescriptor) -> RoleRequirementMap {
        let class_roles = self.declared_roles(ty.annotations(), ty.name());

        ty.declared_operations()
            .iter()
            .filter(|op| op.is_public() && !SKIP_OPERATIONS.contains(&op.name()))
            .filter_map(|op| {
                self.declared_roles(op.annotations(), op.name())
                    .or_else(|| class_roles.clone())
                    .map(|roles| (op.name().to_string(), roles))
            })
            .collect()
    }

    /// 读取第一个目标类型注解上的角色；读取失败视为未声明
    fn declared_roles(&self, annotations: &[Annotation], owner: &str) -> Option<RoleSet> {
        let kind = self.config.annotation_kind();
        let annotation = annotations.iter().find(|ann| ann.kind() == kind)?;

        match annotation.roles() {
            Ok(roles) => Some(RoleSet::from_names(roles)),
            Err(e) => {
                warn!(
                    %owner,
                    annotation = %kind.name(),
                    error = %e,
                    "Failed to read declared roles"
                );
                None
            }
        }
    }
}
