//! 声明式元数据
//!
//! 服务类型在装配时登记自己的类型层级、公开操作以及挂在类型/操作上的注解，
//! 授权解析器只读取这份登记表。

use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

/// 默认的角色声明注解类型
pub const ROLES_ALLOWED: &str = "warden.security.RolesAllowed";

/// 注解类型（按全名识别）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationKind(Cow<'static, str>);

impl AnnotationKind {
    pub const fn roles_allowed() -> Self {
        Self(Cow::Borrowed(ROLES_ALLOWED))
    }

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Default for AnnotationKind {
    fn default() -> Self {
        Self::roles_allowed()
    }
}

/// 已知注解类型登记表
///
/// 只有登记过的类型才能被配置为角色声明类型
#[derive(Debug, Clone)]
pub struct KindRegistry {
    kinds: HashSet<AnnotationKind>,
}

impl KindRegistry {
    pub fn register(&mut self, kind: AnnotationKind) -> &mut Self {
        self.kinds.insert(kind);
        self
    }

    pub fn lookup(&self, name: &str) -> Option<AnnotationKind> {
        self.kinds.iter().find(|kind| kind.name() == name).cloned()
    }
}

impl Default for KindRegistry {
    fn default() -> Self {
        Self {
            kinds: HashSet::from([AnnotationKind::roles_allowed()]),
        }
    }
}

/// 读取注解值失败
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("annotation value accessor is not accessible: {0}")]
    Inaccessible(String),

    #[error("annotation value accessor failed: {0}")]
    Invocation(String),

    #[error("annotation has no value accessor")]
    MissingValue,
}

/// 一次注解出现
#[derive(Debug, Clone)]
pub struct Annotation {
    kind: AnnotationKind,
    value: Result<Vec<String>, MetadataError>,
}

impl Annotation {
    pub fn new<I, S>(kind: AnnotationKind, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            value: Ok(roles.into_iter().map(Into::into).collect()),
        }
    }

    pub fn roles_allowed<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(AnnotationKind::roles_allowed(), roles)
    }

    /// 值无法读取的注解
    pub fn unreadable(kind: AnnotationKind, error: MetadataError) -> Self {
        Self {
            kind,
            value: Err(error),
        }
    }

    pub fn kind(&self) -> &AnnotationKind {
        &self.kind
    }

    pub fn roles(&self) -> Result<&[String], &MetadataError> {
        self.value.as_deref()
    }
}

/// 操作描述
#[derive(Debug, Clone)]
pub struct OperationDescriptor {
    name: Cow<'static, str>,
    public: bool,
    annotations: Vec<Annotation>,
}

impl OperationDescriptor {
    pub fn public(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            public: true,
            annotations: Vec::new(),
        }
    }

    pub fn private(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            public: false,
            ..Self::public(name)
        }
    }

    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

/// 类型描述：自身注解、直接声明的操作、父类型和实现的接口
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    name: Cow<'static, str>,
    annotations: Vec<Annotation>,
    operations: Vec<OperationDescriptor>,
    supertype: Option<Arc<TypeDescriptor>>,
    interfaces: Vec<Arc<TypeDescriptor>>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            annotations: Vec::new(),
            operations: Vec::new(),
            supertype: None,
            interfaces: Vec::new(),
        }
    }

    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn operation(mut self, operation: OperationDescriptor) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn operations<I>(mut self, operations: I) -> Self
    where
        I: IntoIterator<Item = OperationDescriptor>,
    {
        self.operations.extend(operations);
        self
    }

    pub fn extends(mut self, supertype: Arc<TypeDescriptor>) -> Self {
        self.supertype = Some(supertype);
        self
    }

    /// 按声明顺序追加实现的接口
    pub fn implements(mut self, interface: Arc<TypeDescriptor>) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn declared_operations(&self) -> &[OperationDescriptor] {
        &self.operations
    }

    pub fn supertype(&self) -> Option<&TypeDescriptor> {
        self.supertype.as_deref()
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.interfaces.iter().map(Arc::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_knows_default_kind() {
        let registry = KindRegistry::default();
        assert_eq!(
            registry.lookup(ROLES_ALLOWED),
            Some(AnnotationKind::roles_allowed())
        );
        assert!(registry.lookup("acme.Secured").is_none());
    }

    #[test]
    fn test_registry_register() {
        let mut registry = KindRegistry::default();
        registry.register(AnnotationKind::new("acme.Secured"));
        assert!(registry.lookup("acme.Secured").is_some());
    }

    #[test]
    fn test_unreadable_annotation() {
        let ann = Annotation::unreadable(
            AnnotationKind::roles_allowed(),
            MetadataError::Invocation("boom".into()),
        );
        assert_eq!(
            ann.roles(),
            Err(&MetadataError::Invocation("boom".into()))
        );
        let ann = Annotation::roles_allowed(["a"]);
        assert_eq!(ann.roles().unwrap(), ["a".to_string()].as_slice());
    }

    #[test]
    fn test_type_builder() {
        let base = Arc::new(TypeDescriptor::new("Base"));
        let api = Arc::new(TypeDescriptor::new("Api"));
        let ty = TypeDescriptor::new("Foo")
            .operation(OperationDescriptor::public("bar"))
            .operation(OperationDescriptor::private("hidden"))
            .extends(base)
            .implements(api);

        assert_eq!(ty.declared_operations().len(), 2);
        assert!(!ty.declared_operations()[1].is_public());
        assert_eq!(ty.supertype().map(TypeDescriptor::name), Some("Base"));
        assert_eq!(ty.interfaces().map(TypeDescriptor::name).collect::<Vec<_>>(), vec!["Api"]);
    }
}
