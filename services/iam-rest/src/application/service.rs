//! 服务类型登记
//!
//! 服务契约（接口）列出全部操作，服务实现为每个操作声明所需角色

use std::sync::Arc;

use once_cell::sync::Lazy;
use warden_auth_core::{Annotation, OperationDescriptor, TypeDescriptor};

use super::catalog::{OPERATIONS, Operation};

pub const CONTRACT_NAME: &str = "warden.rest.IamContract";
pub const SERVICE_NAME: &str = "warden.rest.IamService";

static CONTRACT: Lazy<Arc<TypeDescriptor>> = Lazy::new(|| {
    Arc::new(
        TypeDescriptor::new(CONTRACT_NAME)
            .operations(OPERATIONS.iter().map(|op| OperationDescriptor::public(op.name))),
    )
});

/// 服务契约描述
pub fn contract() -> Arc<TypeDescriptor> {
    Arc::clone(&CONTRACT)
}

/// 服务实现描述
pub fn descriptor() -> TypeDescriptor {
    TypeDescriptor::new(SERVICE_NAME)
        .operations(OPERATIONS.iter().map(declare))
        .implements(contract())
}

fn declare(op: &Operation) -> OperationDescriptor {
    OperationDescriptor::public(op.name)
        .annotate(Annotation::roles_allowed(op.manager.roles().iter().copied()))
}
