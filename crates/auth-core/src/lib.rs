//! warden-auth-core - 方法级授权核心库
//!
//! - `resolver`: 在装配时从声明式元数据解析 操作 -> 角色 映射
//! - `enforcer`: 每次调用前按映射检查调用方角色
//! - `session`: 保证每次调用都带有可用的安全会话
//! - `outbound` / `fault`: 把领域结果和安全错误映射为传输层状态码

pub mod enforcer;
pub mod fault;
pub mod metadata;
pub mod outbound;
pub mod principal;
pub mod requirements;
pub mod resolver;
pub mod role;
pub mod session;

pub use enforcer::AuthorizationEnforcer;
pub use fault::{FaultClass, FaultResponse, map_fault};
pub use metadata::{
    Annotation, AnnotationKind, KindRegistry, MetadataError, OperationDescriptor, ROLES_ALLOWED,
    TypeDescriptor,
};
pub use outbound::resolve_status;
pub use principal::CallerPrincipal;
pub use requirements::RoleRequirementMap;
pub use resolver::{AuthorizationResolver, ResolverConfig, SKIP_OPERATIONS};
pub use role::RoleSet;
pub use session::{SessionBinder, SessionRealm};
