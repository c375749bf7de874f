//! 基础设施层

pub mod engine;
pub mod realm;

pub use engine::RemoteEngine;
pub use realm::SerializedPrincipalRealm;
