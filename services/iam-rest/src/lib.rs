//! iam-rest - IAM REST 门面
//!
//! 每次调用依次经过：身份提取 -> 会话绑定 -> 角色检查 -> 访问控制引擎 -> 状态码映射

pub mod api;
pub mod application;
pub mod infrastructure;
pub mod runtime;
pub mod state;

pub use state::AppState;
