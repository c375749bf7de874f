//! common - 通用类型库
//!
//! 请求/响应信封与会话，服务和鉴权核心共用

pub mod envelope;
pub mod session;
pub mod types;

pub use envelope::*;
pub use session::*;
pub use types::*;
