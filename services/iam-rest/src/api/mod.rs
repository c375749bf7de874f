//! HTTP 接口层

pub mod handler;
pub mod middleware;
pub mod response;
pub mod routing;

pub use response::{ApiFault, Outbound};
pub use routing::router;
