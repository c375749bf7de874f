//! 应用层

pub mod catalog;
pub mod pipeline;
pub mod ports;
pub mod service;

pub use catalog::{INVALID, Manager, OPERATIONS, Operation};
pub use pipeline::RestPipeline;
pub use ports::{AccessEngine, EngineError};
