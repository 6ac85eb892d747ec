//! 工具模块
//!
//! - [`logger`] - tracing 日志初始化

pub mod logger;
