//! 预测服务模块

pub mod handlers;
pub mod router;
pub mod types;
