//! 通知分发核心库
//!
//! 包含通知数据模型、投递渠道抽象、错误分类、配置加载与日志初始化等
//! 各投递后端共用的基础代码。具体的 broker 后端（如 AMQP）在独立 crate 中实现。

pub mod channel;
pub mod config;
pub mod error;
pub mod notification;
pub mod observability;
