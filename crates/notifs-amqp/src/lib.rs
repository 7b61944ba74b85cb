//! AMQP 队列投递后端
//!
//! 实现 `notifs-core` 的渠道抽象：把通知以 JSON 形式发布到 AMQP broker，
//! 队列按发送方标识命名，路由键为接收方标识，供其 websocket 消费端订阅。
//! 每次投递独立建立并关闭一条连接，不做池化，也不保证送达。

pub mod broker;
pub mod channel;

pub use broker::{BrokerConnector, BrokerSession, LapinConnector};
pub use channel::QueueChannel;
