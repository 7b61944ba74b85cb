//! broker 连接抽象
//!
//! 将 lapin 的底层 API 封装为渠道友好的连接器/会话两层抽象，
//! 使连接的获取与释放成为显式注入的依赖：生产环境走真实的 AMQP 连接，
//! 测试中用 mock 记录并校验每一次 broker 交互。

use async_trait::async_trait;
use lapin::options::{BasicPublishOptions, QueueDeclareOptions};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Connection, ConnectionProperties};

use notifs_core::error::{ChannelError, Result};

/// AMQP 正常关闭的应答码
const REPLY_SUCCESS: u16 = 200;

// ---------------------------------------------------------------------------
// 抽象层
// ---------------------------------------------------------------------------

/// 一条已建立的 broker 会话
///
/// 队列声明、消息发布与连接关闭都经由它完成。一次投递对应一条会话，
/// 会话不跨调用复用。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BrokerSession: Send + Sync {
    /// 声明队列
    ///
    /// 幂等操作：队列已存在时为 no-op，不存在时以 broker 默认属性创建；
    /// 与既有队列属性冲突时由 broker 拒绝。
    async fn declare_queue(&self, queue: &str) -> Result<()>;

    /// 经默认 exchange 按路由键发布一条消息
    async fn publish(&self, routing_key: &str, body: &[u8]) -> Result<()>;

    /// 关闭底层连接
    async fn close(&self) -> Result<()>;
}

/// broker 连接器
///
/// 渠道持有连接器而非连接本身，每次投递时新建一条会话，
/// 连接生命周期因此完全落在单次 `notify` 调用内。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BrokerConnector: Send + Sync {
    /// 按 URL 建立新连接并打开一条会话
    async fn connect(&self, url: &str) -> Result<Box<dyn BrokerSession>>;
}

// ---------------------------------------------------------------------------
// lapin 实现
// ---------------------------------------------------------------------------

/// 基于 lapin 的 AMQP 连接器
#[derive(Debug, Default, Clone)]
pub struct LapinConnector;

#[async_trait]
impl BrokerConnector for LapinConnector {
    async fn connect(&self, url: &str) -> Result<Box<dyn BrokerSession>> {
        let connection = Connection::connect(url, ConnectionProperties::default())
            .await
            .map_err(|e| ChannelError::Connection(e.to_string()))?;

        let channel = connection
            .create_channel()
            .await
            .map_err(|e| ChannelError::Connection(e.to_string()))?;

        Ok(Box::new(LapinSession {
            connection,
            channel,
        }))
    }
}

/// 持有一条连接及其上的 AMQP channel 的会话
pub struct LapinSession {
    connection: Connection,
    channel: lapin::Channel,
}

#[async_trait]
impl BrokerSession for LapinSession {
    async fn declare_queue(&self, queue: &str) -> Result<()> {
        self.channel
            .queue_declare(queue, QueueDeclareOptions::default(), FieldTable::default())
            .await
            .map_err(|e| ChannelError::Broker(e.to_string()))?;
        Ok(())
    }

    async fn publish(&self, routing_key: &str, body: &[u8]) -> Result<()> {
        self.channel
            .basic_publish(
                "",
                routing_key,
                BasicPublishOptions::default(),
                body,
                BasicProperties::default(),
            )
            .await
            .map_err(|e| ChannelError::Broker(e.to_string()))?
            .await
            .map_err(|e| ChannelError::Broker(e.to_string()))?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.connection
            .close(REPLY_SUCCESS, "normal shutdown")
            .await
            .map_err(|e| ChannelError::Broker(e.to_string()))
    }
}
