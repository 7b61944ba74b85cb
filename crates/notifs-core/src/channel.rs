//! 投递渠道抽象
//!
//! 通过 `NotificationChannel` trait 抽象投递行为，各后端（AMQP 队列、
//! 未来的 WebPush、邮件等）提供独立实现，调用方可以统一对待所有后端。

use async_trait::async_trait;

use crate::error::Result;
use crate::notification::Message;

/// 通知投递渠道 trait，各后端实现具体的投递逻辑
///
/// `construct_message` 与 `notify` 分别对应"构造负载"与"执行投递"两步，
/// 以类型化的 [`Message`] 衔接；只需要一步到位时用 [`send`](Self::send)。
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// 从持有的通知数据构造线上消息
    ///
    /// 给定相同的通知数据结果必须一致，且不产生任何副作用（不触碰网络）。
    fn construct_message(&self) -> Result<Message>;

    /// 投递消息
    ///
    /// 可能产生网络 IO；失败分类见 [`ChannelError`](crate::error::ChannelError)，
    /// 渠道自身不重试也不吞错。
    async fn notify(&self, message: &Message) -> Result<()>;

    /// 构造并投递，一步完成
    async fn send(&self) -> Result<()> {
        let message = self.construct_message()?;
        self.notify(&message).await
    }
}
