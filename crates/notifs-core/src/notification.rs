//! 通知数据模型
//!
//! 定义通知记录与其线上消息形态。`Notification` 是调用方提供的领域记录，
//! `Message` 是经 `construct_message` 构造出的带类型化路由信息的待发负载，
//! 两者通过类型而非约定关联，避免"传入的 map 恰好带有 source/recipient 键"
//! 这类隐式契约。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ChannelError, Result};

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// 通知记录
///
/// `source` 与 `recipient` 是投递所需的最小字段：前者决定消息落入的队列名，
/// 后者作为路由键。其余负载字段（标题、正文、时间戳等）对渠道完全不透明，
/// 以扁平化的 JSON map 携带，保证线上对象的顶层键恰好就是通知的全部字段。
///
/// 字段有效性（非空的 source/recipient）由构造方保证，渠道不做校验。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub source: String,
    pub recipient: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Notification {
    /// 创建只含收发双方标识的通知
    pub fn new(source: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            recipient: recipient.into(),
            extra: Map::new(),
        }
    }

    /// 附加一个负载字段
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// 构造线上消息
    ///
    /// 将通知序列化为 JSON 对象形态，并把队列名与路由键提升为类型化字段。
    /// 纯内存操作，不触碰网络。
    pub fn to_message(&self) -> Result<Message> {
        let payload = serde_json::to_value(self)?;
        Ok(Message {
            queue: self.source.clone(),
            routing_key: self.recipient.clone(),
            payload,
        })
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// 待发布的线上消息
///
/// 生命周期为 构造 → 序列化 → 发布 → 丢弃，全部在单次调用内完成；
/// 除内容本身外没有任何标识，也不做持久化。
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    queue: String,
    routing_key: String,
    payload: Value,
}

impl Message {
    /// 消息应落入的队列名（即通知的 source）
    pub fn queue(&self) -> &str {
        &self.queue
    }

    /// 发布时使用的路由键（即通知的 recipient）
    pub fn routing_key(&self) -> &str {
        &self.routing_key
    }

    /// JSON 对象形态的负载，顶层键即通知字段
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// 序列化为最终的线上字节
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(&self.payload).map_err(ChannelError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 构造测试用的通知
    fn make_test_notification() -> Notification {
        Notification::new("alice", "bob").with_field("verb", "liked your post")
    }

    #[test]
    fn test_message_contains_exactly_supplied_fields() {
        let message = make_test_notification().to_message().expect("构造消息失败");

        let obj = message.payload().as_object().expect("负载应为 JSON 对象");
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["source"], "alice");
        assert_eq!(obj["recipient"], "bob");
        assert_eq!(obj["verb"], "liked your post");
    }

    #[test]
    fn test_message_routing_follows_identities() {
        let message = make_test_notification().to_message().expect("构造消息失败");

        assert_eq!(message.queue(), "alice");
        assert_eq!(message.routing_key(), "bob");
    }

    #[test]
    fn test_json_round_trip_preserves_fields() {
        let notification = make_test_notification()
            .with_field("post_id", 42)
            .with_field("read", false);
        let message = notification.to_message().expect("构造消息失败");

        let bytes = message.to_bytes().expect("序列化失败");
        let restored: Notification = serde_json::from_slice(&bytes).expect("反序列化失败");

        assert_eq!(restored, notification);
    }

    #[test]
    fn test_construct_is_deterministic() {
        let notification = make_test_notification();
        let first = notification.to_message().expect("构造消息失败");
        let second = notification.to_message().expect("构造消息失败");

        assert_eq!(first, second);
    }
}
