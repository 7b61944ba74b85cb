//! 统一错误处理模块
//!
//! 定义通知投递过程中的错误分类，使用 thiserror 提供良好的错误信息。
//! 渠道内部不做任何捕获或重试，所有失败原样向调用方传播。

use thiserror::Error;

/// 投递渠道错误类型
#[derive(Debug, Error)]
pub enum ChannelError {
    /// broker 不可达、URL 非法或认证被拒绝
    #[error("broker 连接失败: {0}")]
    Connection(String),

    /// 通知字段无法表示为 JSON
    #[error("消息序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 队列声明或消息发布被 broker 拒绝（如已有同名队列但属性不一致）
    #[error("broker 协议错误: {0}")]
    Broker(String),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, ChannelError>;

impl ChannelError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Connection(_) => "CONNECTION_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Broker(_) => "BROKER_PROTOCOL_ERROR",
        }
    }

    /// 是否为可重试错误
    ///
    /// 连接与 broker 协议错误通常是瞬时的，由调用方决定是否重试；
    /// 序列化失败是数据本身的问题，重试不会改变结果。
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Broker(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        let err = ChannelError::Connection("连接被拒绝".to_string());
        assert_eq!(err.code(), "CONNECTION_ERROR");

        let err = ChannelError::Broker("PRECONDITION_FAILED".to_string());
        assert_eq!(err.code(), "BROKER_PROTOCOL_ERROR");
    }

    #[test]
    fn test_is_retryable() {
        let conn_err = ChannelError::Connection("broker 不可达".to_string());
        assert!(conn_err.is_retryable());

        let broker_err = ChannelError::Broker("队列属性不一致".to_string());
        assert!(broker_err.is_retryable());

        let ser_err = ChannelError::from(
            serde_json::from_str::<serde_json::Value>("not json").unwrap_err(),
        );
        assert!(!ser_err.is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = ChannelError::Connection("认证失败".to_string());
        assert_eq!(err.to_string(), "broker 连接失败: 认证失败");
    }
}
