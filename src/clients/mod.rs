pub mod fcm;
pub mod onesignal;

use async_trait::async_trait;

use crate::{errors::TransportError, models::payload::NotificationPayload};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    pub provider: &'static str,
    pub message_id: String,
}

/// A push provider. Errors are returned as-is; implementations never retry.
#[async_trait]
pub trait PushTransport: Send + Sync {
    fn provider(&self) -> &'static str;

    async fn send(&self, payload: &NotificationPayload) -> Result<SendReceipt, TransportError>;
}
