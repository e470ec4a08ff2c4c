use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header::AUTHORIZATION};
use tracing::{debug, info, warn};

use crate::{
    clients::{PushTransport, SendReceipt},
    config::Config,
    errors::TransportError,
    models::{
        onesignal::{OneSignalNotification, OneSignalResponse, PROVIDER},
        payload::NotificationPayload,
    },
};

pub struct OneSignalClient {
    http_client: Client,
    api_url: String,
    api_key: String,
}

impl OneSignalClient {
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        Self::with_endpoint(
            &config.onesignal_api_url,
            &config.onesignal_api_key,
            config.http_timeout(),
        )
    }

    pub fn with_endpoint(
        api_url: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let http_client = Client::builder().timeout(timeout).build()?;

        info!(api_url, "OneSignal client initialized");

        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl PushTransport for OneSignalClient {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    async fn send(&self, payload: &NotificationPayload) -> Result<SendReceipt, TransportError> {
        let notification = OneSignalNotification::try_from(payload)?;

        debug!(
            push_target = %payload.target,
            data_type = payload.data_type().unwrap_or_default(),
            "Sending OneSignal notification"
        );

        let response = self
            .http_client
            .post(format!("{}/notifications", self.api_url))
            .header(AUTHORIZATION, format!("Basic {}", self.api_key))
            .json(&notification)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;
            warn!(status = status.as_u16(), body = %body, "OneSignal rejected notification");
            return Err(TransportError::Rejected {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            });
        }

        let parsed: OneSignalResponse = response.json().await?;

        match parsed.id.filter(|id| !id.is_empty()) {
            Some(message_id) => {
                info!(message_id = %message_id, "OneSignal notification sent successfully");
                Ok(SendReceipt {
                    provider: PROVIDER,
                    message_id,
                })
            }
            None => Err(TransportError::Rejected {
                provider: PROVIDER,
                status: status.as_u16(),
                body: parsed
                    .errors
                    .map(|errors| errors.to_string())
                    .unwrap_or_else(|| "response carried no notification id".to_string()),
            }),
        }
    }
}
