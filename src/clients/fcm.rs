use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::{
    clients::{PushTransport, SendReceipt},
    config::Config,
    errors::TransportError,
    models::{
        fcm::{FcmMessage, FcmRequest, FcmResponse, PROVIDER},
        payload::NotificationPayload,
    },
};

const FCM_SCOPES: &[&str] = &["https://www.googleapis.com/auth/firebase.messaging"];

enum Credentials {
    /// Application default credentials resolved through `gcp_auth`.
    ServiceAccount,
    /// Fixed bearer token, for emulators and tests.
    Bearer(String),
}

pub struct FcmClient {
    http_client: Client,
    api_url: String,
    fcm_project_id: String,
    credentials: Credentials,
}

impl FcmClient {
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let fcm_project_id = config
            .fcm_project_id
            .clone()
            .ok_or(TransportError::MissingConfig("FCM_PROJECT_ID"))?;

        info!(project_id = %fcm_project_id, "FCM client initialized");

        Ok(Self {
            http_client: Client::builder().timeout(config.http_timeout()).build()?,
            api_url: config.fcm_api_url.trim_end_matches('/').to_string(),
            fcm_project_id,
            credentials: Credentials::ServiceAccount,
        })
    }

    pub fn with_bearer_token(
        api_url: &str,
        fcm_project_id: &str,
        token: &str,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        Ok(Self {
            http_client: Client::builder().timeout(timeout).build()?,
            api_url: api_url.trim_end_matches('/').to_string(),
            fcm_project_id: fcm_project_id.to_string(),
            credentials: Credentials::Bearer(token.to_string()),
        })
    }

    async fn bearer_token(&self) -> Result<String, TransportError> {
        match &self.credentials {
            Credentials::Bearer(token) => Ok(token.clone()),
            Credentials::ServiceAccount => {
                let provider = gcp_auth::provider()
                    .await
                    .map_err(|e| TransportError::Auth(e.to_string()))?;

                let token = provider
                    .token(FCM_SCOPES)
                    .await
                    .map_err(|e| TransportError::Auth(e.to_string()))?;

                Ok(token.as_str().to_string())
            }
        }
    }
}

#[async_trait]
impl PushTransport for FcmClient {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    async fn send(&self, payload: &NotificationPayload) -> Result<SendReceipt, TransportError> {
        let message = FcmMessage::try_from(payload)?;

        debug!(
            data_only = payload.is_data_only(),
            data_type = payload.data_type().unwrap_or_default(),
            "Sending FCM push notification"
        );

        let token = self.bearer_token().await?;

        let url = format!(
            "{}/v1/projects/{}/messages:send",
            self.api_url, self.fcm_project_id
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(token)
            .json(&FcmRequest { message })
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let parsed: FcmResponse = response.json().await?;
            info!(message_id = %parsed.name, "FCM push notification sent successfully");
            Ok(SendReceipt {
                provider: PROVIDER,
                message_id: parsed.name,
            })
        } else {
            let body = response.text().await?;
            warn!(status = status.as_u16(), body = %body, "FCM request failed");
            Err(TransportError::Rejected {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            })
        }
    }
}
