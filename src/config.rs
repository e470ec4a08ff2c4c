use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use dotenvy::dotenv;
use serde::Deserialize;

use crate::{
    builder::{DEFAULT_ANDROID_CHANNEL_ID, PayloadOptions},
    channel::{ChannelNameGenerator, DEFAULT_NAMESPACE},
};

pub const DEFAULT_ONESIGNAL_API_URL: &str = "https://onesignal.com/api/v1";
pub const DEFAULT_FCM_API_URL: &str = "https://fcm.googleapis.com";

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    pub onesignal_app_id: String,
    pub onesignal_api_key: String,

    #[serde(default = "default_onesignal_api_url")]
    pub onesignal_api_url: String,

    #[serde(default)]
    pub fcm_project_id: Option<String>,

    #[serde(default = "default_fcm_api_url")]
    pub fcm_api_url: String,

    #[serde(default)]
    pub fcm_test_device_token: Option<String>,

    #[serde(default = "default_channel_namespace")]
    pub channel_namespace: String,

    #[serde(default = "default_android_channel_id")]
    pub android_channel_id: String,

    #[serde(default = "default_http_timeout_seconds")]
    pub http_timeout_seconds: u64,

    #[serde(default)]
    pub log_json: bool,
}

fn default_onesignal_api_url() -> String {
    DEFAULT_ONESIGNAL_API_URL.to_string()
}

fn default_fcm_api_url() -> String {
    DEFAULT_FCM_API_URL.to_string()
}

fn default_channel_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_android_channel_id() -> String {
    DEFAULT_ANDROID_CHANNEL_ID.to_string()
}

fn default_http_timeout_seconds() -> u64 {
    10
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        dotenv().ok();

        envy::from_env::<Self>()
            .map_err(|e| anyhow!("Invalid or missing environmental variable: {}", e))
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Self>(vars)
            .map_err(|e| anyhow!("Invalid or missing environmental variable: {}", e))
    }

    pub fn payload_options(&self, data_only: bool) -> PayloadOptions {
        PayloadOptions::new(self.onesignal_app_id.clone())
            .with_android_channel_id(self.android_channel_id.clone())
            .with_data_only(data_only)
    }

    pub fn channel_generator(&self) -> ChannelNameGenerator {
        ChannelNameGenerator::new(self.channel_namespace.clone())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }
}
