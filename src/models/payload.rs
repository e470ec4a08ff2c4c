use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result},
};

use serde::{Deserialize, Serialize};

use crate::models::locale::LocalizedText;

pub const CALL_EVENT_TYPE: &str = "voip_call";
pub const CALL_ACTION_EVENT_TYPE: &str = "voip_call_action";

/// Who a notification is addressed to. Each transport supports a subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PushTarget {
    /// App-level user id; the provider resolves the user's current devices.
    ExternalId(String),
    PlayerId(String),
    Segment(String),
    DeviceToken(String),
}

impl Display for PushTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            PushTarget::ExternalId(id) => write!(f, "external_id:{}", id),
            PushTarget::PlayerId(id) => write!(f, "player_id:{}", id),
            PushTarget::Segment(name) => write!(f, "segment:{}", name),
            PushTarget::DeviceToken(_) => write!(f, "device_token"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryPriority {
    Normal,
    High,
}

impl DeliveryPriority {
    /// OneSignal's 0-10 scale.
    pub fn onesignal(&self) -> u8 {
        match self {
            DeliveryPriority::Normal => 5,
            DeliveryPriority::High => 10,
        }
    }

    pub fn fcm_android(&self) -> &'static str {
        match self {
            DeliveryPriority::Normal => "NORMAL",
            DeliveryPriority::High => "HIGH",
        }
    }

    /// APNs only accepts priority 10 for pushes that show an alert;
    /// background pushes are capped at 5.
    pub fn apns(&self, data_only: bool) -> &'static str {
        match (self, data_only) {
            (DeliveryPriority::High, false) => "10",
            _ => "5",
        }
    }
}

/// The OS-rendered part of a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub headings: LocalizedText,
    pub contents: LocalizedText,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub android_sound: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ios_sound: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge_increment: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryHints {
    pub android_channel_id: String,
    pub priority: DeliveryPriority,
    pub mutable_content: bool,
    pub content_available: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub android_accent_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub android_category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub android_visibility: Option<i8>,
}

/// Provider-neutral notification. `data` only ever holds strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub app_id: String,
    pub target: PushTarget,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<Alert>,

    pub hints: DeliveryHints,
    pub data: BTreeMap<String, String>,
}

impl NotificationPayload {
    pub fn data_type(&self) -> Option<&str> {
        self.data.get("type").map(String::as_str)
    }

    pub fn channel_name(&self) -> Option<&str> {
        self.data.get("channelName").map(String::as_str)
    }

    pub fn is_data_only(&self) -> bool {
        self.alert.is_none()
    }

    pub fn with_target(mut self, target: PushTarget) -> Self {
        self.target = target;
        self
    }
}
