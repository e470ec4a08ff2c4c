use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    errors::TransportError,
    models::{
        locale::LocalizedText,
        payload::{NotificationPayload, PushTarget},
    },
};

pub const PROVIDER: &str = "onesignal";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneSignalNotification {
    pub app_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_aliases: Option<OneSignalAliases>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_player_ids: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub included_segments: Option<Vec<String>>,

    pub target_channel: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headings: Option<LocalizedText>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<LocalizedText>,

    pub mutable_content: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub content_available: bool,

    pub android_channel_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub android_accent_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub android_category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub android_visibility: Option<i8>,

    #[serde(rename = "ios_badgeType", skip_serializing_if = "Option::is_none")]
    pub ios_badge_type: Option<String>,

    #[serde(rename = "ios_badgeCount", skip_serializing_if = "Option::is_none")]
    pub ios_badge_count: Option<u32>,

    pub priority: u8,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub android_sound: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ios_sound: Option<String>,

    pub data: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneSignalAliases {
    pub external_id: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OneSignalResponse {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

impl TryFrom<&NotificationPayload> for OneSignalNotification {
    type Error = TransportError;

    fn try_from(payload: &NotificationPayload) -> Result<Self, Self::Error> {
        let mut notification = OneSignalNotification {
            app_id: payload.app_id.clone(),
            include_aliases: None,
            include_player_ids: None,
            included_segments: None,
            target_channel: "push".to_string(),
            headings: None,
            contents: None,
            mutable_content: payload.hints.mutable_content,
            content_available: payload.hints.content_available,
            android_channel_id: payload.hints.android_channel_id.clone(),
            android_accent_color: payload.hints.android_accent_color.clone(),
            android_category: payload.hints.android_category.clone(),
            android_visibility: payload.hints.android_visibility,
            ios_badge_type: None,
            ios_badge_count: None,
            priority: payload.hints.priority.onesignal(),
            android_sound: None,
            ios_sound: None,
            data: payload.data.clone(),
        };

        match &payload.target {
            PushTarget::ExternalId(id) => {
                notification.include_aliases = Some(OneSignalAliases {
                    external_id: vec![id.clone()],
                })
            }
            PushTarget::PlayerId(id) => notification.include_player_ids = Some(vec![id.clone()]),
            PushTarget::Segment(name) => notification.included_segments = Some(vec![name.clone()]),
            PushTarget::DeviceToken(_) => {
                return Err(TransportError::UnsupportedTarget {
                    provider: PROVIDER,
                    target: payload.target.to_string(),
                });
            }
        }

        if let Some(alert) = &payload.alert {
            notification.headings = Some(alert.headings.clone());
            notification.contents = Some(alert.contents.clone());
            notification.android_sound = alert.android_sound.clone();
            notification.ios_sound = alert.ios_sound.clone();

            if let Some(count) = alert.badge_increment {
                notification.ios_badge_type = Some("Increase".to_string());
                notification.ios_badge_count = Some(count);
            }
        }

        Ok(notification)
    }
}
