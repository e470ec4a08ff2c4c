use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    errors::TransportError,
    models::payload::{NotificationPayload, PushTarget},
};

pub const PROVIDER: &str = "fcm";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FcmRequest {
    pub message: FcmMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FcmMessage {
    pub token: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<FcmNotification>,

    pub data: BTreeMap<String, String>,
    pub android: AndroidConfig,
    pub apns: ApnsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FcmNotification {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AndroidConfig {
    pub priority: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<AndroidNotification>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AndroidNotification {
    pub channel_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApnsConfig {
    pub headers: BTreeMap<String, String>,
    pub payload: ApnsPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApnsPayload {
    pub aps: Aps,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Aps {
    #[serde(rename = "content-available", skip_serializing_if = "Option::is_none")]
    pub content_available: Option<u8>,

    #[serde(rename = "mutable-content", skip_serializing_if = "Option::is_none")]
    pub mutable_content: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FcmResponse {
    pub name: String,
}

impl TryFrom<&NotificationPayload> for FcmMessage {
    type Error = TransportError;

    fn try_from(payload: &NotificationPayload) -> Result<Self, Self::Error> {
        let PushTarget::DeviceToken(token) = &payload.target else {
            return Err(TransportError::UnsupportedTarget {
                provider: PROVIDER,
                target: payload.target.to_string(),
            });
        };

        let hints = &payload.hints;
        let data_only = payload.is_data_only();

        let mut headers = BTreeMap::new();
        headers.insert(
            "apns-priority".to_string(),
            hints.priority.apns(data_only).to_string(),
        );
        headers.insert(
            "apns-push-type".to_string(),
            if data_only { "background" } else { "alert" }.to_string(),
        );

        let mut aps = Aps {
            content_available: hints.content_available.then_some(1),
            mutable_content: hints.mutable_content.then_some(1),
            sound: None,
        };

        let (notification, android_notification) = match &payload.alert {
            Some(alert) => {
                aps.sound = alert.ios_sound.clone();
                (
                    Some(FcmNotification {
                        title: alert.headings.en.clone(),
                        body: alert.contents.en.clone(),
                    }),
                    Some(AndroidNotification {
                        channel_id: hints.android_channel_id.clone(),
                        sound: alert.android_sound.clone(),
                        color: hints.android_accent_color.clone(),
                    }),
                )
            }
            None => (None, None),
        };

        Ok(FcmMessage {
            token: token.clone(),
            notification,
            data: payload.data.clone(),
            android: AndroidConfig {
                priority: hints.priority.fcm_android().to_string(),
                notification: android_notification,
            },
            apns: ApnsConfig {
                headers,
                payload: ApnsPayload { aps },
            },
        })
    }
}
