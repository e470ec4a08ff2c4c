use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue, json};
use tracing::debug;

use crate::models::{
    call::{CallActionRequest, CallRequest, Caller},
    locale::LocalizedText,
    payload::{
        Alert, CALL_ACTION_EVENT_TYPE, CALL_EVENT_TYPE, DeliveryHints, DeliveryPriority,
        NotificationPayload, PushTarget,
    },
};

pub const DEFAULT_ANDROID_CHANNEL_ID: &str = "voip_calls";
pub const DEFAULT_ACCENT_COLOR: &str = "#4CAF50";
pub const DEFAULT_ANDROID_SOUND: &str = "notification_sound";
pub const DEFAULT_IOS_SOUND: &str = "notification_sound.wav";

/// Caller-supplied settings for every payload a [`PayloadBuilder`] makes.
///
/// `data_only` applies to call payloads only. When set:
/// - alert group (headings, contents, sounds, badge): omitted
/// - `content_available`: set, so the app wakes to render its own call UI
/// - target, channel id, priority and `data`: unchanged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadOptions {
    pub app_id: String,
    pub android_channel_id: String,
    pub accent_color: String,
    pub android_sound: String,
    pub ios_sound: String,
    pub badge_increment: u32,
    pub data_only: bool,
}

impl PayloadOptions {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            android_channel_id: DEFAULT_ANDROID_CHANNEL_ID.to_string(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            android_sound: DEFAULT_ANDROID_SOUND.to_string(),
            ios_sound: DEFAULT_IOS_SOUND.to_string(),
            badge_increment: 1,
            data_only: false,
        }
    }

    pub fn with_android_channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.android_channel_id = channel_id.into();
        self
    }

    pub fn with_data_only(mut self, data_only: bool) -> Self {
        self.data_only = data_only;
        self
    }
}

#[derive(Debug, Clone)]
pub struct PayloadBuilder {
    options: PayloadOptions,
}

impl PayloadBuilder {
    pub fn new(options: PayloadOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PayloadOptions {
        &self.options
    }

    pub fn build_call_payload(&self, request: &CallRequest) -> NotificationPayload {
        self.build_call_payload_at(request, Utc::now())
    }

    pub fn build_call_payload_at(
        &self,
        request: &CallRequest,
        now: DateTime<Utc>,
    ) -> NotificationPayload {
        let data = json!({
            "type": CALL_EVENT_TYPE,
            "callType": request.call_type.as_str(),
            "channelName": request.channel_name,
            "caller": caller_summary(&request.caller, true),
            "orderData": JsonValue::Object(request.order_data.clone()),
            "timestamp": now.timestamp_millis(),
        });

        let data_only = self.options.data_only;

        let alert = (!data_only).then(|| Alert {
            headings: request.call_type.headings(),
            contents: calling_you(&request.caller.first_name),
            android_sound: Some(self.options.android_sound.clone()),
            ios_sound: Some(self.options.ios_sound.clone()),
            badge_increment: Some(self.options.badge_increment),
        });

        debug!(
            driver_id = %request.driver_id,
            channel_name = %request.channel_name,
            call_type = %request.call_type,
            data_only,
            "Building VoIP call payload"
        );

        NotificationPayload {
            app_id: self.options.app_id.clone(),
            target: PushTarget::ExternalId(request.driver_id.clone()),
            alert,
            hints: DeliveryHints {
                android_channel_id: self.options.android_channel_id.clone(),
                priority: DeliveryPriority::High,
                mutable_content: true,
                content_available: data_only,
                android_accent_color: Some(self.options.accent_color.clone()),
                android_category: Some("call".to_string()),
                android_visibility: Some(1),
            },
            data: flatten_data(data),
        }
    }

    pub fn build_action_payload(&self, request: &CallActionRequest) -> NotificationPayload {
        self.build_action_payload_at(request, Utc::now())
    }

    /// Action updates always carry a visible alert, whatever `data_only` says.
    pub fn build_action_payload_at(
        &self,
        request: &CallActionRequest,
        now: DateTime<Utc>,
    ) -> NotificationPayload {
        let data = json!({
            "type": CALL_ACTION_EVENT_TYPE,
            "action": request.action.as_str(),
            "channelName": request.channel_name,
            "caller": caller_summary(&request.caller, false),
            "orderData": JsonValue::Object(request.order_data.clone()),
            "timestamp": now.timestamp_millis(),
        });

        debug!(
            driver_id = %request.driver_id,
            channel_name = %request.channel_name,
            action = %request.action,
            "Building VoIP call action payload"
        );

        NotificationPayload {
            app_id: self.options.app_id.clone(),
            target: PushTarget::ExternalId(request.driver_id.clone()),
            alert: Some(Alert {
                headings: LocalizedText::translated(
                    "Call Update",
                    "تحديث المكالمة",
                    "Mise à jour appel",
                ),
                contents: request.action.contents(),
                android_sound: None,
                ios_sound: None,
                badge_increment: None,
            }),
            hints: DeliveryHints {
                android_channel_id: self.options.android_channel_id.clone(),
                priority: DeliveryPriority::High,
                mutable_content: true,
                content_available: false,
                android_accent_color: None,
                android_category: None,
                android_visibility: None,
            },
            data: flatten_data(data),
        }
    }
}

fn calling_you(first_name: &str) -> LocalizedText {
    let name = Some(first_name).filter(|n| !n.is_empty());

    LocalizedText::translated(
        format!("{} is calling you", name.unwrap_or("User")),
        format!("{} يتصل بك", name.unwrap_or("المستخدم")),
        format!("{} vous appelle", name.unwrap_or("Utilisateur")),
    )
}

fn caller_summary(caller: &Caller, with_phone: bool) -> JsonValue {
    let mut summary = Map::new();
    summary.insert("id".to_string(), JsonValue::String(caller.id.clone()));
    summary.insert(
        "firstName".to_string(),
        JsonValue::String(caller.first_name.clone()),
    );

    if let Some(last_name) = &caller.last_name {
        summary.insert("lastName".to_string(), JsonValue::String(last_name.clone()));
    }

    if with_phone {
        if let Some(phone_number) = &caller.phone_number {
            summary.insert(
                "phoneNumber".to_string(),
                JsonValue::String(phone_number.clone()),
            );
        }
    }

    JsonValue::Object(summary)
}

/// Turns a JSON object into the string-only map push providers accept.
/// Strings pass through, every other value becomes its JSON text (`null`
/// included). Anything other than an object yields an empty map.
pub fn flatten_data(value: JsonValue) -> BTreeMap<String, String> {
    let JsonValue::Object(fields) = value else {
        return BTreeMap::new();
    };

    fields
        .into_iter()
        .map(|(key, value)| match value {
            JsonValue::String(text) => (key, text),
            other => (key, other.to_string()),
        })
        .collect()
}
