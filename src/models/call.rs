use std::{
    convert::Infallible,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::{
    errors::UnknownCallType,
    models::locale::{Locale, LocalizedText},
};

/// Order details passed through to the driver app untouched.
pub type OrderContext = Map<String, JsonValue>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caller {
    pub id: String,
    pub first_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Caller {
    pub fn new(id: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: None,
            phone_number: None,
            avatar: None,
        }
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallType {
    #[default]
    Voice,
    Video,
}

impl CallType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallType::Voice => "voice",
            CallType::Video => "video",
        }
    }

    pub fn headings(&self) -> LocalizedText {
        match self {
            CallType::Voice => LocalizedText::translated("Voice Call", "مكالمة صوتية", "Appel vocal"),
            CallType::Video => LocalizedText::translated("Video Call", "مكالمة فيديو", "Appel vidéo"),
        }
    }

    pub fn display_name(&self, locale: Locale) -> String {
        self.headings().get_or_english(locale).to_string()
    }
}

impl Display for CallType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CallType {
    type Err = UnknownCallType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "voice" => Ok(CallType::Voice),
            "video" => Ok(CallType::Video),
            other => Err(UnknownCallType(other.to_string())),
        }
    }
}

/// Status transition of an already-announced call. Values outside the
/// known set are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CallAction {
    Accepted,
    Declined,
    Ended,
    Other(String),
}

impl CallAction {
    pub fn as_str(&self) -> &str {
        match self {
            CallAction::Accepted => "accepted",
            CallAction::Declined => "declined",
            CallAction::Ended => "ended",
            CallAction::Other(action) => action,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, CallAction::Other(_))
    }

    /// Alert body for this action. Unknown actions get a templated message
    /// embedding the raw value.
    pub fn contents(&self) -> LocalizedText {
        match self {
            CallAction::Accepted => {
                LocalizedText::translated("Call accepted", "تم قبول المكالمة", "Appel accepté")
            }
            CallAction::Declined => {
                LocalizedText::translated("Call declined", "تم رفض المكالمة", "Appel refusé")
            }
            CallAction::Ended => {
                LocalizedText::translated("Call ended", "تم إنهاء المكالمة", "Appel terminé")
            }
            CallAction::Other(action) => LocalizedText::translated(
                format!("Call {}", action),
                format!("تم {} المكالمة", action),
                format!("Appel {}", action),
            ),
        }
    }

    /// Short label for in-app display. Unknown actions read as ended.
    pub fn display_name(&self, locale: Locale) -> String {
        let contents = if self.is_known() {
            self.contents()
        } else {
            CallAction::Ended.contents()
        };
        contents.get_or_english(locale).to_string()
    }
}

impl From<String> for CallAction {
    fn from(value: String) -> Self {
        match value.as_str() {
            "accepted" => CallAction::Accepted,
            "declined" => CallAction::Declined,
            "ended" => CallAction::Ended,
            _ => CallAction::Other(value),
        }
    }
}

impl From<CallAction> for String {
    fn from(action: CallAction) -> Self {
        match action {
            CallAction::Other(action) => action,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for CallAction {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CallAction::from(s.to_string()))
    }
}

impl Display for CallAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request to ring a driver's device for an incoming call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    pub driver_id: String,
    pub caller: Caller,
    pub channel_name: String,

    #[serde(default)]
    pub call_type: CallType,

    #[serde(default)]
    pub order_data: OrderContext,
}

/// Status update about a call the driver was already notified of.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallActionRequest {
    pub driver_id: String,
    pub action: CallAction,
    pub caller: Caller,
    pub channel_name: String,

    #[serde(default)]
    pub order_data: OrderContext,
}

/// Call parameters as they arrive from an untyped source, before
/// validation. See [`crate::models::validation::check_call_params`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallParams {
    #[serde(default)]
    pub driver_id: Option<String>,

    #[serde(default)]
    pub caller: Option<CallerParams>,

    #[serde(default)]
    pub channel_name: Option<String>,

    #[serde(default)]
    pub call_type: Option<CallType>,

    #[serde(default)]
    pub order_data: Option<OrderContext>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallerParams {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default)]
    pub phone_number: Option<String>,

    #[serde(default)]
    pub avatar: Option<String>,
}

impl From<Caller> for CallerParams {
    fn from(caller: Caller) -> Self {
        Self {
            id: Some(caller.id),
            first_name: Some(caller.first_name),
            last_name: caller.last_name,
            phone_number: caller.phone_number,
            avatar: caller.avatar,
        }
    }
}

impl From<CallRequest> for CallParams {
    fn from(request: CallRequest) -> Self {
        Self {
            driver_id: Some(request.driver_id),
            caller: Some(request.caller.into()),
            channel_name: Some(request.channel_name),
            call_type: Some(request.call_type),
            order_data: Some(request.order_data),
        }
    }
}
