//! Device-side view of the `data` envelope: decodes a received push and
//! decides which in-app flow it belongs to.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    errors::ReceiveError,
    models::{
        call::{CallAction, CallType, Caller, CallerParams, OrderContext},
        payload::{CALL_ACTION_EVENT_TYPE, CALL_EVENT_TYPE},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub enum ReceivedEvent {
    /// Show the incoming-call UI.
    IncomingCall(IncomingCall),
    /// Update the UI of the call identified by `channel_name`.
    CallUpdate(CallUpdate),
    Ignored { kind: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncomingCall {
    /// Local handle for the native call UI, unique per received push.
    pub call_uuid: Uuid,
    pub channel_name: String,
    pub caller: Caller,
    pub call_type: CallType,
    pub order_data: OrderContext,
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallUpdate {
    pub action: CallAction,
    pub channel_name: String,
    pub caller: Option<Caller>,
    pub order_data: OrderContext,
    pub timestamp: Option<i64>,
}

pub fn decode(data: &BTreeMap<String, String>) -> Result<ReceivedEvent, ReceiveError> {
    let kind = data.get("type").map(String::as_str);

    match kind {
        Some(CALL_EVENT_TYPE) => decode_incoming_call(data).map(ReceivedEvent::IncomingCall),
        Some(CALL_ACTION_EVENT_TYPE) => decode_call_update(data).map(ReceivedEvent::CallUpdate),
        other => {
            debug!(kind = ?other, "Not a VoIP call notification, ignoring");
            Ok(ReceivedEvent::Ignored {
                kind: other.map(str::to_string),
            })
        }
    }
}

fn decode_incoming_call(data: &BTreeMap<String, String>) -> Result<IncomingCall, ReceiveError> {
    let channel_name = required_text(data, "channelName")?;
    let caller = ringable_caller(required_json::<CallerParams>(data, "caller")?)?;

    let call_type = match data.get("callType") {
        Some(value) => value.parse::<CallType>()?,
        None => CallType::default(),
    };

    Ok(IncomingCall {
        call_uuid: Uuid::new_v4(),
        channel_name,
        caller,
        call_type,
        order_data: order_data(data),
        timestamp: timestamp(data),
    })
}

fn decode_call_update(data: &BTreeMap<String, String>) -> Result<CallUpdate, ReceiveError> {
    let action = CallAction::from(required_text(data, "action")?);
    let channel_name = required_text(data, "channelName")?;

    if !action.is_known() {
        warn!(action = %action, channel_name = %channel_name, "Unknown call action received");
    }

    Ok(CallUpdate {
        action,
        channel_name,
        caller: optional_json(data, "caller")?,
        order_data: order_data(data),
        timestamp: timestamp(data),
    })
}

/// The native call screen uses the phone number as the call handle, so a
/// caller without one (or without a name to show) cannot be rung. The id
/// is not needed on the device.
fn ringable_caller(params: CallerParams) -> Result<Caller, ReceiveError> {
    let phone_number = params
        .phone_number
        .filter(|value| !value.is_empty())
        .ok_or(ReceiveError::MissingField("caller.phoneNumber"))?;
    let first_name = params
        .first_name
        .filter(|value| !value.is_empty())
        .ok_or(ReceiveError::MissingField("caller.firstName"))?;

    Ok(Caller {
        id: params.id.unwrap_or_default(),
        first_name,
        last_name: params.last_name,
        phone_number: Some(phone_number),
        avatar: params.avatar,
    })
}

/// Order context is informational; unreadable text is logged and replaced
/// by an empty map.
fn order_data(data: &BTreeMap<String, String>) -> OrderContext {
    match optional_json::<OrderContext>(data, "orderData") {
        Ok(order) => order.unwrap_or_default(),
        Err(e) => {
            warn!(error = %e, "Ignoring unreadable orderData in VoIP push data");
            OrderContext::new()
        }
    }
}

fn required_text(
    data: &BTreeMap<String, String>,
    field: &'static str,
) -> Result<String, ReceiveError> {
    data.get(field)
        .filter(|value| !value.is_empty())
        .cloned()
        .ok_or(ReceiveError::MissingField(field))
}

fn required_json<T: DeserializeOwned>(
    data: &BTreeMap<String, String>,
    field: &'static str,
) -> Result<T, ReceiveError> {
    optional_json(data, field)?.ok_or(ReceiveError::MissingField(field))
}

fn optional_json<T: DeserializeOwned>(
    data: &BTreeMap<String, String>,
    field: &'static str,
) -> Result<Option<T>, ReceiveError> {
    data.get(field)
        .map(|text| serde_json::from_str(text).map_err(|source| ReceiveError::Malformed { field, source }))
        .transpose()
}

fn timestamp(data: &BTreeMap<String, String>) -> Option<i64> {
    data.get("timestamp").and_then(|value| value.parse().ok())
}
