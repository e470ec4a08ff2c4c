use std::collections::BTreeMap;

use anyhow::Result;
use voip_push::{
    CallAction, CallType, ReceiveError,
    receiver::{ReceivedEvent, decode},
};

use crate::common::{action_request, builder, call_request, data_only_builder};

/// Test: A built call payload decodes into an incoming call on the device
#[test]
fn test_call_payload_dispatches_to_incoming_call() -> Result<()> {
    let request = call_request(CallType::Video);
    let payload = data_only_builder().build_call_payload(&request);

    let ReceivedEvent::IncomingCall(call) = decode(&payload.data)? else {
        panic!("Expected an incoming call");
    };

    assert_eq!(call.channel_name, request.channel_name);
    assert_eq!(call.call_type, CallType::Video);
    assert_eq!(call.caller.first_name, "John");
    assert_eq!(call.caller.phone_number.as_deref(), Some("+1234567890"));
    assert_eq!(call.order_data, request.order_data);
    assert!(call.timestamp.is_some());

    Ok(())
}

/// Test: Each received call gets its own local call id
#[test]
fn test_incoming_calls_get_fresh_uuids() -> Result<()> {
    let payload = builder().build_call_payload(&call_request(CallType::Voice));

    let (ReceivedEvent::IncomingCall(first), ReceivedEvent::IncomingCall(second)) =
        (decode(&payload.data)?, decode(&payload.data)?)
    else {
        panic!("Expected incoming calls");
    };

    assert_ne!(first.call_uuid, second.call_uuid);

    Ok(())
}

/// Test: Action payloads correlate to their call through the channel name
#[test]
fn test_action_payload_dispatches_to_call_update() -> Result<()> {
    let request = action_request(CallAction::Accepted);
    let payload = builder().build_action_payload(&request);

    let ReceivedEvent::CallUpdate(update) = decode(&payload.data)? else {
        panic!("Expected a call update");
    };

    assert_eq!(update.action, CallAction::Accepted);
    assert_eq!(update.channel_name, request.channel_name);
    assert_eq!(update.caller.map(|c| c.id), Some("user123".to_string()));

    Ok(())
}

/// Test: Unknown action values survive the trip to the device
#[test]
fn test_unknown_action_is_preserved() -> Result<()> {
    let payload =
        builder().build_action_payload(&action_request(CallAction::Other("held".to_string())));

    let ReceivedEvent::CallUpdate(update) = decode(&payload.data)? else {
        panic!("Expected a call update");
    };
    assert_eq!(update.action, CallAction::Other("held".to_string()));

    Ok(())
}

/// Test: Other notification types are ignored
#[test]
fn test_non_voip_data_is_ignored() -> Result<()> {
    let mut data = BTreeMap::new();
    data.insert("type".to_string(), "chat_message".to_string());

    assert_eq!(
        decode(&data)?,
        ReceivedEvent::Ignored {
            kind: Some("chat_message".to_string())
        }
    );
    assert_eq!(
        decode(&BTreeMap::new())?,
        ReceivedEvent::Ignored { kind: None }
    );

    Ok(())
}

/// Test: A call push without caller or channel name is rejected
#[test]
fn test_incomplete_call_data_is_rejected() {
    let mut data = builder().build_call_payload(&call_request(CallType::Voice)).data;
    data.remove("caller");
    assert!(matches!(
        decode(&data),
        Err(ReceiveError::MissingField("caller"))
    ));

    let mut data = builder().build_call_payload(&call_request(CallType::Voice)).data;
    data.remove("channelName");
    assert!(matches!(
        decode(&data),
        Err(ReceiveError::MissingField("channelName"))
    ));

    let mut data = builder().build_call_payload(&call_request(CallType::Voice)).data;
    data.insert("caller".to_string(), "not json".to_string());
    assert!(matches!(
        decode(&data),
        Err(ReceiveError::Malformed { field: "caller", .. })
    ));
}

fn call_data_with_caller(caller: &str) -> BTreeMap<String, String> {
    let mut data = builder().build_call_payload(&call_request(CallType::Voice)).data;
    data.insert("caller".to_string(), caller.to_string());
    data
}

/// Test: A caller without a phone number cannot be rung
#[test]
fn test_caller_without_phone_number_is_rejected() {
    let data = call_data_with_caller(r#"{"id":"user123","firstName":"John"}"#);
    assert!(matches!(
        decode(&data),
        Err(ReceiveError::MissingField("caller.phoneNumber"))
    ));

    let data = call_data_with_caller(r#"{"id":"user123","firstName":"John","phoneNumber":""}"#);
    assert!(matches!(
        decode(&data),
        Err(ReceiveError::MissingField("caller.phoneNumber"))
    ));
}

/// Test: A caller with an empty first name cannot be rung
#[test]
fn test_caller_without_first_name_is_rejected() {
    let data = call_data_with_caller(r#"{"id":"user123","firstName":"","phoneNumber":"+216"}"#);
    assert!(matches!(
        decode(&data),
        Err(ReceiveError::MissingField("caller.firstName"))
    ));

    let data = call_data_with_caller(r#"{"id":"user123","phoneNumber":"+216"}"#);
    assert!(matches!(
        decode(&data),
        Err(ReceiveError::MissingField("caller.firstName"))
    ));
}

/// Test: The caller id is optional on the device
#[test]
fn test_caller_without_id_is_accepted() -> Result<()> {
    let data = call_data_with_caller(r#"{"firstName":"John","phoneNumber":"+216"}"#);

    let ReceivedEvent::IncomingCall(call) = decode(&data)? else {
        panic!("Expected an incoming call");
    };

    assert_eq!(call.caller.id, "");
    assert_eq!(call.caller.first_name, "John");
    assert_eq!(call.caller.phone_number.as_deref(), Some("+216"));

    Ok(())
}

/// Test: Unreadable order data does not stop the call from ringing
#[test]
fn test_malformed_order_data_is_dropped() -> Result<()> {
    let mut data = builder().build_call_payload(&call_request(CallType::Voice)).data;
    data.insert("orderData".to_string(), "{not json".to_string());

    let ReceivedEvent::IncomingCall(call) = decode(&data)? else {
        panic!("Expected an incoming call");
    };
    assert!(call.order_data.is_empty());

    let mut data = builder()
        .build_action_payload(&action_request(CallAction::Ended))
        .data;
    data.insert("orderData".to_string(), "[1, 2".to_string());

    let ReceivedEvent::CallUpdate(update) = decode(&data)? else {
        panic!("Expected a call update");
    };
    assert!(update.order_data.is_empty());

    Ok(())
}
