use serde_json::json;
use voip_push::{
    CallAction, CallActionRequest, CallParams, CallRequest, CallType, Caller, CallerParams,
    PayloadBuilder, PayloadOptions, models::call::OrderContext,
};

pub const TEST_APP_ID: &str = "87722266-09fa-4a1f-a5f4-e1ef4aefa03d";

pub fn test_order() -> OrderContext {
    match json!({ "id": "order123", "status": "active", "fare": 12.5 }) {
        serde_json::Value::Object(map) => map,
        _ => OrderContext::new(),
    }
}

pub fn test_caller() -> Caller {
    Caller::new("user123", "John")
        .with_last_name("Doe")
        .with_phone_number("+1234567890")
}

pub fn call_request(call_type: CallType) -> CallRequest {
    CallRequest {
        driver_id: "driver123".to_string(),
        caller: test_caller(),
        channel_name: "tawsilet_voip_123_456_789_1234567890".to_string(),
        call_type,
        order_data: test_order(),
    }
}

pub fn action_request(action: CallAction) -> CallActionRequest {
    CallActionRequest {
        driver_id: "driver123".to_string(),
        action,
        caller: Caller::new("user123", "John").with_last_name("Doe"),
        channel_name: "tawsilet_voip_123_456_789_1234567890".to_string(),
        order_data: test_order(),
    }
}

pub fn valid_params() -> CallParams {
    CallParams {
        driver_id: Some("driver123".to_string()),
        caller: Some(CallerParams {
            id: Some("user123".to_string()),
            first_name: Some("John".to_string()),
            last_name: Some("Doe".to_string()),
            ..Default::default()
        }),
        channel_name: Some("test_channel".to_string()),
        ..Default::default()
    }
}

pub fn builder() -> PayloadBuilder {
    PayloadBuilder::new(PayloadOptions::new(TEST_APP_ID))
}

pub fn data_only_builder() -> PayloadBuilder {
    PayloadBuilder::new(PayloadOptions::new(TEST_APP_ID).with_data_only(true))
}
