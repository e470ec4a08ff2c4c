use std::time::Duration;

use anyhow::Result;
use serde_json::json;
use voip_push::{
    CallAction, CallType, PushTarget, PushTransport, TransportError, clients::fcm::FcmClient,
    models::fcm::FcmMessage,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

use crate::common::{action_request, builder, call_request, data_only_builder};

const DEVICE_TOKEN: &str = "dZ3kX9example:APA91bH-device-token";

/// Test: Visible call payloads keep the notification block and ring at high priority
#[test]
fn test_visible_call_message() -> Result<()> {
    let payload = builder()
        .build_call_payload(&call_request(CallType::Voice))
        .with_target(PushTarget::DeviceToken(DEVICE_TOKEN.to_string()));
    let message = serde_json::to_value(FcmMessage::try_from(&payload)?)?;

    assert_eq!(message["token"], DEVICE_TOKEN);
    assert_eq!(message["notification"]["title"], "Voice Call");
    assert_eq!(message["notification"]["body"], "John is calling you");
    assert_eq!(message["android"]["priority"], "HIGH");
    assert_eq!(message["android"]["notification"]["channel_id"], "voip_calls");
    assert_eq!(message["apns"]["headers"]["apns-priority"], "10");
    assert_eq!(message["apns"]["payload"]["aps"]["mutable-content"], 1);
    assert_eq!(message["data"]["type"], "voip_call");

    Ok(())
}

/// Test: Data-only call payloads send just data and wake the app in the background
#[test]
fn test_data_only_call_message() -> Result<()> {
    let payload = data_only_builder()
        .build_call_payload(&call_request(CallType::Video))
        .with_target(PushTarget::DeviceToken(DEVICE_TOKEN.to_string()));
    let message = serde_json::to_value(FcmMessage::try_from(&payload)?)?;

    assert!(message.get("notification").is_none());
    assert!(message["android"].get("notification").is_none());
    assert_eq!(message["android"]["priority"], "HIGH");
    assert_eq!(message["apns"]["headers"]["apns-push-type"], "background");
    assert_eq!(message["apns"]["headers"]["apns-priority"], "5");
    assert_eq!(message["apns"]["payload"]["aps"]["content-available"], 1);
    assert_eq!(message["data"]["callType"], "video");

    Ok(())
}

/// Test: FCM only addresses device tokens
#[test]
fn test_external_id_target_is_unsupported() {
    let payload = builder().build_call_payload(&call_request(CallType::Voice));

    assert!(matches!(
        FcmMessage::try_from(&payload),
        Err(TransportError::UnsupportedTarget { provider: "fcm", .. })
    ));
}

/// Test: A successful send returns the FCM message name
#[tokio::test]
async fn test_send_returns_message_name() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/projects/driver-app/messages:send"))
        .and(header("authorization", "Bearer test-access-token"))
        .and(body_partial_json(json!({
            "message": { "token": DEVICE_TOKEN, "data": { "type": "voip_call_action" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "projects/driver-app/messages/0:1700000000000000"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = FcmClient::with_bearer_token(
        &server.uri(),
        "driver-app",
        "test-access-token",
        Duration::from_secs(5),
    )?;
    let payload = builder()
        .build_action_payload(&action_request(CallAction::Ended))
        .with_target(PushTarget::DeviceToken(DEVICE_TOKEN.to_string()));

    let receipt = client.send(&payload).await?;

    assert_eq!(receipt.provider, "fcm");
    assert_eq!(
        receipt.message_id,
        "projects/driver-app/messages/0:1700000000000000"
    );

    Ok(())
}

/// Test: Invalid tokens are reported as rejections, not retried
#[tokio::test]
async fn test_send_surfaces_invalid_token() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/projects/driver-app/messages:send"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "status": "NOT_FOUND", "message": "Requested entity was not found." }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = FcmClient::with_bearer_token(
        &server.uri(),
        "driver-app",
        "test-access-token",
        Duration::from_secs(5),
    )?;
    let payload = builder()
        .build_call_payload(&call_request(CallType::Voice))
        .with_target(PushTarget::DeviceToken(DEVICE_TOKEN.to_string()));

    let error = client
        .send(&payload)
        .await
        .expect_err("404 should be rejected");

    assert!(matches!(
        error,
        TransportError::Rejected { status: 404, .. }
    ));

    Ok(())
}
