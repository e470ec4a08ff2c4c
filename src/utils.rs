use tracing::{error, info};

use crate::{
    builder::PayloadBuilder,
    clients::{PushTransport, SendReceipt},
    errors::{CallParamError, VoipPushResult},
    models::{
        call::{CallActionRequest, CallParams},
        payload::PushTarget,
        validation::check_call_params,
    },
};

/// Validates `params`, builds the call payload and hands it to `transport`.
/// `target` overrides the default driver external-id targeting.
pub async fn send_call_notification(
    params: CallParams,
    builder: &PayloadBuilder,
    transport: &dyn PushTransport,
    target: Option<PushTarget>,
) -> VoipPushResult<SendReceipt> {
    if let Err(e) = check_call_params(&params) {
        error!(field = e.field(), "{}", e);
        return Err(e.into());
    }

    let request = params.into_request()?;

    info!(
        driver_id = %request.driver_id,
        channel_name = %request.channel_name,
        call_type = %request.call_type,
        provider = transport.provider(),
        "Sending VoIP call notification"
    );

    let mut payload = builder.build_call_payload(&request);
    if let Some(target) = target {
        payload = payload.with_target(target);
    }

    match transport.send(&payload).await {
        Ok(receipt) => {
            info!(
                message_id = %receipt.message_id,
                channel_name = %request.channel_name,
                "VoIP call notification sent"
            );
            Ok(receipt)
        }
        Err(e) => {
            error!(
                error = %e,
                channel_name = %request.channel_name,
                "Failed to send VoIP call notification"
            );
            Err(e.into())
        }
    }
}

pub async fn send_call_action(
    request: &CallActionRequest,
    builder: &PayloadBuilder,
    transport: &dyn PushTransport,
    target: Option<PushTarget>,
) -> VoipPushResult<SendReceipt> {
    if request.driver_id.is_empty() {
        let e = CallParamError::MissingField("driverId");
        error!(field = e.field(), "{}", e);
        return Err(e.into());
    }

    info!(
        driver_id = %request.driver_id,
        channel_name = %request.channel_name,
        action = %request.action,
        provider = transport.provider(),
        "Sending VoIP call action notification"
    );

    let mut payload = builder.build_action_payload(request);
    if let Some(target) = target {
        payload = payload.with_target(target);
    }

    match transport.send(&payload).await {
        Ok(receipt) => {
            info!(
                message_id = %receipt.message_id,
                action = %request.action,
                "VoIP call action notification sent"
            );
            Ok(receipt)
        }
        Err(e) => {
            error!(
                error = %e,
                action = %request.action,
                "Failed to send VoIP call action notification"
            );
            Err(e.into())
        }
    }
}
