use tracing::error;

use crate::{
    errors::CallParamError,
    models::call::{CallRequest, CallParams, Caller},
};

fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Checks the fields a call notification cannot be built without, in
/// order: `driverId`, `caller`, `channelName`, then the caller's `id` and
/// `firstName`. Stops at the first failure.
pub fn check_call_params(params: &CallParams) -> Result<(), CallParamError> {
    if !is_present(&params.driver_id) {
        return Err(CallParamError::MissingField("driverId"));
    }

    let Some(caller) = &params.caller else {
        return Err(CallParamError::MissingField("caller"));
    };

    if !is_present(&params.channel_name) {
        return Err(CallParamError::MissingField("channelName"));
    }

    if !is_present(&caller.id) {
        return Err(CallParamError::InvalidCaller("caller.id"));
    }

    if !is_present(&caller.first_name) {
        return Err(CallParamError::InvalidCaller("caller.firstName"));
    }

    Ok(())
}

/// Boolean form of [`check_call_params`]. Logs the missing field before
/// returning `false`.
pub fn validate_call_params(params: &CallParams) -> bool {
    match check_call_params(params) {
        Ok(()) => true,
        Err(e) => {
            error!(field = e.field(), "{}", e);
            false
        }
    }
}

impl CallParams {
    pub fn into_request(self) -> Result<CallRequest, CallParamError> {
        let driver_id = present(self.driver_id).ok_or(CallParamError::MissingField("driverId"))?;
        let caller = self.caller.ok_or(CallParamError::MissingField("caller"))?;
        let channel_name =
            present(self.channel_name).ok_or(CallParamError::MissingField("channelName"))?;

        let id = present(caller.id).ok_or(CallParamError::InvalidCaller("caller.id"))?;
        let first_name =
            present(caller.first_name).ok_or(CallParamError::InvalidCaller("caller.firstName"))?;

        Ok(CallRequest {
            driver_id,
            caller: Caller {
                id,
                first_name,
                last_name: present(caller.last_name),
                phone_number: present(caller.phone_number),
                avatar: present(caller.avatar),
            },
            channel_name,
            call_type: self.call_type.unwrap_or_default(),
            order_data: self.order_data.unwrap_or_default(),
        })
    }
}
