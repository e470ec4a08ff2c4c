pub mod builder;
pub mod channel;
pub mod clients;
pub mod config;
pub mod errors;
pub mod models;
pub mod receiver;
pub mod utils;

pub use builder::{PayloadBuilder, PayloadOptions, flatten_data};
pub use channel::ChannelNameGenerator;
pub use clients::{PushTransport, SendReceipt};
pub use errors::{CallParamError, ReceiveError, TransportError, VoipPushError, VoipPushResult};
pub use models::{
    call::{CallAction, CallActionRequest, CallParams, CallRequest, CallType, Caller, CallerParams},
    payload::{NotificationPayload, PushTarget},
    validation::{check_call_params, validate_call_params},
};
