use thiserror::Error;

/// First requirement a set of call parameters failed. Validation stops at
/// the first problem, so only one is ever reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallParamError {
    #[error("Missing required field for VoIP call: {0}")]
    MissingField(&'static str),

    #[error("Invalid caller information for VoIP call: missing {0}")]
    InvalidCaller(&'static str),
}

impl CallParamError {
    pub fn field(&self) -> &'static str {
        match self {
            CallParamError::MissingField(field) | CallParamError::InvalidCaller(field) => field,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown call type: {0} (expected voice or video)")]
pub struct UnknownCallType(pub String);

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("{provider} rejected notification (status {status}): {body}")]
    Rejected {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} cannot deliver to target {target}")]
    UnsupportedTarget {
        provider: &'static str,
        target: String,
    },

    #[error("Missing configuration: {0}")]
    MissingConfig(&'static str),
}

#[derive(Debug, Error)]
pub enum ReceiveError {
    #[error("Missing {0} in VoIP push data")]
    MissingField(&'static str),

    #[error("Malformed {field} in VoIP push data: {source}")]
    Malformed {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    CallType(#[from] UnknownCallType),
}

/// Failure of a full validate, build and send round.
#[derive(Debug, Error)]
pub enum VoipPushError {
    #[error(transparent)]
    InvalidParams(#[from] CallParamError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

pub type VoipPushResult<T> = Result<T, VoipPushError>;
