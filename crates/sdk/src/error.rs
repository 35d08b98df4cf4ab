use crate::envelope::ResponseEnvelope;
use crate::transport::TransportError;

pub type ApiResult<T> = Result<T, ApiError>;

/// A failure reported by the server inside a response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub status_code: u16,
    pub message: String,
    pub envelope: ResponseEnvelope,
}

impl Rejection {
    /// Message is the envelope's error message, or a generic one naming the status.
    pub fn from_envelope(envelope: ResponseEnvelope) -> Self {
        let status_code = envelope.status_code();
        let message = envelope
            .error_message()
            .filter(|message| !message.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status {status_code}"));
        Self {
            status_code,
            message,
            envelope,
        }
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Every way a Verbex call can fail.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("Request failed: {0}")]
    Transport(#[from] TransportError),

    #[error("{0}")]
    BadRequest(Box<Rejection>),

    #[error("{0}")]
    Unauthorized(Box<Rejection>),

    #[error("{0}")]
    NotFound(Box<Rejection>),

    #[error("{0}")]
    Conflict(Box<Rejection>),

    /// Any other 4xx status.
    #[error("{0}")]
    Client(Box<Rejection>),

    /// 5xx status.
    #[error("{0}")]
    Server(Box<Rejection>),

    /// The server reported `success: false` without an error status.
    #[error("{0}")]
    Rejected(Box<Rejection>),

    /// A successful payload did not have the shape of the requested model.
    #[error("Unexpected payload: {0}")]
    UnexpectedPayload(String),
}

impl ApiError {
    /// Classify a failed envelope by its status code.
    pub fn from_envelope(envelope: ResponseEnvelope) -> Self {
        let rejection = Box::new(Rejection::from_envelope(envelope));
        match rejection.status_code {
            400 => ApiError::BadRequest(rejection),
            401 => ApiError::Unauthorized(rejection),
            404 => ApiError::NotFound(rejection),
            409 => ApiError::Conflict(rejection),
            402..=499 => ApiError::Client(rejection),
            500..=u16::MAX => ApiError::Server(rejection),
            _ => ApiError::Rejected(rejection),
        }
    }

    fn rejection(&self) -> Option<&Rejection> {
        match self {
            ApiError::BadRequest(r)
            | ApiError::Unauthorized(r)
            | ApiError::NotFound(r)
            | ApiError::Conflict(r)
            | ApiError::Client(r)
            | ApiError::Server(r)
            | ApiError::Rejected(r) => Some(r),
            ApiError::Transport(_) | ApiError::UnexpectedPayload(_) => None,
        }
    }

    /// HTTP status of the failure; `0` when no response was received.
    pub fn status_code(&self) -> u16 {
        self.rejection().map_or(0, |r| r.status_code)
    }

    pub fn message(&self) -> String {
        match self.rejection() {
            Some(r) => r.message.clone(),
            None => self.to_string(),
        }
    }

    /// The envelope the server sent, for server-reported failures.
    pub fn envelope(&self) -> Option<&ResponseEnvelope> {
        self.rejection().map(|r| &r.envelope)
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Transport(_) => "TRANSPORT_ERROR",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Client(_) => "CLIENT_ERROR",
            ApiError::Server(_) => "SERVER_ERROR",
            ApiError::Rejected(_) => "REJECTED",
            ApiError::UnexpectedPayload(_) => "UNEXPECTED_PAYLOAD",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ApiError::Conflict(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}
