// ── Core error types ──
//
// User-facing errors. Consumers never see reqwest or serde failures
// directly; the `From<cardapio_api::Error>` impl translates wire-layer
// errors into this taxonomy.

use thiserror::Error;

use crate::validate::FieldError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Field-level validation failure. Recoverable, shown inline next to
    /// the offending fields; never reaches the network.
    #[error("validation failed on {}", summarize_fields(.0))]
    Validation(Vec<FieldError>),

    /// The API rejected the supplied credentials.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Network-level failure (DNS, refused connection, timeout). The
    /// request may never have reached the API.
    #[error("API unreachable: {0}")]
    Unreachable(String),

    /// Non-2xx API response, with the server message when one was given.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// A 2xx response that failed strict schema validation. The operation
    /// is aborted; no partially-typed data is kept.
    #[error("malformed API response: {0}")]
    MalformedResponse(String),

    /// Another mutating operation on this controller is still in flight.
    #[error("another operation is already in flight")]
    Busy,

    /// Credential storage failed while persisting a session.
    #[error("credential storage error: {0}")]
    Storage(String),
}

impl CoreError {
    /// The field-level violations, when this is a validation failure.
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

fn summarize_fields(errors: &[FieldError]) -> String {
    let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
    fields.join(", ")
}

impl From<cardapio_api::Error> for CoreError {
    fn from(err: cardapio_api::Error) -> Self {
        match err {
            cardapio_api::Error::Authentication { .. } => Self::InvalidCredentials,
            cardapio_api::Error::Transport(e) => Self::Unreachable(e.to_string()),
            cardapio_api::Error::InvalidUrl(e) => Self::Unreachable(e.to_string()),
            cardapio_api::Error::Api { status, message } => Self::Api { status, message },
            cardapio_api::Error::MalformedResponse { message, .. } => {
                Self::MalformedResponse(message)
            }
        }
    }
}
