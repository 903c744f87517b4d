use thiserror::Error;

/// Top-level error type for the `cardapio-api` crate.
///
/// Covers every failure mode of the wire layer: authentication, transport,
/// non-2xx API responses, and response-shape violations. `cardapio-core`
/// maps these into its user-facing taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login rejected by the API (wrong credentials, disabled account).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-2xx response, with the server-provided message when available.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// A 2xx response whose body fails strict schema validation.
    /// Carries the raw body for debugging.
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a "not found" API error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// Returns `true` if this error came from the network layer rather
    /// than from the API itself.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
