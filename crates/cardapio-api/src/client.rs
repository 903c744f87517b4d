// Backoffice API HTTP client
//
// Wraps `reqwest::Client` with URL construction, bearer-token attachment,
// and `{status, resultado}` envelope unwrapping. Endpoint modules (auth,
// categories, products) are implemented as inherent methods in separate
// files to keep this module focused on transport mechanics.

use std::sync::RwLock;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::Envelope;
use crate::transport::TransportConfig;

/// Error body shapes the API uses on non-2xx responses:
/// `{"message": "..."}` or `{"error": "..."}`.
#[derive(serde::Deserialize)]
struct ErrorReply {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Raw HTTP client for the backoffice REST API.
///
/// Holds the bearer token for the current session; the token is attached
/// to every request while set and can be swapped or cleared at any time
/// (the auth layer owns that lifecycle).
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    bearer: RwLock<Option<SecretString>>,
}

impl ApiClient {
    /// Create a new client from a `TransportConfig`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            bearer: RwLock::new(None),
        }
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client (for auth flows that bypass the
    /// bearer-token machinery).
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── Bearer token management ──────────────────────────────────────

    /// Store the bearer token used on subsequent requests.
    pub fn set_token(&self, token: SecretString) {
        trace!("storing bearer token");
        *self.bearer.write().expect("bearer lock poisoned") = Some(token);
    }

    /// Drop the stored bearer token.
    pub fn clear_token(&self) {
        trace!("clearing bearer token");
        *self.bearer.write().expect("bearer lock poisoned") = None;
    }

    /// `true` while a bearer token is set.
    pub fn has_token(&self) -> bool {
        self.bearer.read().expect("bearer lock poisoned").is_some()
    }

    /// Apply the stored token to a request builder.
    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let guard = self.bearer.read().expect("bearer lock poisoned");
        match guard.as_ref() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"categoria/3"`) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/{path}")).map_err(Error::InvalidUrl)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and unwrap the collection envelope.
    pub(crate) async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, Error> {
        let url = self.url(path)?;
        debug!("GET {}", url);

        let resp = self
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_envelope(resp).await
    }

    /// Send a POST request with a JSON body, discarding any response body.
    pub(crate) async fn post_empty(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("POST {}", url);

        let resp = self
            .authorize(self.http.post(url).json(body))
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::handle_empty(resp).await
    }

    /// Send a PUT request with a JSON body, discarding any response body.
    pub(crate) async fn put_empty(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("PUT {}", url);

        let resp = self
            .authorize(self.http.put(url).json(body))
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::handle_empty(resp).await
    }

    /// Send a DELETE request, discarding any response body.
    pub(crate) async fn delete_empty(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {}", url);

        let resp = self
            .authorize(self.http.delete(url))
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    /// Parse the `{status, resultado}` envelope, returning `resultado` on
    /// success or an `Error::Api` when the envelope reports failure.
    async fn parse_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> Result<Vec<T>, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::error_from(status, resp).await);
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        let envelope: Envelope<T> = Self::parse_strict(&body)?;

        if envelope.status {
            Ok(envelope.resultado)
        } else {
            Err(Error::Api {
                status: status.as_u16(),
                message: "request rejected by the API (status: false)".into(),
            })
        }
    }

    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::error_from(status, resp).await)
        }
    }

    /// Strictly deserialize a 2xx body; a shape violation aborts the
    /// operation with the raw body retained for debugging.
    fn parse_strict<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
        serde_json::from_str(body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::MalformedResponse {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.to_owned(),
            }
        })
    }

    /// Build an `Error::Api` from a non-2xx response, preferring the
    /// server-provided message when one is present.
    pub(crate) async fn error_from(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorReply>(&raw)
            .ok()
            .and_then(|e| e.message.or(e.error))
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw[..raw.len().min(200)].to_owned()
                }
            });

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}
