// Authentication endpoint
//
// Bearer-token login. The endpoint returns the token and the user
// identity in one payload; storing the token on the client (and keeping
// it paired with the user) is the auth layer's job, not this crate's.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::LoginReply;

impl ApiClient {
    /// Authenticate with email and password.
    ///
    /// `POST /login` with `{email, password}`. A 401 or 403 means the API
    /// rejected the credentials; any other non-2xx surfaces as `Api`.
    /// The response is strictly parsed -- a 2xx missing `token` or `user`
    /// is a malformed response, not a session.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<LoginReply, Error> {
        let url = self.url("login")?;
        debug!("logging in at {}", url);

        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });

        let resp = self
            .http()
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            let err = Self::error_from(status, resp).await;
            let message = match err {
                Error::Api { message, .. } => message,
                other => other.to_string(),
            };
            return Err(Error::Authentication { message });
        }
        if !status.is_success() {
            return Err(Self::error_from(status, resp).await);
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        let reply: LoginReply = serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::MalformedResponse {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })?;

        debug!(user = %reply.user.email, "login successful");
        Ok(reply)
    }
}
