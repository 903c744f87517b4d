use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Authenticated user identity.
///
/// Serialized with the wire field names so that the persisted
/// `auth_user` entry matches what the API returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(rename = "empresaId")]
    pub organization_id: i64,
    pub role: i64,
}

/// The pairing of a bearer token and the authenticated user.
///
/// Always replaced whole: a token never exists without its user. The
/// auth store swaps `Arc<Session>` values atomically; consumers hold a
/// snapshot, never a live reference into mutable state.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: SecretString,
    pub user: User,
}
