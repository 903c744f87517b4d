// Wire-level response and payload types.
//
// Field names follow the API's Portuguese naming; `#[serde(rename)]` maps
// them onto Rust names. Required fields are left strict on purpose: a
// response missing one fails deserialization, which is how malformed
// responses are rejected before any partially-typed data escapes.

use serde::{Deserialize, Serialize};

// ── Response envelope ────────────────────────────────────────────────

/// Standard collection envelope.
///
/// Every list endpoint wraps its payload:
/// ```json
/// { "status": true, "resultado": [...] }
/// ```
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub status: bool,
    pub resultado: Vec<T>,
}

// ── Category ─────────────────────────────────────────────────────────

/// Category record from `GET /categoria/{org}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireCategory {
    #[serde(rename = "id_categoria")]
    pub id: i64,
    #[serde(rename = "id_empresa")]
    pub organization_id: i64,
    #[serde(rename = "nome_categoria")]
    pub name: String,
    /// Numeric flag: 0 = inactive, nonzero = active.
    #[serde(rename = "ativo")]
    pub active: i64,
    #[serde(rename = "data_cadastrou")]
    pub created_at: String,
    #[serde(rename = "data_update")]
    pub updated_at: Option<String>,
    pub icon: String,
}

/// Category summary nested inside a product. The API is laxer here than
/// on the category endpoint itself (`icon` may be null or absent).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireCategorySummary {
    #[serde(rename = "id_categoria")]
    pub id: i64,
    #[serde(rename = "id_empresa")]
    pub organization_id: i64,
    #[serde(rename = "nome_categoria")]
    pub name: String,
    #[serde(rename = "ativo")]
    pub active: i64,
    #[serde(rename = "data_cadastrou")]
    pub created_at: String,
    #[serde(rename = "data_update")]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Category payload for `POST /categoria` and `PUT /categoria/{id}`.
///
/// Creation carries the owning organization in the body; updates omit it.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryBody {
    #[serde(rename = "nome_categoria")]
    pub name: String,
    #[serde(rename = "ativo")]
    pub active: i64,
    pub icon: String,
    #[serde(rename = "id_empresa", skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<i64>,
}

// ── Product ──────────────────────────────────────────────────────────

/// Product record from `GET /produto/{org}`, with an optional
/// denormalized category summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireProduct {
    #[serde(rename = "id_produto")]
    pub id: i64,
    #[serde(rename = "id_empresa")]
    pub organization_id: i64,
    #[serde(rename = "id_categoria")]
    pub category_id: i64,
    #[serde(rename = "nome_produto")]
    pub name: String,
    #[serde(rename = "valor")]
    pub price: f64,
    #[serde(rename = "ativo")]
    pub active: i64,
    #[serde(rename = "data_cadastrou")]
    pub created_at: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "categoria", default)]
    pub category: Option<WireCategorySummary>,
}

/// Product payload for `POST /produto/{org}`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateProductBody {
    #[serde(rename = "nome_produto")]
    pub name: String,
    #[serde(rename = "id_categoria")]
    pub category_id: i64,
    #[serde(rename = "valor")]
    pub price: f64,
    #[serde(rename = "descricao")]
    pub description: String,
}

/// Partial product payload for `PUT /produto/{id}`.
///
/// Absent fields are skipped entirely rather than sent as null.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductPatchBody {
    #[serde(rename = "nome_produto", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "id_categoria", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(rename = "valor", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "ativo", skip_serializing_if = "Option::is_none")]
    pub active: Option<i64>,
}

impl ProductPatchBody {
    /// `true` when no field is set; an empty patch must not be sent.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category_id.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.active.is_none()
    }
}

// ── Auth ─────────────────────────────────────────────────────────────

/// Authenticated user identity from `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(rename = "empresaId")]
    pub organization_id: i64,
    pub role: i64,
}

/// Successful login response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginReply {
    pub token: String,
    pub user: WireUser,
}
