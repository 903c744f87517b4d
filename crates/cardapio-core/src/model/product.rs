use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product, belonging to one category within one organization.
///
/// `category_name` is flattened from the denormalized category summary
/// the list endpoint nests into each product, when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub organization_id: i64,
    pub category_id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub category_name: Option<String>,
}

/// Edit buffer for the product form.
///
/// `price` and `category_id` are kept as raw text the way a form input
/// holds them; the validator coerces them into numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category_id: String,
    pub image: String,
    pub active: bool,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            category_id: String::new(),
            image: String::new(),
            active: true,
        }
    }
}

/// A validated product draft, safe to serialize to the wire unchanged.
/// Produced by [`crate::validate::product_draft`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: i64,
    pub image: Option<String>,
    pub active: bool,
}

/// Partial product update: any non-empty subset of the editable fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<i64>,
    pub active: Option<bool>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category_id.is_none()
            && self.active.is_none()
    }
}

impl From<&ProductDraft> for ProductPatch {
    /// The full-field patch a submitted edit form produces.
    fn from(draft: &ProductDraft) -> Self {
        Self {
            name: Some(draft.name.clone()),
            description: Some(draft.description.clone()),
            price: Some(draft.price),
            category_id: Some(draft.category_id),
            active: Some(draft.active),
        }
    }
}
