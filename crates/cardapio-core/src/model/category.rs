use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Icon token assigned to categories created without an explicit icon.
pub const DEFAULT_ICON: &str = "Lucid";

/// A product category, owned by one organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub organization_id: i64,
    pub name: String,
    pub active: bool,
    pub icon: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Edit buffer for the category form. Exists only while a create/edit
/// panel is open; discarded on cancel or successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
    pub active: bool,
    pub icon: String,
}

impl Default for CategoryForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            active: true,
            icon: DEFAULT_ICON.to_owned(),
        }
    }
}

/// A validated category draft, safe to serialize to the wire unchanged.
/// Produced by [`crate::validate::category_draft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub active: bool,
    pub icon: String,
}
