// ── Wire-to-domain conversions ──
//
// Bridges raw `cardapio_api` wire types into the canonical domain model
// and turns validated drafts back into the exact wire payloads the API
// expects. Numeric flags become booleans here; nested category summaries
// are flattened to a display name; timestamps are parsed leniently.

use chrono::{DateTime, Utc};

use cardapio_api::models::{
    CategoryBody, CreateProductBody, ProductPatchBody, WireCategory, WireProduct,
};

use crate::model::{Category, CategoryDraft, Product, ProductDraft, ProductPatch, User};

// ── Helpers ──────────────────────────────────────────────────────────

/// Parse an ISO-8601 timestamp string, silently dropping unparseable
/// values. The API's timestamp formatting is not contractual.
fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn flag_to_bool(flag: i64) -> bool {
    flag != 0
}

fn bool_to_flag(value: bool) -> i64 {
    i64::from(value)
}

// ── Inbound ──────────────────────────────────────────────────────────

impl From<WireCategory> for Category {
    fn from(wire: WireCategory) -> Self {
        Self {
            id: wire.id,
            organization_id: wire.organization_id,
            name: wire.name,
            active: flag_to_bool(wire.active),
            icon: wire.icon,
            created_at: parse_datetime(&wire.created_at),
            updated_at: wire.updated_at.as_deref().and_then(parse_datetime),
        }
    }
}

impl From<WireProduct> for Product {
    fn from(wire: WireProduct) -> Self {
        Self {
            id: wire.id,
            organization_id: wire.organization_id,
            category_id: wire.category_id,
            name: wire.name,
            description: wire.description,
            price: wire.price,
            active: flag_to_bool(wire.active),
            created_at: parse_datetime(&wire.created_at),
            category_name: wire.category.map(|c| c.name),
        }
    }
}

impl From<cardapio_api::models::WireUser> for User {
    fn from(wire: cardapio_api::models::WireUser) -> Self {
        Self {
            id: wire.id,
            email: wire.email,
            name: wire.name,
            organization_id: wire.organization_id,
            role: wire.role,
        }
    }
}

// ── Outbound ─────────────────────────────────────────────────────────

/// Wire payload for category create/update. Creation carries the owning
/// organization; updates pass `None`.
pub fn category_body(draft: &CategoryDraft, organization_id: Option<i64>) -> CategoryBody {
    CategoryBody {
        name: draft.name.clone(),
        active: bool_to_flag(draft.active),
        icon: draft.icon.clone(),
        organization_id,
    }
}

/// Wire payload for product creation.
pub fn product_create_body(draft: &ProductDraft) -> CreateProductBody {
    CreateProductBody {
        name: draft.name.clone(),
        category_id: draft.category_id,
        price: draft.price,
        description: draft.description.clone(),
    }
}

/// Wire payload for a partial product update.
pub fn product_patch_body(patch: &ProductPatch) -> ProductPatchBody {
    ProductPatchBody {
        name: patch.name.clone(),
        category_id: patch.category_id,
        price: patch.price,
        description: patch.description.clone(),
        active: patch.active.map(bool_to_flag),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use cardapio_api::models::WireCategorySummary;

    fn wire_product() -> WireProduct {
        WireProduct {
            id: 12,
            organization_id: 7,
            category_id: 1,
            name: "Pizza Margherita".into(),
            price: 45.9,
            active: 1,
            created_at: "2024-06-15T10:30:00Z".into(),
            description: "Tomate e manjericão".into(),
            category: Some(WireCategorySummary {
                id: 1,
                organization_id: 7,
                name: "Pizzas".into(),
                active: 1,
                created_at: "2024-01-01T00:00:00Z".into(),
                updated_at: None,
                icon: None,
            }),
        }
    }

    #[test]
    fn category_flag_and_timestamps_convert() {
        let wire = WireCategory {
            id: 3,
            organization_id: 7,
            name: "Bebidas".into(),
            active: 0,
            created_at: "2024-06-15T10:30:00Z".into(),
            updated_at: Some("not a date".into()),
            icon: "Lucid".into(),
        };
        let category = Category::from(wire);
        assert!(!category.active);
        assert!(category.created_at.is_some());
        // Unparseable timestamps degrade to None, never to an error.
        assert!(category.updated_at.is_none());
    }

    #[test]
    fn product_flattens_nested_category_name() {
        let product = Product::from(wire_product());
        assert_eq!(product.category_name.as_deref(), Some("Pizzas"));
        assert!(product.active);
    }

    #[test]
    fn product_draft_round_trips_through_the_wire() {
        let draft = ProductDraft {
            name: "Pizza".into(),
            description: "desc".into(),
            price: 45.9,
            category_id: 1,
            image: None,
            active: true,
        };

        let body = product_create_body(&draft);

        // As if the API echoed the created record back on the next list.
        let echoed = WireProduct {
            id: 99,
            organization_id: 7,
            category_id: body.category_id,
            name: body.name.clone(),
            price: body.price,
            active: 1,
            created_at: "2024-06-15T10:30:00Z".into(),
            description: body.description.clone(),
            category: None,
        };
        let product = Product::from(echoed);

        assert_eq!(product.name, draft.name);
        assert_eq!(product.description, draft.description);
        assert!((product.price - draft.price).abs() < f64::EPSILON);
        assert_eq!(product.category_id, draft.category_id);
    }

    #[test]
    fn patch_body_maps_bool_flag() {
        let patch = ProductPatch {
            active: Some(false),
            ..ProductPatch::default()
        };
        let body = product_patch_body(&patch);
        assert_eq!(body.active, Some(0));
        assert!(body.name.is_none());
    }
}
