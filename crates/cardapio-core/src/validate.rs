// ── Outbound schema validation ──
//
// Pure, total functions over form input. Failure is a list of
// (field, message) violations, never a panic; permissive coercion turns
// the raw strings a form holds into typed values. The strict inbound
// surface is serde deserialization of the wire types in `cardapio-api`.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use url::Url;

use crate::model::{
    CategoryDraft, CategoryForm, DEFAULT_ICON, ProductDraft, ProductForm, ProductPatch,
};

/// Minimum length for resource names.
const NAME_MIN: usize = 3;
/// Minimum password length accepted before hitting the API.
const PASSWORD_MIN: usize = 6;

/// A single field-level violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

// ── Field helpers ────────────────────────────────────────────────────

fn checked_name(raw: &str, errors: &mut Vec<FieldError>) -> String {
    let name = raw.trim();
    if name.is_empty() {
        errors.push(FieldError::new("name", "name is required"));
    } else if name.chars().count() < NAME_MIN {
        errors.push(FieldError::new(
            "name",
            format!("name must be at least {NAME_MIN} characters"),
        ));
    }
    name.to_owned()
}

/// Coerce a positive decimal out of raw form text.
fn positive_number(field: &'static str, raw: &str, errors: &mut Vec<FieldError>) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.push(FieldError::new(field, format!("{field} is required")));
        return 0.0;
    }
    // Forms in pt-BR locales often use a decimal comma.
    match raw.replace(',', ".").parse::<f64>() {
        Ok(value) if value > 0.0 => value,
        Ok(_) => {
            errors.push(FieldError::new(field, format!("{field} must be positive")));
            0.0
        }
        Err(_) => {
            errors.push(FieldError::new(field, format!("{field} must be a number")));
            0.0
        }
    }
}

/// Coerce a positive integer id out of raw form text.
fn positive_id(field: &'static str, raw: &str, errors: &mut Vec<FieldError>) -> i64 {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.push(FieldError::new(field, format!("{field} is required")));
        return 0;
    }
    match raw.parse::<i64>() {
        Ok(value) if value > 0 => value,
        _ => {
            errors.push(FieldError::new(
                field,
                format!("{field} must be a positive number"),
            ));
            0
        }
    }
}

/// An optional URL-shaped string: blank is fine, anything else must parse.
fn optional_url(field: &'static str, raw: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if Url::parse(raw).is_err() {
        errors.push(FieldError::new(field, format!("{field} must be a URL")));
        return None;
    }
    Some(raw.to_owned())
}

// ── Validation surfaces ──────────────────────────────────────────────

/// Validate a category edit buffer into a wire-safe draft.
pub fn category_draft(form: &CategoryForm) -> Result<CategoryDraft, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = checked_name(&form.name, &mut errors);
    let icon = match form.icon.trim() {
        "" => DEFAULT_ICON.to_owned(),
        icon => icon.to_owned(),
    };

    if errors.is_empty() {
        Ok(CategoryDraft {
            name,
            active: form.active,
            icon,
        })
    } else {
        Err(errors)
    }
}

/// Validate a product edit buffer into a wire-safe draft.
pub fn product_draft(form: &ProductForm) -> Result<ProductDraft, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = checked_name(&form.name, &mut errors);
    let description = form.description.trim().to_owned();
    if description.is_empty() {
        errors.push(FieldError::new("description", "description is required"));
    }
    let price = positive_number("price", &form.price, &mut errors);
    let category_id = positive_id("category_id", &form.category_id, &mut errors);
    let image = optional_url("image", &form.image, &mut errors);

    if errors.is_empty() {
        Ok(ProductDraft {
            name,
            description,
            price,
            category_id,
            image,
            active: form.active,
        })
    } else {
        Err(errors)
    }
}

/// Validate a partial product update: any non-empty subset of fields,
/// each present field held to the same rules as a full draft.
pub fn product_patch(patch: &ProductPatch) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if patch.is_empty() {
        errors.push(FieldError::new("patch", "at least one field must be set"));
    }
    if let Some(ref name) = patch.name {
        checked_name(name, &mut errors);
    }
    if let Some(ref description) = patch.description {
        if description.trim().is_empty() {
            errors.push(FieldError::new("description", "description is required"));
        }
    }
    if let Some(price) = patch.price {
        if price <= 0.0 {
            errors.push(FieldError::new("price", "price must be positive"));
        }
    }
    if let Some(category_id) = patch.category_id {
        if category_id <= 0 {
            errors.push(FieldError::new(
                "category_id",
                "category_id must be a positive number",
            ));
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Validate login input before it reaches the network.
pub fn login(email: &str, password: &SecretString) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    let email = email.trim();
    if email.is_empty() {
        errors.push(FieldError::new("email", "email is required"));
    } else if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        errors.push(FieldError::new("email", "email is invalid"));
    }

    let password_len = password.expose_secret().chars().count();
    if password_len == 0 {
        errors.push(FieldError::new("password", "password is required"));
    } else if password_len < PASSWORD_MIN {
        errors.push(FieldError::new(
            "password",
            format!("password must be at least {PASSWORD_MIN} characters"),
        ));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
