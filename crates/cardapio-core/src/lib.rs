//! Domain layer for the Cardapio backoffice client.
//!
//! Sits between a presentation layer and `cardapio-api`: UI-facing model
//! types, the schema validator, per-resource clients that gate every write
//! behind validation, the atomically-replaced auth store, and the generic
//! [`ScreenController`] CRUD state machine.

pub mod auth;
pub mod controller;
pub mod convert;
pub mod error;
pub mod model;
pub mod resource;
pub mod validate;

pub use auth::{AuthStore, CredentialStore, MemoryCredentialStore, StorageError};
pub use controller::{Confirmation, FormMode, FormState, LoadState, ScreenController};
pub use error::CoreError;
pub use model::{Category, CategoryForm, Product, ProductForm, Session, User};
pub use resource::{CategoryClient, ProductClient, Resource};
pub use validate::FieldError;
