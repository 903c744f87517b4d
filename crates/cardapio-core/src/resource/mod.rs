// ── Resource clients ──
//
// One client per CRUD-managed resource type. Every write path runs the
// outbound validator first, so an invalid draft can never reach the
// network; list paths convert wire records into domain types preserving
// server-returned order.

pub mod categories;
pub mod products;

use async_trait::async_trait;

pub use categories::CategoryClient;
pub use products::ProductClient;

use crate::error::CoreError;

/// The seam between the generic [`crate::ScreenController`] and a typed
/// resource client.
#[async_trait]
pub trait Resource: Send + Sync {
    type Item: Clone + Send + Sync + 'static;
    type Form: Clone + Default + Send + Sync + 'static;

    /// Rebuild an edit buffer from an existing item.
    fn form_from(item: &Self::Item) -> Self::Form;

    /// Stable identifier used for updates and deletes.
    fn id_of(item: &Self::Item) -> i64;

    /// Fetch the full collection, in server order.
    async fn list(&self) -> Result<Vec<Self::Item>, CoreError>;

    /// Validate and create. `CoreError::Validation` means nothing was sent.
    async fn create(&self, form: &Self::Form) -> Result<(), CoreError>;

    /// Validate and update the full editable field set of one item.
    async fn update(&self, id: i64, form: &Self::Form) -> Result<(), CoreError>;

    /// Delete one item. Not idempotent from the API's point of view:
    /// deleting an id that is already gone surfaces the API failure.
    async fn delete(&self, id: i64) -> Result<(), CoreError>;
}
