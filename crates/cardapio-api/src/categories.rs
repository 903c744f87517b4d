// Category endpoints
//
// Listing is organization-scoped via the path; creation carries the
// organization in the body instead. Server-returned order is preserved.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{CategoryBody, WireCategory};

impl ApiClient {
    /// List all categories of an organization.
    ///
    /// `GET /categoria/{org}`
    pub async fn list_categories(&self, organization_id: i64) -> Result<Vec<WireCategory>, Error> {
        debug!(organization_id, "listing categories");
        self.get_list(&format!("categoria/{organization_id}")).await
    }

    /// Create a category.
    ///
    /// `POST /categoria` -- the owning organization travels in the body,
    /// so `body.organization_id` must be set by the caller.
    pub async fn create_category(&self, body: &CategoryBody) -> Result<(), Error> {
        debug!(name = %body.name, "creating category");
        self.post_empty("categoria", body).await
    }

    /// Update a category.
    ///
    /// `PUT /categoria/{id}` with the full editable field set.
    pub async fn update_category(&self, id: i64, body: &CategoryBody) -> Result<(), Error> {
        debug!(id, "updating category");
        self.put_empty(&format!("categoria/{id}"), body).await
    }

    /// Delete a category.
    ///
    /// `DELETE /categoria/{id}`
    pub async fn delete_category(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting category");
        self.delete_empty(&format!("categoria/{id}")).await
    }
}
