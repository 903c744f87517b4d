// Product endpoints
//
// Unlike categories, product creation is organization-scoped via the
// path. Updates send a partial body; absent fields are left untouched
// by the server.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{CreateProductBody, ProductPatchBody, WireProduct};

impl ApiClient {
    /// List all products of an organization, each with its optional
    /// denormalized category summary.
    ///
    /// `GET /produto/{org}`
    pub async fn list_products(&self, organization_id: i64) -> Result<Vec<WireProduct>, Error> {
        debug!(organization_id, "listing products");
        self.get_list(&format!("produto/{organization_id}")).await
    }

    /// Create a product under an organization.
    ///
    /// `POST /produto/{org}`
    pub async fn create_product(
        &self,
        organization_id: i64,
        body: &CreateProductBody,
    ) -> Result<(), Error> {
        debug!(organization_id, name = %body.name, "creating product");
        self.post_empty(&format!("produto/{organization_id}"), body)
            .await
    }

    /// Update a product with a partial field set.
    ///
    /// `PUT /produto/{id}`
    pub async fn update_product(&self, id: i64, patch: &ProductPatchBody) -> Result<(), Error> {
        debug!(id, "updating product");
        self.put_empty(&format!("produto/{id}"), patch).await
    }

    /// Delete a product.
    ///
    /// `DELETE /produto/{id}`
    pub async fn delete_product(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting product");
        self.delete_empty(&format!("produto/{id}")).await
    }
}
