use std::sync::Arc;

use async_trait::async_trait;

use cardapio_api::ApiClient;

use crate::convert;
use crate::error::CoreError;
use crate::model::{Product, ProductForm, ProductPatch};
use crate::resource::Resource;
use crate::validate;

/// CRUD client for the products of one organization.
pub struct ProductClient {
    api: Arc<ApiClient>,
    organization_id: i64,
}

impl ProductClient {
    pub fn new(api: Arc<ApiClient>, organization_id: i64) -> Self {
        Self {
            api,
            organization_id,
        }
    }

    /// Update any non-empty subset of a product's editable fields.
    ///
    /// The full-form path used by the screen controller goes through
    /// [`Resource::update`]; this is the surface for targeted changes
    /// such as toggling `active` from a list row.
    pub async fn update_partial(&self, id: i64, patch: &ProductPatch) -> Result<(), CoreError> {
        validate::product_patch(patch).map_err(CoreError::Validation)?;
        let body = convert::product_patch_body(patch);
        self.api.update_product(id, &body).await?;
        Ok(())
    }
}

#[async_trait]
impl Resource for ProductClient {
    type Item = Product;
    type Form = ProductForm;

    fn form_from(item: &Product) -> ProductForm {
        ProductForm {
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.to_string(),
            category_id: item.category_id.to_string(),
            image: String::new(),
            active: item.active,
        }
    }

    fn id_of(item: &Product) -> i64 {
        item.id
    }

    async fn list(&self) -> Result<Vec<Product>, CoreError> {
        let wire = self.api.list_products(self.organization_id).await?;
        Ok(wire.into_iter().map(Product::from).collect())
    }

    async fn create(&self, form: &ProductForm) -> Result<(), CoreError> {
        let draft = validate::product_draft(form).map_err(CoreError::Validation)?;
        let body = convert::product_create_body(&draft);
        self.api.create_product(self.organization_id, &body).await?;
        Ok(())
    }

    async fn update(&self, id: i64, form: &ProductForm) -> Result<(), CoreError> {
        let draft = validate::product_draft(form).map_err(CoreError::Validation)?;
        let patch = ProductPatch::from(&draft);
        let body = convert::product_patch_body(&patch);
        self.api.update_product(id, &body).await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), CoreError> {
        self.api.delete_product(id).await?;
        Ok(())
    }
}
