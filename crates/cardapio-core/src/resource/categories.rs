use std::sync::Arc;

use async_trait::async_trait;

use cardapio_api::ApiClient;

use crate::convert;
use crate::error::CoreError;
use crate::model::{Category, CategoryForm};
use crate::resource::Resource;
use crate::validate;

/// CRUD client for the categories of one organization.
pub struct CategoryClient {
    api: Arc<ApiClient>,
    organization_id: i64,
}

impl CategoryClient {
    pub fn new(api: Arc<ApiClient>, organization_id: i64) -> Self {
        Self {
            api,
            organization_id,
        }
    }
}

#[async_trait]
impl Resource for CategoryClient {
    type Item = Category;
    type Form = CategoryForm;

    fn form_from(item: &Category) -> CategoryForm {
        CategoryForm {
            name: item.name.clone(),
            active: item.active,
            icon: item.icon.clone(),
        }
    }

    fn id_of(item: &Category) -> i64 {
        item.id
    }

    async fn list(&self) -> Result<Vec<Category>, CoreError> {
        let wire = self.api.list_categories(self.organization_id).await?;
        Ok(wire.into_iter().map(Category::from).collect())
    }

    async fn create(&self, form: &CategoryForm) -> Result<(), CoreError> {
        let draft = validate::category_draft(form).map_err(CoreError::Validation)?;
        let body = convert::category_body(&draft, Some(self.organization_id));
        self.api.create_category(&body).await?;
        Ok(())
    }

    async fn update(&self, id: i64, form: &CategoryForm) -> Result<(), CoreError> {
        let draft = validate::category_draft(form).map_err(CoreError::Validation)?;
        // Updates resend the full editable field set; the organization
        // stays out of the body on this path.
        let body = convert::category_body(&draft, None);
        self.api.update_category(id, &body).await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), CoreError> {
        self.api.delete_category(id).await?;
        Ok(())
    }
}
