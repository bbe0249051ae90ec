use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::clients::models::{Category, Client};
use crate::modules::clients::repositories::{CategoryRepository, ClientRepository};

/// Client form fields
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDraft {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub category: Option<String>,
}

/// Service for client and category management
pub struct ClientService {
    clients: ClientRepository,
    categories: CategoryRepository,
}

impl ClientService {
    pub fn new(clients: ClientRepository, categories: CategoryRepository) -> Self {
        Self {
            clients,
            categories,
        }
    }

    /// Reject a name already used by a different client of this admin.
    async fn ensure_unique_name(
        &self,
        admin_id: &str,
        name: &str,
        except_id: Option<&str>,
    ) -> Result<()> {
        let taken = self
            .clients
            .list(admin_id)
            .await?
            .iter()
            .any(|c| c.name == name && c.id.as_deref() != except_id);

        if taken {
            return Err(AppError::validation(format!(
                "A client named '{}' already exists",
                name
            )));
        }
        Ok(())
    }

    pub async fn add(&self, admin_id: &str, draft: ClientDraft) -> Result<String> {
        self.ensure_unique_name(admin_id, &draft.name, None).await?;

        let client = Client::new(draft.name, draft.price, draft.category)?;
        let id = self.clients.create(admin_id, &client).await?;
        info!(admin_id, client_id = %id, "client added");
        Ok(id)
    }

    pub async fn update(&self, admin_id: &str, id: &str, draft: ClientDraft) -> Result<()> {
        self.ensure_unique_name(admin_id, &draft.name, Some(id)).await?;

        // Validate before mutating; the patch carries the full form.
        Client::new(draft.name.clone(), draft.price, draft.category.clone())?;

        let patch = json!({
            "name": draft.name,
            "price": draft.price,
            "category": draft.category,
        });
        self.clients.update(admin_id, id, patch).await
    }

    pub async fn remove(&self, admin_id: &str, id: &str) -> Result<()> {
        self.clients.delete(admin_id, id).await
    }

    /// Add a category tag; duplicates within the account are rejected.
    pub async fn add_category(&self, admin_id: &str, name: String) -> Result<String> {
        let exists = self
            .categories
            .list(admin_id)
            .await?
            .iter()
            .any(|c| c.name == name);
        if exists {
            return Err(AppError::validation(format!(
                "Category '{}' already exists",
                name
            )));
        }

        let category = Category::new(name)?;
        self.categories.create(admin_id, &category).await
    }

    pub async fn remove_category(&self, admin_id: &str, id: &str) -> Result<()> {
        self.categories.delete(admin_id, id).await
    }
}
