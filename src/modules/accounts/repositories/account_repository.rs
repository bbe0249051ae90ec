// AccountRepository: typed adapter over the global admin-accounts
// collection. The emptiness check gates the one-time sign-up path.

use std::sync::Arc;

use tracing::warn;

use crate::core::{AppError, Result};
use crate::modules::accounts::models::AdminAccount;
use crate::store::{CollectionPath, CollectionQuery, DocumentStore, RawDocument};

const COLLECTION: &str = "users";

#[derive(Clone)]
pub struct AccountRepository {
    store: Arc<dyn DocumentStore>,
}

impl AccountRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn path() -> CollectionPath {
        CollectionPath::global(COLLECTION)
    }

    fn decode(docs: Vec<RawDocument>) -> Vec<AdminAccount> {
        docs.into_iter()
            .filter_map(|doc| match serde_json::from_value::<AdminAccount>(doc.data) {
                Ok(mut account) => {
                    account.id = Some(doc.id);
                    Some(account)
                }
                Err(err) => {
                    warn!(id = %doc.id, "skipping malformed account document: {}", err);
                    None
                }
            })
            .collect()
    }

    /// Whether any admin account exists yet.
    pub async fn any_exists(&self) -> Result<bool> {
        let docs = self.store.fetch(&CollectionQuery::all(Self::path())).await?;
        Ok(!docs.is_empty())
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<AdminAccount>> {
        let query = CollectionQuery::all(Self::path()).with_filter("email", email);
        let docs = self.store.fetch(&query).await?;
        Ok(Self::decode(docs).into_iter().next())
    }

    pub async fn create(&self, account: &AdminAccount) -> Result<String> {
        if self.find_by_email(&account.email).await?.is_some() {
            return Err(AppError::validation(format!(
                "An account for '{}' already exists",
                account.email
            )));
        }

        let doc = serde_json::to_value(account)?;
        self.store.create(&Self::path(), doc).await
    }
}
