// CategoryRepository: typed adapter over the per-admin category tags.
// The collection keeps its historical name from the original data model.

use std::sync::Arc;

use tracing::warn;

use crate::core::{AppError, Result};
use crate::modules::clients::models::Category;
use crate::store::{CollectionPath, CollectionQuery, DocumentStore, RawDocument, Subscription};

const COLLECTION: &str = "clientCategories";

#[derive(Clone)]
pub struct CategoryRepository {
    store: Arc<dyn DocumentStore>,
}

impl CategoryRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn path(admin_id: &str) -> CollectionPath {
        CollectionPath::admin_scoped(admin_id, COLLECTION)
    }

    fn decode(docs: Vec<RawDocument>) -> Vec<Category> {
        docs.into_iter()
            .filter_map(|doc| match serde_json::from_value::<Category>(doc.data) {
                Ok(mut category) => {
                    category.id = Some(doc.id);
                    Some(category)
                }
                Err(err) => {
                    warn!(id = %doc.id, "skipping malformed category document: {}", err);
                    None
                }
            })
            .collect()
    }

    pub async fn list(&self, admin_id: &str) -> Result<Vec<Category>> {
        let docs = self
            .store
            .fetch(&CollectionQuery::all(Self::path(admin_id)))
            .await?;
        Ok(Self::decode(docs))
    }

    pub async fn create(&self, admin_id: &str, category: &Category) -> Result<String> {
        let doc = serde_json::to_value(category)?;
        self.store.create(&Self::path(admin_id), doc).await
    }

    pub async fn delete(&self, admin_id: &str, id: &str) -> Result<()> {
        self.store.delete(&Self::path(admin_id), id).await
    }

    pub fn subscribe<F, E>(&self, admin_id: &str, on_change: F, on_error: E) -> Subscription
    where
        F: Fn(Vec<Category>) + Send + Sync + 'static,
        E: Fn(AppError) + Send + Sync + 'static,
    {
        self.store.subscribe(
            CollectionQuery::all(Self::path(admin_id)),
            Arc::new(move |docs| on_change(Self::decode(docs))),
            Arc::new(on_error),
        )
    }
}
