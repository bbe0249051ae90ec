// ClientRepository: typed adapter over the per-admin clients collection.

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::core::{AppError, Result};
use crate::modules::clients::models::Client;
use crate::store::{CollectionPath, CollectionQuery, DocumentStore, RawDocument, Subscription};

const COLLECTION: &str = "clients";

#[derive(Clone)]
pub struct ClientRepository {
    store: Arc<dyn DocumentStore>,
}

impl ClientRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn path(admin_id: &str) -> CollectionPath {
        CollectionPath::admin_scoped(admin_id, COLLECTION)
    }

    fn decode(docs: Vec<RawDocument>) -> Vec<Client> {
        docs.into_iter()
            .filter_map(|doc| match serde_json::from_value::<Client>(doc.data) {
                Ok(mut client) => {
                    client.id = Some(doc.id);
                    Some(client)
                }
                Err(err) => {
                    warn!(id = %doc.id, "skipping malformed client document: {}", err);
                    None
                }
            })
            .collect()
    }

    pub async fn list(&self, admin_id: &str) -> Result<Vec<Client>> {
        let docs = self
            .store
            .fetch(&CollectionQuery::all(Self::path(admin_id)))
            .await?;
        Ok(Self::decode(docs))
    }

    pub async fn get(&self, admin_id: &str, id: &str) -> Result<Client> {
        self.list(admin_id)
            .await?
            .into_iter()
            .find(|c| c.id.as_deref() == Some(id))
            .ok_or_else(|| AppError::not_found(format!("Client {}", id)))
    }

    pub async fn create(&self, admin_id: &str, client: &Client) -> Result<String> {
        client.validate()?;
        let doc = serde_json::to_value(client)?;
        self.store.create(&Self::path(admin_id), doc).await
    }

    pub async fn update(&self, admin_id: &str, id: &str, patch: Value) -> Result<()> {
        self.store.update(&Self::path(admin_id), id, patch).await
    }

    pub async fn delete(&self, admin_id: &str, id: &str) -> Result<()> {
        self.store.delete(&Self::path(admin_id), id).await
    }

    pub fn subscribe<F, E>(&self, admin_id: &str, on_change: F, on_error: E) -> Subscription
    where
        F: Fn(Vec<Client>) + Send + Sync + 'static,
        E: Fn(AppError) + Send + Sync + 'static,
    {
        self.store.subscribe(
            CollectionQuery::all(Self::path(admin_id)),
            Arc::new(move |docs| on_change(Self::decode(docs))),
            Arc::new(on_error),
        )
    }
}
