// FreelancerRepository: typed adapter over the global freelancers
// collection. Admin views filter by owning account; the lookup path
// filters by the opaque freelancer token.

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::core::{AppError, Result};
use crate::modules::freelancers::models::Freelancer;
use crate::store::{CollectionPath, CollectionQuery, DocumentStore, RawDocument, Subscription};

const COLLECTION: &str = "freelancers";

#[derive(Clone)]
pub struct FreelancerRepository {
    store: Arc<dyn DocumentStore>,
}

impl FreelancerRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn path() -> CollectionPath {
        CollectionPath::global(COLLECTION)
    }

    fn decode(docs: Vec<RawDocument>) -> Vec<Freelancer> {
        docs.into_iter()
            .filter_map(|doc| match serde_json::from_value::<Freelancer>(doc.data) {
                Ok(mut freelancer) => {
                    freelancer.id = Some(doc.id);
                    Some(freelancer)
                }
                Err(err) => {
                    warn!(id = %doc.id, "skipping malformed freelancer document: {}", err);
                    None
                }
            })
            .collect()
    }

    /// Freelancers owned by one admin account.
    pub async fn list_for_admin(&self, admin_id: &str) -> Result<Vec<Freelancer>> {
        let query = CollectionQuery::all(Self::path()).with_filter("adminId", admin_id);
        let docs = self.store.fetch(&query).await?;
        Ok(Self::decode(docs))
    }

    /// Candidates carrying the given lookup token, across all accounts.
    pub async fn find_by_token(&self, token: &str) -> Result<Vec<Freelancer>> {
        let query = CollectionQuery::all(Self::path()).with_filter("freelancerId", token);
        let docs = self.store.fetch(&query).await?;
        Ok(Self::decode(docs))
    }

    pub async fn get(&self, id: &str) -> Result<Freelancer> {
        let docs = self.store.fetch(&CollectionQuery::all(Self::path())).await?;
        Self::decode(docs)
            .into_iter()
            .find(|f| f.id.as_deref() == Some(id))
            .ok_or_else(|| AppError::not_found(format!("Freelancer {}", id)))
    }

    pub async fn create(&self, freelancer: &Freelancer) -> Result<String> {
        freelancer.validate()?;
        let doc = serde_json::to_value(freelancer)?;
        self.store.create(&Self::path(), doc).await
    }

    pub async fn update(&self, id: &str, patch: Value) -> Result<()> {
        self.store.update(&Self::path(), id, patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(&Self::path(), id).await
    }

    pub fn subscribe_for_admin<F, E>(&self, admin_id: &str, on_change: F, on_error: E) -> Subscription
    where
        F: Fn(Vec<Freelancer>) + Send + Sync + 'static,
        E: Fn(AppError) + Send + Sync + 'static,
    {
        self.store.subscribe(
            CollectionQuery::all(Self::path()).with_filter("adminId", admin_id),
            Arc::new(move |docs| on_change(Self::decode(docs))),
            Arc::new(on_error),
        )
    }
}
