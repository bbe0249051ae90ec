// SaleRepository: typed adapter over the document store for the
// per-admin sales collection. Delivered snapshots are ordered by sale
// date, newest first.

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::core::{AppError, Result};
use crate::modules::sales::models::Sale;
use crate::store::{CollectionPath, CollectionQuery, DocumentStore, RawDocument, Subscription};

const COLLECTION: &str = "sales";
const ORDER_FIELD: &str = "saleDate";

/// Repository for sale documents
#[derive(Clone)]
pub struct SaleRepository {
    store: Arc<dyn DocumentStore>,
}

impl SaleRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn path(admin_id: &str) -> CollectionPath {
        CollectionPath::admin_scoped(admin_id, COLLECTION)
    }

    fn query(admin_id: &str) -> CollectionQuery {
        CollectionQuery::all(Self::path(admin_id)).order_by_desc(ORDER_FIELD)
    }

    fn freelancer_query(admin_id: &str, freelancer_name: &str) -> CollectionQuery {
        CollectionQuery::all(Self::path(admin_id))
            .with_filter("freelancerName", freelancer_name)
            .order_by_desc(ORDER_FIELD)
    }

    /// Decode raw documents, skipping malformed entries with a warning
    /// so a single bad record never takes down a whole snapshot.
    fn decode(docs: Vec<RawDocument>) -> Vec<Sale> {
        docs.into_iter()
            .filter_map(|doc| match serde_json::from_value::<Sale>(doc.data) {
                Ok(mut sale) => {
                    sale.id = Some(doc.id);
                    Some(sale)
                }
                Err(err) => {
                    warn!(id = %doc.id, "skipping malformed sale document: {}", err);
                    None
                }
            })
            .collect()
    }

    /// All sales for an admin, newest first.
    pub async fn list(&self, admin_id: &str) -> Result<Vec<Sale>> {
        let docs = self.store.fetch(&Self::query(admin_id)).await?;
        Ok(Self::decode(docs))
    }

    /// All sales for one freelancer under an admin, newest first.
    pub async fn list_for_freelancer(
        &self,
        admin_id: &str,
        freelancer_name: &str,
    ) -> Result<Vec<Sale>> {
        let docs = self
            .store
            .fetch(&Self::freelancer_query(admin_id, freelancer_name))
            .await?;
        Ok(Self::decode(docs))
    }

    pub async fn create(&self, admin_id: &str, sale: &Sale) -> Result<String> {
        sale.validate()?;
        let doc = serde_json::to_value(sale)?;
        self.store.create(&Self::path(admin_id), doc).await
    }

    /// Merge a partial patch into one sale document.
    pub async fn update(&self, admin_id: &str, id: &str, patch: Value) -> Result<()> {
        self.store.update(&Self::path(admin_id), id, patch).await
    }

    pub async fn delete(&self, admin_id: &str, id: &str) -> Result<()> {
        self.store.delete(&Self::path(admin_id), id).await
    }

    /// Atomic bulk entry: every sale is validated up front and the store
    /// writes all or nothing.
    pub async fn batch_create(&self, admin_id: &str, sales: &[Sale]) -> Result<Vec<String>> {
        for sale in sales {
            sale.validate()?;
        }

        let docs = sales
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<Value>, _>>()
            .map_err(AppError::from)?;

        self.store.batch_create(&Self::path(admin_id), docs).await
    }

    /// Live query over an admin's sales, newest first.
    pub fn subscribe<F, E>(&self, admin_id: &str, on_change: F, on_error: E) -> Subscription
    where
        F: Fn(Vec<Sale>) + Send + Sync + 'static,
        E: Fn(AppError) + Send + Sync + 'static,
    {
        self.store.subscribe(
            Self::query(admin_id),
            Arc::new(move |docs| on_change(Self::decode(docs))),
            Arc::new(on_error),
        )
    }

    /// Live query over one freelancer's sales under an admin.
    pub fn subscribe_for_freelancer<F, E>(
        &self,
        admin_id: &str,
        freelancer_name: &str,
        on_change: F,
        on_error: E,
    ) -> Subscription
    where
        F: Fn(Vec<Sale>) + Send + Sync + 'static,
        E: Fn(AppError) + Send + Sync + 'static,
    {
        self.store.subscribe(
            Self::freelancer_query(admin_id, freelancer_name),
            Arc::new(move |docs| on_change(Self::decode(docs))),
            Arc::new(on_error),
        )
    }
}
