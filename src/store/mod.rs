//! Document store boundary.
//!
//! The dashboard keeps several collections continuously synchronized from
//! a remote document database. This module defines the contract that the
//! typed repositories are written against: one-shot reads, single-document
//! mutations, all-or-nothing batch creation, and live-query subscriptions
//! that push the entire current matching set on every change.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::{AppError, Result};

pub mod memory;

pub use memory::MemoryStore;

/// A stored document: generated id plus JSON body.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub id: String,
    pub data: Value,
}

/// Namespace path partitioning collections by owning admin account.
///
/// Sales, clients and categories live under `users/{admin_id}/...`;
/// freelancers and admin accounts live in global collections so they can
/// be queried without admin credentials.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath(String);

impl CollectionPath {
    pub fn admin_scoped(admin_id: &str, collection: &str) -> Self {
        Self(format!("users/{}/{}", admin_id, collection))
    }

    pub fn global(collection: &str) -> Self {
        Self(collection.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Equality predicate on a single document field.
#[derive(Debug, Clone)]
pub struct FieldFilter {
    pub field: String,
    pub equals: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Ordering directive applied to delivered snapshots.
#[derive(Debug, Clone)]
pub struct OrderBy {
    pub field: String,
    pub order: SortOrder,
}

/// A live-query specification: collection path, optional equality filter,
/// optional ordering.
#[derive(Debug, Clone)]
pub struct CollectionQuery {
    pub path: CollectionPath,
    pub filter: Option<FieldFilter>,
    pub order_by: Option<OrderBy>,
}

impl CollectionQuery {
    /// All documents in a collection, unfiltered, insertion order.
    pub fn all(path: CollectionPath) -> Self {
        Self {
            path,
            filter: None,
            order_by: None,
        }
    }

    pub fn with_filter(mut self, field: impl Into<String>, equals: impl Into<String>) -> Self {
        self.filter = Some(FieldFilter {
            field: field.into(),
            equals: equals.into(),
        });
        self
    }

    pub fn order_by_desc(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            order: SortOrder::Descending,
        });
        self
    }
}

/// Invoked with the entire current matching set on every change.
pub type SnapshotCallback = Arc<dyn Fn(Vec<RawDocument>) + Send + Sync>;

/// Invoked when the subscription itself fails. Other subscriptions are
/// unaffected; the store performs no automatic retry.
pub type ErrorCallback = Arc<dyn Fn(AppError) + Send + Sync>;

/// Handle for an active live query.
///
/// `unsubscribe` stops all future callbacks immediately and is safe to
/// call more than once. Dropping the handle unsubscribes as well.
pub struct Subscription {
    active: Arc<AtomicBool>,
}

impl Subscription {
    pub(crate) fn new(active: Arc<AtomicBool>) -> Self {
        Self { active }
    }

    pub fn unsubscribe(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

/// The document store contract the repositories are written against.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// One-shot read of all documents matching the query.
    async fn fetch(&self, query: &CollectionQuery) -> Result<Vec<RawDocument>>;

    /// Create a single document; returns the generated id.
    async fn create(&self, path: &CollectionPath, doc: Value) -> Result<String>;

    /// Merge `patch` into an existing document field-by-field. A `null`
    /// value clears the field.
    async fn update(&self, path: &CollectionPath, id: &str, patch: Value) -> Result<()>;

    /// Delete a document by id.
    async fn delete(&self, path: &CollectionPath, id: &str) -> Result<()>;

    /// Create a batch of documents atomically. If any document is
    /// malformed the whole batch is rejected and nothing is written.
    async fn batch_create(&self, path: &CollectionPath, docs: Vec<Value>) -> Result<Vec<String>>;

    /// Open a live query. The current matching set is delivered
    /// immediately, then again after every change to the collection.
    fn subscribe(
        &self,
        query: CollectionQuery,
        on_snapshot: SnapshotCallback,
        on_error: ErrorCallback,
    ) -> Subscription;
}
