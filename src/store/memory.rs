//! In-process reference implementation of the document store.
//!
//! Collections are vectors of documents in insertion order; every
//! mutation recomputes the matching snapshot for each live subscriber on
//! that path and pushes it synchronously. Snapshots are computed under
//! the collection lock but callbacks run outside it, so a callback may
//! issue further store calls without deadlocking.

use std::cmp::Ordering as CmpOrdering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::core::{AppError, Result};

use super::{
    CollectionPath, CollectionQuery, DocumentStore, ErrorCallback, OrderBy, RawDocument,
    SnapshotCallback, SortOrder, Subscription,
};

struct Subscriber {
    query: CollectionQuery,
    on_snapshot: SnapshotCallback,
    on_error: ErrorCallback,
    active: Arc<AtomicBool>,
}

/// In-memory document store with push-based live queries.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<CollectionPath, Vec<RawDocument>>>,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fault-injection hook: report a subscription failure to every live
    /// subscriber on `path`. Subscriptions on other paths are untouched.
    pub fn emit_error(&self, path: &CollectionPath, message: &str) {
        let callbacks: Vec<ErrorCallback> = {
            let subscribers = self.subscribers.lock().expect("subscriber lock poisoned");
            subscribers
                .iter()
                .filter(|s| s.active.load(Ordering::SeqCst) && &s.query.path == path)
                .map(|s| Arc::clone(&s.on_error))
                .collect()
        };

        warn!(path = %path, "subscription error: {}", message);
        for on_error in callbacks {
            on_error(AppError::store(message.to_string()));
        }
    }

    fn require_object(doc: &Value) -> Result<()> {
        if doc.is_object() {
            Ok(())
        } else {
            Err(AppError::validation("Document body must be a JSON object"))
        }
    }

    fn snapshot_for(docs: &[RawDocument], query: &CollectionQuery) -> Vec<RawDocument> {
        let mut matching: Vec<RawDocument> = docs
            .iter()
            .filter(|doc| match &query.filter {
                Some(filter) => doc
                    .data
                    .get(&filter.field)
                    .and_then(Value::as_str)
                    .map(|v| v == filter.equals)
                    .unwrap_or(false),
                None => true,
            })
            .cloned()
            .collect();

        if let Some(OrderBy { field, order }) = &query.order_by {
            matching.sort_by(|a, b| {
                let ordering = compare_fields(a.data.get(field), b.data.get(field));
                match order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }

        matching
    }

    /// Recompute and push snapshots to every live subscriber on `path`.
    fn notify(&self, path: &CollectionPath) {
        let deliveries: Vec<(SnapshotCallback, Vec<RawDocument>)> = {
            let collections = self.collections.lock().expect("collection lock poisoned");
            let docs = collections.get(path).map(Vec::as_slice).unwrap_or(&[]);

            let mut subscribers = self.subscribers.lock().expect("subscriber lock poisoned");
            subscribers.retain(|s| s.active.load(Ordering::SeqCst));

            subscribers
                .iter()
                .filter(|s| &s.query.path == path)
                .map(|s| (Arc::clone(&s.on_snapshot), Self::snapshot_for(docs, &s.query)))
                .collect()
        };

        for (on_snapshot, snapshot) in deliveries {
            on_snapshot(snapshot);
        }
    }
}

/// Field comparison for ordering directives. Dates are stored as ISO
/// strings, so string comparison yields chronological order.
fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> CmpOrdering {
    match (a, b) {
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(CmpOrdering::Equal),
        (Some(_), None) => CmpOrdering::Greater,
        (None, Some(_)) => CmpOrdering::Less,
        _ => CmpOrdering::Equal,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn fetch(&self, query: &CollectionQuery) -> Result<Vec<RawDocument>> {
        let collections = self.collections.lock().expect("collection lock poisoned");
        let docs = collections.get(&query.path).map(Vec::as_slice).unwrap_or(&[]);
        Ok(Self::snapshot_for(docs, query))
    }

    async fn create(&self, path: &CollectionPath, doc: Value) -> Result<String> {
        Self::require_object(&doc)?;

        let id = Uuid::new_v4().to_string();
        {
            let mut collections = self.collections.lock().expect("collection lock poisoned");
            collections
                .entry(path.clone())
                .or_default()
                .push(RawDocument {
                    id: id.clone(),
                    data: doc,
                });
        }

        debug!(path = %path, id = %id, "document created");
        self.notify(path);
        Ok(id)
    }

    async fn update(&self, path: &CollectionPath, id: &str, patch: Value) -> Result<()> {
        let fields = patch
            .as_object()
            .ok_or_else(|| AppError::validation("Update patch must be a JSON object"))?
            .clone();

        {
            let mut collections = self.collections.lock().expect("collection lock poisoned");
            let docs = collections
                .get_mut(path)
                .ok_or_else(|| AppError::not_found(format!("Collection {}", path)))?;

            let doc = docs
                .iter_mut()
                .find(|d| d.id == id)
                .ok_or_else(|| AppError::not_found(format!("Document {} in {}", id, path)))?;

            let body = doc
                .data
                .as_object_mut()
                .ok_or_else(|| AppError::internal("Stored document is not an object"))?;
            for (key, value) in fields {
                body.insert(key, value);
            }
        }

        debug!(path = %path, id = %id, "document updated");
        self.notify(path);
        Ok(())
    }

    async fn delete(&self, path: &CollectionPath, id: &str) -> Result<()> {
        {
            let mut collections = self.collections.lock().expect("collection lock poisoned");
            let docs = collections
                .get_mut(path)
                .ok_or_else(|| AppError::not_found(format!("Collection {}", path)))?;

            let before = docs.len();
            docs.retain(|d| d.id != id);
            if docs.len() == before {
                return Err(AppError::not_found(format!("Document {} in {}", id, path)));
            }
        }

        debug!(path = %path, id = %id, "document deleted");
        self.notify(path);
        Ok(())
    }

    async fn batch_create(&self, path: &CollectionPath, docs: Vec<Value>) -> Result<Vec<String>> {
        // Validate the whole batch before touching the collection; a
        // malformed entry rejects everything.
        for doc in &docs {
            Self::require_object(doc)?;
        }

        let ids: Vec<String> = {
            let mut collections = self.collections.lock().expect("collection lock poisoned");
            let collection = collections.entry(path.clone()).or_default();

            docs.into_iter()
                .map(|doc| {
                    let id = Uuid::new_v4().to_string();
                    collection.push(RawDocument {
                        id: id.clone(),
                        data: doc,
                    });
                    id
                })
                .collect()
        };

        debug!(path = %path, count = ids.len(), "batch created");
        self.notify(path);
        Ok(ids)
    }

    fn subscribe(
        &self,
        query: CollectionQuery,
        on_snapshot: SnapshotCallback,
        on_error: ErrorCallback,
    ) -> Subscription {
        let active = Arc::new(AtomicBool::new(true));

        // Register and compute the initial snapshot under the same locks
        // notify() takes, so no change can slip between them.
        let initial: Vec<RawDocument> = {
            let collections = self.collections.lock().expect("collection lock poisoned");
            let docs = collections.get(&query.path).map(Vec::as_slice).unwrap_or(&[]);
            let snapshot = Self::snapshot_for(docs, &query);

            self.subscribers
                .lock()
                .expect("subscriber lock poisoned")
                .push(Subscriber {
                    query,
                    on_snapshot: Arc::clone(&on_snapshot),
                    on_error,
                    active: Arc::clone(&active),
                });

            snapshot
        };

        // The current set is delivered immediately; subsequent changes
        // arrive through notify().
        on_snapshot(initial);

        Subscription::new(active)
    }
}
