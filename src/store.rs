// src/store.rs
use crate::error::SeedError;
use async_trait::async_trait;
use bson::Document;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

/// The two bulk operations seeding needs from a database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Delete every document in `collection`, returning how many were removed.
    async fn delete_all(&self, collection: &str) -> Result<u64, SeedError>;

    /// Insert `documents` in order, returning how many were inserted.
    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<usize, SeedError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    DeleteAll { collection: String },
    InsertMany { collection: String, count: usize },
}

#[derive(Debug, Default)]
struct MemoryState {
    collections: HashMap<String, Vec<Document>>,
    operations: Vec<StoreOp>,
    failing_deletes: HashSet<String>,
}

/// In-process store backing `--dry-run`. It also records every operation so
/// callers can inspect what a run would have done.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(self, collection: &str, documents: Vec<Document>) -> Self {
        self.lock()
            .collections
            .entry(collection.to_string())
            .or_default()
            .extend(documents);
        self
    }

    /// Make every later `delete_all` on `collection` fail.
    pub fn fail_deletes_on(self, collection: &str) -> Self {
        self.lock().failing_deletes.insert(collection.to_string());
        self
    }

    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.lock()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn operations(&self) -> Vec<StoreOp> {
        self.lock().operations.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // A poisoned lock only means a test panicked mid-operation.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn delete_all(&self, collection: &str) -> Result<u64, SeedError> {
        let mut state = self.lock();
        if state.failing_deletes.contains(collection) {
            return Err(SeedError::database(
                collection,
                "deleteMany",
                std::io::Error::other("injected delete failure"),
            ));
        }
        state.operations.push(StoreOp::DeleteAll {
            collection: collection.to_string(),
        });
        let removed = state
            .collections
            .get_mut(collection)
            .map(|docs| docs.drain(..).count())
            .unwrap_or(0);
        Ok(removed as u64)
    }

    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<usize, SeedError> {
        let mut state = self.lock();
        let count = documents.len();
        state.operations.push(StoreOp::InsertMany {
            collection: collection.to_string(),
            count,
        });
        state
            .collections
            .entry(collection.to_string())
            .or_default()
            .extend(documents);
        Ok(count)
    }
}
