//! In-memory document store.

use std::sync::Mutex;

use indexmap::IndexSet;

use super::{BoxFuture, DocumentNameSet, DocumentStoreClient};
use crate::error::StoreError;
use crate::name::DocumentName;

/// A call made against an [`InMemoryDocumentStore`], successful or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOperation {
    /// `list_names` was called.
    ListNames,
    /// `save` was called with this name.
    Save(String),
    /// `overwrite` was called with this name.
    Overwrite(String),
}

/// Document store that keeps names in memory.
///
/// Useful for hosts without a server and for tests. An outage can be
/// simulated with [`fail_with`](Self::fail_with), after which every call
/// returns that error until [`recover`](Self::recover) is called. Every call
/// is recorded in [`operations`](Self::operations), including failed ones.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    names: Mutex<IndexSet<String>>,
    outage: Mutex<Option<StoreError>>,
    operations: Mutex<Vec<StoreOperation>>,
}

impl InMemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `names`.
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new();
        store
            .names
            .lock()
            .unwrap()
            .extend(names.into_iter().map(Into::into));
        store
    }

    /// Make every following call fail with `error`.
    pub fn fail_with(&self, error: StoreError) {
        *self.outage.lock().unwrap() = Some(error);
    }

    /// End a simulated outage.
    pub fn recover(&self) {
        *self.outage.lock().unwrap() = None;
    }

    /// Names currently held, in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.names.lock().unwrap().iter().cloned().collect()
    }

    /// Every call made so far, oldest first.
    pub fn operations(&self) -> Vec<StoreOperation> {
        self.operations.lock().unwrap().clone()
    }

    /// Number of `save` and `overwrite` calls made so far.
    pub fn write_count(&self) -> usize {
        self.operations
            .lock()
            .unwrap()
            .iter()
            .filter(|op| !matches!(op, StoreOperation::ListNames))
            .count()
    }

    fn record(&self, operation: StoreOperation) -> Result<(), StoreError> {
        self.operations.lock().unwrap().push(operation);
        match self.outage.lock().unwrap().as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn store_name(&self, name: &DocumentName) {
        self.names.lock().unwrap().insert(name.as_str().to_string());
    }
}

impl DocumentStoreClient for InMemoryDocumentStore {
    fn list_names(&self) -> BoxFuture<'_, Result<DocumentNameSet, StoreError>> {
        Box::pin(async move {
            self.record(StoreOperation::ListNames)?;
            Ok(self.names.lock().unwrap().iter().cloned().collect())
        })
    }

    fn save<'a>(&'a self, name: &'a DocumentName) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            self.record(StoreOperation::Save(name.to_string()))?;
            self.store_name(name);
            Ok(())
        })
    }

    fn overwrite<'a>(&'a self, name: &'a DocumentName) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            self.record(StoreOperation::Overwrite(name.to_string()))?;
            self.store_name(name);
            Ok(())
        })
    }
}
