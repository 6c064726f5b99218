//! Document store abstraction module.
//!
//! This module provides the [`DocumentStoreClient`] trait, the boundary between
//! the rename workflow and the remote service that holds the documents. The
//! store itself is not implemented here beyond an in-memory reference store.
//!
//! ## Object safety
//!
//! Like the rest of the async surface of this crate, all methods return boxed
//! futures so the client can live behind `dyn DocumentStoreClient`.
//!
//! ## Decorators
//!
//! - [`TimeoutStore`]: fails any call that does not finish within a deadline

mod listing;
mod memory;
mod timeout;

pub use listing::{ListingEntry, listing_url, parse_listing};
pub use memory::{InMemoryDocumentStore, StoreOperation};
#[cfg(all(feature = "tokio-timer", not(target_arch = "wasm32")))]
pub use timeout::TokioTimer;
pub use timeout::{TimeoutStore, Timer};

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::name::DocumentName;

#[cfg(test)]
pub(crate) fn block_on_test<F: Future>(f: F) -> F::Output {
    futures_lite::future::block_on(f)
}

/// A boxed future for object-safe async methods.
///
/// On native targets, futures are `Send` for compatibility with multi-threaded runtimes.
#[cfg(not(target_arch = "wasm32"))]
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A boxed future for object-safe async methods.
///
/// WASM version without `Send` requirement - JavaScript is single-threaded.
#[cfg(target_arch = "wasm32")]
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Names present in the store at the moment of one `list_names` query.
///
/// Order carries no meaning and membership is exact, case-sensitive string
/// equality. The set is never cached: every rename attempt asks again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentNameSet(Vec<String>);

impl DocumentNameSet {
    /// An empty set (an empty store is a valid answer, not an error).
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Whether `name` is already taken.
    pub fn contains(&self, name: &DocumentName) -> bool {
        self.0.iter().any(|existing| existing == name.as_str())
    }

    /// Number of names returned by the store.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the store returned no names.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the names.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for DocumentNameSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl IntoIterator for DocumentNameSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Client for the remote document store.
///
/// Transport or protocol failures come back as [`StoreError`] values; an
/// implementation must never report a failed listing as an empty one.
///
/// # Example
///
/// ```ignore
/// use docname_core::store::DocumentStoreClient;
///
/// async fn taken(store: &dyn DocumentStoreClient, name: &DocumentName) -> bool {
///     match store.list_names().await {
///         Ok(names) => names.contains(name),
///         Err(e) => { eprintln!("{e}"); true }
///     }
/// }
/// ```
pub trait DocumentStoreClient: Send + Sync {
    /// Fetch the names of all documents currently in the store.
    ///
    /// Has no side effects and is safe to retry.
    fn list_names(&self) -> BoxFuture<'_, Result<DocumentNameSet, StoreError>>;

    /// Save the active document under `name`, which is not yet taken.
    fn save<'a>(&'a self, name: &'a DocumentName) -> BoxFuture<'a, Result<(), StoreError>>;

    /// Save the active document under `name`, replacing the document that
    /// already has it.
    fn overwrite<'a>(&'a self, name: &'a DocumentName) -> BoxFuture<'a, Result<(), StoreError>>;
}

impl<S: DocumentStoreClient + ?Sized> DocumentStoreClient for Arc<S> {
    fn list_names(&self) -> BoxFuture<'_, Result<DocumentNameSet, StoreError>> {
        (**self).list_names()
    }

    fn save<'a>(&'a self, name: &'a DocumentName) -> BoxFuture<'a, Result<(), StoreError>> {
        (**self).save(name)
    }

    fn overwrite<'a>(&'a self, name: &'a DocumentName) -> BoxFuture<'a, Result<(), StoreError>> {
        (**self).overwrite(name)
    }
}
