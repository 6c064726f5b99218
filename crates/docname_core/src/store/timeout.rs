//! Deadline decorator for document store calls.
//!
//! Store calls have no deadline of their own. [`TimeoutStore`] races each call
//! against a [`Timer`] and turns expiry into a [`StoreError`], so the rename
//! workflow is never left suspended on a server that stopped answering.

use std::time::Duration;

use futures_util::future::{Either, select};

use super::{BoxFuture, DocumentNameSet, DocumentStoreClient};
use crate::error::StoreError;
use crate::name::DocumentName;

/// Source of delays for [`TimeoutStore`].
///
/// Kept as a trait so the crate does not pick an async runtime for the host.
pub trait Timer: Send + Sync {
    /// Resolve after `duration` has elapsed.
    fn sleep(&self, duration: Duration) -> BoxFuture<'_, ()>;
}

/// [`Timer`] backed by `tokio::time::sleep`.
#[cfg(all(feature = "tokio-timer", not(target_arch = "wasm32")))]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

#[cfg(all(feature = "tokio-timer", not(target_arch = "wasm32")))]
impl Timer for TokioTimer {
    fn sleep(&self, duration: Duration) -> BoxFuture<'_, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// A store decorator that fails calls taking longer than `timeout`.
///
/// # Example
///
/// ```ignore
/// let store = TimeoutStore::new(http_store, TokioTimer, Duration::from_secs(10));
/// ```
pub struct TimeoutStore<S, T> {
    inner: S,
    timer: T,
    timeout: Duration,
}

impl<S: DocumentStoreClient, T: Timer> TimeoutStore<S, T> {
    /// Wrap `inner` so every call fails after `timeout`.
    pub fn new(inner: S, timer: T, timeout: Duration) -> Self {
        Self {
            inner,
            timer,
            timeout,
        }
    }

    /// The configured deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get a reference to the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn deadline<'a, R>(
        &'a self,
        operation: &'static str,
        call: BoxFuture<'a, Result<R, StoreError>>,
    ) -> Result<R, StoreError> {
        match select(call, self.timer.sleep(self.timeout)).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => {
                log::warn!(
                    "TimeoutStore: {} did not finish within {:?}",
                    operation,
                    self.timeout
                );
                Err(StoreError::timeout())
            }
        }
    }
}

impl<S: DocumentStoreClient, T: Timer> DocumentStoreClient for TimeoutStore<S, T> {
    fn list_names(&self) -> BoxFuture<'_, Result<DocumentNameSet, StoreError>> {
        Box::pin(self.deadline("list_names", self.inner.list_names()))
    }

    fn save<'a>(&'a self, name: &'a DocumentName) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(self.deadline("save", self.inner.save(name)))
    }

    fn overwrite<'a>(&'a self, name: &'a DocumentName) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(self.deadline("overwrite", self.inner.overwrite(name)))
    }
}

impl<S: std::fmt::Debug, T> std::fmt::Debug for TimeoutStore<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeoutStore")
            .field("inner", &self.inner)
            .field("timeout", &self.timeout)
            .finish()
    }
}
