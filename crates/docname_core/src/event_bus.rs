//! Document lifecycle events and the bus that delivers them.
//!
//! The bus is created by the host and handed to whoever needs it; there is no
//! process-wide instance. Subscribers get a [`SubscriptionId`] back and are
//! expected to unsubscribe when their session ends.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Lifecycle notifications about the active document.
///
/// None of them carry a payload: listeners re-read whatever state they need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "type")]
pub enum DocumentEvent {
    /// The document finished loading.
    #[serde(rename = "document_loaded")]
    Loaded,
    /// The document was saved.
    #[serde(rename = "document_saved")]
    Saved,
    /// Saving the document failed.
    #[serde(rename = "document_save_failed")]
    SaveFailed,
}

impl DocumentEvent {
    /// Get the event name as used by the browser host.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Loaded => "document_loaded",
            Self::Saved => "document_saved",
            Self::SaveFailed => "document_save_failed",
        }
    }
}

/// A unique identifier for a subscription.
pub type SubscriptionId = u64;

/// Callback function type for document events.
///
/// Callbacks run synchronously on the emitting thread and should return quickly.
pub type EventCallback = Arc<dyn Fn(&DocumentEvent) + Send + Sync>;

/// Thread-safe publish/subscribe channel for [`DocumentEvent`]s.
///
/// # Example
///
/// ```ignore
/// use docname_core::event_bus::{DocumentEvent, EventBus};
/// use std::sync::Arc;
///
/// let bus = EventBus::new();
///
/// let id = bus.subscribe(Arc::new(|event| {
///     println!("Event: {}", event.event_type());
/// }));
///
/// bus.emit(&DocumentEvent::Saved);
///
/// bus.unsubscribe(id);
/// ```
pub struct EventBus {
    callbacks: RwLock<HashMap<SubscriptionId, EventCallback>>,
    next_id: AtomicU64,
}

impl EventBus {
    /// Create a bus with no subscribers.
    pub fn new() -> Self {
        Self {
            callbacks: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Subscribe to document events.
    ///
    /// Returns a subscription ID that can be used to unsubscribe later.
    pub fn subscribe(&self, callback: EventCallback) -> SubscriptionId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut callbacks = self.callbacks.write().unwrap();
        callbacks.insert(id, callback);
        id
    }

    /// Remove a subscription.
    ///
    /// Returns `true` if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut callbacks = self.callbacks.write().unwrap();
        callbacks.remove(&id).is_some()
    }

    /// Deliver `event` to every subscriber.
    ///
    /// The subscriber list is snapshotted first, so callbacks may subscribe or
    /// unsubscribe without deadlocking. A panicking callback does not stop the
    /// others from running.
    pub fn emit(&self, event: &DocumentEvent) {
        let callbacks: Vec<EventCallback> = {
            let callbacks = self.callbacks.read().unwrap();
            callbacks.values().cloned().collect()
        };
        log::debug!(
            "EventBus: emitting {} to {} subscriber(s)",
            event.event_type(),
            callbacks.len()
        );
        for callback in callbacks {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                callback(event);
            }));
            if result.is_err() {
                log::warn!("EventBus: subscriber panicked on {}", event.event_type());
            }
        }
    }

    /// Get the number of active subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.callbacks.read().unwrap().len()
    }

    /// Check if there are any active subscriptions.
    pub fn has_subscribers(&self) -> bool {
        !self.callbacks.read().unwrap().is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .field("next_id", &self.next_id.load(Ordering::SeqCst))
            .finish()
    }
}
