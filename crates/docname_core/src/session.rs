//! The active document session.
//!
//! A [`DocumentSession`] owns the document's current [`DocumentName`] and
//! [`SaveStatus`]. It listens on the [`EventBus`] for as long as it is open and
//! pushes fresh name and status text into the presenter whenever the document
//! is loaded, saved, or fails to save.

use std::sync::{Arc, Mutex, RwLock, Weak};

use crate::event_bus::{DocumentEvent, EventBus, SubscriptionId};
use crate::name::DocumentName;
use crate::presenter::StatusPresenter;
use crate::status::SaveStatus;

/// Name and save status of the single active document.
pub struct DocumentSession {
    name: RwLock<DocumentName>,
    status: RwLock<SaveStatus>,
    presenter: Arc<dyn StatusPresenter>,
    bus: Arc<EventBus>,
    subscription: Mutex<Option<SubscriptionId>>,
}

impl DocumentSession {
    /// Open a session for the document called `name` and subscribe it to `bus`.
    ///
    /// The subscription lasts until [`close`](Self::close) is called or the
    /// session is dropped.
    pub fn open(
        name: DocumentName,
        presenter: Arc<dyn StatusPresenter>,
        bus: Arc<EventBus>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|session: &Weak<Self>| {
            let session = session.clone();
            let id = bus.subscribe(Arc::new(move |event| {
                if let Some(session) = session.upgrade() {
                    session.handle_event(event);
                }
            }));
            log::debug!("DocumentSession: opened '{}' (subscription {})", name, id);

            Self {
                name: RwLock::new(name),
                status: RwLock::new(SaveStatus::Unset),
                presenter,
                bus,
                subscription: Mutex::new(Some(id)),
            }
        })
    }

    /// Current document name.
    pub fn name(&self) -> DocumentName {
        self.name.read().unwrap().clone()
    }

    /// Current save status.
    pub fn status(&self) -> SaveStatus {
        *self.status.read().unwrap()
    }

    /// Whether the session is still subscribed to the bus.
    pub fn is_open(&self) -> bool {
        self.subscription.lock().unwrap().is_some()
    }

    /// Redraw name, title and status from the current state.
    pub fn refresh(&self) {
        let name = self.name();
        self.presenter.show_name(&name);
        self.presenter.show_title(&name);
        self.presenter.show_status(&self.status());
    }

    /// Unsubscribe from the bus. Later lifecycle events are ignored.
    ///
    /// Returns `true` if the session was open.
    pub fn close(&self) -> bool {
        match self.subscription.lock().unwrap().take() {
            Some(id) => {
                log::debug!("DocumentSession: closing (subscription {})", id);
                self.bus.unsubscribe(id)
            }
            None => false,
        }
    }

    /// Record the name chosen by a successful rename.
    pub(crate) fn set_name(&self, name: DocumentName) {
        *self.name.write().unwrap() = name;
    }

    fn handle_event(&self, event: &DocumentEvent) {
        match event {
            DocumentEvent::Loaded | DocumentEvent::Saved => {
                *self.status.write().unwrap() = SaveStatus::saved_now();
                self.refresh();
            }
            DocumentEvent::SaveFailed => {
                let status = SaveStatus::Failed;
                *self.status.write().unwrap() = status;
                self.presenter.show_status(&status);
            }
        }
    }
}

impl Drop for DocumentSession {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for DocumentSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentSession")
            .field("name", &self.name())
            .field("status", &self.status())
            .field("open", &self.is_open())
            .finish()
    }
}
