//! Rename workflow.
//!
//! [`RenameWorkflow`] drives one rename at a time through these phases:
//!
//! ```text
//! Idle -> Validating -> CheckingConflict -> Committing ---------------> Idle
//!             ^                 |                ^
//!             |                 v                | Replace
//!             +------- AwaitingUserConfirmation -+
//!               Cancel                |
//!                                     +-- Close --> Idle (cancelled)
//! ```
//!
//! Every wait before the commit (rename dialog, store listing, overwrite
//! dialog) can be interrupted with [`RenameWorkflow::cancel`], or by dropping
//! the future, which leaves all state untouched. Once the workflow has moved
//! to `Committing`, `cancel` is refused and the attempt runs to completion.
//!
//! Dropping the future while `save` or `overwrite` is outstanding abandons
//! the call with its outcome unknown. The session keeps its old name and
//! `document_save_failed` is published, so the status never claims a save
//! that was not confirmed.

use std::sync::{Arc, Mutex};

use futures_util::future::{AbortHandle, Abortable};

use crate::error::{DocnameError, Result, StoreError};
use crate::event_bus::{DocumentEvent, EventBus};
use crate::name::{DocumentName, INVALID_NAME_MESSAGE};
use crate::presenter::{ConflictChoice, PromptResponse, RenamePrompt, StatusPresenter};
use crate::session::DocumentSession;
use crate::store::{DocumentNameSet, DocumentStoreClient};

/// Where the workflow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenamePhase {
    /// No rename in flight.
    #[default]
    Idle,
    /// Waiting for, or checking, a proposed name.
    Validating,
    /// Waiting for the store's list of names.
    CheckingConflict,
    /// Waiting for the user to decide about an existing document.
    AwaitingUserConfirmation,
    /// Waiting for `save` or `overwrite` to finish.
    Committing,
}

/// Result of checking a valid name against the store's names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictCheck {
    /// No document has this name.
    Available,
    /// A document with this name already exists.
    Exists,
}

impl ConflictCheck {
    /// Decide whether `name` collides with one of `names`.
    pub fn against(name: &DocumentName, names: &DocumentNameSet) -> Self {
        if names.contains(name) {
            Self::Exists
        } else {
            Self::Available
        }
    }
}

/// The rename currently in flight.
///
/// Created when a name is proposed and discarded when the workflow returns
/// to idle. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameAttempt {
    /// Name as typed by the user.
    pub proposed: String,
    /// `Some(true)` once validated, `Some(false)` if rejected.
    pub valid: Option<bool>,
    /// Outcome of the conflict check, once known.
    pub conflict: Option<ConflictCheck>,
}

impl RenameAttempt {
    fn new(proposed: String) -> Self {
        Self {
            proposed,
            valid: None,
            conflict: None,
        }
    }
}

/// How a finished rename ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The document was stored under the new name.
    Renamed(DocumentName),
    /// `save` or `overwrite` failed; the name was not changed.
    SaveFailed(StoreError),
    /// The user closed a dialog or the attempt was cancelled.
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommitMode {
    Save,
    Overwrite,
}

enum Decision {
    Commit(DocumentName, CommitMode),
    Cancelled,
}

#[derive(Default)]
struct Flight {
    phase: RenamePhase,
    attempt: Option<RenameAttempt>,
    abort: Option<AbortHandle>,
    cancelled: bool,
}

/// Single-flight rename state machine for one document session.
pub struct RenameWorkflow<S> {
    store: S,
    presenter: Arc<dyn StatusPresenter>,
    session: Arc<DocumentSession>,
    bus: Arc<EventBus>,
    flight: Mutex<Flight>,
}

/// Resets the workflow to idle when an attempt ends, including when its
/// future is dropped mid-way.
struct FlightGuard<'a> {
    flight: &'a Mutex<Flight>,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        *self.flight.lock().unwrap() = Flight::default();
    }
}

/// Publishes `document_save_failed` if a commit is dropped before the store
/// answered.
struct CommitWatch<'a> {
    bus: &'a EventBus,
    name: &'a DocumentName,
    settled: bool,
}

impl Drop for CommitWatch<'_> {
    fn drop(&mut self) {
        if !self.settled {
            log::warn!(
                "RenameWorkflow: commit of '{}' dropped before the store answered",
                self.name
            );
            self.bus.emit(&DocumentEvent::SaveFailed);
        }
    }
}

impl<S: DocumentStoreClient> RenameWorkflow<S> {
    /// Create a workflow for `session`, persisting through `store`.
    pub fn new(
        store: S,
        presenter: Arc<dyn StatusPresenter>,
        session: Arc<DocumentSession>,
        bus: Arc<EventBus>,
    ) -> Self {
        Self {
            store,
            presenter,
            session,
            bus,
            flight: Mutex::new(Flight::default()),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> RenamePhase {
        self.flight.lock().unwrap().phase
    }

    /// Snapshot of the attempt in flight, if any.
    pub fn attempt(&self) -> Option<RenameAttempt> {
        self.flight.lock().unwrap().attempt.clone()
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Rename the document to `proposed`.
    ///
    /// Rejected names and store listing failures are reported to the
    /// presenter and the rename dialog is reopened; they never end the
    /// attempt. Returns [`DocnameError::Busy`] without touching anything if
    /// another rename is in flight.
    pub async fn request_rename(&self, proposed: impl Into<String>) -> Result<RenameOutcome> {
        self.run(Some(proposed.into())).await
    }

    /// Open the rename dialog pre-filled with the current name, then proceed
    /// as [`request_rename`](Self::request_rename).
    pub async fn open_rename(&self) -> Result<RenameOutcome> {
        self.run(None).await
    }

    /// Abandon the rename in flight.
    ///
    /// Takes effect at the next wait, or stops the commit if the decision to
    /// save was already made. Returns `false` when nothing could be cancelled,
    /// including once the store call has been claimed.
    pub fn cancel(&self) -> bool {
        let mut flight = self.flight.lock().unwrap();
        if flight.phase == RenamePhase::Committing {
            return false;
        }
        let Some(handle) = flight.abort.clone() else {
            return false;
        };
        log::debug!("RenameWorkflow: cancel requested in {:?}", flight.phase);
        handle.abort();
        flight.cancelled = true;
        true
    }

    /// Ask the store whether `name` is taken.
    ///
    /// A failed listing is returned as an error, never as "available".
    pub async fn check_conflict(
        &self,
        name: &DocumentName,
    ) -> std::result::Result<ConflictCheck, StoreError> {
        let names = self.store.list_names().await?;
        Ok(ConflictCheck::against(name, &names))
    }

    async fn run(&self, proposed: Option<String>) -> Result<RenameOutcome> {
        let (handle, registration) = AbortHandle::new_pair();
        let _guard = self.begin(handle)?;

        let decision = Abortable::new(self.decide(proposed), registration).await;
        let outcome = match decision {
            Ok(Decision::Commit(name, mode)) if self.claim_commit() => {
                self.commit(name, mode).await
            }
            Ok(Decision::Commit(name, _)) => {
                log::debug!("RenameWorkflow: cancelled before committing '{}'", name);
                RenameOutcome::Cancelled
            }
            Ok(Decision::Cancelled) => RenameOutcome::Cancelled,
            Err(_aborted) => {
                log::debug!("RenameWorkflow: attempt aborted");
                RenameOutcome::Cancelled
            }
        };
        Ok(outcome)
    }

    fn begin(&self, handle: AbortHandle) -> Result<FlightGuard<'_>> {
        let mut flight = self.flight.lock().unwrap();
        if flight.phase != RenamePhase::Idle {
            log::warn!(
                "RenameWorkflow: rejected rename request while {:?}",
                flight.phase
            );
            return Err(DocnameError::Busy);
        }
        flight.phase = RenamePhase::Validating;
        flight.abort = Some(handle);
        Ok(FlightGuard {
            flight: &self.flight,
        })
    }

    /// Move to `Committing` unless a cancel got in first. Both happen under
    /// the flight lock, so exactly one of them wins.
    fn claim_commit(&self) -> bool {
        let mut flight = self.flight.lock().unwrap();
        if flight.cancelled {
            return false;
        }
        flight.phase = RenamePhase::Committing;
        true
    }

    fn update(&self, phase: RenamePhase, change: impl FnOnce(&mut Option<RenameAttempt>)) {
        let mut flight = self.flight.lock().unwrap();
        flight.phase = phase;
        change(&mut flight.attempt);
    }

    /// Everything up to the commit. Loops instead of recursing so repeated
    /// rejections or conflict cancellations do not grow the stack.
    async fn decide(&self, mut pending: Option<String>) -> Decision {
        let mut suggestion = self.session.name().into_inner();

        loop {
            let candidate = match pending.take() {
                Some(candidate) => candidate,
                None => {
                    self.update(RenamePhase::Validating, |attempt| *attempt = None);
                    let prompt = RenamePrompt {
                        current: self.session.name(),
                        suggestion: suggestion.clone(),
                    };
                    match self.presenter.prompt_rename(&prompt).await {
                        PromptResponse::Submit(candidate) => candidate,
                        PromptResponse::Cancel => return Decision::Cancelled,
                    }
                }
            };

            self.update(RenamePhase::Validating, |attempt| {
                *attempt = Some(RenameAttempt::new(candidate.clone()));
            });

            let name = match DocumentName::new(candidate.clone()) {
                Ok(name) => name,
                Err(_) => {
                    log::debug!("RenameWorkflow: rejected name {:?}", candidate);
                    self.update(RenamePhase::Validating, |attempt| {
                        if let Some(attempt) = attempt {
                            attempt.valid = Some(false);
                        }
                    });
                    self.presenter.show_validation_error(INVALID_NAME_MESSAGE);
                    suggestion = candidate;
                    continue;
                }
            };

            self.update(RenamePhase::CheckingConflict, |attempt| {
                if let Some(attempt) = attempt {
                    attempt.valid = Some(true);
                }
            });

            let conflict = match self.check_conflict(&name).await {
                Ok(conflict) => conflict,
                Err(e) => {
                    log::warn!("RenameWorkflow: could not list documents: {}", e);
                    self.presenter.show_store_error(&e);
                    suggestion = candidate;
                    continue;
                }
            };

            match conflict {
                ConflictCheck::Available => {
                    self.update(RenamePhase::CheckingConflict, |attempt| {
                        if let Some(attempt) = attempt {
                            attempt.conflict = Some(conflict);
                        }
                    });
                    return Decision::Commit(name, CommitMode::Save);
                }
                ConflictCheck::Exists => {
                    self.update(RenamePhase::AwaitingUserConfirmation, |attempt| {
                        if let Some(attempt) = attempt {
                            attempt.conflict = Some(conflict);
                        }
                    });
                    let choice = self.presenter.confirm_overwrite(&name).await;
                    match choice {
                        ConflictChoice::Replace => {
                            return Decision::Commit(name, CommitMode::Overwrite);
                        }
                        ConflictChoice::Cancel => {
                            suggestion = candidate;
                            continue;
                        }
                        ConflictChoice::Close => return Decision::Cancelled,
                    }
                }
            }
        }
    }

    async fn commit(&self, name: DocumentName, mode: CommitMode) -> RenameOutcome {
        log::debug!("RenameWorkflow: committing '{}' ({:?})", name, mode);

        let mut watch = CommitWatch {
            bus: &self.bus,
            name: &name,
            settled: false,
        };
        let result = match mode {
            CommitMode::Save => self.store.save(&name).await,
            CommitMode::Overwrite => self.store.overwrite(&name).await,
        };
        watch.settled = true;
        drop(watch);

        match result {
            Ok(()) => {
                self.session.set_name(name.clone());
                self.bus.emit(&DocumentEvent::Saved);
                RenameOutcome::Renamed(name)
            }
            Err(e) => {
                log::warn!("RenameWorkflow: saving '{}' failed: {}", name, e);
                self.bus.emit(&DocumentEvent::SaveFailed);
                self.presenter.show_store_error(&e);
                RenameOutcome::SaveFailed(e)
            }
        }
    }
}

impl<S> std::fmt::Debug for RenameWorkflow<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let flight = self.flight.lock().unwrap();
        f.debug_struct("RenameWorkflow")
            .field("phase", &flight.phase)
            .field("attempt", &flight.attempt)
            .finish()
    }
}
