//! Test utilities for docname_core
//!
//! Shared fakes for the presenter, the store and the timer.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use crate::error::StoreError;
use crate::name::DocumentName;
use crate::presenter::{ConflictChoice, PromptResponse, RenamePrompt, StatusPresenter};
use crate::status::SaveStatus;
use crate::store::{BoxFuture, DocumentNameSet, DocumentStoreClient, InMemoryDocumentStore, Timer};

/// A presenter call, recorded for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterCall {
    ShowName(String),
    ShowStatus(SaveStatus),
    ShowTitle(String),
    ValidationError(String),
    StoreError(String),
    PromptRename { current: String, suggestion: String },
    ConfirmOverwrite(String),
}

/// Presenter that answers dialogs from a script and records every call.
///
/// With an exhausted script the rename dialog answers `Cancel` and the
/// overwrite dialog answers `Close`, unless [`hold_prompts`] or
/// [`hold_conflicts`] was set, in which case that dialog never answers.
///
/// [`hold_prompts`]: ScriptedPresenter::hold_prompts
/// [`hold_conflicts`]: ScriptedPresenter::hold_conflicts
#[derive(Default)]
pub struct ScriptedPresenter {
    responses: Mutex<VecDeque<PromptResponse>>,
    choices: Mutex<VecDeque<ConflictChoice>>,
    hold_prompts: bool,
    hold_conflicts: bool,
    on_confirm: Mutex<Option<ConfirmHook>>,
    calls: Mutex<Vec<PresenterCall>>,
}

type ConfirmHook = Box<dyn Fn() + Send + Sync>;

impl ScriptedPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer for the rename dialog (builder pattern).
    pub fn with_response(self, response: PromptResponse) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// Queue an answer for the overwrite dialog (builder pattern).
    pub fn with_choice(self, choice: ConflictChoice) -> Self {
        self.choices.lock().unwrap().push_back(choice);
        self
    }

    /// Leave the rename dialog open once the script runs out.
    pub fn hold_prompts(mut self) -> Self {
        self.hold_prompts = true;
        self
    }

    /// Run `hook` each time the overwrite dialog is opened, before it answers.
    pub fn on_confirm(&self, hook: impl Fn() + Send + Sync + 'static) {
        *self.on_confirm.lock().unwrap() = Some(Box::new(hook));
    }

    /// Leave the overwrite dialog open once the script runs out.
    pub fn hold_conflicts(mut self) -> Self {
        self.hold_conflicts = true;
        self
    }

    pub fn calls(&self) -> Vec<PresenterCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: PresenterCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl StatusPresenter for ScriptedPresenter {
    fn show_name(&self, name: &DocumentName) {
        self.record(PresenterCall::ShowName(name.to_string()));
    }

    fn show_status(&self, status: &SaveStatus) {
        self.record(PresenterCall::ShowStatus(*status));
    }

    fn show_title(&self, name: &DocumentName) {
        self.record(PresenterCall::ShowTitle(name.to_string()));
    }

    fn show_validation_error(&self, message: &str) {
        self.record(PresenterCall::ValidationError(message.to_string()));
    }

    fn show_store_error(&self, error: &StoreError) {
        self.record(PresenterCall::StoreError(error.message().to_string()));
    }

    fn prompt_rename<'a>(&'a self, prompt: &'a RenamePrompt) -> BoxFuture<'a, PromptResponse> {
        self.record(PresenterCall::PromptRename {
            current: prompt.current.to_string(),
            suggestion: prompt.suggestion.clone(),
        });
        let next = self.responses.lock().unwrap().pop_front();
        let answer: BoxFuture<'a, PromptResponse> = match next {
            Some(response) => Box::pin(async move { response }),
            None if self.hold_prompts => Box::pin(futures_lite::future::pending()),
            None => Box::pin(async { PromptResponse::Cancel }),
        };
        answer
    }

    fn confirm_overwrite<'a>(&'a self, name: &'a DocumentName) -> BoxFuture<'a, ConflictChoice> {
        self.record(PresenterCall::ConfirmOverwrite(name.to_string()));
        if let Some(hook) = self.on_confirm.lock().unwrap().as_ref() {
            hook();
        }
        let next = self.choices.lock().unwrap().pop_front();
        let answer: BoxFuture<'a, ConflictChoice> = match next {
            Some(choice) => Box::pin(async move { choice }),
            None if self.hold_conflicts => Box::pin(futures_lite::future::pending()),
            None => Box::pin(async { ConflictChoice::Close }),
        };
        answer
    }
}

/// Store whose calls never finish.
pub struct StalledStore;

impl DocumentStoreClient for StalledStore {
    fn list_names(&self) -> BoxFuture<'_, Result<DocumentNameSet, StoreError>> {
        Box::pin(futures_lite::future::pending())
    }

    fn save<'a>(&'a self, _name: &'a DocumentName) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(futures_lite::future::pending())
    }

    fn overwrite<'a>(&'a self, _name: &'a DocumentName) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(futures_lite::future::pending())
    }
}

/// Store that lists fine but fails every write with a connection error.
pub struct FailingWrites {
    inner: InMemoryDocumentStore,
}

impl FailingWrites {
    pub fn new<const N: usize>(names: [&str; N]) -> Self {
        Self {
            inner: InMemoryDocumentStore::with_names(names),
        }
    }
}

impl DocumentStoreClient for FailingWrites {
    fn list_names(&self) -> BoxFuture<'_, Result<DocumentNameSet, StoreError>> {
        self.inner.list_names()
    }

    fn save<'a>(&'a self, _name: &'a DocumentName) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async { Err(StoreError::connection()) })
    }

    fn overwrite<'a>(&'a self, _name: &'a DocumentName) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async { Err(StoreError::connection()) })
    }
}

/// Store that writes, then never reports back.
pub struct UnansweredWrites {
    inner: InMemoryDocumentStore,
}

impl UnansweredWrites {
    pub fn new<const N: usize>(names: [&str; N]) -> Self {
        Self {
            inner: InMemoryDocumentStore::with_names(names),
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.inner.names()
    }
}

impl DocumentStoreClient for UnansweredWrites {
    fn list_names(&self) -> BoxFuture<'_, Result<DocumentNameSet, StoreError>> {
        self.inner.list_names()
    }

    fn save<'a>(&'a self, name: &'a DocumentName) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            self.inner.save(name).await?;
            futures_lite::future::pending::<Result<(), StoreError>>().await
        })
    }

    fn overwrite<'a>(&'a self, name: &'a DocumentName) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            self.inner.overwrite(name).await?;
            futures_lite::future::pending::<Result<(), StoreError>>().await
        })
    }
}

/// Timer that has always already expired.
pub struct ImmediateTimer;

impl Timer for ImmediateTimer {
    fn sleep(&self, _duration: Duration) -> BoxFuture<'_, ()> {
        Box::pin(async {})
    }
}

/// Timer that never expires.
pub struct NeverTimer;

impl Timer for NeverTimer {
    fn sleep(&self, _duration: Duration) -> BoxFuture<'_, ()> {
        Box::pin(futures_lite::future::pending())
    }
}
