//! Presentation boundary.
//!
//! The UI implements [`StatusPresenter`]. The core pushes display updates into
//! it and awaits the dialogs it opens; it never reads UI state back. Closing a
//! dialog is reported through the dialog's answer ([`PromptResponse::Cancel`],
//! [`ConflictChoice::Close`]).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::StoreError;
use crate::name::DocumentName;
use crate::status::SaveStatus;
use crate::store::BoxFuture;

/// Contents of the rename dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePrompt {
    /// Name the document has right now.
    pub current: DocumentName,
    /// Text to pre-fill the input with.
    pub suggestion: String,
}

/// Answer from the rename dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "action", content = "name", rename_all = "snake_case")]
pub enum PromptResponse {
    /// The user confirmed this text.
    Submit(String),
    /// The user cancelled or closed the dialog.
    Cancel,
}

/// Answer from the "document exists" dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum ConflictChoice {
    /// Replace the existing document.
    Replace,
    /// Go back to the rename dialog and pick another name.
    Cancel,
    /// Close the dialog and abandon the rename.
    Close,
}

/// Display and dialog surface driven by the core.
pub trait StatusPresenter: Send + Sync {
    /// Show the document name.
    fn show_name(&self, name: &DocumentName);

    /// Show the save status.
    fn show_status(&self, status: &SaveStatus);

    /// Use the name as the page title.
    fn show_title(&self, _name: &DocumentName) {}

    /// Tell the user the proposed name was rejected. The rename dialog is
    /// reopened right after.
    fn show_validation_error(&self, message: &str);

    /// Tell the user a store call failed.
    fn show_store_error(&self, error: &StoreError);

    /// Open the rename dialog and wait for the user.
    fn prompt_rename<'a>(&'a self, prompt: &'a RenamePrompt) -> BoxFuture<'a, PromptResponse>;

    /// Ask whether the existing document called `name` should be replaced.
    fn confirm_overwrite<'a>(&'a self, name: &'a DocumentName) -> BoxFuture<'a, ConflictChoice>;
}
