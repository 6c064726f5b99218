#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Configuration options
pub mod config;

/// Error (common error types)
pub mod error;

/// Lifecycle events and the publish/subscribe bus that carries them
pub mod event_bus;

/// Document names and name validation
pub mod name;

/// Presentation boundary (dialogs, name and status display)
pub mod presenter;

/// Document session (current name and save status)
pub mod session;

/// Save status and its display text
pub mod status;

/// Document store abstraction
pub mod store;

/// Rename workflow (validate, check conflicts, confirm, commit)
pub mod workflow;

#[cfg(test)]
pub mod test_utils;

pub use error::{DocnameError, Result, StoreError};
pub use name::DocumentName;
pub use status::SaveStatus;
