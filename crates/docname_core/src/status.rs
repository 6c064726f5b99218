//! Save status of the active document.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Default timestamp format for the "Last saved" text, e.g. `Mar 04 3:07 PM`.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%b %d %-I:%M %p";

/// Status text shown after a failed save.
pub const SAVE_FAILED_TEXT: &str = "Last Save Failed!";

/// Whether (and when) the document was last saved.
///
/// Set to [`SaveStatus::Saved`] on load and on every successful save, and to
/// [`SaveStatus::Failed`] when a save fails. Nothing resets it to `Unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "at", rename_all = "snake_case")]
pub enum SaveStatus {
    /// No load or save has happened yet.
    #[default]
    Unset,
    /// Loaded or saved at the given instant.
    Saved(DateTime<Utc>),
    /// The most recent save failed.
    Failed,
}

impl SaveStatus {
    /// Saved now.
    pub fn saved_now() -> Self {
        Self::Saved(Utc::now())
    }

    /// Timestamp of the last successful load or save, if that is the current state.
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Saved(at) => Some(*at),
            _ => None,
        }
    }

    /// Status text in local time using `format` (a chrono format string).
    pub fn describe(&self, format: &str) -> String {
        self.describe_in(&Local, format)
    }

    /// Status text with timestamps converted to `tz`.
    pub fn describe_in<Tz: TimeZone>(&self, tz: &Tz, format: &str) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        match self {
            Self::Unset => String::new(),
            Self::Saved(at) => format!("Last saved: {}", at.with_timezone(tz).format(format)),
            Self::Failed => SAVE_FAILED_TEXT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_describe_saved() {
        let at = Utc.with_ymd_and_hms(2012, 3, 4, 15, 7, 0).unwrap();
        let status = SaveStatus::Saved(at);
        assert_eq!(
            status.describe_in(&Utc, DEFAULT_TIMESTAMP_FORMAT),
            "Last saved: Mar 04 3:07 PM"
        );

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            status.describe_in(&plus_two, DEFAULT_TIMESTAMP_FORMAT),
            "Last saved: Mar 04 5:07 PM"
        );
    }

    #[test]
    fn test_describe_failed_and_unset() {
        assert_eq!(SaveStatus::Failed.describe("%H:%M"), "Last Save Failed!");
        assert_eq!(SaveStatus::Unset.describe("%H:%M"), "");
    }

    #[test]
    fn test_saved_at() {
        assert!(SaveStatus::saved_now().saved_at().is_some());
        assert!(SaveStatus::Failed.saved_at().is_none());
        assert_eq!(SaveStatus::default(), SaveStatus::Unset);
    }
}
