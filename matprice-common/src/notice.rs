//! Transient user-visible messages
//!
//! Shown by the UI for a fixed duration after a save.

use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::store::AppendOutcome;

/// How long a notice stays visible
pub const NOTICE_DURATION_MS: u64 = 4000;

const SAVE_ICON: &str = "💾";
const WARN_ICON: &str = "⚠️";

/// Notice severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A message with an icon and a display duration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub icon: &'static str,
    pub message: String,
    pub duration_ms: u64,
}

impl Notice {
    fn info(message: String) -> Self {
        Self {
            level: NoticeLevel::Info,
            icon: SAVE_ICON,
            message,
            duration_ms: NOTICE_DURATION_MS,
        }
    }

    /// After "Calculate and Save"
    pub fn appended(outcome: AppendOutcome, path: &Path) -> Self {
        match outcome {
            AppendOutcome::Updated => {
                Self::info(format!("Updated Data in CSV: {}", path.display()))
            }
            AppendOutcome::Created => {
                Self::info(format!("Saved Data to the new CSV: {}", path.display()))
            }
        }
    }

    /// After a successful "Save Changes"
    pub fn overwritten(path: &Path) -> Self {
        Self::info(format!("Updated data in CSV: {}", path.display()))
    }

    /// After a failed "Save Changes"
    pub fn overwrite_failed(path: &Path, error: &dyn fmt::Display) -> Self {
        Self {
            level: NoticeLevel::Error,
            icon: WARN_ICON,
            message: format!("Failed to save changes to {}: {}", path.display(), error),
            duration_ms: NOTICE_DURATION_MS,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon, self.message)
    }
}
