//! User-visible notifications (toasts).

use super::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// The toast shown when `verb`-ing a setup failed.
    ///
    /// A missing session gets its own message; everything else is reported
    /// generically.
    pub fn for_failure(verb: &str, error: &ClientError) -> Self {
        match error {
            ClientError::Unauthorized(_) => {
                Self::error(format!("You must be logged in to {verb} a setup"))
            }
            ClientError::Validation { .. }
            | ClientError::NotFound(_)
            | ClientError::Transport(_)
            | ClientError::Timeout(_) => Self::error(format!("Failed to {verb} setup")),
        }
    }
}
