//! Error types for the window registry.

use std::fmt;

use casement_core::alloc::SlotError;

/// Errors returned by [`WindowRegistry`](crate::registry::WindowRegistry).
///
/// `InvalidHandle` and `StaleHandle` are caller bugs: the handle was never
/// valid or its window has already been destroyed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// The handle is the invalid sentinel.
    InvalidHandle,

    /// The handle no longer addresses a live window.
    StaleHandle {
        /// Why the slot table rejected it.
        source: SlotError,
    },

    /// The substrate refused to create the native window.
    CreationFailed {
        /// Caption of the window that could not be created.
        caption: String,
    },
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::InvalidHandle => write!(f, "Invalid window handle"),
            WindowError::StaleHandle { source } => {
                write!(f, "Stale window handle: {}", source)
            }
            WindowError::CreationFailed { caption } => {
                write!(f, "Failed to create native window '{}'", caption)
            }
        }
    }
}

impl std::error::Error for WindowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WindowError::StaleHandle { source } => Some(source),
            _ => None,
        }
    }
}

impl From<SlotError> for WindowError {
    fn from(err: SlotError) -> Self {
        match err {
            SlotError::InvalidId => WindowError::InvalidHandle,
            source => WindowError::StaleHandle { source },
        }
    }
}

/// Result type alias for window operations.
pub type WindowResult<T> = Result<T, WindowError>;
