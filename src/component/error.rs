//! Error types for component operations

use std::error::Error;
use std::fmt;

use crate::component::LifecyclePhase;

/// Errors that can occur during component operations
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentError {
    /// Error acquiring lock
    LockError(String),

    /// Invalid lifecycle transition
    InvalidLifecycleTransition(LifecyclePhase, String),

    /// Error rendering component
    RenderError(String),

    /// A part of the encapsulated tree the operation relies on is missing
    MissingShadowPart(&'static str),
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LockError(msg) => write!(f, "Lock error: {}", msg),
            Self::InvalidLifecycleTransition(phase, operation) => write!(
                f,
                "Invalid lifecycle transition: cannot {} while in {:?} phase",
                operation, phase
            ),
            Self::RenderError(msg) => write!(f, "Error rendering component: {}", msg),
            Self::MissingShadowPart(part) => {
                write!(f, "Shadow root has no '{}' part", part)
            }
        }
    }
}

impl Error for ComponentError {}

impl From<crate::style::StyleError> for ComponentError {
    fn from(error: crate::style::StyleError) -> Self {
        ComponentError::RenderError(error.to_string())
    }
}
