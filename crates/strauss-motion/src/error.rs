//! Error types for the motion controllers
//!
//! Most setup paths tolerate missing elements and simply skip the effect.
//! The variants here cover the paths that do not, plus host and
//! configuration failures.

/// Errors that can occur while wiring or running landing page effects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MotionError {
    /// A required element was not present on the page
    ElementNotFound(&'static str),

    /// Page configuration could not be parsed or is out of range
    Config(String),

    /// A host capability (timer, frame, observer, DOM call) failed
    Host(String),
}

impl MotionError {
    /// Create a configuration error with message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a host error with message.
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }
}

impl std::fmt::Display for MotionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ElementNotFound(selector) => write!(f, "element not found: {}", selector),
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Host(msg) => write!(f, "host error: {}", msg),
        }
    }
}

impl std::error::Error for MotionError {}

impl From<serde_json::Error> for MotionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for motion operations
pub type MotionResult<T> = Result<T, MotionError>;
