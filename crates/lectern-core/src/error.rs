//! Errors reported by toolbar hosts.
//!
//! None of these escape the state machine: a failing host call is logged and
//! the toolbar degrades to a no-op or a reset.

/// Failure of a `ToolbarHost` operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// A required browser context (window, document) is unavailable.
    #[error("missing host context: {0}")]
    MissingContext(&'static str),

    /// The document refused a formatting command.
    #[error("command `{command}` was not applied")]
    Command { command: String },

    #[error("dom operation failed: {0}")]
    Dom(String),
}

impl From<&str> for HostError {
    fn from(s: &str) -> Self {
        HostError::Dom(s.to_string())
    }
}

impl From<String> for HostError {
    fn from(s: String) -> Self {
        HostError::Dom(s)
    }
}
