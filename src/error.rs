use std::error::Error;
use std::io;
use std::sync::Arc;

use thiserror::Error;

/// Shorthand for results whose error is a `CoroError`.
pub type Result<T, E = CoroError> = core::result::Result<T, E>;

/// Everything that can go wrong while driving a coroutine.
///
/// A `Dead` coroutine reports the same error from every later `resume()`, so
/// the type is `Clone`; errors raised from inside a body are kept behind an
/// `Arc`.
#[derive(Debug, Clone, Error)]
pub enum CoroError {
    /// The body returned normally and its return value has already been
    /// delivered.
    #[error("coroutine terminated")]
    EndOfCoro,

    /// `resume()` was called while the coroutine was already running
    /// (including from inside its own body), or `cancel()` was called on a
    /// coroutine that isn't suspended.
    #[error("coroutine is in invalid state")]
    InvalidState,

    /// The body was torn down while parked at a yield point.
    ///
    /// `cancel()` itself succeeds; this is what later resumes report.
    #[error("coroutine canceled")]
    Cancelled,

    /// The body panicked with a payload that isn't an error value.
    #[error("{message}")]
    Panicked { message: String },

    /// The body failed with an error value, see `raise()`.
    #[error(transparent)]
    Fault(Arc<dyn Error + Send + Sync>),

    /// The thread for the body could not be started.
    #[error("failed to spawn coroutine body: {0}")]
    Spawn(#[source] Arc<io::Error>),
}

impl CoroError {
    /// Wraps an arbitrary error as a body fault.
    pub fn fault(err: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        CoroError::Fault(Arc::from(err.into()))
    }

    pub(crate) fn spawn(err: io::Error) -> Self {
        CoroError::Spawn(Arc::new(err))
    }

    /// Whether this is the marker for a body that finished normally.
    pub fn is_end_of_coro(&self) -> bool {
        matches!(self, CoroError::EndOfCoro)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(CoroError::EndOfCoro.to_string(), "coroutine terminated");
        assert_eq!(
            CoroError::InvalidState.to_string(),
            "coroutine is in invalid state"
        );
        assert_eq!(CoroError::Cancelled.to_string(), "coroutine canceled");
        assert_eq!(
            CoroError::Panicked {
                message: "gulp".into()
            }
            .to_string(),
            "gulp"
        );
    }

    #[test]
    fn fault_is_transparent() {
        let err = CoroError::fault("disk on fire");
        assert_eq!(err.to_string(), "disk on fire");
        assert!(!err.is_end_of_coro());
    }

    #[test]
    fn spawn_keeps_source() {
        let err = CoroError::spawn(io::Error::other("no threads left"));
        assert!(matches!(err, CoroError::Spawn(_)));
        assert!(err.source().is_some());
    }
}
