//! The fault boundary around a coroutine body.
//!
//! Everything that happens on a body's thread goes through `run()`. A body
//! that returns hands its value over as the final handoff; a body that
//! unwinds, for any reason, has its panic payload translated into a
//! `CoroError` which is recorded on the coroutine before the final handoff.
//! No unwind ever escapes the body's thread into the caller.

use std::any::Any;
use std::error::Error;
use std::panic;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use tracing::debug;
use tracing::warn;

use crate::coroutine::Body;
use crate::coroutine::Shared;
use crate::error::CoroError;
use crate::handoff::BodyEnd;
use crate::handoff::Handoff;
use crate::status::Status;
use crate::yielder::CancelToken;
use crate::yielder::Yielder;

/// Runs `body` to completion on the current thread and reports how it ended.
pub(crate) fn run<I, Y, R>(
    shared: Arc<Shared>,
    end: BodyEnd<I, Y, R>,
    body: Body<I, Y, R>,
    input: I,
) {
    let yielder = Yielder::new(Arc::clone(&shared), end);
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| body(&yielder, input)));
    let handoff = match outcome {
        Ok(r) => {
            debug!("coroutine body returned");
            Handoff::Returned(r)
        }
        Err(payload) => {
            let err = translate(payload);
            match &err {
                CoroError::Cancelled => debug!("coroutine body cancelled"),
                err => warn!(%err, "coroutine body faulted"),
            }
            shared.record(err);
            Handoff::Faulted
        }
    };
    shared.status.set(Status::Dead);
    yielder.finish(handoff);
}

/// Turns an unwind payload into the error reported by later resumes.
///
/// A `CoroError` payload is kept as is, an error value becomes
/// `CoroError::Fault` and a message becomes `CoroError::Panicked`.
pub(crate) fn translate(payload: Box<dyn Any + Send>) -> CoroError {
    if payload.is::<CancelToken>() {
        return CoroError::Cancelled;
    }
    let payload = match payload.downcast::<CoroError>() {
        Ok(err) => return *err,
        Err(payload) => payload,
    };
    let payload = match payload.downcast::<Box<dyn Error + Send + Sync>>() {
        Ok(err) => return CoroError::Fault(Arc::from(*err)),
        Err(payload) => payload,
    };
    let payload = match payload.downcast::<String>() {
        Ok(message) => return CoroError::Panicked { message: *message },
        Err(payload) => payload,
    };
    match payload.downcast::<&'static str>() {
        Ok(message) => CoroError::Panicked {
            message: (*message).to_owned(),
        },
        Err(_) => CoroError::Panicked {
            message: "unknown panic payload".to_owned(),
        },
    }
}

/// Fails the current coroutine body with an error value.
///
/// The body unwinds to the fault boundary without invoking the panic hook,
/// and the error is reported as `CoroError::Fault` by the `resume()` that
/// observes the failure, and by every `resume()` after it.
///
/// ```rust
/// use std::io;
///
/// use threadcoro::{Coroutine, CoroError, Yield, Yielder, raise};
///
/// let co = Coroutine::new(|y: &Yielder<(), u8, ()>, ()| {
///     y.suspend(1);
///     raise(io::Error::other("sensor unplugged"));
/// });
/// assert_eq!(co.resume(()).unwrap(), Yield(1));
/// let err = co.resume(()).unwrap_err();
/// assert!(matches!(err, CoroError::Fault(_)));
/// assert_eq!(err.to_string(), "sensor unplugged");
/// ```
///
/// Called outside a coroutine body, this unwinds the calling thread like
/// `std::panic::resume_unwind()` does.
pub fn raise(err: impl Into<Box<dyn Error + Send + Sync>>) -> ! {
    panic::resume_unwind(Box::new(CoroError::fault(err)))
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    fn payload_of(f: impl FnOnce()) -> Box<dyn Any + Send> {
        match panic::catch_unwind(AssertUnwindSafe(f)) {
            Ok(()) => panic!("expected an unwind"),
            Err(payload) => payload,
        }
    }

    #[test]
    fn str_message() {
        let err = translate(payload_of(|| panic!("gulp")));
        assert!(matches!(err, CoroError::Panicked { ref message } if message == "gulp"));
    }

    #[test]
    fn formatted_message() {
        let n = 3;
        let err = translate(payload_of(|| panic!("gulp {n}")));
        assert_eq!(err.to_string(), "gulp 3");
    }

    #[test]
    fn coro_error_is_verbatim() {
        let err = translate(Box::new(CoroError::InvalidState));
        assert!(matches!(err, CoroError::InvalidState));
    }

    #[test]
    fn boxed_error_becomes_fault() {
        let boxed: Box<dyn Error + Send + Sync> = "bad input".into();
        let err = translate(Box::new(boxed));
        assert!(matches!(err, CoroError::Fault(_)));
        assert_eq!(err.to_string(), "bad input");
    }

    #[test]
    fn raise_becomes_fault() {
        let err = translate(payload_of(|| raise(io::Error::other("eof"))));
        assert!(matches!(err, CoroError::Fault(_)));
        assert_eq!(err.to_string(), "eof");
    }

    #[test]
    fn cancel_token() {
        let err = translate(Box::new(CancelToken));
        assert!(matches!(err, CoroError::Cancelled));
    }

    #[test]
    fn opaque_payload() {
        let err = translate(Box::new(42_u64));
        assert_eq!(err.to_string(), "unknown panic payload");
    }
}
