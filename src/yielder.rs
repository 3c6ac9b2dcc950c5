use std::cell::Cell;
use std::marker::PhantomData;
use std::panic;
use std::sync::Arc;

use tracing::trace;

use crate::coroutine::Shared;
use crate::handoff::BodyEnd;
use crate::handoff::Handoff;

/// Unwind payload used to tear down a body whose resume channel was closed.
/// The fault boundary recognizes it and records `CoroError::Cancelled`.
pub(crate) struct CancelToken;

/// The capability a coroutine body uses to suspend itself.
///
/// A `Yielder` is only ever lent to the body, as the first argument of the
/// function passed to `Coroutine::new()`. It is the Rust spelling of Lua's
/// `coroutine.yield()`: `yield` is a reserved word, so the method is called
/// `suspend()`.
///
/// ```rust
/// use threadcoro::{Coroutine, Return, Yield, Yielder};
///
/// let co = Coroutine::new(|y: &Yielder<i32, i32, &str>, mut n: i32| {
///     while n > 0 {
///         n = y.suspend(n * 2);
///     }
///     "done"
/// });
/// assert_eq!(co.resume(1).unwrap(), Yield(2));
/// assert_eq!(co.resume(5).unwrap(), Yield(10));
/// assert_eq!(co.resume(0).unwrap(), Return("done"));
/// ```
///
/// A `Yielder` is not `Sync`: only the body's own thread may suspend it.
///
/// ```rust,compile_fail
/// use threadcoro::{Coroutine, Yielder};
///
/// let co = Coroutine::new(|y: &Yielder<(), i32, ()>, ()| {
///     std::thread::scope(|s| {
///         s.spawn(|| y.suspend(1));
///         y.suspend(2);
///     });
/// });
/// ```
pub struct Yielder<I, Y, R> {
    shared: Arc<Shared>,
    end: BodyEnd<I, Y, R>,
    _not_sync: PhantomData<Cell<()>>,
}

impl<I, Y, R> Yielder<I, Y, R> {
    pub(crate) fn new(shared: Arc<Shared>, end: BodyEnd<I, Y, R>) -> Self {
        Self {
            shared,
            end,
            _not_sync: PhantomData,
        }
    }

    /// Hands `value` to the caller whose `resume()` is waiting, then blocks
    /// until the coroutine is resumed again and returns that resume's input.
    ///
    /// If the coroutine is cancelled (or every handle to it is dropped) while
    /// the body is parked here, this does not return: the body unwinds back
    /// to the fault boundary, running destructors on the way, and the
    /// coroutine becomes `Dead`.
    pub fn suspend(&self, value: Y) -> I {
        trace!("body yielding");
        if self.end.offer(Handoff::Yielded(value)).is_err() {
            cancelled();
        }
        match self.end.wait_resume() {
            Some(input) => {
                trace!("body resumed");
                input
            }
            None => cancelled(),
        }
    }

    /// Delivers the final outcome. The body has already been marked `Dead`,
    /// so nothing waits for a resume afterwards.
    pub(crate) fn finish(self, handoff: Handoff<Y, R>) {
        if self.end.offer(handoff).is_err() {
            trace!("no caller left to observe the final handoff");
        }
    }
}

impl<I, Y, R> core::fmt::Debug for Yielder<I, Y, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Yielder")
            .field("status", &self.shared.status.get())
            .finish_non_exhaustive()
    }
}

fn cancelled() -> ! {
    trace!("resume channel closed, unwinding body");
    panic::resume_unwind(Box::new(CancelToken))
}
