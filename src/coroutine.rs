use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::thread::JoinHandle;

use parking_lot::Mutex;
use tracing::debug;
use tracing::trace;
use tracing::warn;

use crate::boundary;
use crate::builder::Builder;
use crate::caller::Caller;
use crate::error::CoroError;
use crate::error::Result;
use crate::handoff;
use crate::handoff::CallerEnd;
use crate::handoff::Handoff;
use crate::status::Status;
use crate::status::StatusCell;
use crate::suspend::Suspend;
use crate::yielder::Yielder;

pub(crate) type Body<I, Y, R> = Box<dyn FnOnce(&Yielder<I, Y, R>, I) -> R + Send>;

/// State visible to both the caller side and the body's thread.
#[derive(Debug, Default)]
pub(crate) struct Shared {
    pub(crate) status: StatusCell,
    started: AtomicBool,
    last_error: Mutex<Option<CoroError>>,
}

impl Shared {
    /// Records the error that killed the coroutine. The first one wins.
    pub(crate) fn record(&self, err: CoroError) {
        let mut slot = self.last_error.lock();
        if slot.is_none() {
            *slot = Some(err);
        }
    }

    fn last_error(&self) -> Option<CoroError> {
        self.last_error.lock().clone()
    }

    /// What a resume of a `Dead` coroutine reports.
    fn dead_error(&self) -> CoroError {
        self.last_error().unwrap_or(CoroError::EndOfCoro)
    }
}

struct State<I, Y, R> {
    body: Option<Body<I, Y, R>>,
    caller: Option<CallerEnd<I, Y, R>>,
    thread: Option<JoinHandle<()>>,
}

struct Inner<I, Y, R> {
    shared: Arc<Shared>,
    state: Mutex<State<I, Y, R>>,
    builder: Builder,
}

/// A Lua-style coroutine whose body runs on its own thread.
///
/// The body is a function `FnOnce(&Yielder<I, Y, R>, I) -> R`. It does not
/// start until the first `resume()`, which passes the body its initial
/// input. From then on, control strictly alternates: `resume()` blocks while
/// the body runs, and the body blocks inside `Yielder::suspend()` while the
/// caller runs. Values cross over zero-capacity channels, so the n-th value
/// the body suspends with is delivered to exactly the n-th `resume()`.
///
/// ```rust
/// use threadcoro::{Coroutine, CoroError, Return, Status, Yield, Yielder};
///
/// let co = Coroutine::new(|y: &Yielder<(), i32, &str>, ()| {
///     for i in 1..=3 {
///         y.suspend(i);
///     }
///     "done"
/// });
/// assert_eq!(co.status(), Status::Suspended);
/// assert_eq!(co.resume(()).unwrap(), Yield(1));
/// assert_eq!(co.resume(()).unwrap(), Yield(2));
/// assert_eq!(co.resume(()).unwrap(), Yield(3));
/// assert_eq!(co.resume(()).unwrap(), Return("done"));
/// assert_eq!(co.status(), Status::Dead);
/// assert!(matches!(co.resume(()), Err(CoroError::EndOfCoro)));
/// ```
///
/// # Ownership of the body's thread
///
/// A started coroutine owns a thread that is parked whenever the coroutine
/// is suspended. The thread goes away when the body finishes, when the
/// coroutine is `cancel()`ed, or when the last handle to the coroutine is
/// dropped, which tears the body down the same way `cancel()` does.
///
/// Handles are cheap to clone and all drive the same coroutine. Only one
/// caller can drive it at a time: a `resume()` or `cancel()` that races with
/// another one, or that comes from inside the body itself, fails with
/// `CoroError::InvalidState` instead of blocking. `status()` may be read from
/// anywhere at any time.
pub struct Coroutine<I, Y, R> {
    inner: Arc<Inner<I, Y, R>>,
}

impl<I, Y, R> Coroutine<I, Y, R>
where
    I: Send + 'static,
    Y: Send + 'static,
    R: Send + 'static,
{
    /// Creates a suspended coroutine with the default `Builder` settings.
    ///
    /// Compare to Lua's `coroutine.create()`.
    pub fn new<F>(body: F) -> Self
    where
        F: FnOnce(&Yielder<I, Y, R>, I) -> R + Send + 'static,
    {
        Builder::new().build(body)
    }

    pub(crate) fn from_parts(builder: Builder, body: Body<I, Y, R>) -> Self {
        Self {
            inner: Arc::new(Inner {
                shared: Arc::default(),
                state: Mutex::new(State {
                    body: Some(body),
                    caller: None,
                    thread: None,
                }),
                builder,
            }),
        }
    }

    /// See `Caller::resume()`.
    pub fn resume(&self, input: I) -> Result<Suspend<Y, R>> {
        let shared = &self.inner.shared;
        if let Err(observed) =
            shared.status.transition(Status::Suspended, Status::Running)
        {
            return Err(match observed {
                Status::Dead => shared.dead_error(),
                status => {
                    trace!(%status, "rejected resume");
                    CoroError::InvalidState
                }
            });
        }

        let mut guard = self.inner.state.lock();
        let state = &mut *guard;
        let caller = match state.caller.take() {
            Some(caller) => {
                trace!("resuming coroutine");
                // If the body is gone, `wait()` below reports it.
                let _ = caller.send_resume(input);
                caller
            }
            None => match state.body.take() {
                Some(body) => match self.start(body, input) {
                    Ok((caller, thread)) => {
                        state.thread = Some(thread);
                        caller
                    }
                    Err(err) => {
                        warn!(%err, "could not start coroutine");
                        shared.record(err.clone());
                        shared.status.set(Status::Dead);
                        return Err(err);
                    }
                },
                None => {
                    self.reap(state);
                    return Err(shared.dead_error());
                }
            },
        };
        let handoff = caller.wait();
        state.caller = Some(caller);

        match handoff {
            Some(Handoff::Yielded(y)) => {
                // Only once the state is released may another caller claim
                // the coroutine.
                drop(guard);
                shared.status.set(Status::Suspended);
                Ok(Suspend::Yield(y))
            }
            Some(Handoff::Returned(r)) => {
                self.reap(state);
                Ok(Suspend::Return(r))
            }
            Some(Handoff::Faulted) | None => {
                self.reap(state);
                Err(shared.dead_error())
            }
        }
    }

    /// See `Caller::cancel()`.
    pub fn cancel(&self) -> Result<()> {
        let shared = &self.inner.shared;
        if let Err(status) =
            shared.status.transition(Status::Suspended, Status::Running)
        {
            trace!(%status, "rejected cancel");
            return Err(CoroError::InvalidState);
        }

        let mut guard = self.inner.state.lock();
        let state = &mut *guard;
        match state.caller.take() {
            None => {
                state.body = None;
                shared.status.set(Status::Dead);
                debug!("coroutine cancelled before it started");
            }
            Some(mut caller) => {
                caller.close();
                // A body that swallows the unwind may suspend again before it
                // finishes; only its final handoff confirms the teardown.
                while let Some(handoff) = caller.wait() {
                    if handoff.is_final() {
                        break;
                    }
                }
                self.reap(state);
                debug!("coroutine cancelled");
            }
        }
        Ok(())
    }

    fn start(
        &self,
        body: Body<I, Y, R>,
        input: I,
    ) -> Result<(CallerEnd<I, Y, R>, JoinHandle<()>)> {
        let (caller, body_end) = handoff::pair();
        let shared = Arc::clone(&self.inner.shared);
        let thread = self
            .inner
            .builder
            .spawn(move || boundary::run(shared, body_end, body, input))
            .map_err(CoroError::spawn)?;
        debug!(thread = ?thread.thread().name(), "coroutine body spawned");
        self.inner.shared.started.store(true, Ordering::Release);
        Ok((caller, thread))
    }

    /// Marks the coroutine dead and releases its channels and thread.
    fn reap(&self, state: &mut State<I, Y, R>) {
        self.inner.shared.status.set(Status::Dead);
        state.caller = None;
        if let Some(thread) = state.thread.take() {
            if thread.join().is_err() {
                warn!("coroutine thread panicked outside its fault boundary");
            }
        }
        debug!(error = ?self.inner.shared.last_error(), "coroutine is dead");
    }
}

impl<I, Y, R> Coroutine<I, Y, R> {
    /// See `Caller::status()`.
    pub fn status(&self) -> Status {
        self.inner.shared.status.get()
    }

    /// The fault or cancellation that killed the coroutine, if any.
    ///
    /// This stays `None` for a coroutine that is still alive, that returned
    /// normally, or that was cancelled before it ever started.
    pub fn last_error(&self) -> Option<CoroError> {
        self.inner.shared.last_error()
    }

    /// Whether the body has been started by a first `resume()`.
    pub fn is_started(&self) -> bool {
        self.inner.shared.started.load(Ordering::Acquire)
    }
}

impl<I, Y, R> Caller<I, Y, R> for Coroutine<I, Y, R>
where
    I: Send + 'static,
    Y: Send + 'static,
    R: Send + 'static,
{
    fn resume(&self, input: I) -> Result<Suspend<Y, R>> {
        Coroutine::resume(self, input)
    }

    fn status(&self) -> Status {
        Coroutine::status(self)
    }

    fn cancel(&self) -> Result<()> {
        Coroutine::cancel(self)
    }
}

impl<I, Y, R> Clone for Coroutine<I, Y, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<I, Y, R> core::fmt::Debug for Coroutine<I, Y, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Coroutine")
            .field("status", &self.status())
            .field("started", &self.is_started())
            .finish_non_exhaustive()
    }
}
