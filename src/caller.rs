use crate::error::Result;
use crate::status::Status;
use crate::suspend::Suspend;

/// The capability to drive, inspect and cancel a coroutine from outside its
/// body.
///
/// `Coroutine` is the implementation everyone uses; the trait exists so that
/// helpers (like the assertions in `CallerAssertions`) can be written once
/// against the capability rather than the concrete type.
///
/// A caller resumes the coroutine with an input of type `I` and gets back
/// either a yielded `Y` or, once, the body's return value `R`. Compare to
/// Lua's `coroutine.resume()`, `coroutine.status()` and, for `cancel()`, the
/// closing of a coroutine with `coroutine.close()`.
pub trait Caller<I, Y, R> {
    /// Starts the body, or continues it from where it last suspended, passing
    /// `input` in. Blocks until the body suspends again or finishes.
    ///
    /// The first resume passes `input` as the body's second argument; later
    /// resumes deliver it as the return value of `Yielder::suspend()`.
    ///
    /// Returns:
    ///
    ///   * `Ok(Yield(y))` when the body suspended with `y`,
    ///   * `Ok(Return(r))` when the body returned `r` during this step,
    ///   * `Err(err)` when the body failed during this step, with the
    ///     captured fault,
    ///   * `Err(err)` without running anything when the coroutine is already
    ///     `Dead`: the captured fault if there was one, `EndOfCoro`
    ///     otherwise,
    ///   * `Err(CoroError::InvalidState)` when the coroutine is `Running`,
    ///     e.g. when a body tries to resume its own coroutine.
    fn resume(&self, input: I) -> Result<Suspend<Y, R>>;

    /// The current state of the coroutine. Reading it never changes it.
    fn status(&self) -> Status;

    /// Kills a suspended coroutine.
    ///
    /// A coroutine that never started simply becomes `Dead`; its body never
    /// runs. A coroutine parked at a yield point is woken and unwound back to
    /// its fault boundary, dropping everything the body owned, and this call
    /// blocks until that has happened. Either way the coroutine ends up
    /// `Dead` and `Ok(())` is returned.
    ///
    /// Fails with `CoroError::InvalidState` if the coroutine is `Running` or
    /// already `Dead`.
    fn cancel(&self) -> Result<()>;

    /// Resumes with `I::default()` until the body finishes, calling `f` on
    /// each yielded value, and returns the body's return value.
    ///
    /// This is the resume loop that `iter()` runs on its own thread, without
    /// giving up error visibility.
    fn for_each(&self, mut f: impl FnMut(Y)) -> Result<R>
    where
        I: Default,
    {
        loop {
            match self.resume(I::default())? {
                Suspend::Yield(y) => f(y),
                Suspend::Return(r) => return Ok(r),
            }
        }
    }

    /// Resumes with `I::default()` until the body finishes and collects the
    /// yielded values.
    ///
    /// Finishing includes a coroutine that was already `Dead`: if it ended
    /// normally the result is `Err(CoroError::EndOfCoro)`.
    fn collect_yields(&self) -> Result<(Vec<Y>, R)>
    where
        I: Default,
    {
        let mut yields = Vec::new();
        let r = self.for_each(|y| yields.push(y))?;
        Ok((yields, r))
    }

    /// Whether the coroutine has finished, in any way.
    fn is_dead(&self) -> bool {
        self.status() == Status::Dead
    }
}
