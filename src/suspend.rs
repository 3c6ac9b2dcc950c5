/// What a single successful `resume()` produced.
///
/// After a call to `resume()` returns `Ok`, the coroutine is in one of two
/// states:
///
///   * `Yield(y)`: The body handed out `y` and is parked, ready to be resumed
///     with the next input value.
///   * `Return(r)`: The body finished and returned `r`. The coroutine is now
///     `Dead`; resuming it again reports `CoroError::EndOfCoro`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Suspend<Y, R> {
    Yield(Y),
    Return(R),
}

use Suspend::*;

impl<Y, R> Suspend<Y, R> {
    /// Returns the yielded value, if the body yielded, or `None` otherwise.
    ///
    /// Compare to `Result::ok()` or `ControlFlow::continue_value()`.
    pub fn into_yield(self) -> Option<Y> {
        match self {
            Yield(y) => Some(y),
            Return(_) => None,
        }
    }

    /// Returns the return value of the body, if it returned, or `None`
    /// otherwise.
    ///
    /// Compare to `Result::err()` or `ControlFlow::break_value()`.
    pub fn into_return(self) -> Option<R> {
        match self {
            Yield(_) => None,
            Return(r) => Some(r),
        }
    }

    pub fn is_yield(&self) -> bool {
        matches!(self, Yield(_))
    }

    pub fn is_return(&self) -> bool {
        matches!(self, Return(_))
    }

    /// Collapses both variants into one value when the yield and return types
    /// agree, the way Lua treats a body's return values as its last yield.
    pub fn into_inner(self) -> Y
    where
        R: Into<Y>,
    {
        match self {
            Yield(y) => y,
            Return(r) => r.into(),
        }
    }
}
