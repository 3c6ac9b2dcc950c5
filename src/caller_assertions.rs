use crate::caller::Caller;
use crate::error::CoroError;
use crate::status::Status;
use crate::suspend::Suspend;

/// Extension trait providing assertion methods for testing coroutines.
///
/// This trait is separate from [`Caller`] to keep the capability focused on
/// driving the coroutine. Import this trait in your tests to access assertion
/// methods:
///
/// ```rust
/// use threadcoro::CallerAssertions;
/// use threadcoro::Coroutine;
/// use threadcoro::Status;
/// use threadcoro::Yielder;
///
/// Coroutine::new(|y: &Yielder<(), i32, ()>, ()| {
///     for i in 1..=3 {
///         y.suspend(i);
///     }
/// })
/// .assert_yields((), 1)
/// .assert_yields((), 2)
/// .assert_yields((), 3)
/// .assert_returns((), ())
/// .assert_status(Status::Dead);
/// ```
pub trait CallerAssertions<I, Y, R>: Caller<I, Y, R> {
    /// Resumes the coroutine and asserts that it yields the expected value.
    /// Panics if the body returns or fails instead, or if the yielded value is
    /// not equal to the expected value.
    ///
    /// Returns the coroutine so that assertions can be chained. The `input`
    /// parameter is passed to the `resume()` call that drives it:
    ///
    /// ```rust
    /// use threadcoro::CallerAssertions;
    /// use threadcoro::Coroutine;
    /// use threadcoro::Yielder;
    ///
    /// Coroutine::new(|y: &Yielder<String, usize, ()>, mut s: String| {
    ///     let mut length = 0;
    ///     loop {
    ///         length += s.len();
    ///         s = y.suspend(length);
    ///     }
    /// })
    /// .assert_yields("foo".into(), 3)
    /// .assert_yields("bar".into(), 6)
    /// .assert_yields("hello".into(), 11);
    /// ```
    fn assert_yields(&self, input: I, expected: Y) -> &Self
    where
        Y: PartialEq + core::fmt::Debug,
        R: core::fmt::Debug,
    {
        match self.resume(input) {
            Ok(Suspend::Yield(actual)) => {
                assert_eq!(
                    actual, expected,
                    "expected Yield({expected:?}), got Yield({actual:?})"
                );
            }
            Ok(Suspend::Return(actual)) => {
                panic!("expected Yield({expected:?}), got Return({actual:?})")
            }
            Err(err) => {
                panic!("expected Yield({expected:?}), got Err({err:?})")
            }
        }
        self
    }

    /// Resumes the coroutine and asserts that the body returns the expected
    /// value. Panics if the body yields or fails instead, or if the return
    /// value is not equal to the expected value.
    fn assert_returns(&self, input: I, expected: R) -> &Self
    where
        Y: core::fmt::Debug,
        R: PartialEq + core::fmt::Debug,
    {
        match self.resume(input) {
            Ok(Suspend::Yield(actual)) => {
                panic!("expected Return({expected:?}), got Yield({actual:?})")
            }
            Ok(Suspend::Return(actual)) => {
                assert_eq!(
                    actual, expected,
                    "expected Return({expected:?}), got Return({actual:?})"
                );
            }
            Err(err) => {
                panic!("expected Return({expected:?}), got Err({err:?})")
            }
        }
        self
    }

    /// Resumes the coroutine, asserts that it reports an error, and returns
    /// the error for further inspection.
    ///
    /// ```rust
    /// use threadcoro::CallerAssertions;
    /// use threadcoro::CoroError;
    /// use threadcoro::Coroutine;
    /// use threadcoro::Yielder;
    ///
    /// let co = Coroutine::new(|_: &Yielder<(), (), ()>, ()| {});
    /// co.assert_returns((), ());
    /// assert!(matches!(co.assert_fails(()), CoroError::EndOfCoro));
    /// ```
    fn assert_fails(&self, input: I) -> CoroError
    where
        Y: core::fmt::Debug,
        R: core::fmt::Debug,
    {
        match self.resume(input) {
            Ok(step) => panic!("expected Err(_), got Ok({step:?})"),
            Err(err) => err,
        }
    }

    /// Asserts that the coroutine is in the expected state.
    fn assert_status(&self, expected: Status) -> &Self {
        let actual = self.status();
        assert_eq!(
            actual, expected,
            "expected status {expected}, got status {actual}"
        );
        self
    }
}

/// Blanket implementation of [`CallerAssertions`] for all types implementing
/// [`Caller`].
impl<I, Y, R, T> CallerAssertions<I, Y, R> for T where T: Caller<I, Y, R> {}
