use core::iter::FusedIterator;

use crossbeam_channel::Receiver;
use crossbeam_channel::Sender;
use crossbeam_channel::bounded;
use tracing::debug;
use tracing::error;

use crate::builder::Builder;
use crate::coroutine::Coroutine;
use crate::error::CoroError;
use crate::error::Result;
use crate::suspend::Suspend;
use crate::yielder::Yielder;

type Step<Y, R> = Result<Suspend<Y, R>>;

/// An iterator over the values yielded by a coroutine body, see `iter()`.
///
/// The sequence is finite and can't be restarted. Once it ends, the body's
/// return value is available from `returned()`.
#[derive(Debug)]
pub struct Iter<Y, R> {
    rx: Receiver<Step<Y, R>>,
    returned: Option<R>,
    done: bool,
}

/// Runs `body` as a coroutine and iterates over the values it yields.
///
/// Compare to Lua's `coroutine.wrap()`. A separate thread resumes the
/// coroutine with `()` for as long as it keeps yielding and hands each value
/// to the iterator; the two block on each other, so the body never runs
/// ahead of the consumer.
///
/// ```rust
/// use threadcoro::{Yielder, iter};
///
/// let squares = iter(|y: &Yielder<(), u32, &str>, ()| {
///     for i in 1..=4 {
///         y.suspend(i * i);
///     }
///     "that's all"
/// })
/// .unwrap();
/// assert_eq!(squares.collect::<Vec<_>>(), [1, 4, 9, 16]);
/// ```
///
/// The iterator form trades cancellation and error reporting for
/// convenience:
///
///   * There is no `cancel()`. Dropping the iterator before the end tears the
///     body down the same way cancelling it would.
///   * A body that fails can't report the failure through `Option<Y>`, so
///     `next()` panics with the captured error. Use a `Coroutine` and a
///     `resume()` loop (or `Caller::for_each()`) when the body can fail.
///
/// Fails only if a thread can't be spawned.
pub fn iter<Y, R, F>(body: F) -> Result<Iter<Y, R>>
where
    Y: Send + 'static,
    R: Send + 'static,
    F: FnOnce(&Yielder<(), Y, R>, ()) -> R + Send + 'static,
{
    Builder::new().iter(body)
}

impl<Y, R> Iter<Y, R>
where
    Y: Send + 'static,
    R: Send + 'static,
{
    pub(crate) fn spawn(
        builder: &Builder,
        coroutine: Coroutine<(), Y, R>,
    ) -> Result<Self> {
        let (tx, rx) = bounded(0);
        builder
            .spawn(move || drain(coroutine, tx))
            .map_err(CoroError::spawn)?;
        Ok(Self {
            rx,
            returned: None,
            done: false,
        })
    }
}

impl<Y, R> Iter<Y, R> {
    /// The body's return value, once the sequence has ended normally.
    pub fn returned(&self) -> Option<&R> {
        self.returned.as_ref()
    }

    /// Takes the body's return value, once the sequence has ended normally.
    pub fn into_returned(self) -> Option<R> {
        self.returned
    }
}

impl<Y, R> Iterator for Iter<Y, R> {
    type Item = Y;

    fn next(&mut self) -> Option<Y> {
        if self.done {
            return None;
        }
        match self.rx.recv() {
            Ok(Ok(Suspend::Yield(y))) => Some(y),
            Ok(Ok(Suspend::Return(r))) => {
                self.done = true;
                self.returned = Some(r);
                None
            }
            Ok(Err(CoroError::EndOfCoro)) | Err(_) => {
                self.done = true;
                None
            }
            Ok(Err(err)) => {
                self.done = true;
                panic!("coroutine iterator body failed: {err}")
            }
        }
    }
}

impl<Y, R> FusedIterator for Iter<Y, R> {}

/// The resume loop behind `Iter`. Ends when the body stops yielding or when
/// the iterator is dropped; either way the coroutine is dropped with it.
fn drain<Y, R>(coroutine: Coroutine<(), Y, R>, tx: Sender<Step<Y, R>>)
where
    Y: Send + 'static,
    R: Send + 'static,
{
    loop {
        let step = coroutine.resume(());
        let last = !matches!(step, Ok(Suspend::Yield(_)));
        if let Err(err) = &step {
            if !err.is_end_of_coro() {
                error!(%err, "coroutine iterator body failed");
            }
        }
        if tx.send(step).is_err() {
            debug!("coroutine iterator dropped before the end");
            return;
        }
        if last {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_after_return() {
        let mut it = iter(|y: &Yielder<(), i32, i32>, ()| {
            y.suspend(1);
            2
        })
        .unwrap();
        assert_eq!(it.next(), Some(1));
        assert_eq!(it.returned(), None);
        assert_eq!(it.next(), None);
        assert_eq!(it.returned(), Some(&2));
        assert_eq!(it.next(), None);
        assert_eq!(it.into_returned(), Some(2));
    }

    #[test]
    fn empty_body() {
        let it = iter(|_: &Yielder<(), i32, ()>, ()| {}).unwrap();
        assert_eq!(it.count(), 0);
    }
}
