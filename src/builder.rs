use std::io;
use std::thread;
use std::thread::JoinHandle;

use crate::coroutine::Coroutine;
use crate::error::Result;
use crate::iter::Iter;
use crate::yielder::Yielder;

/// Settings for the thread a coroutine body runs on.
///
/// Mirrors `std::thread::Builder`. Nothing is spawned until the coroutine is
/// first resumed, so invalid settings surface from that `resume()` as
/// `CoroError::Spawn`.
///
/// ```rust
/// use threadcoro::{Builder, Return, Yield, Yielder};
///
/// let co = Builder::new()
///     .name("tokenizer")
///     .stack_size(256 * 1024)
///     .build(|y: &Yielder<(), Option<String>, ()>, ()| {
///         y.suspend(std::thread::current().name().map(str::to_owned));
///     });
/// assert_eq!(co.resume(()).unwrap(), Yield(Some("tokenizer".to_owned())));
/// assert_eq!(co.resume(()).unwrap(), Return(()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    name: Option<String>,
    stack_size: Option<usize>,
}

impl Builder {
    /// Default settings: an unnamed thread with the platform's default stack
    /// size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Names the body's thread, for panic messages and debuggers.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the stack size of the body's thread, in bytes.
    pub fn stack_size(mut self, size: usize) -> Self {
        self.stack_size = Some(size);
        self
    }

    /// Creates a suspended coroutine that will run `body` with these
    /// settings.
    pub fn build<I, Y, R, F>(self, body: F) -> Coroutine<I, Y, R>
    where
        I: Send + 'static,
        Y: Send + 'static,
        R: Send + 'static,
        F: FnOnce(&Yielder<I, Y, R>, I) -> R + Send + 'static,
    {
        Coroutine::from_parts(self, Box::new(body))
    }

    /// Creates an iterator over the values `body` yields, see `iter()`.
    ///
    /// The body runs with these settings; the thread draining it gets the
    /// same stack size and, if the body's thread is named, the same name with
    /// a `-iter` suffix.
    pub fn iter<Y, R, F>(self, body: F) -> Result<Iter<Y, R>>
    where
        Y: Send + 'static,
        R: Send + 'static,
        F: FnOnce(&Yielder<(), Y, R>, ()) -> R + Send + 'static,
    {
        let drain = Builder {
            name: self.name.as_ref().map(|name| format!("{name}-iter")),
            stack_size: self.stack_size,
        };
        Iter::spawn(&drain, self.build(body))
    }

    pub(crate) fn spawn<F>(&self, f: F) -> io::Result<JoinHandle<()>>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut builder = thread::Builder::new();
        if let Some(name) = &self.name {
            builder = builder.name(name.clone());
        }
        if let Some(size) = self.stack_size {
            builder = builder.stack_size(size);
        }
        builder.spawn(f)
    }
}
