//! The `threadcoro` crate provides Lua-style coroutines (`coroutine.create`,
//! `resume`, `yield`, `status`, `wrap`) on top of ordinary threads.
//!
//! A *coroutine* here is a function body that can suspend itself in the
//! middle of its execution, hand a value back to whoever resumed it, and
//! later continue exactly where it left off, receiving a new value. Unlike
//! the stackless coroutines of `std::ops::Coroutine`, the body is
//! ordinary straight-line code: it suspends by calling a method, from as deep
//! inside its own call stack as it likes.
//!
//! The body runs on a thread of its own. Control is handed back and forth
//! between the caller and the body over a pair of zero-capacity channels, so
//! exactly one of the two is running at any time and no value is ever lost
//! or reordered.
//!
//! In this crate, the core types look like:
//!
//! ```rust,ignore
//! pub enum Status { Suspended, Running, Dead }
//!
//! pub enum Suspend<Y, R> { Yield(Y), Return(R) }
//!
//! impl<I, Y, R> Coroutine<I, Y, R> {
//!     pub fn new(body: impl FnOnce(&Yielder<I, Y, R>, I) -> R) -> Self;
//!     pub fn resume(&self, input: I) -> Result<Suspend<Y, R>, CoroError>;
//!     pub fn status(&self) -> Status;
//!     pub fn cancel(&self) -> Result<(), CoroError>;
//! }
//!
//! impl<I, Y, R> Yielder<I, Y, R> {
//!     pub fn suspend(&self, value: Y) -> I;
//! }
//! ```
//!
//! The body is given a `Yielder`, and only the body ever sees it. Everybody
//! else drives the coroutine through the `Coroutine` handle, which implements
//! the `Caller` capability.
//!
//! The `Yield` and `Return` variants are imported into the crate's root
//! namespace, so they can be used without the `Suspend::` prefix.
//!
//! # Examples
//!
//! ## A basic counter
//!
//! Here's a coroutine that yields successive integers and then returns:
//!
//! ```rust
//! use threadcoro::{Coroutine, CoroError, Return, Status, Yield, Yielder};
//!
//! let counter = Coroutine::new(|y: &Yielder<(), i32, i32>, ()| {
//!     for i in 1..=10 {
//!         y.suspend(i);
//!     }
//!     1000
//! });
//! for i in 1..=10 {
//!     assert_eq!(counter.resume(()).unwrap(), Yield(i));
//!     assert_eq!(counter.status(), Status::Suspended);
//! }
//! assert_eq!(counter.resume(()).unwrap(), Return(1000));
//! assert_eq!(counter.status(), Status::Dead);
//! assert!(matches!(counter.resume(()), Err(CoroError::EndOfCoro)));
//! ```
//!
//! The resume that observes the body returning gets the return value; every
//! resume after that reports `CoroError::EndOfCoro` without running anything.
//!
//! ## Passing values both ways
//!
//! The input of the first `resume()` becomes the body's second argument. The
//! input of every later `resume()` is what `suspend()` returns inside the
//! body:
//!
//! ```rust
//! use threadcoro::{Coroutine, Return, Yield, Yielder};
//!
//! let averager = Coroutine::new(|y: &Yielder<Option<f64>, f64, usize>, first| {
//!     let (mut sum, mut count) = (0.0, 0);
//!     let mut next = first;
//!     while let Some(x) = next {
//!         sum += x;
//!         count += 1;
//!         next = y.suspend(sum / count as f64);
//!     }
//!     count
//! });
//! assert_eq!(averager.resume(Some(1.0)).unwrap(), Yield(1.0));
//! assert_eq!(averager.resume(Some(3.0)).unwrap(), Yield(2.0));
//! assert_eq!(averager.resume(Some(8.0)).unwrap(), Yield(4.0));
//! assert_eq!(averager.resume(None).unwrap(), Return(3));
//! ```
//!
//! ## Failures
//!
//! A panic inside the body never reaches the caller. The fault boundary
//! around the body catches it, the coroutine becomes `Dead`, and the resume
//! that was waiting gets the fault as a `CoroError`, as does every resume
//! after it:
//!
//! ```rust
//! use threadcoro::{Coroutine, CoroError, Status, Yield, Yielder};
//!
//! let co = Coroutine::new(|y: &Yielder<(), i32, ()>, ()| {
//!     y.suspend(1);
//!     y.suspend(2);
//!     panic!("gulp");
//! });
//! assert_eq!(co.resume(()).unwrap(), Yield(1));
//! assert_eq!(co.resume(()).unwrap(), Yield(2));
//! let err = co.resume(()).unwrap_err();
//! assert!(matches!(&err, CoroError::Panicked { message } if message == "gulp"));
//! assert_eq!(co.status(), Status::Dead);
//! assert_eq!(co.resume(()).unwrap_err().to_string(), "gulp");
//! ```
//!
//! Use `raise()` to fail a body with an error value instead of a message.
//!
//! ## Cancellation
//!
//! A suspended coroutine can be cancelled. If it was never started, its body
//! never runs. If it is parked at a yield point, the body is unwound from
//! there, running the destructors of everything it owns:
//!
//! ```rust
//! use threadcoro::{Coroutine, CoroError, Status, Yield, Yielder};
//!
//! let co = Coroutine::new(|y: &Yielder<(), i32, ()>, ()| {
//!     let mut i = 0;
//!     loop {
//!         i += 1;
//!         y.suspend(i);
//!     }
//! });
//! assert_eq!(co.resume(()).unwrap(), Yield(1));
//! assert_eq!(co.resume(()).unwrap(), Yield(2));
//! co.cancel().unwrap();
//! assert_eq!(co.status(), Status::Dead);
//! assert!(matches!(co.cancel(), Err(CoroError::InvalidState)));
//! assert!(matches!(co.resume(()), Err(CoroError::Cancelled)));
//! ```
//!
//! Dropping the last handle to a suspended coroutine tears it down the same
//! way, so a coroutine that is abandoned halfway doesn't leak its thread.
//!
//! ## Iterators
//!
//! `iter()` is the equivalent of Lua's `coroutine.wrap()` for bodies that
//! only produce values:
//!
//! ```rust
//! use threadcoro::{Yielder, iter};
//!
//! let evens = iter(|y: &Yielder<(), u32, ()>, ()| {
//!     for i in 0..5 {
//!         y.suspend(i * 2);
//!     }
//! })
//! .unwrap();
//! assert_eq!(evens.sum::<u32>(), 20);
//! ```
//!
//! ## Several values at once
//!
//! Lua passes any number of values through `resume` and `yield`. The
//! `Variadic` coroutine and the `Values` type spell that out; see `pack()`
//! for the packing convention.
//!
//! # FAQ
//!
//! ## Why threads?
//!
//! Suspending a body with an ordinary call stack requires either stack
//! switching, which needs per-architecture assembly, or a second stack that
//! the runtime already knows how to schedule: a thread. This crate takes the
//! second route and pays for it with a context switch per handoff. The
//! upside is that it is written entirely in safe Rust and runs anywhere
//! `std::thread` does.
//!
//! ## Can the body be interrupted between yields?
//!
//! No. Suspension only ever happens inside `Yielder::suspend()`. A body that
//! loops forever without suspending can't be cancelled, and `cancel()` on
//! it would never be reached anyway, since the coroutine stays `Running`.
//!
//! ## What about several callers?
//!
//! A coroutine has exactly one outstanding handshake at a time. Handles can
//! be cloned and sent to other threads, but a `resume()` that overlaps with
//! another one is rejected with `CoroError::InvalidState`, as is a body
//! trying to resume its own coroutine.

mod boundary;
mod builder;
mod caller;
mod caller_assertions;
mod coroutine;
mod error;
mod handoff;
mod iter;
mod marshal;
mod status;
mod suspend;
mod yielder;

pub use boundary::raise;
pub use builder::Builder;
pub use caller::Caller;
pub use caller_assertions::CallerAssertions;
pub use coroutine::Coroutine;
pub use error::CoroError;
pub use error::Result;
pub use iter::Iter;
pub use iter::iter;
pub use marshal::Value;
pub use marshal::Values;
pub use marshal::Variadic;
pub use marshal::arity;
pub use marshal::downcast;
pub use marshal::pack;
pub use marshal::unpack;
pub use status::Status;
pub use suspend::Suspend;
pub use yielder::Yielder;

/// `Yield` and `Return` are imported into the crate root namespace because
/// they are used so often.
pub use Suspend::{Return, Yield};

#[cfg(test)]
mod test;
