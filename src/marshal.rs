//! Variable-arity payloads, for coroutines that pass several values at once
//! the way Lua's `coroutine.resume(co, a, b)` and `coroutine.yield(x, y)` do.
//!
//! A list of values travels as a single `Values`:
//!
//!   * exactly one value travels unwrapped, as `Left(value)`, so the
//!     receiver can use it directly;
//!   * zero values, or two or more, travel as the whole list, `Right(vec)`.
//!
//! The receiving side has to branch on the variant (or call `unpack()`)
//! rather than assume a fixed shape. A single value that happens to be a
//! list itself is still `Left`, so `Left(vec![..])` and `Right(vec![..])`
//! mean different things.
//!
//! ```rust
//! use either::Either::{Left, Right};
//! use threadcoro::{Values, Variadic, Yield, Yielder, pack, unpack, values};
//!
//! // Receives a string and a count, yields the string and its length.
//! let co: Variadic = Variadic::new(|y: &Yielder<Values, Values, Values>, args: Values| {
//!     let mut args = unpack(args);
//!     while let [s, n] = &args[..] {
//!         let s = s.downcast_ref::<&str>().unwrap().repeat(*n.downcast_ref::<usize>().unwrap());
//!         let len = s.len();
//!         args = unpack(y.suspend_values(values![s, len]));
//!     }
//!     pack(values!["done"])
//! });
//!
//! let Yield(Right(out)) = co.resume_values(values!["ab", 2_usize]).unwrap() else {
//!     panic!("expected two values");
//! };
//! assert_eq!(out[0].downcast_ref::<String>().unwrap(), "abab");
//! assert_eq!(out[1].downcast_ref::<usize>(), Some(&4));
//!
//! let Ok(threadcoro::Return(Left(done))) = co.resume_values(values![]) else {
//!     panic!("expected one value");
//! };
//! assert_eq!(done.downcast_ref::<&str>(), Some(&"done"));
//! ```

use std::any::Any;

use either::Either;
use either::Either::Left;
use either::Either::Right;

use crate::coroutine::Coroutine;
use crate::error::Result;
use crate::suspend::Suspend;
use crate::yielder::Yielder;

/// A dynamically typed value.
pub type Value = Box<dyn Any + Send>;

/// A packed list of values: `Left` for exactly one, `Right` otherwise.
pub type Values<T = Value> = Either<T, Vec<T>>;

/// A coroutine whose inputs, yields and return value are all `Values`.
pub type Variadic<T = Value> = Coroutine<Values<T>, Values<T>, Values<T>>;

/// Packs a list of values, unwrapping it if it holds exactly one.
pub fn pack<T>(mut values: Vec<T>) -> Values<T> {
    if values.len() == 1 {
        if let Some(value) = values.pop() {
            return Left(value);
        }
    }
    Right(values)
}

/// Turns packed values back into a list.
pub fn unpack<T>(values: Values<T>) -> Vec<T> {
    values.either(|value| vec![value], |values| values)
}

/// How many values are packed.
pub fn arity<T>(values: &Values<T>) -> usize {
    values.as_ref().either(|_| 1, Vec::len)
}

/// Takes the concrete value out of a `Value`, if it has type `T`.
pub fn downcast<T: 'static>(value: Value) -> Option<T> {
    value.downcast().ok().map(|value| *value)
}

/// Boxes each argument into a `Value` and collects them into a `Vec`.
///
/// ```rust
/// use threadcoro::{arity, pack, values};
///
/// assert_eq!(arity(&pack(values![])), 0);
/// assert_eq!(arity(&pack(values!["one"])), 1);
/// assert_eq!(arity(&pack(values!["one", 2, 3.0])), 3);
/// ```
#[macro_export]
macro_rules! values {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$(::std::boxed::Box::new($value) as $crate::Value),+]
    };
}

impl<T> Coroutine<Values<T>, Values<T>, Values<T>>
where
    T: Send + 'static,
{
    /// Resumes with a list of values, packed with `pack()`.
    pub fn resume_values(
        &self,
        values: Vec<T>,
    ) -> Result<Suspend<Values<T>, Values<T>>> {
        self.resume(pack(values))
    }
}

impl<T, R> Yielder<Values<T>, Values<T>, R> {
    /// Suspends with a list of values, packed with `pack()`, and returns the
    /// packed values of the next resume.
    pub fn suspend_values(&self, values: Vec<T>) -> Values<T> {
        self.suspend(pack(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_value_is_unwrapped() {
        assert_eq!(pack(vec![7]), Left(7));
        assert_eq!(unpack(Left(7)), vec![7]);
    }

    #[test]
    fn other_arities_are_wrapped() {
        assert_eq!(pack(Vec::<i32>::new()), Right(vec![]));
        assert_eq!(pack(vec![1, 2]), Right(vec![1, 2]));
        assert_eq!(arity(&pack(vec![1, 2, 3])), 3);
        assert_eq!(arity(&pack(Vec::<i32>::new())), 0);
    }

    #[test]
    fn single_list_stays_a_single_value() {
        let packed = pack(vec![vec![1, 2]]);
        assert_eq!(arity(&packed), 1);
        assert_eq!(packed, Left(vec![1, 2]));
    }

    #[test]
    fn downcast_checks_type() {
        assert_eq!(downcast::<i32>(Box::new(5_i32)), Some(5));
        assert_eq!(downcast::<u8>(Box::new(5_i32)), None);
    }
}
