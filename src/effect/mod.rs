//! Effect flavors and the computation contexts optic updates run in.
//!
//! Every optic carries a [`Flavor`] describing the computation context its
//! operations participate in:
//!
//! - [`Flavor::Pure`]: synchronous, never fails (lenses).
//! - [`Flavor::Fallible`]: synchronous, may short-circuit with a
//!   [`Failure`](crate::failure::Failure) (prisms, optionals, traversals).
//! - [`Flavor::Async`]: the update transform may suspend; composing an
//!   asynchronous optic with any synchronous one yields an asynchronous
//!   optic.
//! - [`Flavor::Transactional`]: the update participates in an
//!   all-or-nothing retry scope; mixing a transactional optic with a
//!   non-transactional one is a configuration error reported at
//!   composition time, not at run time.
//!
//! The contexts themselves are deferred computations that describe work
//! without performing it:
//!
//! - [`Eval`]: a fallible synchronous thunk, consumed exactly once.
//! - [`AsyncEval`] (feature `async`): a fallible asynchronous computation;
//!   cooperative suspension, one logical operation in flight per accessor
//!   invocation, no implicit parallelism.
//!
//! # Examples
//!
//! ```rust
//! use focal::effect::Eval;
//!
//! let eval = Eval::pure(10)
//!     .fmap(|value| value * 2)
//!     .flat_map(|value| Eval::pure(value + 1));
//! assert_eq!(eval.run(), Ok(21));
//! ```

mod eval;
mod flavor;

#[cfg(feature = "async")]
mod async_eval;

pub use eval::Eval;
pub use flavor::Flavor;

#[cfg(feature = "async")]
pub use async_eval::AsyncEval;
