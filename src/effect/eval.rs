//! Deferred fallible-synchronous computations.
//!
//! `Eval` describes a computation without performing it. The computation
//! runs only when [`Eval::run`] is called, and it is consumed exactly once.
//!
//! # Examples
//!
//! ```rust
//! use focal::effect::Eval;
//! use focal::failure::Failure;
//!
//! let eval = Eval::pure(2).fmap(|value| value * 21);
//! assert_eq!(eval.run(), Ok(42));
//!
//! let failing: Eval<i32> = Eval::raise(Failure::new("focus absent"));
//! assert!(failing.run().is_err());
//! ```

use crate::failure::Failure;

/// A deferred computation that produces `A` or short-circuits with a
/// [`Failure`].
///
/// # Monad Laws
///
/// 1. **Left Identity**: `Eval::pure(a).flat_map(f) == f(a)`
/// 2. **Right Identity**: `m.flat_map(Eval::pure) == m`
/// 3. **Associativity**: `m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))`
pub struct Eval<A> {
    thunk: Box<dyn FnOnce() -> Result<A, Failure>>,
}

impl<A: 'static> Eval<A> {
    /// Creates an evaluation from a closure.
    ///
    /// The closure runs only when [`Eval::run`] is called.
    pub fn new<F>(action: F) -> Self
    where
        F: FnOnce() -> Result<A, Failure> + 'static,
    {
        Self {
            thunk: Box::new(action),
        }
    }

    /// Wraps a value in an evaluation that always succeeds.
    pub fn pure(value: A) -> Self {
        Self::new(move || Ok(value))
    }

    /// An evaluation that short-circuits with the given failure.
    pub fn raise(failure: Failure) -> Self {
        Self::new(move || Err(failure))
    }

    /// Transforms the produced value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use focal::effect::Eval;
    ///
    /// assert_eq!(Eval::pure(10).fmap(|value| value + 1).run(), Ok(11));
    /// ```
    pub fn fmap<B, F>(self, function: F) -> Eval<B>
    where
        B: 'static,
        F: FnOnce(A) -> B + 'static,
    {
        Eval::new(move || (self.thunk)().map(function))
    }

    /// Chains another evaluation onto the result of this one.
    ///
    /// Failure of either evaluation short-circuits the chain.
    pub fn flat_map<B, F>(self, function: F) -> Eval<B>
    where
        B: 'static,
        F: FnOnce(A) -> Eval<B> + 'static,
    {
        Eval::new(move || (self.thunk)().and_then(|value| (function(value).thunk)()))
    }

    /// Runs the deferred computation, consuming the evaluation.
    ///
    /// # Errors
    ///
    /// Returns the [`Failure`] the computation short-circuited with.
    pub fn run(self) -> Result<A, Failure> {
        (self.thunk)()
    }
}

impl<A> std::fmt::Debug for Eval<A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("Eval").finish_non_exhaustive()
    }
}
