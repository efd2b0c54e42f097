//! Deferred fallible-asynchronous computations.
//!
//! `AsyncEval` is the asynchronous counterpart of
//! [`Eval`](crate::effect::Eval): it describes an async computation without
//! executing it, and runs only when [`AsyncEval::run_async`] is awaited.
//! Suspension is cooperative; a chained `AsyncEval` drives one step at a
//! time and never introduces parallelism of its own.
//!
//! # Examples
//!
//! ```rust
//! use focal::effect::AsyncEval;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let eval = AsyncEval::pure(10)
//!     .fmap(|value| value * 2)
//!     .flat_map(|value| AsyncEval::pure(value + 1));
//! assert_eq!(eval.run_async().await, Ok(21));
//! # }
//! ```

use futures::future::BoxFuture;

use crate::failure::Failure;

/// A deferred asynchronous computation that produces `A` or short-circuits
/// with a [`Failure`].
///
/// Consumed exactly once by [`AsyncEval::run_async`]. Dropping an
/// `AsyncEval` (or the future returned by `run_async`) before completion
/// abandons the computation without observable partial effects, provided
/// the wrapped work itself upholds that contract.
pub struct AsyncEval<A> {
    thunk: Box<dyn FnOnce() -> BoxFuture<'static, Result<A, Failure>> + Send>,
}

impl<A: Send + 'static> AsyncEval<A> {
    /// Creates an asynchronous evaluation from a closure returning a future.
    ///
    /// Neither the closure nor the future runs until
    /// [`AsyncEval::run_async`] is awaited.
    pub fn new<F, Fut>(action: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<A, Failure>> + Send + 'static,
    {
        Self {
            thunk: Box::new(move || Box::pin(action())),
        }
    }

    /// Wraps a value in an evaluation that always succeeds.
    pub fn pure(value: A) -> Self {
        Self::new(move || async move { Ok(value) })
    }

    /// An evaluation that short-circuits with the given failure.
    pub fn raise(failure: Failure) -> Self {
        Self::new(move || async move { Err(failure) })
    }

    /// Transforms the produced value.
    pub fn fmap<B, F>(self, function: F) -> AsyncEval<B>
    where
        B: Send + 'static,
        F: FnOnce(A) -> B + Send + 'static,
    {
        AsyncEval {
            thunk: Box::new(move || {
                let future = (self.thunk)();
                Box::pin(async move { future.await.map(function) })
            }),
        }
    }

    /// Chains another asynchronous evaluation onto the result of this one.
    ///
    /// The second evaluation starts only after the first completes;
    /// failure of either short-circuits the chain.
    pub fn flat_map<B, F>(self, function: F) -> AsyncEval<B>
    where
        B: Send + 'static,
        F: FnOnce(A) -> AsyncEval<B> + Send + 'static,
    {
        AsyncEval {
            thunk: Box::new(move || {
                let future = (self.thunk)();
                Box::pin(async move {
                    match future.await {
                        Ok(value) => (function(value).thunk)().await,
                        Err(failure) => Err(failure),
                    }
                })
            }),
        }
    }

    /// Runs the deferred computation, consuming the evaluation.
    ///
    /// # Errors
    ///
    /// Returns the [`Failure`] the computation short-circuited with.
    pub async fn run_async(self) -> Result<A, Failure> {
        (self.thunk)().await
    }
}

impl<A> std::fmt::Debug for AsyncEval<A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("AsyncEval").finish_non_exhaustive()
    }
}
