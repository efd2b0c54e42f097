//! The asynchronous container and its bound accessor.

use tokio::sync::RwLock;

use crate::effect::AsyncEval;
use crate::failure::Failure;
use crate::optics::Optic;

use super::cell::{RetryPolicy, Versioned};

/// The asynchronous counterpart of [`Cell`](super::Cell): one whole value
/// behind a cooperative lock, updated through the same versioned
/// compare-and-swap discipline.
///
/// Reads and writes suspend instead of blocking; everything else matches
/// the synchronous contract, including the guarantee that a failed or
/// cancelled update leaves the value exactly as it was. Cancellation is
/// safe because the successor is computed outside the lock and the commit
/// itself is a single write-lock critical section — dropping an update
/// future before its commit writes nothing.
///
/// # Examples
///
/// ```rust
/// use focal::container::AsyncCell;
/// use focal::optics::key;
/// use std::collections::HashMap;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut map = HashMap::new();
/// map.insert("rust".to_string(), 3);
/// let cell = AsyncCell::new(map);
///
/// cell.bind(&key::<String, i32>("rust".to_string()))
///     .update(|stars| stars + 1)
///     .await
///     .unwrap();
/// assert_eq!(cell.load().await["rust"], 4);
/// # }
/// ```
pub struct AsyncCell<S> {
    slot: RwLock<Versioned<S>>,
    policy: RetryPolicy,
}

impl<S: Clone + Send + Sync + 'static> AsyncCell<S> {
    /// Creates a cell holding `value`, retrying conflicts without bound.
    pub fn new(value: S) -> Self {
        Self::with_policy(value, RetryPolicy::unbounded())
    }

    /// Creates a cell with an explicit conflict policy.
    pub fn with_policy(value: S, policy: RetryPolicy) -> Self {
        Self {
            slot: RwLock::new(Versioned { version: 0, value }),
            policy,
        }
    }

    /// Reads the current whole value.
    pub async fn load(&self) -> S {
        self.slot.read().await.value.clone()
    }

    /// Unconditionally replaces the whole value.
    pub async fn store(&self, value: S) {
        let mut slot = self.slot.write().await;
        slot.version += 1;
        slot.value = value;
    }

    /// Reads the current version and value.
    pub async fn snapshot(&self) -> (u64, S) {
        let slot = self.slot.read().await;
        (slot.version, slot.value.clone())
    }

    /// Writes `value` if the container's version is still
    /// `expected_version`, returning whether the write was applied.
    pub async fn commit(&self, expected_version: u64, value: S) -> bool {
        let mut slot = self.slot.write().await;
        if slot.version == expected_version {
            slot.version += 1;
            slot.value = value;
            true
        } else {
            false
        }
    }

    /// Binds an optic to this cell, producing a transient accessor.
    pub fn bind<A: 'static>(&self, optic: &Optic<S, A>) -> AsyncBound<'_, S, A> {
        AsyncBound {
            cell: self,
            optic: optic.clone(),
        }
    }
}

impl<S: Clone + Send + Sync + std::fmt::Debug> std::fmt::Debug for AsyncCell<S> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AsyncCell")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// A transient accessor over an [`AsyncCell`], mirroring
/// [`Bound`](super::Bound) with suspending operations.
///
/// Each update drives one logical get→transform→set unit to completion
/// before committing; there is no implicit parallelism across the
/// sequence.
pub struct AsyncBound<'a, S, A> {
    cell: &'a AsyncCell<S>,
    optic: Optic<S, A>,
}

impl<S, A> AsyncBound<'_, S, A>
where
    S: Clone + Send + Sync + 'static,
    A: 'static,
{
    /// Reads the cell's current value and extracts the focus.
    ///
    /// # Errors
    ///
    /// Returns the optic's [`Failure`] when the focus is absent.
    pub async fn get(&self) -> Result<A, Failure> {
        let (_, current) = self.cell.snapshot().await;
        self.optic.get(&current)
    }

    /// Atomically replaces the focus.
    ///
    /// # Errors
    ///
    /// Returns the optic's [`Failure`], or retry exhaustion under a
    /// bounded policy; either way the cell is unchanged.
    pub async fn set(&self, value: A) -> Result<(), Failure>
    where
        A: Clone,
    {
        self.update_with(move |_| Ok(value.clone())).await
    }

    /// Atomically transforms the focus.
    ///
    /// # Errors
    ///
    /// Returns the optic's [`Failure`], or retry exhaustion under a
    /// bounded policy; either way the cell is unchanged.
    pub async fn update<F>(&self, mut transform: F) -> Result<(), Failure>
    where
        F: FnMut(A) -> A,
    {
        self.update_with(move |focus| Ok(transform(focus))).await
    }

    /// Atomically transforms the focus with a transform that may fail.
    ///
    /// # Errors
    ///
    /// Propagates the transform's [`Failure`] unchanged, in addition to
    /// the failure modes of [`AsyncBound::update`].
    pub async fn update_with<F>(&self, mut transform: F) -> Result<(), Failure>
    where
        F: FnMut(A) -> Result<A, Failure>,
    {
        let mut attempts = 0_usize;
        loop {
            let (version, current) = self.cell.snapshot().await;
            let focus = self.optic.get(&current)?;
            let next_focus = transform(focus)?;
            let next = self.optic.set(next_focus, &current)?;
            if self.cell.commit(version, next).await {
                return Ok(());
            }
            attempts += 1;
            if self
                .cell
                .policy
                .max_retries()
                .is_some_and(|limit| attempts > limit)
            {
                return Err(Failure::retry_exhausted(attempts));
            }
        }
    }

    /// Atomically transforms the focus through a deferred [`AsyncEval`].
    ///
    /// A fresh evaluation is built and driven to completion on every retry
    /// attempt, before the conditional commit.
    ///
    /// # Errors
    ///
    /// A failed evaluation surfaces with its failure attached as cause;
    /// otherwise as [`AsyncBound::update`].
    pub async fn update_async<F>(&self, mut transform: F) -> Result<(), Failure>
    where
        F: FnMut(A) -> AsyncEval<A>,
        A: Send,
    {
        let mut attempts = 0_usize;
        loop {
            let (version, current) = self.cell.snapshot().await;
            let focus = self.optic.get(&current)?;
            let next_focus = transform(focus)
                .run_async()
                .await
                .map_err(|failure| Failure::new("effectful update failed").caused_by(failure))?;
            let next = self.optic.set(next_focus, &current)?;
            if self.cell.commit(version, next).await {
                return Ok(());
            }
            attempts += 1;
            if self
                .cell
                .policy
                .max_retries()
                .is_some_and(|limit| attempts > limit)
            {
                return Err(Failure::retry_exhausted(attempts));
            }
        }
    }
}

impl<S, A> Clone for AsyncBound<'_, S, A> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell,
            optic: self.optic.clone(),
        }
    }
}

impl<S, A> std::fmt::Debug for AsyncBound<'_, S, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AsyncBound")
            .field("optic", &self.optic)
            .finish_non_exhaustive()
    }
}
