//! The in-process atomic container and its snapshot/commit contract.

use parking_lot::RwLock;

use crate::failure::Failure;
use crate::optics::Optic;

use super::bound::Bound;

/// The container's conflict policy: how many times a conditional write may
/// be retried after a detected concurrent modification.
///
/// The policy belongs to the container collaborator, not the optic core;
/// the default retries until the commit succeeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: Option<usize>,
}

impl RetryPolicy {
    /// Retry until the commit succeeds.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self { max_retries: None }
    }

    /// Give up with a [`Failure`] after `max_retries` failed commits.
    #[must_use]
    pub const fn bounded(max_retries: usize) -> Self {
        Self {
            max_retries: Some(max_retries),
        }
    }

    /// The retry budget, or `None` for unbounded.
    #[must_use]
    pub const fn max_retries(&self) -> Option<usize> {
        self.max_retries
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// The atomic primitive a bound accessor requires from a container: read
/// the current value with its version, and conditionally write a successor.
///
/// Implementations must be linearizable per container instance — no other
/// writer may observe or apply an interleaved write between a `snapshot`
/// and the `commit` that carries its version.
pub trait Container<S> {
    /// Reads the current version and value.
    fn snapshot(&self) -> (u64, S);

    /// Writes `value` if the container's version is still
    /// `expected_version`, returning whether the write was applied.
    fn commit(&self, expected_version: u64, value: S) -> bool;

    /// The conflict policy bound accessors retry under.
    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
    }
}

pub(crate) struct Versioned<S> {
    pub(crate) version: u64,
    pub(crate) value: S,
}

/// A mutable container holding one whole value, updated through a
/// compare-and-swap retry loop.
///
/// The cell is the only shared mutable resource in this crate: optics are
/// immutable and bound accessors own no state. Every update reads a
/// versioned snapshot, computes the successor outside the lock, and
/// commits only if no concurrent write intervened.
///
/// # Examples
///
/// ```rust
/// use focal::container::Cell;
/// use focal::optics::key;
/// use std::collections::HashMap;
///
/// let mut map = HashMap::new();
/// map.insert("rust".to_string(), 3);
///
/// let cell = Cell::new(map);
/// cell.bind(&key::<String, i32>("rust".to_string()))
///     .update(|stars| stars + 1)
///     .unwrap();
/// assert_eq!(cell.load()["rust"], 4);
/// ```
pub struct Cell<S> {
    slot: RwLock<Versioned<S>>,
    policy: RetryPolicy,
}

impl<S: Clone> Cell<S> {
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
    pub fn load(&self) -> S {
        self.slot.read().value.clone()
    }

    /// Unconditionally replaces the whole value.
    pub fn store(&self, value: S) {
        let mut slot = self.slot.write();
        slot.version += 1;
        slot.value = value;
    }

    /// Runs a whole-value transform as one all-or-nothing unit.
    ///
    /// The transform is applied to a snapshot and the result committed only
    /// if no concurrent write intervened; on conflict the transform re-runs
    /// against a fresh snapshot. This is the retry scope transactional
    /// optics compose onto. The transform must be pure — it may run more
    /// than once.
    ///
    /// # Errors
    ///
    /// Propagates the transform's [`Failure`] (leaving the value
    /// untouched), or reports retry exhaustion under a bounded policy.
    pub fn transaction<F>(&self, mut run: F) -> Result<(), Failure>
    where
        F: FnMut(&S) -> Result<S, Failure>,
    {
        let mut attempts = 0_usize;
        loop {
            let (version, current) = self.snapshot();
            let next = run(&current)?;
            if self.commit(version, next) {
                return Ok(());
            }
            attempts += 1;
            if self
                .policy
                .max_retries()
                .is_some_and(|limit| attempts > limit)
            {
                return Err(Failure::retry_exhausted(attempts));
            }
        }
    }
}

impl<S: Clone + 'static> Cell<S> {
    /// Binds an optic to this cell, producing a transient accessor.
    ///
    /// The accessor holds a reference to the cell plus a clone of the
    /// optic; create one per use-site.
    pub fn bind<A: 'static>(&self, optic: &Optic<S, A>) -> Bound<'_, Self, S, A> {
        super::bound::bind(self, optic)
    }
}

impl<S: Clone> Container<S> for Cell<S> {
    fn snapshot(&self) -> (u64, S) {
        let slot = self.slot.read();
        (slot.version, slot.value.clone())
    }

    fn commit(&self, expected_version: u64, value: S) -> bool {
        let mut slot = self.slot.write();
        if slot.version == expected_version {
            slot.version += 1;
            slot.value = value;
            true
        } else {
            false
        }
    }

    fn retry_policy(&self) -> RetryPolicy {
        self.policy
    }
}

impl<S: Clone + std::fmt::Debug> std::fmt::Debug for Cell<S> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slot = self.slot.read();
        formatter
            .debug_struct("Cell")
            .field("version", &slot.version)
            .field("value", &slot.value)
            .field("policy", &self.policy)
            .finish()
    }
}
