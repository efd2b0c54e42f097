//! Transient accessors produced by binding an optic to a container.

use crate::effect::Eval;
use crate::failure::Failure;
use crate::optics::Optic;

use super::cell::Container;

/// Binds an optic to a container, producing a transient accessor.
///
/// The accessor owns no state: it holds the container reference and a
/// clone of the (cheaply cloneable) optic. It is meant to be recreated at
/// each use-site rather than stored.
pub fn bind<'a, C, S, A>(container: &'a C, optic: &Optic<S, A>) -> Bound<'a, C, S, A>
where
    C: Container<S>,
    S: 'static,
    A: 'static,
{
    Bound {
        container,
        optic: optic.clone(),
    }
}

/// A view of one focus inside a container's whole value, with atomic
/// read-transform-write updates.
///
/// Every update is one logical get→transform→set unit: the accessor reads
/// a versioned snapshot, applies the optic and transform to it, and
/// commits the reconstructed whole only if no concurrent write intervened.
/// On conflict the whole unit re-runs from a fresh snapshot, up to the
/// container's [`RetryPolicy`](super::RetryPolicy). If the optic or the
/// transform fails at any stage, nothing is committed and the container is
/// left exactly as it was.
///
/// Retrying from scratch is safe only because optic getters/setters and
/// transforms are required to be pure functions of their inputs; see
/// [`Optic`].
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
/// let cell = Cell::new(map);
///
/// let accessor = cell.bind(&key::<String, i32>("rust".to_string()));
/// assert_eq!(accessor.get(), Ok(3));
/// accessor.update(|stars| stars + 1).unwrap();
/// assert_eq!(accessor.get(), Ok(4));
/// ```
pub struct Bound<'a, C, S, A> {
    container: &'a C,
    optic: Optic<S, A>,
}

impl<C, S, A> Bound<'_, C, S, A>
where
    C: Container<S>,
    S: 'static,
    A: 'static,
{
    /// Reads the container's current value and extracts the focus.
    ///
    /// # Errors
    ///
    /// Returns the optic's [`Failure`] when the focus is absent.
    pub fn get(&self) -> Result<A, Failure> {
        let (_, current) = self.container.snapshot();
        self.optic.get(&current)
    }

    /// Atomically replaces the focus.
    ///
    /// # Errors
    ///
    /// Returns the optic's [`Failure`], or retry exhaustion under a
    /// bounded policy; either way the container is unchanged.
    pub fn set(&self, value: A) -> Result<(), Failure>
    where
        A: Clone,
    {
        self.update_with(move |_| Ok(value.clone()))
    }

    /// Atomically transforms the focus.
    ///
    /// The transform may run more than once under conflict retry and must
    /// be pure.
    ///
    /// # Errors
    ///
    /// Returns the optic's [`Failure`], or retry exhaustion under a
    /// bounded policy; either way the container is unchanged.
    pub fn update<F>(&self, mut transform: F) -> Result<(), Failure>
    where
        F: FnMut(A) -> A,
    {
        self.update_with(move |focus| Ok(transform(focus)))
    }

    /// Atomically transforms the focus with a transform that may fail.
    ///
    /// # Errors
    ///
    /// Propagates the transform's [`Failure`] unchanged, in addition to
    /// the failure modes of [`Bound::update`].
    pub fn update_with<F>(&self, mut transform: F) -> Result<(), Failure>
    where
        F: FnMut(A) -> Result<A, Failure>,
    {
        let policy = self.container.retry_policy();
        let mut attempts = 0_usize;
        loop {
            let (version, current) = self.container.snapshot();
            let focus = self.optic.get(&current)?;
            let next_focus = transform(focus)?;
            let next = self.optic.set(next_focus, &current)?;
            if self.container.commit(version, next) {
                return Ok(());
            }
            attempts += 1;
            if policy.max_retries().is_some_and(|limit| attempts > limit) {
                return Err(Failure::retry_exhausted(attempts));
            }
        }
    }

    /// Atomically transforms the focus through a deferred [`Eval`].
    ///
    /// A fresh evaluation is built and run on every retry attempt.
    ///
    /// # Errors
    ///
    /// A failed evaluation surfaces with its failure attached as cause;
    /// otherwise as [`Bound::update`].
    pub fn update_eval<F>(&self, mut transform: F) -> Result<(), Failure>
    where
        F: FnMut(A) -> Eval<A>,
    {
        self.update_with(move |focus| {
            transform(focus)
                .run()
                .map_err(|failure| Failure::new("effectful update failed").caused_by(failure))
        })
    }
}

impl<C, S, A> Clone for Bound<'_, C, S, A> {
    fn clone(&self) -> Self {
        Self {
            container: self.container,
            optic: self.optic.clone(),
        }
    }
}

impl<C, S, A> std::fmt::Debug for Bound<'_, C, S, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Bound")
            .field("optic", &self.optic)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::super::cell::{Cell, RetryPolicy};
    use super::*;
    use crate::optics::key;
    use std::collections::HashMap;

    fn sample_cell() -> Cell<HashMap<String, i32>> {
        let mut map = HashMap::new();
        map.insert("rust".to_string(), 3);
        Cell::new(map)
    }

    #[test]
    fn test_get_through_optic() {
        let cell = sample_cell();
        let accessor = cell.bind(&key::<String, i32>("rust".to_string()));
        assert_eq!(accessor.get(), Ok(3));
    }

    #[test]
    fn test_set_commits_atomically() {
        let cell = sample_cell();
        cell.bind(&key::<String, i32>("rust".to_string()))
            .set(10)
            .unwrap();
        assert_eq!(cell.load()["rust"], 10);
    }

    #[test]
    fn test_absent_focus_leaves_container_unchanged() {
        let cell = sample_cell();
        let before = cell.load();
        let result = cell
            .bind(&key::<String, i32>("python".to_string()))
            .update(|stars| stars + 1);
        assert!(result.is_err());
        assert_eq!(cell.load(), before);
    }

    #[test]
    fn test_failed_transform_leaves_container_unchanged() {
        let cell = sample_cell();
        let before = cell.load();
        let result = cell
            .bind(&key::<String, i32>("rust".to_string()))
            .update_with(|_| Err(Failure::new("rejected")));
        assert_eq!(result, Err(Failure::new("rejected")));
        assert_eq!(cell.load(), before);
    }

    #[test]
    fn test_update_eval() {
        let cell = sample_cell();
        cell.bind(&key::<String, i32>("rust".to_string()))
            .update_eval(|stars| Eval::pure(stars + 1))
            .unwrap();
        assert_eq!(cell.load()["rust"], 4);
    }

    #[test]
    fn test_retry_reapplies_from_fresh_snapshot() {
        // Sabotage the first attempt by storing a new whole between the
        // accessor's snapshot and commit.
        let cell = Cell::new(0);
        let identity = crate::optics::Optic::<i32, i32>::identity();
        let accessor = cell.bind(&identity);
        let mut first_attempt = true;
        accessor
            .update(|value| {
                if first_attempt {
                    first_attempt = false;
                    cell.store(10);
                }
                value + 1
            })
            .unwrap();
        // The retried attempt saw the stored 10, not the original 0.
        assert_eq!(cell.load(), 11);
    }

    #[test]
    fn test_bounded_retry_exhaustion() {
        let cell = Cell::with_policy(0, RetryPolicy::bounded(1));
        let identity = crate::optics::Optic::<i32, i32>::identity();
        let accessor = cell.bind(&identity);
        let result = accessor.update(|value| {
            cell.store(value + 100);
            value + 1
        });
        let failure = result.unwrap_err();
        assert!(failure.message().starts_with("update conflict"));
    }
}
