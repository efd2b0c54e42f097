//! Indexing combinators over keyed mappings and ordered sequences.
//!
//! - [`key`]: Optional into a map entry; absence fails with a message
//!   naming the key, set inserts or overwrites.
//! - [`at`]: Optional into a sequence position; both directions fail
//!   outside `[0, len)`.
//! - [`elements`]: Traversal over every entry of a sequence.
//! - [`filter_by`]: Traversal over the entries satisfying a predicate, in
//!   original order; set replaces matches positionally and leaves the rest
//!   untouched.
//!
//! # Examples
//!
//! ```rust
//! use focal::optics::{at, key};
//! use std::collections::HashMap;
//!
//! let mut map = HashMap::new();
//! map.insert("rust".to_string(), 3);
//!
//! let rust = key::<String, i32>("rust".to_string());
//! assert_eq!(rust.get(&map), Ok(3));
//! assert_eq!(rust.update(&map, |stars| stars + 1).unwrap()["rust"], 4);
//!
//! let second = at::<i32>(1);
//! assert_eq!(second.get(&vec![10, 20, 30]), Ok(20));
//! ```

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use crate::failure::Failure;

use super::optic::Optic;

/// An optional focusing the value stored under `key` in a `HashMap`.
///
/// `get` fails with `key not found: <key>` when the key is absent. `set`
/// never fails: it inserts a missing key and overwrites a present one.
///
/// # Examples
///
/// ```rust
/// use focal::optics::key;
/// use std::collections::HashMap;
///
/// let empty: HashMap<String, i32> = HashMap::new();
/// let optic = key::<String, i32>("x".to_string());
///
/// let failure = optic.get(&empty).unwrap_err();
/// assert_eq!(failure.message(), "key not found: x");
///
/// let inserted = optic.set(1, &empty).unwrap();
/// assert_eq!(inserted.get("x"), Some(&1));
/// ```
pub fn key<K, V>(key: K) -> Optic<HashMap<K, V>, V>
where
    K: Eq + Hash + Clone + std::fmt::Display + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    let lookup = key.clone();
    Optic::optional(
        move |map: &HashMap<K, V>| {
            map.get(&lookup)
                .cloned()
                .ok_or_else(|| Failure::key_not_found(&lookup))
        },
        move |value, map: &HashMap<K, V>| {
            let mut next = map.clone();
            next.insert(key.clone(), value);
            Ok(next)
        },
    )
}

/// An optional focusing the element at `index` in a `Vec`.
///
/// Both `get` and `set` fail with an index-out-of-bounds [`Failure`] when
/// `index` is outside `[0, len)`; `set` never extends the sequence.
pub fn at<T>(index: usize) -> Optic<Vec<T>, T>
where
    T: Clone + Send + Sync + 'static,
{
    Optic::optional(
        move |items: &Vec<T>| {
            items
                .get(index)
                .cloned()
                .ok_or_else(|| Failure::index_out_of_bounds(index, items.len()))
        },
        move |value, items: &Vec<T>| {
            if index < items.len() {
                let mut next = items.clone();
                next[index] = value;
                Ok(next)
            } else {
                Err(Failure::index_out_of_bounds(index, items.len()))
            }
        },
    )
}

/// A traversal over every element of a `Vec`, in order.
///
/// An empty sequence is a valid zero-focus result; setting it back is a
/// no-op. Replacing with a sequence of a different length fails with the
/// size-mismatch [`Failure`].
///
/// # Examples
///
/// ```rust
/// use focal::optics::elements;
///
/// let all = elements::<i32>();
/// let doubled = all
///     .update(&vec![1, 2, 3], |values| values.into_iter().map(|v| v * 2).collect())
///     .unwrap();
/// assert_eq!(doubled, vec![2, 4, 6]);
/// ```
pub fn elements<T>() -> Optic<Vec<T>, Vec<T>>
where
    T: Clone + Send + Sync + 'static,
{
    Optic::traversal(
        |items: &Vec<T>| items.clone(),
        |values, _items: &Vec<T>| Ok(values),
    )
}

/// A traversal over the elements satisfying `predicate`, preserving
/// original order.
///
/// `set` replaces the matching elements positionally — the i-th supplied
/// value replaces the i-th match — and leaves non-matching elements
/// untouched. Correspondence is by index in the filtered view, never by
/// value equality.
///
/// # Examples
///
/// ```rust
/// use focal::optics::filter_by;
///
/// let evens = filter_by(|value: &i32| value % 2 == 0);
/// let items = vec![1, 2, 3, 4];
///
/// assert_eq!(evens.get(&items), Ok(vec![2, 4]));
/// assert_eq!(evens.set(vec![20, 40], &items), Ok(vec![1, 20, 3, 40]));
/// ```
pub fn filter_by<T, P>(predicate: P) -> Optic<Vec<T>, Vec<T>>
where
    T: Clone + Send + Sync + 'static,
    P: Fn(&T) -> bool + Send + Sync + 'static,
{
    let select = Arc::new(predicate);
    let matching = Arc::clone(&select);
    Optic::traversal(
        move |items: &Vec<T>| items.iter().filter(|item| matching(*item)).cloned().collect(),
        move |values, items: &Vec<T>| {
            let mut replacements = values.into_iter();
            let next = items
                .iter()
                .map(|item| {
                    if select(item) {
                        // The traversal size check guarantees a replacement
                        // exists for every match.
                        replacements.next().map_or_else(|| item.clone(), |value| value)
                    } else {
                        item.clone()
                    }
                })
                .collect();
            Ok(next)
        },
    )
}
