//! Atomic containers and the accessors produced by binding optics to them.
//!
//! A container holds one whole value and offers the accessor layer a
//! linearizable snapshot/commit primitive — the portable substitute for a
//! language-level transaction: read a versioned snapshot, compute the
//! successor, attempt a conditional write, retry on version mismatch.
//!
//! - [`Cell`]: the in-process synchronous container.
//! - [`AsyncCell`] (feature `async`): the suspending counterpart.
//! - [`bind`] / [`Bound`] / [`AsyncBound`]: transient accessors pairing a
//!   container with an [`Optic`](crate::optics::Optic).
//! - [`RetryPolicy`]: the container-owned conflict budget.
//!
//! Two concurrent `update` calls through the same accessor can never lose
//! a write: whichever commit loses the version race re-runs its whole
//! get→transform→set unit against the winner's value.
//!
//! # Example
//!
//! ```rust
//! use focal::container::Cell;
//! use focal::optics::key;
//! use std::collections::HashMap;
//!
//! let mut map = HashMap::new();
//! map.insert("rust".to_string(), 3);
//! let cell = Cell::new(map);
//!
//! let rust = key::<String, i32>("rust".to_string());
//! cell.bind(&rust).update(|stars| stars + 1).unwrap();
//! assert_eq!(cell.load()["rust"], 4);
//! ```

mod bound;
mod cell;

#[cfg(feature = "async")]
mod async_cell;

pub use bound::Bound;
pub use bound::bind;
pub use cell::Cell;
pub use cell::Container;
pub use cell::RetryPolicy;

#[cfg(feature = "async")]
pub use async_cell::AsyncBound;
#[cfg(feature = "async")]
pub use async_cell::AsyncCell;
