//! Composable fallible optics.
//!
//! This module provides the unified [`Optic`] type — one representation
//! covering lens, prism, optional, and traversal access — together with
//! its composition algebra and the standard indexing combinators.
//!
//! # Variants
//!
//! | Variant | get | set | example use |
//! |---|---|---|---|
//! | Lens | total | total | struct field |
//! | Prism | partial | total (always constructs) | enum case |
//! | Optional | partial | partial | map key, list index |
//! | Traversal | 0..n foci | size-checked | all elements |
//!
//! # Composition
//!
//! - [`Optic::compose`]: sequential chaining into a nested focus.
//! - [`Optic::zip`]: product of two optics into disjoint parts.
//! - [`Optic::or_else`]: sum of two optics dispatching by case.
//! - [`key`], [`at`], [`elements`], [`filter_by`]: indexing combinators.
//!
//! # Example
//!
//! ```rust
//! use focal::optics::{key, Optic};
//! use std::collections::HashMap;
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Profile { stars: HashMap<String, i32> }
//!
//! let stars = Optic::lens(
//!     |profile: &Profile| profile.stars.clone(),
//!     |stars, _profile: &Profile| Profile { stars },
//! );
//! let rust = stars.compose(&key::<String, i32>("rust".to_string())).unwrap();
//!
//! let mut map = HashMap::new();
//! map.insert("rust".to_string(), 3);
//! let profile = Profile { stars: map };
//!
//! let updated = rust.update(&profile, |count| count + 1).unwrap();
//! assert_eq!(updated.stars["rust"], 4);
//! ```

mod compose;
mod index;
mod optic;

pub use optic::Optic;

pub use index::at;
pub use index::elements;
pub use index::filter_by;
pub use index::key;
