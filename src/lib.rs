//! # focal
//!
//! Composable fallible optics for Rust: one unified `Optic` type covering
//! lens, prism, optional, and traversal access, plus atomic binding of an
//! optic to a concurrently-mutated container.
//!
//! ## Overview
//!
//! An [`Optic`](optics::Optic) is an immutable pair of functions between a
//! whole value `S` and a focused part `A`, each of which may fail with a
//! [`Failure`](failure::Failure):
//!
//! - `get: &S -> Result<A, Failure>`
//! - `set: (A, &S) -> Result<S, Failure>`
//!
//! Variant constructors choose totality: a lens never fails, a prism's get
//! is partial, an optional is partial both ways, and a traversal focuses on
//! zero or more elements at once. Everything downstream — composition,
//! updates, container binding — is written once against the common shape.
//!
//! ## Example
//!
//! ```rust
//! use focal::container::Cell;
//! use focal::optics::key;
//! use std::collections::HashMap;
//!
//! let mut stars: HashMap<String, i32> = HashMap::new();
//! stars.insert("rust".to_string(), 3);
//!
//! let cell = Cell::new(stars);
//! let rust = key::<String, i32>("rust".to_string());
//!
//! // Atomic read-transform-write through the optic.
//! cell.bind(&rust).update(|count| count + 1).unwrap();
//! assert_eq!(cell.load().get("rust"), Some(&4));
//!
//! // A missing key is an observable failure, never a silent default.
//! let python = key::<String, i32>("python".to_string());
//! assert!(cell.bind(&python).get().is_err());
//! ```
//!
//! ## Feature Flags
//!
//! - `async` (default): the asynchronous effect flavor
//!   ([`AsyncEval`](effect::AsyncEval)) and the asynchronous container
//!   ([`AsyncCell`](container::AsyncCell)), built on tokio and futures.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and functions.
///
/// # Usage
///
/// ```rust
/// use focal::prelude::*;
/// ```
pub mod prelude {
    pub use crate::container::*;
    pub use crate::effect::*;
    pub use crate::failure::Failure;
    pub use crate::optics::*;
}

pub mod container;
pub mod effect;
pub mod failure;
pub mod optics;
