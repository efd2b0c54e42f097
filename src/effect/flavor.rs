//! The effect flavor carried by every optic.

use crate::failure::Failure;

/// The computation context an optic's operations participate in.
///
/// Flavors form a lifting lattice: `Pure` lifts into `Fallible`, both lift
/// into `Async`, and `Transactional` combines only with itself. An optic's
/// flavor is chosen by its constructor and joined on composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Flavor {
    /// Synchronous, always terminates, never produces a `Failure`.
    Pure,
    /// Synchronous, may short-circuit with a `Failure`.
    Fallible,
    /// The update transform may suspend; scheduling is cooperative.
    Async,
    /// The update participates in an all-or-nothing retry scope.
    Transactional,
}

impl Flavor {
    /// Joins two flavors under composition.
    ///
    /// The weaker synchronous flavor lifts into the stronger one, and any
    /// asynchronous operand makes the result asynchronous. Combining
    /// `Transactional` with anything other than `Transactional` is a
    /// configuration error, reported here — at composition time — rather
    /// than when the composed optic first runs.
    ///
    /// # Errors
    ///
    /// Returns a `composition type error` [`Failure`] when exactly one
    /// operand is [`Flavor::Transactional`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use focal::effect::Flavor;
    ///
    /// assert_eq!(Flavor::Pure.join(Flavor::Fallible), Ok(Flavor::Fallible));
    /// assert_eq!(Flavor::Fallible.join(Flavor::Async), Ok(Flavor::Async));
    /// assert!(Flavor::Transactional.join(Flavor::Fallible).is_err());
    /// ```
    pub fn join(self, other: Self) -> Result<Self, Failure> {
        match (self, other) {
            (Self::Transactional, Self::Transactional) => Ok(Self::Transactional),
            (Self::Transactional, _) | (_, Self::Transactional) => {
                Err(Failure::flavor_mismatch(self, other))
            }
            (Self::Async, _) | (_, Self::Async) => Ok(Self::Async),
            (Self::Fallible, _) | (_, Self::Fallible) => Ok(Self::Fallible),
            (Self::Pure, Self::Pure) => Ok(Self::Pure),
        }
    }
}

impl std::fmt::Display for Flavor {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Pure => "pure",
            Self::Fallible => "fallible",
            Self::Async => "async",
            Self::Transactional => "transactional",
        };
        write!(formatter, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_is_commutative_for_sync_flavors() {
        assert_eq!(
            Flavor::Pure.join(Flavor::Fallible),
            Flavor::Fallible.join(Flavor::Pure)
        );
        assert_eq!(
            Flavor::Fallible.join(Flavor::Async),
            Flavor::Async.join(Flavor::Fallible)
        );
    }

    #[test]
    fn test_pure_is_identity() {
        for flavor in [Flavor::Pure, Flavor::Fallible, Flavor::Async] {
            assert_eq!(Flavor::Pure.join(flavor), Ok(flavor));
        }
    }

    #[test]
    fn test_transactional_joins_only_with_itself() {
        assert_eq!(
            Flavor::Transactional.join(Flavor::Transactional),
            Ok(Flavor::Transactional)
        );
        for flavor in [Flavor::Pure, Flavor::Fallible, Flavor::Async] {
            assert!(Flavor::Transactional.join(flavor).is_err());
            assert!(flavor.join(Flavor::Transactional).is_err());
        }
    }

    #[test]
    fn test_mismatch_message_names_both_flavors() {
        let failure = Flavor::Transactional.join(Flavor::Async).unwrap_err();
        assert_eq!(
            failure.message(),
            "composition type error: cannot combine transactional optic with async optic"
        );
    }
}
