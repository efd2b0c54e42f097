//! The composition algebra: sequential, product, and sum composition.
//!
//! Composition operators produce new [`Optic`] values and never mutate
//! their operands. Flavors join per [`Flavor::join`], so the one failure
//! these operators can report is the composition-time configuration error
//! for incompatible effect flavors — every other failure belongs to the
//! leaf optic that produced it and passes through unchanged.
//!
//! [`Flavor::join`]: crate::effect::Flavor::join

use std::sync::Arc;

use crate::failure::Failure;

use super::optic::Optic;

impl<S: 'static, A: 'static> Optic<S, A> {
    /// Sequentially composes this optic with one that focuses inside its
    /// focus.
    ///
    /// `get` chains the two gets; `set` reads the intermediate focus,
    /// updates it through the inner optic, and writes it back through the
    /// outer one. A failure at any stage short-circuits and is returned
    /// unchanged, so error messages stay attributable to the failing
    /// stage.
    ///
    /// Composition is associative: for any well-typed chain,
    /// `a.compose(&b)?.compose(&c)?` and `a.compose(&b.compose(&c)?)?`
    /// behave identically on every `get` and `set`.
    ///
    /// # Errors
    ///
    /// Returns the composition type error when the two flavors cannot be
    /// joined (transactional mixed with non-transactional).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use focal::optics::Optic;
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Inner { value: i32 }
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Outer { inner: Inner }
    ///
    /// let inner = Optic::lens(
    ///     |outer: &Outer| outer.inner.clone(),
    ///     |inner: Inner, _outer: &Outer| Outer { inner },
    /// );
    /// let value = Optic::lens(
    ///     |inner: &Inner| inner.value,
    ///     |value: i32, _inner: &Inner| Inner { value },
    /// );
    ///
    /// let composed = inner.compose(&value).unwrap();
    /// let data = Outer { inner: Inner { value: 42 } };
    /// assert_eq!(composed.get(&data), Ok(42));
    /// assert_eq!(composed.set(100, &data), Ok(Outer { inner: Inner { value: 100 } }));
    /// ```
    pub fn compose<B: 'static>(&self, inner: &Optic<A, B>) -> Result<Optic<S, B>, Failure> {
        let flavor = self.flavor.join(inner.flavor)?;

        let outer_get = Arc::clone(&self.getter);
        let inner_get = Arc::clone(&inner.getter);
        let getter = move |source: &S| outer_get(source).and_then(|focus| inner_get(&focus));

        let outer_read = Arc::clone(&self.getter);
        let inner_set = Arc::clone(&inner.setter);
        let outer_set = Arc::clone(&self.setter);
        let setter = move |value: B, source: &S| {
            let focus = outer_read(source)?;
            let updated = inner_set(value, &focus)?;
            outer_set(updated, source)
        };

        Ok(Optic {
            getter: Arc::new(getter),
            setter: Arc::new(setter),
            flavor,
        })
    }

    /// Product composition: pairs this optic with another into the same
    /// whole, focusing both parts simultaneously.
    ///
    /// `get` yields the pair of foci; `set` applies the left part and then
    /// the right part to produce one new whole, so a bound container
    /// commits both with a single atomic write. The two optics must focus
    /// disjoint parts of the whole — overlapping foci make the right part
    /// win, which breaks the GetSet law. That obligation is the caller's.
    ///
    /// # Errors
    ///
    /// Returns the composition type error when the flavors cannot be
    /// joined.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use focal::optics::Optic;
    ///
    /// let first = Optic::lens(
    ///     |pair: &(i32, String)| pair.0,
    ///     |value: i32, pair: &(i32, String)| (value, pair.1.clone()),
    /// );
    /// let second = Optic::lens(
    ///     |pair: &(i32, String)| pair.1.clone(),
    ///     |value: String, pair: &(i32, String)| (pair.0, value),
    /// );
    ///
    /// let both = first.zip(&second).unwrap();
    /// let data = (1, "one".to_string());
    /// assert_eq!(both.get(&data), Ok((1, "one".to_string())));
    /// assert_eq!(both.set((2, "two".to_string()), &data), Ok((2, "two".to_string())));
    /// ```
    pub fn zip<B: 'static>(&self, other: &Optic<S, B>) -> Result<Optic<S, (A, B)>, Failure> {
        let flavor = self.flavor.join(other.flavor)?;

        let left_get = Arc::clone(&self.getter);
        let right_get = Arc::clone(&other.getter);
        let getter = move |source: &S| Ok((left_get(source)?, right_get(source)?));

        let left_set = Arc::clone(&self.setter);
        let right_set = Arc::clone(&other.setter);
        let setter = move |(left, right): (A, B), source: &S| {
            let intermediate = left_set(left, source)?;
            right_set(right, &intermediate)
        };

        Ok(Optic {
            getter: Arc::new(getter),
            setter: Arc::new(setter),
            flavor,
        })
    }

    /// Sum composition: dispatches between two optics into the same whole
    /// with a common focus type.
    ///
    /// `get` tries this optic first and falls through to `other` when the
    /// case does not match; `set` does the same. When both branches miss,
    /// the second branch's failure is returned, keeping the message
    /// attributable to a concrete stage.
    ///
    /// # Errors
    ///
    /// Returns the composition type error when the flavors cannot be
    /// joined.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use focal::failure::Failure;
    /// use focal::optics::Optic;
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// enum Reading { Celsius(i32), Fahrenheit(i32) }
    ///
    /// let celsius = Optic::prism(
    ///     |reading: &Reading| match reading {
    ///         Reading::Celsius(degrees) => Ok(*degrees),
    ///         Reading::Fahrenheit(_) => Err(Failure::case_mismatch()),
    ///     },
    ///     Reading::Celsius,
    /// );
    /// let fahrenheit = Optic::prism(
    ///     |reading: &Reading| match reading {
    ///         Reading::Fahrenheit(degrees) => Ok(*degrees),
    ///         Reading::Celsius(_) => Err(Failure::case_mismatch()),
    ///     },
    ///     Reading::Fahrenheit,
    /// );
    ///
    /// let degrees = celsius.or_else(&fahrenheit).unwrap();
    /// assert_eq!(degrees.get(&Reading::Celsius(20)), Ok(20));
    /// assert_eq!(degrees.get(&Reading::Fahrenheit(68)), Ok(68));
    /// ```
    pub fn or_else(&self, other: &Self) -> Result<Self, Failure>
    where
        A: Clone,
    {
        let flavor = self.flavor.join(other.flavor)?;

        let first_get = Arc::clone(&self.getter);
        let second_get = Arc::clone(&other.getter);
        let getter = move |source: &S| first_get(source).or_else(|_| second_get(source));

        let first_set = Arc::clone(&self.setter);
        let second_set = Arc::clone(&other.setter);
        let setter = move |value: A, source: &S| match first_set(value.clone(), source) {
            Ok(next) => Ok(next),
            Err(_) => second_set(value, source),
        };

        Ok(Optic {
            getter: Arc::new(getter),
            setter: Arc::new(setter),
            flavor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::Flavor;

    #[derive(Clone, PartialEq, Debug)]
    struct Inner {
        value: i32,
    }

    #[derive(Clone, PartialEq, Debug)]
    struct Outer {
        inner: Inner,
        tag: String,
    }

    fn inner_lens() -> Optic<Outer, Inner> {
        Optic::lens(
            |outer: &Outer| outer.inner.clone(),
            |inner, outer: &Outer| Outer {
                inner,
                ..outer.clone()
            },
        )
    }

    fn value_lens() -> Optic<Inner, i32> {
        Optic::lens(|inner: &Inner| inner.value, |value, _inner: &Inner| Inner { value })
    }

    fn sample() -> Outer {
        Outer {
            inner: Inner { value: 42 },
            tag: "sample".to_string(),
        }
    }

    #[test]
    fn test_compose_get_and_set() {
        let composed = inner_lens().compose(&value_lens()).unwrap();
        assert_eq!(composed.get(&sample()), Ok(42));
        let updated = composed.set(100, &sample()).unwrap();
        assert_eq!(updated.inner.value, 100);
        assert_eq!(updated.tag, "sample");
    }

    #[test]
    fn test_compose_joins_flavors() {
        let composed = inner_lens().compose(&value_lens()).unwrap();
        assert_eq!(composed.flavor(), Flavor::Pure);

        let lifted = inner_lens().asynchronous().compose(&value_lens()).unwrap();
        assert_eq!(lifted.flavor(), Flavor::Async);
    }

    #[test]
    fn test_compose_rejects_transactional_mix() {
        let failure = inner_lens()
            .transactional()
            .compose(&value_lens())
            .unwrap_err();
        assert!(failure.message().starts_with("composition type error"));
    }

    #[test]
    fn test_compose_preserves_inner_failure_message() {
        let failing: Optic<Inner, i32> = Optic::optional(
            |_inner: &Inner| Err(Failure::new("focus absent")),
            |_value, _inner: &Inner| Err(Failure::new("update rejected")),
        );
        let composed = inner_lens().compose(&failing).unwrap();
        assert_eq!(composed.get(&sample()), Err(Failure::new("focus absent")));
        assert_eq!(
            composed.set(1, &sample()),
            Err(Failure::new("update rejected"))
        );
    }

    #[test]
    fn test_zip_reads_and_writes_both_parts() {
        let value = inner_lens().compose(&value_lens()).unwrap();
        let tag = Optic::lens(
            |outer: &Outer| outer.tag.clone(),
            |tag, outer: &Outer| Outer {
                tag,
                ..outer.clone()
            },
        );

        let both = value.zip(&tag).unwrap();
        assert_eq!(both.get(&sample()), Ok((42, "sample".to_string())));

        let updated = both.set((7, "renamed".to_string()), &sample()).unwrap();
        assert_eq!(updated.inner.value, 7);
        assert_eq!(updated.tag, "renamed");
    }

    #[test]
    fn test_or_else_set_dispatches() {
        #[derive(Clone, PartialEq, Debug)]
        enum Either {
            Left(i32),
            Right(i32),
        }

        let left = Optic::prism(
            |either: &Either| match either {
                Either::Left(value) => Ok(*value),
                Either::Right(_) => Err(Failure::case_mismatch()),
            },
            Either::Left,
        );
        let right = Optic::prism(
            |either: &Either| match either {
                Either::Right(value) => Ok(*value),
                Either::Left(_) => Err(Failure::case_mismatch()),
            },
            Either::Right,
        );

        let merged = left.or_else(&right).unwrap();
        assert_eq!(merged.get(&Either::Left(1)), Ok(1));
        assert_eq!(merged.get(&Either::Right(2)), Ok(2));
        // Prism set always constructs, so the first branch wins.
        assert_eq!(merged.set(9, &Either::Right(2)), Ok(Either::Left(9)));
    }
}
