//! The unified optic representation.

use std::sync::Arc;

use crate::effect::Eval;
use crate::effect::Flavor;
use crate::failure::Failure;

#[cfg(feature = "async")]
use crate::effect::AsyncEval;

/// A bidirectional accessor between a whole `S` and a focus `A`.
///
/// One representation covers all four variants; the constructor chooses
/// totality and the effect [`Flavor`]:
///
/// | Constructor | get | set | flavor |
/// |---|---|---|---|
/// | [`Optic::lens`] | total | total | `Pure` |
/// | [`Optic::prism`] | partial | total | `Fallible` |
/// | [`Optic::optional`] | partial | partial | `Fallible` |
/// | [`Optic::traversal`] | 0..n foci | size-checked | `Fallible` |
///
/// Optics are immutable and stateless: composition produces new values and
/// never mutates operands, cloning is a pair of `Arc` bumps, and a single
/// optic may be shared across threads without synchronization.
///
/// # Laws
///
/// Where the operations succeed, every optic must satisfy:
///
/// 1. **GetSet**: `optic.set(optic.get(&s)?, &s) == Ok(s)`
/// 2. **SetGet**: `optic.get(&optic.set(a, &s)?) == Ok(a)`
///
/// # Purity
///
/// The supplied getter and setter must be pure functions of their inputs.
/// A bound container retries the whole get→transform→set unit from scratch
/// on conflict, so an impure getter or setter would observably run more
/// than once. This obligation is not checked mechanically.
pub struct Optic<S, A> {
    pub(crate) getter: Arc<dyn Fn(&S) -> Result<A, Failure> + Send + Sync>,
    pub(crate) setter: Arc<dyn Fn(A, &S) -> Result<S, Failure> + Send + Sync>,
    pub(crate) flavor: Flavor,
}

static_assertions::assert_impl_all!(Optic<i32, String>: Send, Sync, Clone);

impl<S: 'static, A: 'static> Optic<S, A> {
    /// Creates a lens from an always-succeeding getter/setter pair.
    ///
    /// Neither function may fail; the resulting optic is [`Flavor::Pure`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use focal::optics::Optic;
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Point { x: i32, y: i32 }
    ///
    /// let x = Optic::lens(
    ///     |point: &Point| point.x,
    ///     |x: i32, point: &Point| Point { x, ..point.clone() },
    /// );
    ///
    /// let point = Point { x: 10, y: 20 };
    /// assert_eq!(x.get(&point), Ok(10));
    /// assert_eq!(x.set(100, &point), Ok(Point { x: 100, y: 20 }));
    /// ```
    pub fn lens<G, T>(getter: G, setter: T) -> Self
    where
        G: Fn(&S) -> A + Send + Sync + 'static,
        T: Fn(A, &S) -> S + Send + Sync + 'static,
    {
        Self {
            getter: Arc::new(move |source| Ok(getter(source))),
            setter: Arc::new(move |value, source| Ok(setter(value, source))),
            flavor: Flavor::Pure,
        }
    }

    /// Creates a prism from a partial match and a total build function.
    ///
    /// `get` fails when the input is not the expected case; `set` always
    /// succeeds, constructing a fresh whole from the focus and discarding
    /// the prior one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use focal::failure::Failure;
    /// use focal::optics::Optic;
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// enum Shape { Circle(f64), Square(f64) }
    ///
    /// let circle = Optic::prism(
    ///     |shape: &Shape| match shape {
    ///         Shape::Circle(radius) => Ok(*radius),
    ///         Shape::Square(_) => Err(Failure::case_mismatch()),
    ///     },
    ///     Shape::Circle,
    /// );
    ///
    /// assert_eq!(circle.get(&Shape::Circle(2.0)), Ok(2.0));
    /// assert!(circle.get(&Shape::Square(1.0)).is_err());
    /// assert_eq!(circle.set(3.0, &Shape::Square(1.0)), Ok(Shape::Circle(3.0)));
    /// ```
    pub fn prism<G, B>(matcher: G, build: B) -> Self
    where
        G: Fn(&S) -> Result<A, Failure> + Send + Sync + 'static,
        B: Fn(A) -> S + Send + Sync + 'static,
    {
        Self {
            getter: Arc::new(matcher),
            setter: Arc::new(move |value, _source| Ok(build(value))),
            flavor: Flavor::Fallible,
        }
    }

    /// Creates an optional from a getter/setter pair that may both fail.
    pub fn optional<G, T>(getter: G, setter: T) -> Self
    where
        G: Fn(&S) -> Result<A, Failure> + Send + Sync + 'static,
        T: Fn(A, &S) -> Result<S, Failure> + Send + Sync + 'static,
    {
        Self {
            getter: Arc::new(getter),
            setter: Arc::new(setter),
            flavor: Flavor::Fallible,
        }
    }

    /// Attempts to extract the focus from a whole.
    ///
    /// # Errors
    ///
    /// Returns the [`Failure`] produced by the stage that could not reach
    /// its focus. No default is ever substituted.
    pub fn get(&self, source: &S) -> Result<A, Failure> {
        (self.getter)(source)
    }

    /// Attempts to write the focus back, returning a new whole.
    ///
    /// # Errors
    ///
    /// Returns the [`Failure`] produced by the stage that rejected the
    /// update. The original whole is never partially modified.
    pub fn set(&self, value: A, source: &S) -> Result<S, Failure> {
        (self.setter)(value, source)
    }

    /// Reads the focus, applies a transform, and writes the result back.
    ///
    /// # Errors
    ///
    /// Short-circuits with the get failure when the focus is absent, and
    /// propagates the set failure unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use focal::optics::Optic;
    ///
    /// let first = Optic::lens(
    ///     |pair: &(i32, i32)| pair.0,
    ///     |value: i32, pair: &(i32, i32)| (value, pair.1),
    /// );
    /// assert_eq!(first.update(&(1, 2), |value| value + 10), Ok((11, 2)));
    /// ```
    pub fn update<F>(&self, source: &S, transform: F) -> Result<S, Failure>
    where
        F: FnOnce(A) -> A,
    {
        let focus = self.get(source)?;
        self.set(transform(focus), source)
    }

    /// Like [`Optic::update`], with a transform that may itself fail.
    ///
    /// # Errors
    ///
    /// Propagates the transform's failure unchanged, in addition to the
    /// get/set failures of [`Optic::update`].
    pub fn update_with<F>(&self, source: &S, transform: F) -> Result<S, Failure>
    where
        F: FnOnce(A) -> Result<A, Failure>,
    {
        let focus = self.get(source)?;
        self.set(transform(focus)?, source)
    }

    /// Like [`Optic::update`], with a transform running in a deferred
    /// [`Eval`] context.
    ///
    /// # Errors
    ///
    /// A failed evaluation surfaces as the optic's failure with the
    /// evaluation's failure attached as cause; get/set failures propagate
    /// unchanged.
    pub fn update_eval<F>(&self, source: &S, transform: F) -> Result<S, Failure>
    where
        F: FnOnce(A) -> Eval<A>,
    {
        let focus = self.get(source)?;
        let next = transform(focus)
            .run()
            .map_err(|failure| Failure::new("effectful update failed").caused_by(failure))?;
        self.set(next, source)
    }

    /// Like [`Optic::update`], with a transform running in an
    /// [`AsyncEval`] context.
    ///
    /// The get→transform→set sequence stays one logical unit: the suspended
    /// transform is driven to completion before the set runs, with no
    /// implicit parallelism.
    ///
    /// # Errors
    ///
    /// A failed evaluation surfaces as the optic's failure with the
    /// evaluation's failure attached as cause; get/set failures propagate
    /// unchanged.
    #[cfg(feature = "async")]
    pub async fn update_async<F>(&self, source: &S, transform: F) -> Result<S, Failure>
    where
        F: FnOnce(A) -> AsyncEval<A>,
        A: Send,
    {
        let focus = self.get(source)?;
        let next = transform(focus)
            .run_async()
            .await
            .map_err(|failure| Failure::new("effectful update failed").caused_by(failure))?;
        self.set(next, source)
    }

    /// The effect flavor this optic carries.
    #[must_use]
    pub const fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// Lifts this optic into the asynchronous flavor.
    ///
    /// Composing the result with any synchronous optic yields an
    /// asynchronous optic.
    #[must_use]
    pub fn asynchronous(mut self) -> Self {
        self.flavor = Flavor::Async;
        self
    }

    /// Lifts this optic into the transactional flavor.
    ///
    /// Transactional optics compose only with other transactional optics;
    /// lifting is the caller's explicit opt-in required by
    /// [`Flavor::join`].
    #[must_use]
    pub fn transactional(mut self) -> Self {
        self.flavor = Flavor::Transactional;
        self
    }

    /// Returns an optic whose `get` falls back to `default` when the focus
    /// is absent.
    ///
    /// This is the one explicit default-substitution combinator; every
    /// other operation surfaces absence as a [`Failure`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use focal::optics::key;
    /// use std::collections::HashMap;
    ///
    /// let empty: HashMap<String, i32> = HashMap::new();
    /// let optic = key::<String, i32>("absent".to_string()).fallback(0);
    /// assert_eq!(optic.get(&empty), Ok(0));
    /// ```
    #[must_use]
    pub fn fallback(&self, default: A) -> Self
    where
        A: Clone + Send + Sync,
    {
        let getter = Arc::clone(&self.getter);
        Self {
            getter: Arc::new(move |source| Ok(getter(source).unwrap_or_else(|_| default.clone()))),
            setter: Arc::clone(&self.setter),
            flavor: self.flavor,
        }
    }
}

impl<S: Clone + Send + Sync + 'static> Optic<S, S> {
    /// The identity optic: the whole is its own focus.
    ///
    /// Acts as the unit of sequential composition.
    #[must_use]
    pub fn identity() -> Self {
        Self::lens(|source: &S| source.clone(), |value, _source: &S| value)
    }
}

impl<S: 'static, A: 'static> Optic<S, Vec<A>> {
    /// Creates a traversal whose focus is the ordered sequence of elements
    /// selected by `get_all`.
    ///
    /// The constructor enforces the size invariant: `set` fails with a
    /// size-mismatch [`Failure`] whenever the supplied sequence length
    /// differs from `get_all(source).len()`, including zero against a
    /// non-empty selection. Zero foci are valid — getting from an empty
    /// selection yields an empty sequence, and setting it back is a no-op
    /// returning the whole unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use focal::optics::Optic;
    ///
    /// let all = Optic::traversal(
    ///     |items: &Vec<i32>| items.clone(),
    ///     |values: Vec<i32>, _items: &Vec<i32>| Ok(values),
    /// );
    ///
    /// let items = vec![1, 2, 3];
    /// assert_eq!(all.update(&items, |values| values.into_iter().map(|v| v * 2).collect()),
    ///            Ok(vec![2, 4, 6]));
    /// assert!(all.set(vec![1], &items).is_err());
    /// ```
    pub fn traversal<G, T>(get_all: G, set_all: T) -> Self
    where
        G: Fn(&S) -> Vec<A> + Send + Sync + 'static,
        T: Fn(Vec<A>, &S) -> Result<S, Failure> + Send + Sync + 'static,
    {
        let get_all = Arc::new(get_all);
        let sizing = Arc::clone(&get_all);
        Self {
            getter: Arc::new(move |source| Ok(get_all(source))),
            setter: Arc::new(move |values, source| {
                let expected = sizing(source).len();
                if values.len() == expected {
                    set_all(values, source)
                } else {
                    Err(Failure::size_mismatch(expected, values.len()))
                }
            }),
            flavor: Flavor::Fallible,
        }
    }
}

impl<S, A> Clone for Optic<S, A> {
    fn clone(&self) -> Self {
        Self {
            getter: Arc::clone(&self.getter),
            setter: Arc::clone(&self.setter),
            flavor: self.flavor,
        }
    }
}

impl<S, A> std::fmt::Debug for Optic<S, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Optic")
            .field("flavor", &self.flavor)
            .finish_non_exhaustive()
    }
}
