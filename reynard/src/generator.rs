//! Core generator infrastructure: the `Generator` trait, the `Gen` carrier
//! and the structural combinators (pure, map, bind, filter, sizing).

use std::rc::Rc;

use crate::error::PropertyError;
use crate::rng::RandomSource;
use crate::rose::RoseTree;

/// Magnitude knob for generation (lengths, ranges, recursion depth)
pub type Size = usize;

/// Result of a single draw
pub type GenResult<T> = Result<RoseTree<T>, PropertyError>;

/// Retry budget used by [`Gen::such_that`]
pub const DEFAULT_MAX_TRIES: usize = 3;

/// Core generator trait for producing shrinkable random values
pub trait Generator<T> {
    /// Draw a tree of values at the given size from an owned source
    fn generate(&self, size: Size, source: RandomSource) -> GenResult<T>;
}

/// Cheaply cloneable, composable generator.
///
/// A `Gen` owns no mutable state: it is a shared pure function of
/// `(Size, RandomSource)`. Composite generators keep their components behind
/// `Rc`, so a generator can be reused across every trial of a run.
pub struct Gen<T> {
    run: Rc<dyn Fn(Size, RandomSource) -> GenResult<T>>,
}

impl<T> Clone for Gen<T> {
    fn clone(&self) -> Self {
        Self {
            run: Rc::clone(&self.run),
        }
    }
}

impl<T> std::fmt::Debug for Gen<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Gen<{}>", std::any::type_name::<T>())
    }
}

impl<T> Generator<T> for Gen<T> {
    fn generate(&self, size: Size, source: RandomSource) -> GenResult<T> {
        (self.run)(size, source)
    }
}

impl<T: 'static> Gen<T> {
    /// Create a generator from a drawing function
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Size, RandomSource) -> GenResult<T> + 'static,
    {
        Self { run: Rc::new(f) }
    }

    /// Wrap any [`Generator`] implementation
    pub fn from_generator<G>(generator: G) -> Self
    where
        G: Generator<T> + 'static,
    {
        Self::new(move |size, source| generator.generate(size, source))
    }

    /// Always produce the given tree, ignoring size and randomness
    pub fn pure(tree: RoseTree<T>) -> Self
    where
        T: Clone,
    {
        Self::new(move |_size, _source| Ok(tree.clone()))
    }

    /// Always produce `value`, with no shrinks
    pub fn returns(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(move |_size, _source| Ok(RoseTree::singleton(value.clone())))
    }

    /// Build the generator from the current size on every draw
    pub fn sized<F>(factory: F) -> Self
    where
        F: Fn(Size) -> Gen<T> + 'static,
    {
        Self::new(move |size, source| factory(size).generate(size, source))
    }

    /// Draw a value with a seed, mostly useful for exploring a generator
    pub fn sample(&self, size: Size, seed: u64) -> Result<T, PropertyError> {
        self.generate(size, RandomSource::from_seed(seed))
            .map(RoseTree::into_value)
    }

    /// Map every value of the tree, preserving its shrink structure
    pub fn map<U, F>(self, f: F) -> Gen<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        let f: Rc<dyn Fn(T) -> U> = Rc::new(f);
        Gen::new(move |size, source| {
            self.generate(size, source)
                .map(|tree| tree.map_rc(Rc::clone(&f)))
        })
    }

    /// Rewrite the whole drawn tree, shrinks included
    pub fn map_tree<U, F>(self, f: F) -> Gen<U>
    where
        U: 'static,
        F: Fn(RoseTree<T>) -> RoseTree<U> + 'static,
    {
        Gen::new(move |size, source| self.generate(size, source).map(&f))
    }

    /// Feed the drawn value into `f` and draw from the generator it returns.
    ///
    /// Shrinks first re-run `f` on every shrink of the outer value, drawing
    /// the inner generator from the same source, and only then shrink the
    /// inner tree. Without the outer pass, shrinking gets stuck whenever
    /// later values depend structurally on earlier ones.
    pub fn bind<U, F>(self, f: F) -> Gen<U>
    where
        T: Clone,
        U: 'static,
        F: Fn(T) -> Gen<U> + 'static,
    {
        let f: Rc<dyn Fn(T) -> Gen<U>> = Rc::new(f);
        Gen::new(move |size, source| {
            let (outer_source, inner_source) = source.split();
            let outer = self.generate(size, outer_source)?;
            bind_tree(outer, Rc::clone(&f), size, inner_source)
        })
    }

    /// Redraw until `predicate` holds, at most `max_tries` times.
    ///
    /// Shrink candidates that do not satisfy `predicate` are dropped rather
    /// than retried.
    pub fn filter<F>(self, predicate: F, max_tries: usize) -> Gen<T>
    where
        F: Fn(&T) -> bool + 'static,
    {
        let predicate: Rc<dyn Fn(&T) -> bool> = Rc::new(predicate);
        Gen::new(move |size, source| {
            let mut source = source;
            for _ in 0..max_tries {
                let (attempt, rest) = source.split();
                source = rest;
                let tree = self.generate(size, attempt)?;
                if predicate(tree.value()) {
                    return Ok(tree.filter_rc(Rc::clone(&predicate)));
                }
            }
            Err(PropertyError::generation_failed(
                format!(
                    "no value of {} satisfied the filter predicate",
                    std::any::type_name::<T>()
                ),
                max_tries,
            ))
        })
    }

    /// [`Gen::filter`] with the default retry budget
    pub fn such_that<F>(self, predicate: F) -> Gen<T>
    where
        F: Fn(&T) -> bool + 'static,
    {
        self.filter(predicate, DEFAULT_MAX_TRIES)
    }

    /// Override the size seen by this generator
    pub fn resize(self, new_size: Size) -> Gen<T> {
        Gen::new(move |_size, source| self.generate(new_size, source))
    }

    /// Override the size with one drawn uniformly from `[min, max]` per draw
    pub fn resize_range(self, min: Size, max: Size) -> Gen<T> {
        assert!(min <= max, "resize_range requires min <= max");
        Gen::new(move |_size, source| {
            let (mut pick, rest) = source.split();
            let new_size = pick.next_in_range(min, max);
            self.generate(new_size, rest)
        })
    }
}

fn bind_tree<A, B>(
    outer: RoseTree<A>,
    f: Rc<dyn Fn(A) -> Gen<B>>,
    size: Size,
    source: RandomSource,
) -> GenResult<B>
where
    A: Clone + 'static,
    B: 'static,
{
    let inner = f(outer.value().clone()).generate(size, source.clone())?;
    let (value, inner_shrinks) = inner.into_parts();

    let shrinks = move || {
        let f = Rc::clone(&f);
        let source = source.clone();
        // Candidates whose regeneration fails are skipped.
        let outer_shrinks = outer.shrinks().filter_map(move |candidate| {
            bind_tree(candidate, Rc::clone(&f), size, source.clone()).ok()
        });
        let inner_shrinks = inner_shrinks();
        Box::new(outer_shrinks.chain(inner_shrinks)) as crate::rose::Shrinks<B>
    };
    Ok(RoseTree::new(value, shrinks))
}

/// Free-function form of [`Gen::pure`]
pub fn pure<T: Clone + 'static>(tree: RoseTree<T>) -> Gen<T> {
    Gen::pure(tree)
}

/// Free-function form of [`Gen::returns`]
pub fn returns<T: Clone + 'static>(value: T) -> Gen<T> {
    Gen::returns(value)
}

/// Free-function form of [`Gen::sized`]
pub fn sized<T, F>(factory: F) -> Gen<T>
where
    T: 'static,
    F: Fn(Size) -> Gen<T> + 'static,
{
    Gen::sized(factory)
}
