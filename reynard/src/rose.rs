//! Lazy rose trees: a generated value plus its ordered shrink candidates.

use std::fmt;
use std::rc::Rc;

/// Boxed iterator over the direct shrink candidates of a tree.
pub type Shrinks<T> = Box<dyn Iterator<Item = RoseTree<T>>>;

type Thunk<T> = Rc<dyn Fn() -> Shrinks<T>>;

/// A value paired with a lazily produced sequence of "smaller" trees.
///
/// The shrink sequence is a thunk: every call to [`RoseTree::shrinks`]
/// starts a fresh iterator, so a consumer can stop after a few candidates
/// and scan again later without anything being materialized up front.
/// Cloning a tree clones the root value and shares the thunk.
pub struct RoseTree<T> {
    value: T,
    shrinks: Thunk<T>,
}

impl<T: Clone> Clone for RoseTree<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            shrinks: Rc::clone(&self.shrinks),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for RoseTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoseTree")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> RoseTree<T> {
    /// Create a tree from a value and a thunk producing its shrinks
    pub fn new<F>(value: T, shrinks: F) -> Self
    where
        F: Fn() -> Shrinks<T> + 'static,
    {
        Self {
            value,
            shrinks: Rc::new(shrinks),
        }
    }

    /// Create a tree with no shrink candidates
    pub fn singleton(value: T) -> Self {
        Self::new(value, || Box::new(std::iter::empty()))
    }

    /// Create a tree whose shrinks are an already-built list of trees
    pub fn from_children(value: T, children: Vec<RoseTree<T>>) -> Self
    where
        T: Clone,
    {
        let children = Rc::new(children);
        Self::new(value, move || Box::new((*children).clone().into_iter()))
    }

    /// Grow a tree by repeatedly applying a shrink rule.
    ///
    /// `shrink` must be well-founded: every candidate it returns has to be
    /// strictly smaller than its input under some order with no infinite
    /// descending chain, otherwise consumers may never terminate.
    pub fn unfold<F>(value: T, shrink: F) -> Self
    where
        T: Clone,
        F: Fn(&T) -> Vec<T> + 'static,
    {
        Self::unfold_rc(value, Rc::new(shrink))
    }

    fn unfold_rc(value: T, shrink: Rc<dyn Fn(&T) -> Vec<T>>) -> Self
    where
        T: Clone,
    {
        let seed = value.clone();
        Self::new(value, move || {
            let shrink = Rc::clone(&shrink);
            let candidates = shrink(&seed);
            Box::new(
                candidates
                    .into_iter()
                    .map(move |candidate| Self::unfold_rc(candidate, Rc::clone(&shrink))),
            )
        })
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    /// Start a fresh iteration over the direct shrink candidates
    pub fn shrinks(&self) -> Shrinks<T> {
        (self.shrinks)()
    }

    pub(crate) fn into_parts(self) -> (T, Thunk<T>) {
        (self.value, self.shrinks)
    }

    /// Apply `f` to every node, preserving the shape of the tree
    pub fn map<U, F>(self, f: F) -> RoseTree<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        self.map_rc(Rc::new(f))
    }

    pub(crate) fn map_rc<U: 'static>(self, f: Rc<dyn Fn(T) -> U>) -> RoseTree<U> {
        let (value, shrinks) = self.into_parts();
        let mapped = f(value);
        RoseTree::new(mapped, move || {
            let f = Rc::clone(&f);
            Box::new(shrinks().map(move |child| child.map_rc(Rc::clone(&f))))
        })
    }

    /// Drop every shrink candidate (and its subtree) rejected by `predicate`.
    ///
    /// The root itself is kept as-is.
    pub fn filter<F>(self, predicate: F) -> RoseTree<T>
    where
        F: Fn(&T) -> bool + 'static,
    {
        self.filter_rc(Rc::new(predicate))
    }

    pub(crate) fn filter_rc(self, predicate: Rc<dyn Fn(&T) -> bool>) -> RoseTree<T> {
        let (value, shrinks) = self.into_parts();
        RoseTree::new(value, move || {
            let keep = Rc::clone(&predicate);
            let descend = Rc::clone(&predicate);
            Box::new(
                shrinks()
                    .filter(move |child| keep(child.value()))
                    .map(move |child| child.filter_rc(Rc::clone(&descend))),
            )
        })
    }

    /// Pair two trees; shrinks the left component first, then the right
    pub fn zip<U>(self, other: RoseTree<U>) -> RoseTree<(T, U)>
    where
        T: Clone,
        U: Clone + 'static,
    {
        let value = (self.value.clone(), other.value.clone());
        RoseTree::new(value, move || {
            let right = other.clone();
            let left = self.clone();
            let lefts = self.shrinks().map(move |l| l.zip(right.clone()));
            let rights = other.shrinks().map(move |r| left.clone().zip(r));
            Box::new(lefts.chain(rights))
        })
    }
}

impl<T: Clone + 'static> RoseTree<Vec<T>> {
    /// Combine element trees into a tree of vectors.
    ///
    /// Shrink order: contiguous removals, largest chunks first, never going
    /// below `min_len` elements; then shrinking one element at a time while
    /// holding the others fixed.
    pub fn sequence(trees: Vec<RoseTree<T>>, min_len: usize) -> RoseTree<Vec<T>> {
        let value = trees.iter().map(|tree| tree.value().clone()).collect();
        let trees = Rc::new(trees);

        RoseTree::new(value, move || {
            let len = trees.len();

            let for_removal = Rc::clone(&trees);
            let removals = removal_chunks(len, min_len)
                .into_iter()
                .map(move |(start, count)| {
                    let mut kept = Vec::with_capacity(for_removal.len() - count);
                    kept.extend_from_slice(&for_removal[..start]);
                    kept.extend_from_slice(&for_removal[start + count..]);
                    RoseTree::sequence(kept, min_len)
                });

            let for_elements = Rc::clone(&trees);
            let element_shrinks = (0..len).flat_map(move |index| {
                let base = Rc::clone(&for_elements);
                for_elements[index].shrinks().map(move |child| {
                    let mut next = (*base).clone();
                    next[index] = child;
                    RoseTree::sequence(next, min_len)
                })
            });

            Box::new(removals.chain(element_shrinks))
        })
    }
}

/// Chunks `(start, count)` to try removing from a sequence of `len`
/// elements, largest first, halving the chunk size each round.
fn removal_chunks(len: usize, min_len: usize) -> Vec<(usize, usize)> {
    let mut chunks = Vec::new();
    if len <= min_len {
        return chunks;
    }

    let mut count = len - min_len;
    while count > 0 {
        let mut start = 0;
        while start + count <= len {
            chunks.push((start, count));
            start += count;
        }
        count /= 2;
    }
    chunks
}
