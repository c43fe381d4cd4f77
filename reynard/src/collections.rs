//! Container generators: vectors, sets, maps and tuples.
//!
//! Every container shrinks by first removing contiguous chunks of elements,
//! largest chunks first, and then by shrinking one element at a time. A
//! container never shrinks below its declared minimum length.

use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::generator::{Gen, GenResult, Generator, Size};
use crate::rng::RandomSource;
use crate::rose::RoseTree;

fn draw_sequence<T>(
    element: &Gen<T>,
    size: Size,
    source: RandomSource,
    min_len: usize,
    max_len: usize,
) -> GenResult<Vec<T>>
where
    T: Clone + 'static,
{
    let (mut pick, rest) = source.split();
    let len = pick.next_in_range(min_len, max_len);
    let trees = rest
        .split_n(len)
        .into_iter()
        .map(|slot| element.generate(size, slot))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RoseTree::sequence(trees, min_len))
}

/// Vector whose length is drawn from `[0, size]`
pub fn array<T>(element: Gen<T>) -> Gen<Vec<T>>
where
    T: Clone + 'static,
{
    Gen::new(move |size, source| draw_sequence(&element, size, source, 0, size))
}

/// Vector of exactly `len` elements; only the elements shrink
pub fn array_of_length<T>(element: Gen<T>, len: usize) -> Gen<Vec<T>>
where
    T: Clone + 'static,
{
    Gen::new(move |size, source| draw_sequence(&element, size, source, len, len))
}

/// Vector whose length is drawn from `[min_len, max_len]`
///
/// # Panics
///
/// Panics if `min_len > max_len`.
pub fn array_in_range<T>(element: Gen<T>, min_len: usize, max_len: usize) -> Gen<Vec<T>>
where
    T: Clone + 'static,
{
    assert!(min_len <= max_len, "array_in_range requires min_len <= max_len");
    Gen::new(move |size, source| draw_sequence(&element, size, source, min_len, max_len))
}

/// Set built from a size-driven vector; duplicates collapse
pub fn set<T>(element: Gen<T>) -> Gen<BTreeSet<T>>
where
    T: Clone + Ord + 'static,
{
    array(element).map(|values| values.into_iter().collect())
}

/// Fixed-arity vector drawing position `i` from `generators[i]`
pub fn tuple<T>(generators: Vec<Gen<T>>) -> Gen<Vec<T>>
where
    T: Clone + 'static,
{
    let generators = Rc::new(generators);
    Gen::new(move |size, source| {
        let trees = source
            .split_n(generators.len())
            .into_iter()
            .zip(generators.iter())
            .map(|(slot, generator)| generator.generate(size, slot))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RoseTree::sequence(trees, generators.len()))
    })
}

/// Pair of independently drawn values; shrinks the first, then the second
pub fn tuple2<A, B>(first: Gen<A>, second: Gen<B>) -> Gen<(A, B)>
where
    A: Clone + 'static,
    B: Clone + 'static,
{
    Gen::new(move |size, source| {
        let (left, right) = source.split();
        let a = first.generate(size, left)?;
        let b = second.generate(size, right)?;
        Ok(a.zip(b))
    })
}

/// Triple of independently drawn values
pub fn tuple3<A, B, C>(first: Gen<A>, second: Gen<B>, third: Gen<C>) -> Gen<(A, B, C)>
where
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
{
    tuple2(tuple2(first, second), third).map(|((a, b), c)| (a, b, c))
}

/// Map with the given keys, each value drawn from its own generator.
///
/// The key set never changes while shrinking.
pub fn dictionary<K, V>(entries: Vec<(K, Gen<V>)>) -> Gen<BTreeMap<K, V>>
where
    K: Clone + Ord + 'static,
    V: Clone + 'static,
{
    let (keys, generators): (Vec<K>, Vec<Gen<V>>) = entries.into_iter().unzip();
    tuple(generators).map(move |values| keys.iter().cloned().zip(values).collect())
}

/// Map of size-driven length with generated keys and values.
///
/// Colliding keys keep the last drawn value.
pub fn dictionary_of<K, V>(keys: Gen<K>, values: Gen<V>) -> Gen<BTreeMap<K, V>>
where
    K: Clone + Ord + 'static,
    V: Clone + 'static,
{
    array(tuple2(keys, values)).map(|pairs| pairs.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::choose;
    use crate::generator::returns;

    fn draw<T: 'static>(generator: &Gen<T>, size: Size, seed: u64) -> RoseTree<T> {
        generator.generate(size, RandomSource::from_seed(seed)).unwrap()
    }

    #[test]
    fn test_array_length_bounded_by_size() {
        let generator = array(choose(0u8, 9));
        for seed in 0..50 {
            let size = (seed % 8) as usize;
            assert!(draw(&generator, size, seed).value().len() <= size);
        }
        assert!(draw(&generator, 0, 1).value().is_empty());
    }

    #[test]
    fn test_array_first_shrink_is_empty() {
        let generator = array(choose(0u8, 9));
        let tree = (0..100)
            .map(|seed| draw(&generator, 10, seed))
            .find(|tree| !tree.value().is_empty())
            .expect("some seed draws a non-empty array");

        let first = tree.shrinks().next().unwrap();
        assert!(first.value().is_empty());
    }

    #[test]
    fn test_array_of_length_never_changes_length() {
        let generator = array_of_length(choose(-5i32, 5), 4);
        for seed in 0..20 {
            let tree = draw(&generator, 10, seed);
            assert_eq!(tree.value().len(), 4);
            for child in tree.shrinks() {
                assert_eq!(child.value().len(), 4);
                for grandchild in child.shrinks() {
                    assert_eq!(grandchild.value().len(), 4);
                }
            }
        }
    }

    #[test]
    fn test_array_in_range_respects_minimum() {
        let generator = array_in_range(choose(0u8, 3), 2, 6);
        for seed in 0..30 {
            let tree = draw(&generator, 0, seed);
            assert!((2..=6).contains(&tree.value().len()));
            assert!(tree.shrinks().all(|child| child.value().len() >= 2));
        }
    }

    #[test]
    fn test_set_has_no_duplicates() {
        let generator = set(choose(0u8, 3));
        for seed in 0..20 {
            let tree = draw(&generator, 30, seed);
            assert!(tree.value().len() <= 4);
        }
    }

    #[test]
    fn test_tuple_keeps_arity_and_positions() {
        let generator = tuple(vec![choose(0i32, 9), choose(100i32, 109), returns(7)]);
        for seed in 0..20 {
            let tree = draw(&generator, 0, seed);
            let check = |values: &Vec<i32>| {
                assert_eq!(values.len(), 3);
                assert!((0..=9).contains(&values[0]));
                assert!((100..=109).contains(&values[1]));
                assert_eq!(values[2], 7);
            };
            check(tree.value());
            for child in tree.shrinks() {
                check(child.value());
            }
        }
    }

    #[test]
    fn test_tuple3_shrinks_each_component() {
        let generator = tuple3(choose(0i32, 100), returns('x'), choose(0u8, 100));
        let tree = (0..100)
            .map(|seed| draw(&generator, 0, seed))
            .find(|tree| tree.value().0 != 0 && tree.value().2 != 0)
            .expect("some seed draws non-zero components");

        let shrinks: Vec<(i32, char, u8)> = tree.shrinks().map(|c| *c.value()).collect();
        let (a, _, c) = *tree.value();
        assert_eq!(shrinks[0], (0, 'x', c));
        assert!(shrinks.contains(&(a, 'x', 0)));
    }

    #[test]
    fn test_dictionary_keeps_keys() {
        let generator = dictionary(vec![("age", choose(0u32, 120)), ("height", choose(50u32, 250))]);
        for seed in 0..20 {
            let tree = draw(&generator, 0, seed);
            let keys: Vec<&str> = tree.value().keys().copied().collect();
            assert_eq!(keys, vec!["age", "height"]);
            for child in tree.shrinks() {
                assert_eq!(child.value().len(), 2);
            }
        }
    }

    #[test]
    fn test_dictionary_of_is_size_driven() {
        let generator = dictionary_of(choose(0u8, 255), choose(0i32, 9));
        for seed in 0..20 {
            let size = (seed % 5) as usize;
            assert!(draw(&generator, size, seed).value().len() <= size);
        }
    }
}
