//! Range and choice generators: `choose`, `elements`, `one_of`, `frequency`.

use std::rc::Rc;

use num_traits::PrimInt;
use rand::distributions::uniform::SampleUniform;

use crate::generator::{Gen, Generator};
use crate::rose::RoseTree;

/// Uniform integer in `[lo, hi]`.
///
/// Shrinks toward the in-range value nearest zero, first jumping straight to
/// it, then halving the remaining distance. Every candidate stays in range.
///
/// # Panics
///
/// Panics if `lo > hi`.
pub fn choose<T>(lo: T, hi: T) -> Gen<T>
where
    T: PrimInt + SampleUniform + 'static,
{
    assert!(lo <= hi, "choose requires lo <= hi");
    let target = shrink_target(lo, hi);

    Gen::new(move |_size, mut source| {
        let value = source.next_in_range(lo, hi);
        Ok(RoseTree::unfold(value, move |current| towards(target, *current)))
    })
}

/// The in-range value closest to zero
fn shrink_target<T: PrimInt>(lo: T, hi: T) -> T {
    if lo > T::zero() {
        lo
    } else if hi < T::zero() {
        hi
    } else {
        T::zero()
    }
}

/// Candidates between `target` and `value`, closest to `target` first
pub(crate) fn towards<T: PrimInt>(target: T, value: T) -> Vec<T> {
    if target == value {
        return Vec::new();
    }

    let two = T::one() + T::one();
    let mut candidates = vec![target];
    if value > target {
        let mut step = half_distance(target, value, two);
        while step != T::zero() {
            candidates.push(value - step);
            step = step / two;
        }
    } else {
        let mut step = half_distance(value, target, two);
        while step != T::zero() {
            candidates.push(value + step);
            step = step / two;
        }
    }
    candidates
}

/// Half of `high - low`, without overflowing when the distance does not fit in `T`
fn half_distance<T: PrimInt>(low: T, high: T, two: T) -> T {
    match high.checked_sub(&low) {
        Some(distance) => distance / two,
        None => high / two - low / two,
    }
}

/// Pick one of `values`; shrinks to the values listed before it, in order.
///
/// # Panics
///
/// Panics if `values` is empty.
pub fn elements<T>(values: Vec<T>) -> Gen<T>
where
    T: Clone + 'static,
{
    assert!(!values.is_empty(), "elements requires at least one value");
    let values = Rc::new(values);

    Gen::new(move |_size, mut source| {
        let index = source.next_in_range(0, values.len() - 1);
        let lookup = Rc::clone(&values);
        Ok(RoseTree::unfold(index, |index| (0..*index).collect())
            .map(move |index| lookup[index].clone()))
    })
}

/// Draw from one of `generators`, chosen uniformly.
///
/// Shrinking stays within the chosen alternative.
///
/// # Panics
///
/// Panics if `generators` is empty.
pub fn one_of<T: 'static>(generators: Vec<Gen<T>>) -> Gen<T> {
    assert!(!generators.is_empty(), "one_of requires at least one generator");

    Gen::new(move |size, source| {
        let (mut pick, rest) = source.split();
        let index = pick.next_in_range(0, generators.len() - 1);
        generators[index].generate(size, rest)
    })
}

/// Draw from one of `weighted` generators, chosen with probability
/// proportional to its weight.
///
/// # Panics
///
/// Panics if `weighted` is empty or every weight is zero.
pub fn frequency<T: 'static>(weighted: Vec<(u32, Gen<T>)>) -> Gen<T> {
    let total: u64 = weighted.iter().map(|(weight, _)| u64::from(*weight)).sum();
    assert!(total > 0, "frequency requires a positive total weight");

    Gen::new(move |size, source| {
        let (mut pick, rest) = source.split();
        let mut ticket = pick.next_in_range(1, total);
        for (weight, generator) in &weighted {
            let weight = u64::from(*weight);
            if ticket <= weight {
                return generator.generate(size, rest);
            }
            ticket -= weight;
        }
        unreachable!("ticket is bounded by the total weight")
    })
}
