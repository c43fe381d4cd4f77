//! Size-driven numeric generators.

use crate::choice::{choose, elements};
use crate::generator::{Gen, Size, sized};
use crate::rose::RoseTree;

fn magnitude(size: Size) -> i64 {
    i64::try_from(size).unwrap_or(i64::MAX)
}

/// `false` or `true`; shrinks to `false`
pub fn boolean() -> Gen<bool> {
    elements(vec![false, true])
}

/// Integer in `[-size, size]`
pub fn integer() -> Gen<i64> {
    sized(|size| {
        let bound = magnitude(size);
        choose(-bound, bound)
    })
}

/// Integer in `[0, size]`
pub fn positive_integer() -> Gen<i64> {
    sized(|size| choose(0, magnitude(size)))
}

/// Integer in `[-size, 0]`
pub fn negative_integer() -> Gen<i64> {
    sized(|size| choose(-magnitude(size), 0))
}

/// Integer in `[1, max(size, 1)]`
pub fn strict_positive_integer() -> Gen<i64> {
    sized(|size| choose(1, magnitude(size).max(1)))
}

/// Integer in `[-max(size, 1), -1]`
pub fn strict_negative_integer() -> Gen<i64> {
    sized(|size| choose(-magnitude(size).max(1), -1))
}

/// Finite double in `[-size, size]`.
///
/// Shrinks to `0.0`, then to the truncated value, then by halving the
/// truncation, so shrinking always bottoms out.
pub fn double() -> Gen<f64> {
    Gen::new(|size, mut source| {
        let bound = size as f64;
        let value = (source.next_unit() * 2.0 - 1.0) * bound;
        Ok(RoseTree::unfold(value, shrink_double))
    })
}

/// [`double`] narrowed to `f32`
pub fn float() -> Gen<f32> {
    double().map(|value| value as f32)
}

fn shrink_double(value: &f64) -> Vec<f64> {
    let value = *value;
    if value == 0.0 || !value.is_finite() {
        return Vec::new();
    }

    let mut candidates = vec![0.0];
    let truncated = value.trunc();
    if truncated != value && truncated != 0.0 {
        candidates.push(truncated);
    }
    let halved = (truncated / 2.0).trunc();
    if halved != 0.0 && halved != truncated {
        candidates.push(halved);
    }
    candidates
}
