//! Merge algebra for partial configurations.
//!
//! Implements the two merge contracts the tier fold is built on: a total
//! value overwritten field-by-field by a partial, and an associative merge
//! of two partials producing a partial. Keyed override maps merge entry by
//! entry, so patching one key never erases its siblings.

use std::collections::HashMap;
use std::hash::Hash;

/// Shallow merge of two partial values of the same shape.
///
/// `other` wins on every field where both sides hold a value; fields absent
/// in `other` keep `self`'s value. Implementations must be associative:
///
/// ```text
/// a.merge_partial(b).merge_partial(c) == a.merge_partial(b.merge_partial(c))
/// ```
///
/// which licenses folding an ordered chain of partials in any grouping.
/// The merge is not commutative; order still decides which side wins.
pub trait MergePartial {
    fn merge_partial(self, other: Self) -> Self;
}

/// Merge two optional keyed override maps entry by entry.
///
/// Keys held by only one side pass through as-is; keys held by both merge
/// their values with `merge`. Returns `None` only when both sides are
/// absent, preserving the "no opinion" / "empty" distinction.
pub fn merge_keyed<K, P>(
    merge: impl Fn(P, P) -> P,
    a: Option<HashMap<K, P>>,
    b: Option<HashMap<K, P>>,
) -> Option<HashMap<K, P>>
where
    K: Eq + Hash,
{
    match (a, b) {
        (None, None) => None,
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (Some(mut merged), Some(overlay)) => {
            for (key, value) in overlay {
                let value = match merged.remove(&key) {
                    Some(existing) => merge(existing, value),
                    None => value,
                };
                merged.insert(key, value);
            }
            Some(merged)
        }
    }
}

/// Fold an ordered sequence of optional partials into a total value.
///
/// Starts from `default()` and applies `merge` left to right; `None`
/// entries stand for the empty partial and leave the accumulator as-is.
/// Folding an empty sequence reproduces the default exactly.
pub fn fold_merge<T, P, I>(
    merge: impl Fn(T, P) -> T,
    default: impl FnOnce() -> T,
    partials: I,
) -> T
where
    P: Default,
    I: IntoIterator<Item = Option<P>>,
{
    partials
        .into_iter()
        .fold(default(), |acc, partial| merge(acc, partial.unwrap_or_default()))
}
