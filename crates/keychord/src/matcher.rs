//! Sequence matching used to decide whether a bind is present in the
//! currently pressed keys.
//!
//! Two policies are supported:
//!
//! - **Ordered**: the needle must appear in the haystack as a contiguous run,
//!   in the same order.
//! - **Set**: every element of the needle must be present in the haystack at
//!   least as many times as it occurs in the needle. Order and extra elements
//!   are ignored.
//!
//! All functions are pure. They return [`KeyBindError::InvalidArgument`] when
//! called with lengths that can never match; callers are expected to check
//! sizes first.
//!
//! ```
//! use keychord::matcher::{match_as_set, match_ordered};
//!
//! assert!(match_ordered(&[1, 2], &[3, 1, 2, 4]).unwrap());
//! assert!(!match_ordered(&[2, 1], &[3, 1, 2, 4]).unwrap());
//! assert!(match_as_set(&[1, 2], &[2, 1, 5]).unwrap());
//! assert!(!match_as_set(&[1, 1], &[1, 5]).unwrap());
//! ```

use crate::error::{KeyBindError, Result};

fn check_fits(needle: usize, haystack: usize) -> Result<()> {
    if needle > haystack {
        return Err(KeyBindError::invalid_argument(format!(
            "needle of length {needle} is longer than haystack of length {haystack}"
        )));
    }
    Ok(())
}

/// Multiset containment of `needle` in `haystack`.
///
/// Each haystack element can satisfy at most one needle element.
pub fn match_as_set<T: PartialEq>(needle: &[T], haystack: &[T]) -> Result<bool> {
    check_fits(needle.len(), haystack.len())?;
    Ok(contains_multiset(needle, haystack))
}

/// Contiguous, order-preserving search for `needle` in `haystack`.
pub fn match_ordered<T: PartialEq>(needle: &[T], haystack: &[T]) -> Result<bool> {
    check_fits(needle.len(), haystack.len())?;
    if needle.is_empty() {
        return Ok(true);
    }
    Ok(haystack.windows(needle.len()).any(|window| window == needle))
}

/// Compare two sequences of equal length.
///
/// When `order_sensitive` is set the sequences must be elementwise equal,
/// otherwise they must be permutations of each other.
pub fn match_exact<T: PartialEq>(a: &[T], b: &[T], order_sensitive: bool) -> Result<bool> {
    if a.len() != b.len() {
        return Err(KeyBindError::invalid_argument(format!(
            "sequences differ in length ({} vs {})",
            a.len(),
            b.len()
        )));
    }
    if order_sensitive {
        Ok(a == b)
    } else {
        Ok(contains_multiset(a, b))
    }
}

/// Search `needle` in `haystack` with the selected policy.
pub fn find_sequence<T: PartialEq>(
    needle: &[T],
    haystack: &[T],
    order_sensitive: bool,
) -> Result<bool> {
    if order_sensitive {
        match_ordered(needle, haystack)
    } else {
        match_as_set(needle, haystack)
    }
}

fn contains_multiset<T: PartialEq>(needle: &[T], haystack: &[T]) -> bool {
    let mut consumed = vec![false; haystack.len()];
    needle.iter().all(|wanted| {
        let slot = haystack
            .iter()
            .zip(consumed.iter())
            .position(|(candidate, used)| !used && candidate == wanted);
        match slot {
            Some(idx) => {
                consumed[idx] = true;
                true
            }
            None => false,
        }
    })
}
