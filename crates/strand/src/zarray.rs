//! Z-array construction: per-position longest common prefix between a
//! pattern and its own suffixes.
//!
//! This is the preprocessing step shared by Boyer-Moore-class matchers
//! (Apostolico-Giancarlo, Galil). Only the table is built here; a search
//! loop over external text is a consumer concern.

use alloc::vec;
use alloc::vec::Vec;

/// Computes, for each position `i >= 1` of `pattern`, the length of the
/// longest substring starting at `i` that matches a prefix of `pattern`.
/// Index 0 is degenerate (the whole pattern trivially matches itself) and
/// is left as 0.
///
/// Maintains the rightmost known prefix-matching window `[l, r)`: inside
/// the window an already-computed entry is reused when it is strictly
/// shorter than the remaining guaranteed match, otherwise the comparison is
/// extended explicitly past the window edge. Overall O(n).
///
/// ```
/// use strand::common_prefix_lengths;
///
/// assert_eq!(common_prefix_lengths(b"aabaabc"), [0, 1, 0, 3, 1, 0, 0]);
/// ```
#[must_use]
pub fn common_prefix_lengths(pattern: &[u8]) -> Vec<usize> {
    let n = pattern.len();
    let mut z = vec![0usize; n];
    let mut l = 0;
    let mut r = 0;
    for i in 1..n {
        let mut k = if i < r { z[i - l].min(r - i) } else { 0 };
        while i + k < n && pattern[k] == pattern[i + k] {
            k += 1;
        }
        z[i] = k;
        if i + k > r {
            l = i;
            r = i + k;
        }
    }
    z
}
