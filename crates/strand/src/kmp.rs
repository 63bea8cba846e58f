//! Knuth-Morris-Pratt exact byte search.
//!
//! The searcher owns (or borrows) a pattern and its precomputed failure
//! function, and scans a byte range of an external buffer in a single pass.
//! Total cost is O(range length + pattern length); the text is never
//! re-examined after a mismatch.

use alloc::borrow::Cow;
use alloc::vec;
use alloc::vec::Vec;

/// A compiled pattern for exact byte-sequence search.
///
/// ```
/// use strand::KmpSearcher;
///
/// let searcher = KmpSearcher::new(b"world");
/// assert_eq!(searcher.find(b"hello world", 0, 11), Some(6));
/// assert_eq!(searcher.find(b"hello world", 7, 11), None);
/// ```
#[derive(Debug, Clone)]
pub struct KmpSearcher<'p> {
    pattern: Cow<'p, [u8]>,
    pi: Vec<usize>,
}

impl KmpSearcher<'static> {
    /// Compiles `pattern` into a searcher holding a private copy of it.
    #[must_use]
    pub fn new(pattern: &[u8]) -> Self {
        Self::from_cow(Cow::Owned(pattern.to_vec()))
    }
}

impl<'p> KmpSearcher<'p> {
    /// Compiles `pattern` without copying it; the searcher borrows the
    /// pattern bytes for its lifetime.
    #[must_use]
    pub fn borrowed(pattern: &'p [u8]) -> Self {
        Self::from_cow(Cow::Borrowed(pattern))
    }

    /// Compiles a pattern that is either borrowed or owned.
    #[must_use]
    pub fn from_cow(pattern: Cow<'p, [u8]>) -> Self {
        let pi = failure_function(&pattern);
        Self { pattern, pi }
    }

    /// The pattern this searcher was compiled from.
    #[must_use]
    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    /// The failure function: `pi[q]` is the length of the longest proper
    /// prefix of `pattern[..=q]` that is also a suffix of it.
    #[must_use]
    pub fn failure_function(&self) -> &[usize] {
        &self.pi
    }

    /// Returns the starting byte index of the first occurrence of the
    /// pattern in `text[from..to)`, or `None` if there is none.
    ///
    /// `to` is clamped to `text.len()`. An empty pattern matches
    /// immediately at `from`.
    #[must_use]
    pub fn find(&self, text: &[u8], from: usize, to: usize) -> Option<usize> {
        let to = to.min(text.len());
        let m = self.pattern.len();
        if m == 0 {
            return (from <= to).then_some(from);
        }

        let mut q = 0;
        for (i, &b) in text.iter().enumerate().take(to).skip(from) {
            while q > 0 && self.pattern[q] != b {
                q = self.pi[q - 1];
            }
            if self.pattern[q] == b {
                q += 1;
            }
            if q == m {
                return Some(i + 1 - m);
            }
        }
        None
    }
}

/// Standard amortized-linear failure-function computation: maintain the
/// candidate prefix length `k`, extend it on a match, fall back through
/// `pi[k - 1]` on a mismatch.
fn failure_function(pattern: &[u8]) -> Vec<usize> {
    let mut pi = vec![0usize; pattern.len()];
    let mut k = 0;
    for q in 1..pattern.len() {
        while k > 0 && pattern[k] != pattern[q] {
            k = pi[k - 1];
        }
        if pattern[k] == pattern[q] {
            k += 1;
        }
        pi[q] = k;
    }
    pi
}
