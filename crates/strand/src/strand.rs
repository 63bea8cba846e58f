//! The byte-backed string view.
//!
//! A [`Strand`] is a half-open byte range `[start, end)` over a shared,
//! immutable UTF-8 buffer, plus a cached flag recording whether the range
//! can contain multi-byte characters. Root strands are built from raw
//! bytes; derived strands come from slicing and splitting and always share
//! the original storage — deriving allocates nothing beyond the handle.
//!
//! Length and hash are not memoized: both are recomputed per call, trading
//! time for a smaller footprint. With multi-byte characters present,
//! [`Strand::len`] and [`Strand::char_at`] are linear in the range walked;
//! the single-byte fast path is O(1).

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};

use bstr::BStr;

use crate::error::StrandError;
use crate::iter::StrandIter;
use crate::kmp::KmpSearcher;
use crate::utf8;

/// A character-sequence view over a shared UTF-8 byte buffer.
///
/// Cloning a strand, slicing it, or splitting it never copies text: every
/// view holds a reference-counted handle to the same storage and its own
/// `[start, end)` range. The buffer is immutable for as long as any strand
/// over it exists, so concurrent reads from multiple threads are safe.
///
/// Both view boundaries always coincide with character boundaries; every
/// public byte-offset slicing path validates this and rejects offsets that
/// land inside a multi-byte encoding.
#[derive(Clone)]
pub struct Strand {
    buf: Arc<[u8]>,
    start: usize,
    end: usize,
    multibyte: bool,
}

/// True when any byte has its high bit set, i.e. the range holds at least
/// one multi-byte character (assuming well-formed UTF-8).
fn has_high_bit(bytes: &[u8]) -> bool {
    bytes.iter().any(|&b| b & 0x80 != 0)
}

impl Strand {
    /// Creates a strand over a private copy of `bytes`, leaving the caller
    /// free to reuse its buffer. Scans once for multi-byte characters.
    #[must_use]
    pub fn new(bytes: &[u8]) -> Self {
        Self::from_arc(Arc::from(bytes))
    }

    /// Creates a strand sharing `buf` without copying. Scans once for
    /// multi-byte characters.
    #[must_use]
    pub fn from_arc(buf: Arc<[u8]>) -> Self {
        let multibyte = has_high_bit(&buf);
        Self::from_arc_with_hint(buf, multibyte)
    }

    /// Creates a strand sharing `buf` without copying or scanning, trusting
    /// the caller's `multibyte` flag. Constant time and memory.
    ///
    /// The flag must be conservative-correct: `true` is always safe,
    /// `false` is only correct when no byte of `buf` has its high bit set.
    /// An incorrect `false` makes character-indexed operations misreport.
    #[must_use]
    pub fn from_arc_with_hint(buf: Arc<[u8]>, multibyte: bool) -> Self {
        let end = buf.len();
        Self {
            buf,
            start: 0,
            end,
            multibyte,
        }
    }

    /// The raw bytes of this view.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[self.start..self.end]
    }

    /// The view as `&str`, if its bytes are valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(self.as_bytes()).ok()
    }

    /// Length of the view in bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.end - self.start
    }

    /// True when the view spans no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when this view may contain multi-byte characters.
    ///
    /// The flag is conservative: `false` guarantees single-byte content and
    /// enables the O(1) indexing paths; `true` may be carried by a derived
    /// view that happens to hold only ASCII.
    #[must_use]
    pub fn has_multibyte_chars(&self) -> bool {
        self.multibyte
    }

    /// Length of the view in characters.
    ///
    /// O(1) when the view is known single-byte, otherwise a linear width
    /// walk over the range.
    #[must_use]
    pub fn len(&self) -> usize {
        if !self.multibyte {
            return self.end - self.start;
        }
        let mut count = 0;
        let mut at = self.start;
        while at < self.end {
            match utf8::char_width(self.buf[at]) {
                Some(w) => {
                    count += 1;
                    at += w;
                }
                None => {
                    debug_assert!(false, "buffer violates the UTF-8 validity contract");
                    break;
                }
            }
        }
        count
    }

    /// The character at character offset `index`, as a 16-bit code unit.
    ///
    /// O(1) when the view is known single-byte, otherwise O(`index`).
    ///
    /// # Errors
    ///
    /// [`StrandError::IndexOutOfRange`] if `index >= len()`;
    /// [`StrandError::InvalidEncoding`] if the walk hits a byte that is not
    /// a valid character header.
    pub fn char_at(&self, index: usize) -> Result<u16, StrandError> {
        if !self.multibyte {
            let len = self.end - self.start;
            if index >= len {
                return Err(StrandError::IndexOutOfRange { index, len });
            }
            return Ok(u16::from(self.buf[self.start + index]));
        }
        let at = self.advance_chars(self.start, index, index)?;
        if at >= self.end {
            return Err(self.out_of_range(index));
        }
        utf8::decode_code_unit(&self.buf[..self.end], at)
    }

    /// A zero-copy sub-view spanning character offsets `[from, to)`.
    ///
    /// Offsets are converted to byte positions by walking from the start of
    /// the view: O(`to`) with multi-byte characters present, O(1) without.
    ///
    /// # Errors
    ///
    /// [`StrandError::IndexOutOfRange`] if `from > to` or the walk reaches
    /// the end of the view before covering `to` characters.
    pub fn sub_sequence(&self, from: usize, to: usize) -> Result<Self, StrandError> {
        if from > to {
            return Err(StrandError::IndexOutOfRange {
                index: from,
                len: to,
            });
        }
        if !self.multibyte {
            let len = self.end - self.start;
            if to > len {
                return Err(StrandError::IndexOutOfRange { index: to, len });
            }
            return Ok(self.derive(self.start + from, self.start + to));
        }
        let sub_start = self.advance_chars(self.start, from, from)?;
        let sub_end = self.advance_chars(sub_start, to - from, to)?;
        Ok(self.derive(sub_start, sub_end))
    }

    /// A zero-copy sub-view spanning byte offsets `[from, to)`, both
    /// relative to this view.
    ///
    /// # Errors
    ///
    /// [`StrandError::IndexOutOfRange`] on a backwards or oversized range;
    /// [`StrandError::InvalidBoundary`] if either offset lands inside a
    /// multi-byte character.
    pub fn substrand(&self, from: usize, to: usize) -> Result<Self, StrandError> {
        let len = self.end - self.start;
        if from > to || to > len {
            return Err(StrandError::IndexOutOfRange {
                index: from.max(to),
                len,
            });
        }
        let abs_start = self.start + from;
        let abs_end = self.start + to;
        self.check_boundary(abs_start)?;
        self.check_boundary(abs_end)?;
        Ok(self.derive(abs_start, abs_end))
    }

    /// True when the view's bytes begin with `prefix`.
    #[must_use]
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.as_bytes().starts_with(prefix)
    }

    /// True when the view's bytes end with `suffix`.
    #[must_use]
    pub fn ends_with(&self, suffix: &[u8]) -> bool {
        self.as_bytes().ends_with(suffix)
    }

    /// Character offset of the first occurrence of `pattern`, or `None`.
    ///
    /// An empty pattern matches immediately: `index_of(b"")` is `Some(0)`.
    #[must_use]
    pub fn index_of(&self, pattern: &[u8]) -> Option<usize> {
        self.index_of_from(pattern, 0)
    }

    /// Character offset of the first occurrence of `pattern` at or after
    /// the raw byte offset `from` (relative to this view), or `None`.
    ///
    /// The scan is KMP over the byte range; the matching byte position is
    /// then converted to a character offset by walking from the start of
    /// the view, so the returned index is in characters even though `from`
    /// is in bytes.
    #[must_use]
    pub fn index_of_from(&self, pattern: &[u8], from: usize) -> Option<usize> {
        if from > self.end - self.start {
            return None;
        }
        let searcher = KmpSearcher::borrowed(pattern);
        let hit = searcher.find(&self.buf, self.start + from, self.end)?;

        let mut chars = 0;
        let mut at = self.start;
        while at < hit {
            let Some(w) = utf8::char_width(self.buf[at]) else {
                debug_assert!(false, "buffer violates the UTF-8 validity contract");
                return None;
            };
            at += w;
            chars += 1;
        }
        Some(chars)
    }

    /// [`index_of`](Self::index_of) over the UTF-8 bytes of `pattern`.
    #[must_use]
    pub fn index_of_str(&self, pattern: &str) -> Option<usize> {
        self.index_of(pattern.as_bytes())
    }

    /// Splits the view at each occurrence of the literal byte sequence
    /// `separator`, returning the zero-copy pieces without the separator.
    ///
    /// The separator is never a pattern language. Interior empty pieces are
    /// kept; trailing empty pieces are trimmed, mirroring conventional
    /// split semantics. Each piece carries its own locally-computed
    /// multi-byte flag.
    ///
    /// # Errors
    ///
    /// [`StrandError::EmptySeparator`] if `separator` is empty.
    pub fn split(&self, separator: &[u8]) -> Result<Vec<Self>, StrandError> {
        self.split_impl(separator, usize::MAX)
    }

    /// Like [`split`](Self::split), but producing at most `max_splits`
    /// pieces. When more separators exist, the final piece is the unsplit
    /// remainder after the last retained separator.
    ///
    /// # Errors
    ///
    /// [`StrandError::EmptySeparator`] if `separator` is empty.
    pub fn split_limit(&self, separator: &[u8], max_splits: usize) -> Result<Vec<Self>, StrandError> {
        self.split_impl(separator, max_splits)
    }

    /// Single-pass scan. On a partial separator match that mismatches, the
    /// attempt restarts at the next byte — or at the mismatching byte
    /// itself when it equals the separator's first byte, the overlap-aware
    /// restart that stands in for a degenerate KMP fallback.
    fn split_impl(&self, sep: &[u8], max_splits: usize) -> Result<Vec<Self>, StrandError> {
        if sep.is_empty() {
            return Err(StrandError::EmptySeparator);
        }
        let mut pieces: Vec<Self> = Vec::new();
        if max_splits == 0 {
            return Ok(pieces);
        }

        let mut token_start = self.start;
        let mut match_start = self.start;
        let mut matched = 0;
        let mut i = self.start;
        while i < self.end && pieces.len() + 1 < max_splits {
            let b = self.buf[i];
            if b == sep[matched] {
                if matched == 0 {
                    match_start = i;
                }
                matched += 1;
                if matched == sep.len() {
                    pieces.push(self.derive(token_start, match_start));
                    token_start = i + 1;
                    matched = 0;
                }
            } else if b == sep[0] {
                match_start = i;
                matched = 1;
            } else {
                matched = 0;
            }
            i += 1;
        }

        if token_start < self.end {
            pieces.push(self.derive(token_start, self.end));
        }
        while pieces.last().is_some_and(Self::is_empty) {
            pieces.pop();
        }
        Ok(pieces)
    }

    /// The polynomial byte hash `31 * acc + byte` over the view's range.
    ///
    /// Deliberately a byte hash, not a character hash: O(byte length) and
    /// stable regardless of multi-byte content.
    #[must_use]
    pub fn hash_code(&self) -> u32 {
        self.as_bytes()
            .iter()
            .fold(0u32, |acc, &b| acc.wrapping_mul(31).wrapping_add(u32::from(b)))
    }

    /// A forward character iterator over this view.
    #[must_use]
    pub fn iter(&self) -> StrandIter<'_> {
        StrandIter::new(self)
    }

    /// The full backing buffer (not restricted to this view's range).
    pub(crate) fn buffer(&self) -> &[u8] {
        &self.buf
    }

    /// This view's absolute byte range within the backing buffer.
    pub(crate) fn byte_range(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// A derived view over absolute byte offsets, recomputing the
    /// multi-byte flag locally so an ASCII-only slice of a multi-byte
    /// strand regains the O(1) indexing paths.
    pub(crate) fn derive(&self, start: usize, end: usize) -> Self {
        let multibyte = self.multibyte && has_high_bit(&self.buf[start..end]);
        Self {
            buf: Arc::clone(&self.buf),
            start,
            end,
            multibyte,
        }
    }

    /// Rejects an absolute offset that does not start a character (the end
    /// of the view counts as a boundary).
    pub(crate) fn check_boundary(&self, at: usize) -> Result<(), StrandError> {
        if at == self.end || utf8::char_width(self.buf[at]).is_some() {
            Ok(())
        } else {
            Err(StrandError::InvalidBoundary { offset: at })
        }
    }

    /// Advances `count` characters from the absolute byte offset `at`,
    /// erroring with `requested` as the reported index if the view ends
    /// first. Landing exactly on the end is allowed.
    fn advance_chars(
        &self,
        mut at: usize,
        count: usize,
        requested: usize,
    ) -> Result<usize, StrandError> {
        for _ in 0..count {
            if at >= self.end {
                return Err(self.out_of_range(requested));
            }
            let lead = self.buf[at];
            let w = utf8::char_width(lead).ok_or(StrandError::InvalidEncoding {
                byte: lead,
                offset: at,
            })?;
            at += w;
        }
        Ok(at)
    }

    fn out_of_range(&self, index: usize) -> StrandError {
        StrandError::IndexOutOfRange {
            index,
            len: self.len(),
        }
    }
}

impl PartialEq for Strand {
    /// Byte-for-byte equality of the two ranges.
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Strand {}

impl PartialEq<str> for Strand {
    /// Character-by-character comparison against the UTF-16 code units of
    /// `other`, covering sequences of a different concrete representation.
    /// Under the BMP-only model a code point beyond the BMP never compares
    /// equal to its truncated decoded unit.
    fn eq(&self, other: &str) -> bool {
        if !self.multibyte {
            return self.as_bytes() == other.as_bytes();
        }
        let mut units = other.encode_utf16();
        let mut at = self.start;
        while at < self.end {
            let Ok(unit) = utf8::decode_code_unit(&self.buf[..self.end], at) else {
                return false;
            };
            if units.next() != Some(unit) {
                return false;
            }
            // Width is valid: decode just classified this lead byte.
            at += utf8::char_width(self.buf[at]).unwrap_or(1);
        }
        units.next().is_none()
    }
}

impl PartialEq<&str> for Strand {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl Hash for Strand {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl fmt::Display for Strand {
    /// Decodes the full range to text. Lossy on buffers that violate the
    /// construction-time validity contract, so formatting never fails.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(BStr::new(self.as_bytes()), f)
    }
}

impl fmt::Debug for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Strand")
            .field(&BStr::new(self.as_bytes()))
            .finish()
    }
}

impl From<&str> for Strand {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<String> for Strand {
    fn from(s: String) -> Self {
        Self::from(s.into_bytes())
    }
}

impl From<Vec<u8>> for Strand {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_arc(Arc::from(bytes))
    }
}

impl From<Arc<[u8]>> for Strand {
    fn from(buf: Arc<[u8]>) -> Self {
        Self::from_arc(buf)
    }
}

impl AsRef<[u8]> for Strand {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<'a> IntoIterator for &'a Strand {
    type Item = u16;
    type IntoIter = StrandIter<'a>;

    fn into_iter(self) -> StrandIter<'a> {
        self.iter()
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::fmt;

    use serde::de::Visitor;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Strand;

    impl Serialize for Strand {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self.as_str() {
                Some(s) => serializer.serialize_str(s),
                None => serializer.serialize_bytes(self.as_bytes()),
            }
        }
    }

    struct StrandVisitor;

    impl Visitor<'_> for StrandVisitor {
        type Value = Strand;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or byte sequence")
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Strand, E> {
            Ok(Strand::from(v))
        }

        fn visit_string<E: serde::de::Error>(self, v: String) -> Result<Strand, E> {
            Ok(Strand::from(v))
        }

        fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<Strand, E> {
            Ok(Strand::new(v))
        }

        fn visit_byte_buf<E: serde::de::Error>(self, v: Vec<u8>) -> Result<Strand, E> {
            Ok(Strand::from(v))
        }
    }

    impl<'de> Deserialize<'de> for Strand {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_str(StrandVisitor)
        }
    }
}
