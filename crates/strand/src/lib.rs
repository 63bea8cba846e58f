//! Low-allocation string handling over raw UTF-8 byte buffers.
//!
//! A [`Strand`] treats a UTF-8 byte buffer as a character sequence without
//! ever decoding it into a wide-character string. Substring slicing,
//! splitting, and tokenizing all produce zero-copy views that share the
//! underlying buffer through a reference-counted handle; pattern search runs
//! directly over the bytes via an embedded Knuth-Morris-Pratt searcher.
//!
//! Characters are decoded one at a time into 16-bit code units. Code points
//! beyond the Basic Multilingual Plane do not fit a single unit and are
//! truncated on decode; this BMP-only character model is a documented
//! limitation, not an error.
//!
//! The library assumes well-formed UTF-8 input. Beyond leading-byte width
//! classification it performs no validation: overlong encodings and invalid
//! continuation bytes pass through undetected.
//!
//! ```
//! use strand::Strand;
//!
//! let s = Strand::from("héllo wörld");
//! assert_eq!(s.len(), 11);
//! assert_eq!(s.char_at(1).unwrap(), 'é' as u16);
//!
//! let words = s.split(b" ").unwrap();
//! assert_eq!(words.len(), 2);
//! assert_eq!(words[0], "héllo");
//! assert_eq!(words[1], "wörld");
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod iter;
mod kmp;
mod strand;
mod utf8;
mod zarray;

#[cfg(test)]
mod tests;

pub use error::StrandError;
pub use iter::StrandIter;
pub use kmp::KmpSearcher;
pub use strand::Strand;
pub use utf8::{char_width, decode_code_unit};
pub use zarray::common_prefix_lengths;
