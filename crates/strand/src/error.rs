use thiserror::Error;

/// Errors reported by strand operations.
///
/// Every error is returned synchronously from the offending call; nothing is
/// retried or recovered internally. Recovery policy belongs to the caller.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StrandError {
    /// The byte at `offset` is not a legal UTF-8 character header.
    ///
    /// Fatal to the decode call that hit it: no best-effort character is
    /// produced.
    #[error("byte 0x{byte:02x} at offset {offset} is not a valid UTF-8 character header")]
    InvalidEncoding {
        /// The offending byte value.
        byte: u8,
        /// Byte offset at which the byte was read.
        offset: usize,
    },

    /// A character or byte index fell outside the valid range.
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The length of the range that was indexed.
        len: usize,
    },

    /// A slice boundary landed inside a multi-byte character encoding.
    #[error("offset {offset} falls inside a multi-byte character")]
    InvalidBoundary {
        /// Byte offset of the rejected boundary.
        offset: usize,
    },

    /// `split` was called with a zero-length separator.
    #[error("separator must not be empty")]
    EmptySeparator,
}
