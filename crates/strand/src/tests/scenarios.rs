use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec::Vec;

use rstest::rstest;

use crate::{Strand, StrandError};

#[test]
fn accented_text_counts_characters_not_bytes() {
    let s = Strand::from("héllo wörld");
    assert_eq!(s.byte_len(), 13);
    assert_eq!(s.len(), 11);
    assert!(s.has_multibyte_chars());
    assert_eq!(s.char_at(1).unwrap(), 'é' as u16);
    assert_eq!(s.char_at(0).unwrap(), u16::from(b'h'));
    assert_eq!(s.char_at(10).unwrap(), u16::from(b'd'));
}

#[test]
fn accented_text_splits_into_words() {
    let s = Strand::from("héllo wörld");
    let words = s.split(b" ").unwrap();
    assert_eq!(words.len(), 2);
    assert_eq!(words[0], "héllo");
    assert_eq!(words[1], "wörld");
    assert_eq!(words[0].len(), 5);
    assert_eq!(words[1].len(), 5);
}

#[test]
fn index_of_returns_character_offsets() {
    let s = Strand::from("hello world");
    assert_eq!(s.index_of(b"world"), Some(6));

    // With a two-byte character ahead of the match, the byte offset (7)
    // and the character offset (6) diverge.
    let s = Strand::from("héllo wörld");
    assert_eq!(s.index_of_str("wörld"), Some(6));
    assert_eq!(s.index_of(b"zzz"), None);
}

#[test]
fn index_of_from_skips_earlier_occurrences() {
    let s = Strand::from("hello hello");
    assert_eq!(s.index_of(b"hello"), Some(0));
    assert_eq!(s.index_of_from(b"hello", 1), Some(6));
    assert_eq!(s.index_of_from(b"hello", 7), None);
    assert_eq!(s.index_of_from(b"hello", 12), None);
}

#[test]
fn empty_pattern_matches_immediately() {
    let s = Strand::from("abc");
    assert_eq!(s.index_of(b""), Some(0));
    assert_eq!(s.index_of_from(b"", 2), Some(2));
}

#[test]
fn empty_separator_is_rejected() {
    let s = Strand::from("abc");
    assert_eq!(s.split(b"").unwrap_err(), StrandError::EmptySeparator);
    assert_eq!(
        s.split_limit(b"", 3).unwrap_err(),
        StrandError::EmptySeparator
    );
}

#[rstest]
#[case("a,b,c", b",", &["a", "b", "c"])]
#[case("a,,b", b",", &["a", "", "b"])]
#[case(",a", b",", &["", "a"])]
#[case("a,b,,", b",", &["a", "b"])]
#[case(",,", b",", &[])]
#[case("", b",", &[])]
#[case("no separators", b"|", &["no separators"])]
#[case("abcabd", b"abd", &["abc"])]
#[case("one--two--three", b"--", &["one", "two", "three"])]
fn split_cases(#[case] text: &str, #[case] sep: &[u8], #[case] expected: &[&str]) {
    let s = Strand::from(text);
    let pieces = s.split(sep).unwrap();
    assert_eq!(pieces.len(), expected.len(), "{text:?} by {sep:?}");
    for (piece, want) in pieces.iter().zip(expected.iter()) {
        assert_eq!(piece, want);
    }
}

#[test]
fn split_restarts_on_the_separators_first_byte() {
    // The mismatching byte doubles as a new match start: the separator
    // occurrence at offset 1 is still found.
    let s = Strand::from("aab");
    let pieces = s.split(b"ab").unwrap();
    assert_eq!(pieces.len(), 1);
    assert_eq!(pieces[0], "a");
}

#[test]
fn split_limit_leaves_the_remainder_unsplit() {
    let s = Strand::from("a,b,c,d");
    let pieces = s.split_limit(b",", 3).unwrap();
    assert_eq!(pieces.len(), 3);
    assert_eq!(pieces[0], "a");
    assert_eq!(pieces[1], "b");
    assert_eq!(pieces[2], "c,d");

    let whole = s.split_limit(b",", 1).unwrap();
    assert_eq!(whole.len(), 1);
    assert_eq!(whole[0], "a,b,c,d");

    assert_eq!(s.split_limit(b",", 0).unwrap(), Vec::<Strand>::new());

    // A limit larger than the number of pieces behaves like plain split.
    let all = s.split_limit(b",", 10).unwrap();
    assert_eq!(all.len(), 4);
}

#[test]
fn split_pieces_share_the_backing_buffer() {
    let s = Strand::from("héllo wörld");
    let words = s.split(b" ").unwrap();
    let base = s.as_bytes().as_ptr();
    assert_eq!(words[0].as_bytes().as_ptr(), base);
    assert_eq!(words[1].as_bytes().as_ptr(), s.as_bytes()[7..].as_ptr());
}

#[test]
fn split_narrows_the_multibyte_flag_per_piece() {
    let s = Strand::from("héllo world");
    let words = s.split(b" ").unwrap();
    assert!(words[0].has_multibyte_chars());
    assert!(!words[1].has_multibyte_chars());
}

#[test]
fn sub_sequence_walks_character_offsets() {
    let s = Strand::from("héllo wörld");
    assert_eq!(s.sub_sequence(6, 11).unwrap(), "wörld");
    assert_eq!(s.sub_sequence(0, 5).unwrap(), "héllo");
    assert_eq!(s.sub_sequence(0, 0).unwrap(), "");
    assert_eq!(s.sub_sequence(11, 11).unwrap(), "");
}

#[test]
fn sub_sequence_rejects_bad_ranges() {
    let s = Strand::from("héllo");
    assert!(matches!(
        s.sub_sequence(0, 6),
        Err(StrandError::IndexOutOfRange { .. })
    ));
    assert!(matches!(
        s.sub_sequence(3, 1),
        Err(StrandError::IndexOutOfRange { .. })
    ));
}

#[test]
fn substrand_validates_both_boundaries() {
    let s = Strand::from("héllo");
    // é spans bytes [1, 3)
    assert_eq!(s.substrand(1, 3).unwrap(), "é");
    assert_eq!(
        s.substrand(1, 2).unwrap_err(),
        StrandError::InvalidBoundary { offset: 2 }
    );
    assert_eq!(
        s.substrand(2, 3).unwrap_err(),
        StrandError::InvalidBoundary { offset: 2 }
    );
    assert!(matches!(
        s.substrand(0, 7),
        Err(StrandError::IndexOutOfRange { .. })
    ));
}

#[test]
fn substrand_offsets_are_view_relative() {
    let s = Strand::from("héllo wörld");
    let tail = s.sub_sequence(6, 11).unwrap(); // wörld
    assert_eq!(tail.substrand(1, 3).unwrap(), "ö");
}

#[test]
fn char_at_rejects_out_of_range_indexes() {
    let s = Strand::from("héllo wörld");
    assert_eq!(
        s.char_at(11).unwrap_err(),
        StrandError::IndexOutOfRange { index: 11, len: 11 }
    );

    let ascii = Strand::from("abc");
    assert_eq!(
        ascii.char_at(3).unwrap_err(),
        StrandError::IndexOutOfRange { index: 3, len: 3 }
    );
}

#[test]
fn prefix_and_suffix_tests_compare_raw_bytes() {
    let s = Strand::from("héllo wörld");
    assert!(s.starts_with("héllo".as_bytes()));
    assert!(s.starts_with(b"h"));
    assert!(!s.starts_with(b"H"));
    assert!(s.ends_with("wörld".as_bytes()));
    assert!(s.ends_with(b"d"));
    assert!(!s.ends_with(b"l"));
    // Longer than the view itself.
    assert!(!s.starts_with("héllo wörld!".as_bytes()));
}

#[test]
fn equality_is_byte_equality_between_strands() {
    let a = Strand::from("héllo");
    let b = Strand::from("héllo");
    let c = Strand::from("hello");
    assert_eq!(a, b);
    assert_ne!(a, c);

    // Derived views compare equal to root views over the same text.
    let s = Strand::from("say héllo twice");
    let sub = s.sub_sequence(4, 9).unwrap();
    assert_eq!(sub, a);
}

#[test]
fn equality_against_str_decodes_characters() {
    let s = Strand::from("héllo");
    assert_eq!(s, "héllo");
    assert_ne!(s, "hello");
    assert_ne!(s, "héll");
    assert_ne!(s, "héllos");
}

#[test]
fn astral_code_points_truncate_in_the_bmp_model() {
    let s = Strand::from("\u{1F600}");
    assert_eq!(s.len(), 1);
    assert_eq!(s.char_at(0).unwrap(), 0xF600);
    // The truncated unit never equals the surrogate pair the str encodes.
    assert_ne!(s, "\u{1F600}");
}

#[test]
fn hash_code_is_the_polynomial_byte_hash() {
    assert_eq!(Strand::from("abc").hash_code(), 96354);
    assert_eq!(Strand::from("").hash_code(), 0);

    // Stable across owned and derived views of the same text.
    let s = Strand::from("xxabcxx");
    assert_eq!(s.sub_sequence(2, 5).unwrap().hash_code(), 96354);
}

#[test]
fn display_decodes_the_view() {
    let s = Strand::from("héllo wörld");
    assert_eq!(s.to_string(), "héllo wörld");
    let words = s.split(b" ").unwrap();
    assert_eq!(words[1].to_string(), "wörld");
}

#[test]
fn shared_construction_does_not_copy() {
    let buf: Arc<[u8]> = Arc::from("shared text".as_bytes());
    let s = Strand::from_arc(Arc::clone(&buf));
    assert_eq!(s.as_bytes().as_ptr(), buf.as_ptr());
    assert_eq!(s, "shared text");
}

#[test]
fn multibyte_hint_skips_the_scan() {
    let buf: Arc<[u8]> = Arc::from("plain ascii".as_bytes());
    // A conservative `true` hint must not change observable behavior.
    let s = Strand::from_arc_with_hint(buf, true);
    assert!(s.has_multibyte_chars());
    assert_eq!(s.len(), 11);
    assert_eq!(s.char_at(6).unwrap(), u16::from(b'a'));
}

#[test]
fn as_str_exposes_valid_views() {
    let s = Strand::from("héllo");
    assert_eq!(s.as_str(), Some("héllo"));
}

#[test]
fn errors_format_for_humans() {
    assert_eq!(
        StrandError::EmptySeparator.to_string(),
        "separator must not be empty"
    );
    assert_eq!(
        StrandError::InvalidEncoding {
            byte: 0xA9,
            offset: 4
        }
        .to_string(),
        "byte 0xa9 at offset 4 is not a valid UTF-8 character header"
    );
    assert_eq!(
        StrandError::IndexOutOfRange { index: 9, len: 3 }.to_string(),
        "index 9 is out of range for length 3"
    );
    assert_eq!(
        StrandError::InvalidBoundary { offset: 2 }.to_string(),
        "offset 2 falls inside a multi-byte character"
    );
}
