#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use strand::{KmpSearcher, Strand};

#[derive(Arbitrary, Debug)]
struct Case {
    text: String,
    pattern: Vec<u8>,
    separator: String,
}

fn naive_find(text: &[u8], pattern: &[u8]) -> Option<usize> {
    if pattern.is_empty() {
        return Some(0);
    }
    if text.len() < pattern.len() {
        return None;
    }
    (0..=text.len() - pattern.len()).find(|&i| &text[i..i + pattern.len()] == pattern)
}

fuzz_target!(|case: Case| {
    let strand = Strand::from(case.text.as_str());

    // Search agrees with the naive oracle on arbitrary byte patterns.
    let searcher = KmpSearcher::new(&case.pattern);
    let bytes = case.text.as_bytes();
    assert_eq!(
        searcher.find(bytes, 0, bytes.len()),
        naive_find(bytes, &case.pattern)
    );

    // Length always agrees with the iterator.
    assert_eq!(strand.len(), strand.iter().count());

    // Splitting never loses interior text: joining the pieces with the
    // separator reproduces the input up to a trailing delimiter run.
    let sep = case.separator.as_bytes();
    if !sep.is_empty() {
        let pieces = strand.split(sep).unwrap();
        let joined = pieces
            .iter()
            .map(Strand::as_bytes)
            .collect::<Vec<_>>()
            .join(sep);
        assert!(bytes.starts_with(&joined));
        for piece in &pieces {
            assert!(piece.byte_len() <= strand.byte_len());
        }
    }
});
