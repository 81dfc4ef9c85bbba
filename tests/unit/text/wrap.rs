use super::*;

#[test]
fn short_text_is_one_line() {
    assert_eq!(wrap("Storm hits coast.", 44), vec!["Storm hits coast."]);
}

#[test]
fn wraps_on_word_boundaries() {
    let lines = wrap("the quick brown fox jumps over the lazy dog", 10);
    assert_eq!(
        lines,
        vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]
    );
    assert!(lines.iter().all(|l| l.chars().count() <= 10));
}

#[test]
fn long_words_are_broken() {
    assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    assert_eq!(wrap("ab cdefghij", 5), vec!["ab cd", "efghi", "j"]);
}

#[test]
fn blank_input_has_no_lines() {
    assert!(wrap("   ", 10).is_empty());
}

#[test]
fn counts_chars_not_bytes() {
    assert_eq!(wrap("café café", 4), vec!["café", "café"]);
}
