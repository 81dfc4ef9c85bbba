use super::*;

#[test]
fn splits_after_terminal_punctuation() {
    assert_eq!(
        segment("Storm hits coast. Thousands evacuated! What next? Stay safe"),
        vec![
            "Storm hits coast.",
            "Thousands evacuated!",
            "What next?",
            "Stay safe"
        ]
    );
}

#[test]
fn collapses_whitespace_and_newlines() {
    assert_eq!(
        segment("  First line.\n\n  Second\tline.  "),
        vec!["First line.", "Second line."]
    );
}

#[test]
fn punctuation_without_following_space_does_not_split() {
    assert_eq!(
        segment("Version 2.5 shipped. Prices rose 3.2%"),
        vec!["Version 2.5 shipped.", "Prices rose 3.2%"]
    );
}

#[test]
fn empty_and_blank_input_yield_nothing() {
    assert!(segment("").is_empty());
    assert!(segment(" \n\t ").is_empty());
}

#[test]
fn segment_is_restartable() {
    let text = "One. Two! Three?";
    assert_eq!(segment(text), segment(text));
}

#[test]
fn dedupe_is_case_insensitive_and_keeps_first() {
    assert_eq!(dedupe(["Alpha", "alpha", "Beta"]), vec!["Alpha", "Beta"]);
}

#[test]
fn dedupe_trims_and_drops_blanks() {
    assert_eq!(
        dedupe(["  Beta ", "", "BETA", "gamma", "   "]),
        vec!["Beta", "gamma"]
    );
}

#[test]
fn near_duplicates_collapse_in_first_appearance_order() {
    let lines = [
        "Storm hits coast.",
        "storm hits coast.",
        "Storm hits coast",
        "STORM HITS COAST!",
        "storm hits coast",
    ];
    let out = dedupe(lines);
    assert!(out.len() <= 4);
    assert_eq!(
        out,
        vec!["Storm hits coast.", "Storm hits coast", "STORM HITS COAST!"]
    );
}
