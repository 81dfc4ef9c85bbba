use super::*;

fn meta(title: &str, description: &str) -> Metadata {
    Metadata {
        title: title.to_string(),
        description: description.to_string(),
        ..Metadata::default()
    }
}

#[test]
fn picks_two_points_not_in_title() {
    let m = meta(
        "Storm hits coast.",
        "Storm hits coast. Winds reach 120 km/h. Schools closed. Power out.",
    );
    assert_eq!(
        compose_script(&m),
        "Storm hits coast.\nWinds reach 120 km/h.\nSchools closed.\nFor more updates, stay tuned."
    );
}

#[test]
fn weak_description_falls_back_to_prefix() {
    let long = "a".repeat(200);
    let m = meta("Title", &long);
    let script = compose_script(&m);
    let lines: Vec<&str> = script.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1].chars().count(), 140);
}

#[test]
fn empty_metadata_yields_only_closing_line() {
    assert_eq!(compose_script(&Metadata::default()), CLOSING_LINE);
}

#[test]
fn non_breaking_spaces_are_normalized() {
    let m = meta("T", "First\u{a0}point here. Second point.");
    assert!(compose_script(&m).contains("First point here."));
}
