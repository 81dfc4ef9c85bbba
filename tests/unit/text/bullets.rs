use super::*;

fn meta(title: &str) -> Metadata {
    Metadata {
        title: title.to_string(),
        ..Metadata::default()
    }
}

#[test]
fn empty_script_uses_headline_as_only_bullet() {
    let m = meta("Storm hits coast.");
    let b = build_bullets("", Some(&m));
    assert_eq!(b.as_slice(), &["Storm hits coast."]);
    assert_eq!(b.first(), "Storm hits coast.");
}

#[test]
fn no_sentences_and_no_headline_uses_placeholders() {
    let b = build_bullets("   \n ", None);
    assert_eq!(
        b.as_slice(),
        &["Latest update", "Key details", "More updates soon"]
    );
    let b = build_bullets("", Some(&Metadata::default()));
    assert_eq!(b.len(), 3);
}

#[test]
fn headline_leads_and_script_repeat_is_dropped() {
    let m = meta("Storm hits coast.");
    let script = "Storm hits coast.\nWinds reach 120 km/h. Schools are closed. Power is out. Roads flooded.";
    let b = build_bullets(script, Some(&m));
    assert_eq!(
        b.as_slice(),
        &[
            "Storm hits coast.",
            "Winds reach 120 km/h.",
            "Schools are closed.",
            "Power is out."
        ]
    );
}

#[test]
fn script_without_metadata_still_produces_bullets() {
    let b = build_bullets("One. Two.", None);
    assert_eq!(b.as_slice(), &["One.", "Two."]);
}
