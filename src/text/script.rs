use crate::{model::Metadata, text::segment::segment};

/// Closing line shared by composed scripts and the outro slide.
pub const CLOSING_LINE: &str = "For more updates, stay tuned.";

const MAX_POINTS: usize = 2;
const FALLBACK_POINT_CHARS: usize = 140;

/// Compose a newline-separated script from article metadata.
///
/// The title comes first, followed by up to two description sentences that the title does not
/// already contain, then [`CLOSING_LINE`]. When the description yields fewer than two such
/// sentences its first 140 characters stand in as the single point.
pub fn compose_script(metadata: &Metadata) -> String {
    let title = metadata.title.trim();
    let desc = metadata.description.trim();
    let title_lower = title.to_lowercase();

    let mut points = Vec::new();
    for s in segment(desc) {
        let s = s.replace('\u{a0}', " ");
        let s = s.trim();
        if s.is_empty() {
            continue;
        }
        if !title.is_empty() && title_lower.contains(&s.to_lowercase()) {
            continue;
        }
        points.push(s.to_string());
        if points.len() >= MAX_POINTS {
            break;
        }
    }

    if points.len() < MAX_POINTS && !desc.is_empty() {
        let head: String = desc.chars().take(FALLBACK_POINT_CHARS).collect();
        points = vec![head.trim().to_string()];
    }

    std::iter::once(title.to_string())
        .chain(points)
        .chain(std::iter::once(CLOSING_LINE.to_string()))
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "../../tests/unit/text/script.rs"]
mod tests;
