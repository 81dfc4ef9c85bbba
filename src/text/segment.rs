use std::collections::HashSet;

/// Split script text into sentence-like units.
///
/// Whitespace runs collapse to a single space, a unit ends after `.`, `!` or `?` when followed
/// by whitespace, and empty units are dropped. Pure: the same input always yields the same units.
pub fn segment(text: &str) -> Vec<String> {
    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut start = 0usize;
    let mut chars = cleaned.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        if let Some(&(j, ' ')) = chars.peek() {
            push_unit(&mut out, &cleaned[start..=i]);
            start = j + 1;
        }
    }
    push_unit(&mut out, &cleaned[start..]);
    out
}

fn push_unit(out: &mut Vec<String>, unit: &str) {
    let unit = unit.trim();
    if !unit.is_empty() {
        out.push(unit.to_string());
    }
}

/// Case-insensitive, order-preserving dedupe keyed on the trimmed line.
///
/// The first occurrence wins (trimmed, original casing kept); blank lines are dropped.
pub fn dedupe<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        if seen.insert(line.to_lowercase()) {
            out.push(line.to_string());
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/text/segment.rs"]
mod tests;
