use crate::{
    model::{BulletList, Metadata},
    text::segment::segment,
};

/// Bullet list for one render call: the headline first (when present), then the script's
/// sentences, deduped and capped.
pub fn build_bullets(script_text: &str, metadata: Option<&Metadata>) -> BulletList {
    let headline = metadata.and_then(Metadata::headline);
    let sentences = segment(script_text);
    BulletList::new(headline.map(str::to_string).into_iter().chain(sentences))
}

#[cfg(test)]
#[path = "../../tests/unit/text/bullets.rs"]
mod tests;
