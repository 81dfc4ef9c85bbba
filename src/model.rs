use image::RgbaImage;

use crate::text::segment::dedupe;

/// Source label used when metadata carries none.
pub const DEFAULT_SOURCE: &str = "News";

/// Placeholders used when neither the script nor the headline yields any bullet.
pub const FALLBACK_BULLETS: [&str; 3] = ["Latest update", "Key details", "More updates soon"];

pub const MAX_BULLETS: usize = 4;
pub const MAX_SLIDE_BULLETS: usize = 3;

/// Article metadata supplied by the caller. Every field is optional on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: String,
    pub source: String,
}

impl Metadata {
    pub fn source_label(&self) -> &str {
        non_blank(&self.source).unwrap_or(DEFAULT_SOURCE)
    }

    pub fn headline(&self) -> Option<&str> {
        non_blank(&self.title)
    }

    pub fn image_url(&self) -> Option<&str> {
        non_blank(&self.image_url)
    }
}

fn non_blank(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

/// Ordered, case-insensitively unique, never-empty list of at most [`MAX_BULLETS`] lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BulletList(Vec<String>);

impl BulletList {
    /// Dedupe, cap, and fall back to [`FALLBACK_BULLETS`] when nothing survives.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lines = dedupe(lines);
        lines.truncate(MAX_BULLETS);
        if lines.is_empty() {
            return Self::fallback();
        }
        Self(lines)
    }

    pub fn fallback() -> Self {
        Self(FALLBACK_BULLETS.iter().map(|s| s.to_string()).collect())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> &str {
        &self.0[0]
    }

    /// Everything after the headline bullet; the headline itself when it stands alone.
    pub fn key_points(&self) -> Vec<String> {
        let points = if self.0.len() > 1 {
            dedupe(&self.0[1..self.0.len().min(MAX_BULLETS)])
        } else {
            Vec::new()
        };
        if points.is_empty() {
            vec![self.first().to_string()]
        } else {
            points
        }
    }
}

/// One slide's content, immutable once built.
#[derive(Clone, Debug)]
pub struct SlideSpec {
    pub title: String,
    pub bullets: Vec<String>,
    pub background: RgbaImage,
    pub source_label: String,
    pub show_illustration: bool,
}

impl SlideSpec {
    pub fn new(
        title: impl Into<String>,
        bullets: impl IntoIterator<Item = String>,
        background: RgbaImage,
        source_label: impl Into<String>,
        show_illustration: bool,
    ) -> Self {
        Self {
            title: title.into(),
            bullets: bullets.into_iter().take(MAX_SLIDE_BULLETS).collect(),
            background,
            source_label: source_label.into(),
            show_illustration,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/model.rs"]
mod tests;
