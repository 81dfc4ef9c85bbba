//! Immutable configuration values passed explicitly into each pipeline stage.
//!
//! Every struct here has a [`Default`] that reproduces the stock 1280×720 news layout, derives
//! `serde` so it can be overridden from JSON, and exposes a `validate()` that is called once at
//! the pipeline boundary.

use std::{path::PathBuf, time::Duration};

use crate::foundation::{
    core::{Resolution, Rgba8},
    error::{SlidecastError, SlidecastResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PanelStyle {
    pub inset_x: u32,
    pub inset_y: u32,
    pub radius: f32,
    pub fill: Rgba8,
    pub outline: Rgba8,
    pub outline_width: f32,
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            inset_x: 60,
            inset_y: 70,
            radius: 32.0,
            fill: Rgba8::rgba(0, 0, 0, 150),
            outline: Rgba8::rgba(255, 255, 255, 35),
            outline_width: 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Typography {
    pub title_px: f32,
    pub body_px: f32,
    pub source_px: f32,
    pub caption_px: f32,
    pub title_color: Rgba8,
    pub body_color: Rgba8,
    pub source_color: Rgba8,
    pub caption_color: Rgba8,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            title_px: 60.0,
            body_px: 32.0,
            source_px: 30.0,
            caption_px: 26.0,
            title_color: Rgba8::rgb(255, 255, 255),
            body_color: Rgba8::rgb(245, 245, 245),
            source_color: Rgba8::rgb(220, 220, 220),
            caption_color: Rgba8::rgb(10, 10, 10),
        }
    }
}

/// Text anchors and the bullet flow. Positions are top-left pixel coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextLayout {
    pub left_x: f64,
    pub title_top: f64,
    /// Distance from the right frame edge to the end of the source label.
    pub source_right_margin: f64,
    pub source_top: f64,
    pub bullets_top: f64,
    pub line_height: f64,
    pub bullet_gap: f64,
    /// Bullets stop once the cursor would pass `height - bottom_margin`.
    pub bottom_margin: f64,
    pub wrap_chars: usize,
    /// Wrap width used when the right column is not reserved for the illustration.
    pub wrap_chars_full: usize,
    pub max_lines_per_bullet: usize,
    pub bullet_marker: String,
    pub continuation_indent: String,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            left_x: 100.0,
            title_top: 110.0,
            source_right_margin: 100.0,
            source_top: 125.0,
            bullets_top: 215.0,
            line_height: 46.0,
            bullet_gap: 10.0,
            bottom_margin: 160.0,
            wrap_chars: 44,
            wrap_chars_full: 56,
            max_lines_per_bullet: 2,
            bullet_marker: "\u{2022} ".to_string(),
            continuation_indent: "  ".to_string(),
        }
    }
}

impl TextLayout {
    pub fn wrap_width(&self, show_illustration: bool) -> usize {
        if show_illustration {
            self.wrap_chars
        } else {
            self.wrap_chars_full
        }
    }
}

/// Placement of the presenter figure and its speech bubble, both inside the right column.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct IllustrationLayout {
    /// Distance from the right frame edge to the figure's left edge.
    pub right_offset: f64,
    pub top: f64,
    pub scale: f64,
    pub bubble_right_offset: f64,
    pub bubble_top: f64,
    pub bubble_width: f64,
    pub bubble_height: f64,
    pub caption: String,
}

impl Default for IllustrationLayout {
    fn default() -> Self {
        Self {
            right_offset: 280.0,
            top: 230.0,
            scale: 1.05,
            bubble_right_offset: 320.0,
            bubble_top: 528.0,
            bubble_width: 230.0,
            bubble_height: 76.0,
            caption: "Quick update!".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub resolution: Resolution,
    pub panel: PanelStyle,
    pub typography: Typography,
    pub layout: TextLayout,
    pub illustration: IllustrationLayout,
    pub fetch: FetchConfig,
}

impl RenderConfig {
    pub fn validate(&self) -> SlidecastResult<()> {
        let Resolution { width, height } = self.resolution;
        if width == 0 || height == 0 {
            return Err(SlidecastError::validation(
                "resolution width/height must be non-zero",
            ));
        }
        if !width.is_multiple_of(2) || !height.is_multiple_of(2) {
            return Err(SlidecastError::validation(
                "resolution width/height must be even (required for yuv420p output)",
            ));
        }
        if self.panel.inset_x * 2 >= width || self.panel.inset_y * 2 >= height {
            return Err(SlidecastError::validation(
                "panel insets leave no room inside the frame",
            ));
        }

        let l = &self.layout;
        if l.wrap_chars == 0 || l.wrap_chars_full == 0 {
            return Err(SlidecastError::validation("wrap width must be > 0"));
        }
        if l.max_lines_per_bullet == 0 {
            return Err(SlidecastError::validation(
                "max_lines_per_bullet must be >= 1",
            ));
        }
        if !l.line_height.is_finite() || l.line_height <= 0.0 {
            return Err(SlidecastError::validation(
                "line_height must be finite and > 0",
            ));
        }
        if l.bullets_top >= f64::from(height) - l.bottom_margin {
            return Err(SlidecastError::validation(
                "bullets_top must lie above the bottom margin",
            ));
        }

        let t = &self.typography;
        for (name, px) in [
            ("title_px", t.title_px),
            ("body_px", t.body_px),
            ("source_px", t.source_px),
            ("caption_px", t.caption_px),
        ] {
            if !px.is_finite() || px <= 0.0 {
                return Err(SlidecastError::validation(format!(
                    "typography.{name} must be finite and > 0"
                )));
            }
        }

        if !self.illustration.scale.is_finite() || self.illustration.scale <= 0.0 {
            return Err(SlidecastError::validation(
                "illustration.scale must be finite and > 0",
            ));
        }

        self.fetch.validate()
    }

    /// Bottom limit for the bullet cursor, in pixels from the top.
    pub fn bullets_bottom(&self) -> f64 {
        f64::from(self.resolution.height) - self.layout.bottom_margin
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    /// `{width}`, `{height}` and `{query}` are substituted.
    pub keyword_url_template: String,
    pub query_separator: String,
    pub default_query: String,
    pub user_agent: String,
    pub fallback_bg: Rgba8,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 12,
            keyword_url_template: "https://loremflickr.com/{width}/{height}/{query}".to_string(),
            query_separator: ",".to_string(),
            default_query: "news".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            fallback_bg: Rgba8::rgb(12, 12, 12),
        }
    }
}

impl FetchConfig {
    pub fn validate(&self) -> SlidecastResult<()> {
        if self.timeout_secs == 0 {
            return Err(SlidecastError::validation("fetch timeout must be > 0"));
        }
        if !self.keyword_url_template.contains("{query}") {
            return Err(SlidecastError::validation(
                "keyword_url_template must contain '{query}'",
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn keyword_url(&self, resolution: Resolution, query: &str) -> String {
        self.keyword_url_template
            .replace("{width}", &resolution.width.to_string())
            .replace("{height}", &resolution.height.to_string())
            .replace("{query}", query)
    }
}

/// Output options for [`Pipeline::render_video`](crate::Pipeline::render_video).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VideoOpts {
    pub out_path: PathBuf,
    pub overwrite: bool,
    /// Colour that faded (translucent) frames are flattened over.
    pub bg_rgba: [u8; 4],
    /// Encoder executable; a bare name is looked up on PATH.
    pub ffmpeg: PathBuf,
}

pub const DEFAULT_OUT_PATH: &str = "output/news_video.mp4";

impl Default for VideoOpts {
    fn default() -> Self {
        Self {
            out_path: PathBuf::from(DEFAULT_OUT_PATH),
            overwrite: true,
            bg_rgba: [0, 0, 0, 255],
            ffmpeg: PathBuf::from("ffmpeg"),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
