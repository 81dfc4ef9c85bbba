use resvg::tiny_skia;

use crate::{
    assets::decode::fit_to_resolution,
    config::RenderConfig,
    foundation::error::{SlidecastError, SlidecastResult},
    model::SlideSpec,
    render::{FrameRGBA, font::FontResolver, overlay::build_overlay},
};

/// Renders slides at the configured resolution.
pub struct Compositor<'a> {
    cfg: &'a RenderConfig,
    fonts: &'a dyn FontResolver,
}

impl<'a> Compositor<'a> {
    pub fn new(cfg: &'a RenderConfig, fonts: &'a dyn FontResolver) -> Self {
        Self { cfg, fonts }
    }

    pub fn config(&self) -> &RenderConfig {
        self.cfg
    }

    /// Background fill, then the overlay (panel, text, illustration) in one raster pass.
    ///
    /// The result is always exactly `cfg.resolution`, whatever the background size. Pixels are
    /// premultiplied and fully opaque.
    #[tracing::instrument(skip_all, fields(title = %spec.title))]
    pub fn render(&self, spec: &SlideSpec) -> SlidecastResult<FrameRGBA> {
        let res = self.cfg.resolution;
        let bg = fit_to_resolution(&spec.background, res);

        let size = tiny_skia::IntSize::from_wh(res.width, res.height)
            .ok_or_else(|| SlidecastError::render("frame size must be non-zero"))?;
        let mut pixmap = tiny_skia::Pixmap::from_vec(bg.into_raw(), size)
            .ok_or_else(|| SlidecastError::render("background buffer does not match frame size"))?;

        let svg = build_overlay(spec, self.cfg, self.fonts);
        let opts = usvg::Options {
            fontdb: self.fonts.fontdb(),
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_str(&svg, &opts)
            .map_err(|e| SlidecastError::render(format!("slide overlay is not valid svg: {e}")))?;
        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

        tracing::debug!(bullets = spec.bullets.len(), "slide rendered");
        Ok(FrameRGBA {
            width: res.width,
            height: res.height,
            data: pixmap.take(),
            premultiplied: true,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
