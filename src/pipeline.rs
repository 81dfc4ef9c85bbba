use std::path::PathBuf;

use crate::{
    assets::fetch::{HttpImageSource, ImageSource},
    config::{RenderConfig, VideoOpts},
    encode::{FrameSink, encode, encode_mp4},
    foundation::error::{SlidecastError, SlidecastResult},
    model::Metadata,
    render::{
        compositor::Compositor,
        font::{FontBook, FontCandidates, FontResolver},
    },
    text::bullets::build_bullets,
    timeline::{Timeline, assemble},
};

/// Render `script_text` (plus optional article metadata) to the default MP4 path.
///
/// Uses the stock layout, live image fetching and the default font candidates. Network
/// problems only ever change the backgrounds; IO and encoder failures are returned.
pub fn render_video(
    script_text: &str,
    metadata: Option<&Metadata>,
    total_duration_seconds: f64,
    frame_rate: u32,
) -> SlidecastResult<PathBuf> {
    let cfg = RenderConfig::default();
    let images = HttpImageSource::new(&cfg.fetch, cfg.resolution)?;
    let fonts = FontBook::load(&FontCandidates::default());
    Pipeline::new(&cfg, &images, &fonts)?.render_video(
        script_text,
        metadata,
        total_duration_seconds,
        frame_rate,
        &VideoOpts::default(),
    )
}

/// The render pipeline with its collaborators injected.
pub struct Pipeline<'a> {
    cfg: &'a RenderConfig,
    images: &'a dyn ImageSource,
    fonts: &'a dyn FontResolver,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        cfg: &'a RenderConfig,
        images: &'a dyn ImageSource,
        fonts: &'a dyn FontResolver,
    ) -> SlidecastResult<Self> {
        cfg.validate()?;
        Ok(Self { cfg, images, fonts })
    }

    /// Bullets, slides and clip timing for one request; nothing is encoded.
    #[tracing::instrument(skip_all, fields(target = total_duration_seconds))]
    pub fn timeline(
        &self,
        script_text: &str,
        metadata: Option<&Metadata>,
        total_duration_seconds: f64,
    ) -> SlidecastResult<Timeline> {
        if !total_duration_seconds.is_finite() || total_duration_seconds < 0.0 {
            return Err(SlidecastError::validation(format!(
                "total duration must be a non-negative number of seconds, got {total_duration_seconds}"
            )));
        }

        let default_meta = Metadata::default();
        let metadata = metadata.unwrap_or(&default_meta);
        let bullets = build_bullets(script_text, Some(metadata));
        tracing::debug!(bullets = ?bullets.as_slice(), "bullets built");

        let compositor = Compositor::new(self.cfg, self.fonts);
        assemble(
            &bullets,
            metadata,
            self.images,
            &compositor,
            total_duration_seconds,
        )
    }

    /// Build the timeline and stream it into `sink`. Returns the number of frames written.
    pub fn render_to_sink(
        &self,
        script_text: &str,
        metadata: Option<&Metadata>,
        total_duration_seconds: f64,
        frame_rate: u32,
        sink: &mut dyn FrameSink,
    ) -> SlidecastResult<u64> {
        if frame_rate == 0 {
            return Err(SlidecastError::validation("frame rate must be non-zero"));
        }
        let timeline = self.timeline(script_text, metadata, total_duration_seconds)?;
        encode(&timeline, frame_rate, sink)
    }

    /// Build the timeline and encode it to `opts.out_path` as H.264 MP4 without audio.
    #[tracing::instrument(skip_all, fields(out = %opts.out_path.display(), fps = frame_rate))]
    pub fn render_video(
        &self,
        script_text: &str,
        metadata: Option<&Metadata>,
        total_duration_seconds: f64,
        frame_rate: u32,
        opts: &VideoOpts,
    ) -> SlidecastResult<PathBuf> {
        if frame_rate == 0 {
            return Err(SlidecastError::validation("frame rate must be non-zero"));
        }
        let timeline = self.timeline(script_text, metadata, total_duration_seconds)?;
        encode_mp4(&timeline, frame_rate, opts)
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
