//! Slidecast turns a short news script into a narrated-style slideshow video.
//!
//! # Pipeline overview
//!
//! 1. **Fetch**: article and keyword backgrounds, degrading to a solid fallback colour on any
//!    network problem ([`ImageSource`]).
//! 2. **Segment**: script text → sentences → a deduped, capped [`BulletList`].
//! 3. **Compose**: three [`SlideSpec`]s rasterised at 1280×720 by the [`Compositor`].
//! 4. **Effects**: per-clip fades and zooms, pure functions of clip-local time ([`EffectStack`]).
//! 5. **Assemble**: fixed-role clips with the middle clip stretched to the target length
//!    ([`Timeline`]).
//! 6. **Encode**: stream frames to the system `ffmpeg` binary for MP4 output.
//!
//! Frames are premultiplied RGBA8 end to end. The only fatal errors are configuration,
//! filesystem and encoder failures.
#![forbid(unsafe_code)]

mod assets;
mod config;
mod effects;
mod encode;
mod foundation;
mod model;
mod pipeline;
mod render;
mod text;
mod timeline;

#[cfg(all(test, unix))]
#[path = "../tests/unit/support.rs"]
mod test_support;

pub use assets::decode::{decode_image, fit_to_resolution, solid_fill};
pub use assets::fetch::{HttpImageSource, ImageSource, OfflineImageSource, sanitize_query};
pub use config::{
    DEFAULT_OUT_PATH, FetchConfig, IllustrationLayout, PanelStyle, RenderConfig, TextLayout,
    Typography, VideoOpts,
};
pub use effects::{Effect, EffectStack};
pub use encode::ffmpeg::{DEFAULT_FFMPEG, EncodeConfig, FfmpegEncoder, ensure_parent_dir};
pub use encode::{
    FfmpegSink, FrameSink, InMemorySink, SinkConfig, encode, encode_mp4, is_ffmpeg_on_path,
};
pub use foundation::core::{Affine, Point, Resolution, Rgba8};
pub use foundation::error::{SlidecastError, SlidecastResult};
pub use model::{
    BulletList, DEFAULT_SOURCE, FALLBACK_BULLETS, MAX_BULLETS, MAX_SLIDE_BULLETS, Metadata,
    SlideSpec,
};
pub use pipeline::{Pipeline, render_video};
pub use render::FrameRGBA;
pub use render::compositor::Compositor;
pub use render::font::{FontBook, FontCandidates, FontResolver, FontWeight, ResolvedFont};
pub use render::layout::{BulletLayout, PlacedLine, layout_bullets};
pub use render::overlay::build_overlay;
pub use text::bullets::build_bullets;
pub use text::script::{CLOSING_LINE, compose_script};
pub use text::segment::{dedupe, segment};
pub use text::wrap::wrap;
pub use timeline::{Clip, ClipRole, Timeline, assemble, stretch_durations};
