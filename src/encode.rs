//! Frame sinks and the timeline → sink driver.

pub mod ffmpeg;
pub mod sink;

use std::path::PathBuf;

use crate::{config::VideoOpts, foundation::error::SlidecastResult, timeline::Timeline};

pub use ffmpeg::{FfmpegSink, is_ffmpeg_on_path};
pub use sink::{FrameSink, InMemorySink, SinkConfig};

/// Push every frame of `timeline` at `fps` into `sink`, in order.
///
/// Frames are produced one at a time; only the current frame is held in memory.
#[tracing::instrument(skip_all, fields(fps = fps, total = timeline.total_duration()))]
pub fn encode(timeline: &Timeline, fps: u32, sink: &mut dyn FrameSink) -> SlidecastResult<u64> {
    let cfg = SinkConfig {
        width: timeline.width(),
        height: timeline.height(),
        fps,
    };
    cfg.validate()?;

    let frames = timeline.frame_count(fps);
    sink.begin(cfg)?;
    for idx in 0..frames {
        let frame = timeline.render_frame(idx, fps)?;
        sink.push_frame(idx, &frame)?;
    }
    sink.end()?;

    tracing::debug!(frames, "timeline encoded");
    Ok(frames)
}

/// Encode `timeline` to `opts.out_path` (H.264 MP4, no audio), creating parent directories.
pub fn encode_mp4(timeline: &Timeline, fps: u32, opts: &VideoOpts) -> SlidecastResult<PathBuf> {
    let mut sink = FfmpegSink::new(opts.out_path.clone(), opts.overwrite, opts.bg_rgba)
        .with_program(opts.ffmpeg.clone());
    let frames = encode(timeline, fps, &mut sink)?;
    tracing::info!(frames, path = %opts.out_path.display(), "video written");
    Ok(opts.out_path.clone())
}

#[cfg(test)]
#[path = "../tests/unit/encode.rs"]
mod tests;
