use std::{
    ffi::OsStr,
    io::{Read as _, Write as _},
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, ExitStatus, Stdio},
    thread::JoinHandle,
};

use anyhow::Context as _;

use crate::{
    encode::sink::{FrameSink, SinkConfig},
    foundation::error::{SlidecastError, SlidecastResult},
    render::FrameRGBA,
};

pub const DEFAULT_FFMPEG: &str = "ffmpeg";

#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub out_path: PathBuf,
    pub overwrite: bool,
    /// `ffmpeg` executable, looked up on PATH when it is a bare name.
    pub program: PathBuf,
}

impl EncodeConfig {
    pub fn validate(&self) -> SlidecastResult<()> {
        SinkConfig {
            width: self.width,
            height: self.height,
            fps: self.fps,
        }
        .validate()
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    is_program_available(OsStr::new(DEFAULT_FFMPEG))
}

fn is_program_available(program: &OsStr) -> bool {
    Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> SlidecastResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

type StderrDrain = JoinHandle<std::io::Result<Vec<u8>>>;

/// One running `ffmpeg` process fed raw RGBA frames over stdin.
///
/// Output is H.264 in yuv420p with no audio stream. stderr is drained on a background thread
/// so a chatty encoder can never stall the stdin writes. Dropping an unfinished encoder closes
/// stdin and reaps the process.
pub struct FfmpegEncoder {
    cfg: EncodeConfig,
    bg_rgba: [u8; 4],
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<StderrDrain>,
    scratch: Vec<u8>,
}

impl FfmpegEncoder {
    pub fn new(cfg: EncodeConfig, bg_rgba: [u8; 4]) -> SlidecastResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(SlidecastError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }

        if !is_program_available(cfg.program.as_os_str()) {
            return Err(SlidecastError::encode(format!(
                "ffmpeg is required for MP4 encoding, but '{}' could not be run",
                cfg.program.display()
            )));
        }

        let mut cmd = Command::new(&cfg.program);
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        cmd.arg(if cfg.overwrite { "-y" } else { "-n" });
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &cfg.fps.to_string(),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&cfg.out_path);

        tracing::debug!(out = %cfg.out_path.display(), "spawning ffmpeg");
        let mut child = cmd
            .spawn()
            .map_err(|e| SlidecastError::encode(format!("failed to spawn ffmpeg: {e}")))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| SlidecastError::encode("failed to open ffmpeg stdin"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| SlidecastError::encode("failed to open ffmpeg stderr"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            stderr.read_to_end(&mut bytes)?;
            Ok(bytes)
        });

        Ok(Self {
            scratch: vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4],
            cfg,
            bg_rgba,
            child: Some(child),
            stdin: Some(stdin),
            stderr_drain: Some(stderr_drain),
        })
    }

    /// Flatten `frame` and write it to ffmpeg.
    ///
    /// A failed write reaps the process and reports its exit status and stderr; the encoder is
    /// finalized afterwards.
    pub fn encode_frame(&mut self, frame: &FrameRGBA) -> SlidecastResult<()> {
        if frame.width != self.cfg.width || frame.height != self.cfg.height {
            return Err(SlidecastError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.cfg.width, self.cfg.height
            )));
        }

        flatten_to_opaque_rgba8(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.bg_rgba,
        )?;

        let written = match self.stdin.as_mut() {
            Some(stdin) => stdin.write_all(&self.scratch),
            None => return Err(SlidecastError::encode("ffmpeg encoder is already finalized")),
        };
        if let Err(e) = written {
            let cause = match self.wait() {
                Ok((status, stderr)) => exit_message(status, &stderr),
                Err(wait_err) => wait_err.to_string(),
            };
            return Err(SlidecastError::encode(format!(
                "failed to write frame to ffmpeg stdin ({e}); {cause}"
            )));
        }

        Ok(())
    }

    pub fn finish(mut self) -> SlidecastResult<()> {
        let (status, stderr) = self.wait()?;
        if !status.success() {
            return Err(SlidecastError::encode(exit_message(status, &stderr)));
        }
        Ok(())
    }

    /// Close stdin, wait for the process and collect everything it wrote to stderr.
    fn wait(&mut self) -> SlidecastResult<(ExitStatus, String)> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| SlidecastError::encode("ffmpeg encoder is already finalized"))?;

        let status = child
            .wait()
            .map_err(|e| SlidecastError::encode(format!("failed to wait for ffmpeg: {e}")))?;
        let stderr = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| SlidecastError::encode("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| SlidecastError::encode(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        Ok((status, String::from_utf8_lossy(&stderr).trim().to_string()))
    }
}

impl Drop for FfmpegEncoder {
    fn drop(&mut self) {
        if self.child.is_some()
            && let Err(e) = self.wait()
        {
            tracing::warn!(error = %e, "ffmpeg did not shut down cleanly");
        }
    }
}

fn exit_message(status: ExitStatus, stderr: &str) -> String {
    if stderr.is_empty() {
        format!("ffmpeg exited with status {status}")
    } else {
        format!("ffmpeg exited with status {status}: {stderr}")
    }
}

/// [`FrameSink`] that starts `ffmpeg` on `begin` and waits for it on `end`.
pub struct FfmpegSink {
    out_path: PathBuf,
    overwrite: bool,
    bg_rgba: [u8; 4],
    program: PathBuf,
    encoder: Option<FfmpegEncoder>,
}

impl FfmpegSink {
    pub fn new(out_path: impl Into<PathBuf>, overwrite: bool, bg_rgba: [u8; 4]) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite,
            bg_rgba,
            program: PathBuf::from(DEFAULT_FFMPEG),
            encoder: None,
        }
    }

    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn out_path(&self) -> &Path {
        &self.out_path
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> SlidecastResult<()> {
        if self.encoder.is_some() {
            return Err(SlidecastError::encode("ffmpeg sink is already running"));
        }
        let enc_cfg = EncodeConfig {
            width: cfg.width,
            height: cfg.height,
            fps: cfg.fps,
            out_path: self.out_path.clone(),
            overwrite: self.overwrite,
            program: self.program.clone(),
        };
        self.encoder = Some(FfmpegEncoder::new(enc_cfg, self.bg_rgba)?);
        Ok(())
    }

    fn push_frame(&mut self, _idx: u64, frame: &FrameRGBA) -> SlidecastResult<()> {
        let Some(enc) = self.encoder.as_mut() else {
            return Err(SlidecastError::encode("push_frame called before begin"));
        };
        let pushed = enc.encode_frame(frame);
        if pushed.is_err() {
            self.encoder = None;
        }
        pushed
    }

    fn end(&mut self) -> SlidecastResult<()> {
        let Some(enc) = self.encoder.take() else {
            return Err(SlidecastError::encode("end called before begin"));
        };
        enc.finish()
    }
}

fn flatten_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    bg_rgba: [u8; 4],
) -> SlidecastResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(SlidecastError::validation(
            "frame.data size mismatch with width*height*4",
        ));
    }

    let bg = [bg_rgba[0] as u16, bg_rgba[1] as u16, bg_rgba[2] as u16];

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = s[3] as u16;
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }

        let inv = 255u16 - a;
        for c in 0..3 {
            let fg = if src_is_premul {
                s[c] as u16
            } else {
                mul_div255(s[c] as u16, a)
            };
            d[c] = (fg + mul_div255(bg[c], inv)).min(255) as u8;
        }
        d[3] = 255;
    }

    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
