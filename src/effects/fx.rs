//! Time-parameterized clip effects.
//!
//! Each [`Effect`] is a pure `(frame, t) -> frame` transform; nothing is mutated in place, so
//! applying the same effect to the same `(frame, t)` pair always yields the same pixels.

use resvg::tiny_skia;

use crate::{
    foundation::{
        core::Affine,
        error::{SlidecastError, SlidecastResult},
    },
    render::FrameRGBA,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Effect {
    /// Linear opacity ramp 0 → 1 over `duration` seconds from the clip start.
    FadeIn { duration: f64 },
    /// Linear opacity ramp 1 → 0 over the last `duration` seconds of the clip.
    FadeOut { duration: f64 },
    /// Centre zoom with `scale(t) = base + rate * t`.
    Zoom { base: f64, rate: f64 },
}

impl Effect {
    /// Zooms run before fades, so a fade always wraps the zoomed frame.
    fn phase(&self) -> u8 {
        match self {
            Self::Zoom { .. } => 0,
            Self::FadeIn { .. } | Self::FadeOut { .. } => 1,
        }
    }

    pub fn opacity_at(&self, t: f64, clip_duration: f64) -> f64 {
        match *self {
            Self::FadeIn { duration } => ramp(t, duration),
            Self::FadeOut { duration } => ramp(clip_duration - t, duration),
            Self::Zoom { .. } => 1.0,
        }
    }

    pub fn scale_at(&self, t: f64) -> f64 {
        match *self {
            Self::Zoom { base, rate } => {
                let s = base + rate * t.max(0.0);
                if s.is_finite() && s > 0.0 { s } else { 1.0 }
            }
            Self::FadeIn { .. } | Self::FadeOut { .. } => 1.0,
        }
    }

    pub fn apply(
        &self,
        frame: &FrameRGBA,
        t: f64,
        clip_duration: f64,
    ) -> SlidecastResult<FrameRGBA> {
        match self {
            Self::Zoom { .. } => zoom(frame, self.scale_at(t)),
            Self::FadeIn { .. } | Self::FadeOut { .. } => {
                Ok(fade(frame, self.opacity_at(t, clip_duration)))
            }
        }
    }
}

fn ramp(elapsed: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0)
}

/// Ordered effect list for one clip, kept in canonical order (zoom, then fades).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EffectStack(Vec<Effect>);

impl EffectStack {
    pub fn new(mut effects: Vec<Effect>) -> Self {
        effects.sort_by_key(Effect::phase);
        Self(effects)
    }

    pub fn effects(&self) -> &[Effect] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Combined opacity at `t`, useful for inspection and tests.
    pub fn opacity_at(&self, t: f64, clip_duration: f64) -> f64 {
        self.0
            .iter()
            .map(|e| e.opacity_at(t, clip_duration))
            .product()
    }

    pub fn apply(
        &self,
        frame: &FrameRGBA,
        t: f64,
        clip_duration: f64,
    ) -> SlidecastResult<FrameRGBA> {
        let mut out = frame.clone();
        for effect in &self.0 {
            out = effect.apply(&out, t, clip_duration)?;
        }
        Ok(out)
    }
}

fn zoom(frame: &FrameRGBA, scale: f64) -> SlidecastResult<FrameRGBA> {
    if (scale - 1.0).abs() < 1e-9 {
        return Ok(frame.clone());
    }

    let src = premultiplied(frame);
    let size = tiny_skia::IntSize::from_wh(src.width, src.height)
        .ok_or_else(|| SlidecastError::render("cannot zoom an empty frame"))?;
    let src_pixmap = tiny_skia::Pixmap::from_vec(src.data, size)
        .ok_or_else(|| SlidecastError::render("frame buffer does not match its dimensions"))?;
    let mut dst = tiny_skia::Pixmap::new(src.width, src.height)
        .ok_or_else(|| SlidecastError::render("failed to allocate zoom target"))?;

    let c = frame.resolution().center().to_vec2();
    let xf = Affine::translate(c) * Affine::scale(scale) * Affine::translate(-c);
    let [a, b, cc, d, e, f] = xf.as_coeffs();
    let ts = tiny_skia::Transform::from_row(
        a as f32, b as f32, cc as f32, d as f32, e as f32, f as f32,
    );
    let paint = tiny_skia::PixmapPaint {
        quality: tiny_skia::FilterQuality::Bilinear,
        ..tiny_skia::PixmapPaint::default()
    };
    dst.draw_pixmap(0, 0, src_pixmap.as_ref(), &paint, ts, None);

    Ok(FrameRGBA {
        width: src.width,
        height: src.height,
        data: dst.take(),
        premultiplied: true,
    })
}

fn fade(frame: &FrameRGBA, opacity: f64) -> FrameRGBA {
    let mut out = premultiplied(frame);
    if opacity >= 1.0 {
        return out;
    }
    let k = (opacity.clamp(0.0, 1.0) * 255.0).round() as u16;
    for c in &mut out.data {
        *c = mul_div255(*c as u16, k);
    }
    out
}

fn premultiplied(frame: &FrameRGBA) -> FrameRGBA {
    let mut out = frame.clone();
    if !out.premultiplied {
        for px in out.data.chunks_exact_mut(4) {
            let a = px[3] as u16;
            if a == 255 {
                continue;
            }
            px[0] = mul_div255(px[0] as u16, a);
            px[1] = mul_div255(px[1] as u16, a);
            px[2] = mul_div255(px[2] as u16, a);
        }
        out.premultiplied = true;
    }
    out
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/fx.rs"]
mod tests;
