use crate::{
    effects::{Effect, EffectStack},
    foundation::error::{SlidecastError, SlidecastResult},
    render::FrameRGBA,
};

pub const HEADLINE_SECONDS: f64 = 6.0;
pub const KEY_POINTS_SECONDS: f64 = 10.0;
pub const OUTRO_SECONDS: f64 = 6.0;

/// Fixed position of a clip in the timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClipRole {
    Headline,
    KeyPoints,
    Outro,
}

impl ClipRole {
    pub const ALL: [ClipRole; 3] = [Self::Headline, Self::KeyPoints, Self::Outro];

    pub fn title(self) -> &'static str {
        match self {
            Self::Headline => "Breaking News",
            Self::KeyPoints => "Key Points",
            Self::Outro => "That's it!",
        }
    }

    pub fn base_duration(self) -> f64 {
        match self {
            Self::Headline => HEADLINE_SECONDS,
            Self::KeyPoints => KEY_POINTS_SECONDS,
            Self::Outro => OUTRO_SECONDS,
        }
    }

    /// Per-slide motion: slow zooms on the content slides, a longer fade on the way out.
    pub fn effects(self) -> EffectStack {
        let effects = match self {
            Self::Headline => vec![
                Effect::Zoom {
                    base: 1.0,
                    rate: 0.03,
                },
                Effect::FadeIn { duration: 0.6 },
                Effect::FadeOut { duration: 0.6 },
            ],
            Self::KeyPoints => vec![
                Effect::Zoom {
                    base: 1.02,
                    rate: 0.02,
                },
                Effect::FadeIn { duration: 0.6 },
                Effect::FadeOut { duration: 0.6 },
            ],
            Self::Outro => vec![
                Effect::FadeIn { duration: 0.6 },
                Effect::FadeOut { duration: 0.8 },
            ],
        };
        EffectStack::new(effects)
    }
}

/// A rendered slide plus how long it plays and how it moves.
#[derive(Clone, Debug)]
pub struct Clip {
    pub role: ClipRole,
    pub frame: FrameRGBA,
    pub duration: f64,
    pub effects: EffectStack,
}

impl Clip {
    pub fn new(role: ClipRole, frame: FrameRGBA, duration: f64) -> Self {
        Self {
            role,
            frame,
            duration,
            effects: role.effects(),
        }
    }

    pub fn frame_at(&self, t: f64) -> SlidecastResult<FrameRGBA> {
        let t = t.clamp(0.0, self.duration);
        self.effects.apply(&self.frame, t, self.duration)
    }
}

/// Headline, key points and outro, played back to back with no blending across boundaries.
#[derive(Clone, Debug)]
pub struct Timeline {
    clips: Vec<Clip>,
}

impl Timeline {
    pub fn new(clips: Vec<Clip>) -> SlidecastResult<Self> {
        let roles: Vec<ClipRole> = clips.iter().map(|c| c.role).collect();
        if roles != ClipRole::ALL {
            return Err(SlidecastError::validation(format!(
                "timeline needs exactly the clips {:?} in order, got {roles:?}",
                ClipRole::ALL
            )));
        }
        if let Some(c) = clips
            .iter()
            .find(|c| !c.duration.is_finite() || c.duration <= 0.0)
        {
            return Err(SlidecastError::validation(format!(
                "clip {:?} has invalid duration {}",
                c.role, c.duration
            )));
        }
        let first = &clips[0].frame;
        if clips
            .iter()
            .any(|c| c.frame.width != first.width || c.frame.height != first.height)
        {
            return Err(SlidecastError::validation(
                "all clips in a timeline must share one frame size",
            ));
        }
        Ok(Self { clips })
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn durations(&self) -> Vec<f64> {
        self.clips.iter().map(|c| c.duration).collect()
    }

    pub fn total_duration(&self) -> f64 {
        self.clips.iter().map(|c| c.duration).sum()
    }

    pub fn width(&self) -> u32 {
        self.clips[0].frame.width
    }

    pub fn height(&self) -> u32 {
        self.clips[0].frame.height
    }

    pub fn frame_count(&self, fps: u32) -> u64 {
        ((self.total_duration() * f64::from(fps)).round() as u64).max(1)
    }

    /// Clip index and clip-local time for a timeline time `t`.
    ///
    /// Boundaries belong to the later clip; times past the end land on the last clip.
    pub fn locate(&self, t: f64) -> (usize, f64) {
        let mut start = 0.0;
        for (i, clip) in self.clips.iter().enumerate() {
            let end = start + clip.duration;
            if t < end {
                return (i, (t - start).max(0.0));
            }
            start = end;
        }
        let last = self.clips.len() - 1;
        (last, self.clips[last].duration)
    }

    pub fn frame_at_time(&self, t: f64) -> SlidecastResult<FrameRGBA> {
        let (i, local) = self.locate(t);
        self.clips[i].frame_at(local)
    }

    /// Frame `index` at `fps`, sampled at the frame's start time.
    pub fn render_frame(&self, index: u64, fps: u32) -> SlidecastResult<FrameRGBA> {
        if fps == 0 {
            return Err(SlidecastError::validation("fps must be non-zero"));
        }
        self.frame_at_time(index as f64 / f64::from(fps))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/clip.rs"]
mod tests;
