use crate::animation::interpolate::Interpolator;
use crate::animation::spring::SpringMotion;
use crate::foundation::core::Fps;
use crate::foundation::error::{ReelError, ReelResult};

/// A scalar driven by the current frame.
///
/// JSON accepts a bare number as a constant, or one of
/// `{"keyframes": {...}}`, `{"spring": {...}}`, `{"sine": {...}}`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "MotionDef", into = "MotionDef")]
pub enum Motion {
    /// Same value on every frame.
    Constant(f64),
    /// Piecewise-linear curve over the frame number.
    Keyframes(Interpolator),
    /// Spring between two values.
    Spring(SpringMotion),
    /// Periodic oscillation.
    Sine(Sine),
}

impl Motion {
    /// Sample at a (possibly negative) local frame.
    pub fn sample(&self, frame: f64, fps: Fps) -> f64 {
        match self {
            Self::Constant(v) => *v,
            Self::Keyframes(k) => k.sample(frame),
            Self::Spring(s) => s.sample(frame, fps),
            Self::Sine(s) => s.sample(frame),
        }
    }
}

impl Default for Motion {
    fn default() -> Self {
        Self::Constant(0.0)
    }
}

/// `offset + amp * sin(TAU * frame / period_frames + phase)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "SineDef", into = "SineDef")]
pub struct Sine {
    amp: f64,
    period_frames: f64,
    phase: f64,
    offset: f64,
}

impl Sine {
    /// Validate and build an oscillation.
    pub fn new(amp: f64, period_frames: f64, phase: f64, offset: f64) -> ReelResult<Self> {
        if !(period_frames.is_finite() && period_frames > 0.0) {
            return Err(ReelError::invalid_config(format!(
                "sine period must be > 0 frames, got {period_frames}"
            )));
        }
        if !(amp.is_finite() && phase.is_finite() && offset.is_finite()) {
            return Err(ReelError::invalid_config("sine parameters must be finite"));
        }
        Ok(Self {
            amp,
            period_frames,
            phase,
            offset,
        })
    }

    /// Sample at `frame`.
    pub fn sample(&self, frame: f64) -> f64 {
        self.sample_shifted(frame, 0.0)
    }

    /// Sample with an additional phase shift in radians.
    pub fn sample_shifted(&self, frame: f64, extra_phase: f64) -> f64 {
        let angle = std::f64::consts::TAU * frame / self.period_frames + self.phase + extra_phase;
        self.offset + self.amp * angle.sin()
    }
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
struct SineDef {
    amp: f64,
    period_frames: f64,
    #[serde(default)]
    phase: f64,
    #[serde(default)]
    offset: f64,
}

impl TryFrom<SineDef> for Sine {
    type Error = ReelError;

    fn try_from(d: SineDef) -> Result<Self, Self::Error> {
        Self::new(d.amp, d.period_frames, d.phase, d.offset)
    }
}

impl From<Sine> for SineDef {
    fn from(s: Sine) -> Self {
        Self {
            amp: s.amp,
            period_frames: s.period_frames,
            phase: s.phase,
            offset: s.offset,
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum MotionDef {
    /// JSON shorthand: a bare number is a constant.
    Constant(f64),
    Tagged(MotionTaggedDef),
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
enum MotionTaggedDef {
    Keyframes(Interpolator),
    Spring(SpringMotion),
    Sine(Sine),
}

impl TryFrom<MotionDef> for Motion {
    type Error = ReelError;

    fn try_from(def: MotionDef) -> Result<Self, Self::Error> {
        match def {
            MotionDef::Constant(v) if !v.is_finite() => Err(ReelError::invalid_config(format!(
                "constant motion must be finite, got {v}"
            ))),
            MotionDef::Constant(v) => Ok(Self::Constant(v)),
            MotionDef::Tagged(MotionTaggedDef::Keyframes(k)) => Ok(Self::Keyframes(k)),
            MotionDef::Tagged(MotionTaggedDef::Spring(s)) => Ok(Self::Spring(s)),
            MotionDef::Tagged(MotionTaggedDef::Sine(s)) => Ok(Self::Sine(s)),
        }
    }
}

impl From<Motion> for MotionDef {
    fn from(m: Motion) -> Self {
        match m {
            Motion::Constant(v) => Self::Constant(v),
            Motion::Keyframes(k) => Self::Tagged(MotionTaggedDef::Keyframes(k)),
            Motion::Spring(s) => Self::Tagged(MotionTaggedDef::Spring(s)),
            Motion::Sine(s) => Self::Tagged(MotionTaggedDef::Sine(s)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/motion.rs"]
mod tests;
