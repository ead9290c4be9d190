//! Damped harmonic oscillator driven from rest.
//!
//! The response is evaluated in closed form as a function of elapsed seconds, so any
//! frame can be sampled independently of every other frame.

use crate::foundation::core::Fps;
use crate::foundation::error::{ReelError, ReelResult};

/// Settle threshold used when stretching a spring to a fixed duration.
pub const DEFAULT_SETTLE_THRESHOLD: f64 = 0.005;

// Springs that have not settled after ten minutes are treated as non-settling.
const SETTLE_HORIZON_SECS: f64 = 600.0;

/// Physical parameters of a spring.
///
/// `damping` is the viscous coefficient `c`; the damping ratio is
/// `c / (2 * sqrt(stiffness * mass))`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Viscous damping coefficient.
    pub damping: f64,
    /// Mass.
    pub mass: f64,
    /// Stiffness.
    pub stiffness: f64,
    /// Never pass the target value.
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: 10.0,
            mass: 1.0,
            stiffness: 100.0,
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    /// Reject parameters that make the response undefined, frozen or never settling.
    pub fn validate(&self) -> ReelResult<()> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(ReelError::invalid_config(format!(
                "spring mass must be > 0, got {}",
                self.mass
            )));
        }
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            return Err(ReelError::invalid_config(format!(
                "spring stiffness must be > 0, got {}",
                self.stiffness
            )));
        }
        if !(self.damping.is_finite() && self.damping > 0.0) {
            return Err(ReelError::invalid_config(format!(
                "spring damping must be > 0, got {}",
                self.damping
            )));
        }
        Ok(())
    }

    /// Undamped angular frequency `sqrt(k / m)`.
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness.max(0.0) / self.mass.max(1e-9)).sqrt()
    }

    /// Damping ratio (1.0 is critical damping).
    pub fn damping_ratio(&self) -> f64 {
        let km = self.stiffness.max(0.0) * self.mass.max(1e-9);
        self.damping.max(0.0) / (2.0 * km.sqrt()).max(1e-9)
    }
}

/// Spring progress from 0 to 1 at `frame`.
///
/// Returns exactly 0.0 for `frame <= 0`.
pub fn spring(frame: f64, fps: Fps, config: SpringConfig) -> f64 {
    if frame.is_nan() || frame <= 0.0 {
        return 0.0;
    }
    let x = step_response(fps.frames_to_secs(frame), &config);
    if config.overshoot_clamping {
        x.min(1.0)
    } else {
        x
    }
}

/// First frame from which the spring provably stays within `threshold` of its target.
pub fn measure_spring(fps: Fps, config: SpringConfig, threshold: f64) -> ReelResult<u64> {
    let secs = settle_secs(&config, threshold)?;
    Ok((secs * fps.as_f64()).ceil().max(0.0) as u64)
}

/// A spring moving between two values, optionally delayed and time-stretched.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "SpringMotionDef", into = "SpringMotionDef")]
pub struct SpringMotion {
    from: f64,
    to: f64,
    config: SpringConfig,
    delay_frames: f64,
    duration_frames: Option<f64>,
    // Natural settle time, precomputed when a duration stretch is requested.
    settle_secs: Option<f64>,
}

impl SpringMotion {
    /// Validate and build a motion from `from` to `to`.
    pub fn new(from: f64, to: f64, config: SpringConfig) -> ReelResult<Self> {
        config.validate()?;
        if !(from.is_finite() && to.is_finite()) {
            return Err(ReelError::invalid_config("spring endpoints must be finite"));
        }
        Ok(Self {
            from,
            to,
            config,
            delay_frames: 0.0,
            duration_frames: None,
            settle_secs: None,
        })
    }

    /// Start the spring `frames` later.
    pub fn with_delay(mut self, frames: f64) -> ReelResult<Self> {
        if !frames.is_finite() {
            return Err(ReelError::invalid_config("spring delay must be finite"));
        }
        self.delay_frames = frames;
        Ok(self)
    }

    /// Stretch time so the spring settles after `frames` frames.
    pub fn with_duration(mut self, frames: f64) -> ReelResult<Self> {
        if !(frames.is_finite() && frames > 0.0) {
            return Err(ReelError::invalid_config(format!(
                "spring duration must be > 0 frames, got {frames}"
            )));
        }
        self.settle_secs = Some(settle_secs(&self.config, DEFAULT_SETTLE_THRESHOLD)?);
        self.duration_frames = Some(frames);
        Ok(self)
    }

    /// Start value.
    pub fn start(&self) -> f64 {
        self.from
    }

    /// Target value.
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Sample the motion at `frame`.
    pub fn sample(&self, frame: f64, fps: Fps) -> f64 {
        let local = frame - self.delay_frames;
        if local.is_nan() || local <= 0.0 {
            return self.from;
        }
        let mut secs = fps.frames_to_secs(local);
        if let (Some(duration), Some(settle)) = (self.duration_frames, self.settle_secs) {
            secs *= settle / fps.frames_to_secs(duration);
        }
        let mut x = step_response(secs, &self.config);
        if self.config.overshoot_clamping {
            x = x.min(1.0);
        }
        self.from + (self.to - self.from) * x
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
struct SpringMotionDef {
    #[serde(default)]
    from: f64,
    #[serde(default = "one")]
    to: f64,
    #[serde(default)]
    config: SpringConfig,
    #[serde(default)]
    delay_frames: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    duration_frames: Option<f64>,
}

fn one() -> f64 {
    1.0
}

impl TryFrom<SpringMotionDef> for SpringMotion {
    type Error = ReelError;

    fn try_from(def: SpringMotionDef) -> Result<Self, Self::Error> {
        let motion = Self::new(def.from, def.to, def.config)?.with_delay(def.delay_frames)?;
        match def.duration_frames {
            Some(d) => motion.with_duration(d),
            None => Ok(motion),
        }
    }
}

impl From<SpringMotion> for SpringMotionDef {
    fn from(v: SpringMotion) -> Self {
        Self {
            from: v.from,
            to: v.to,
            config: v.config,
            delay_frames: v.delay_frames,
            duration_frames: v.duration_frames,
        }
    }
}

fn step_response(t: f64, config: &SpringConfig) -> f64 {
    // Step response from 0 to 1 with x(0)=0, v(0)=0.
    let w0 = config.natural_frequency();
    if w0 == 0.0 {
        return 0.0;
    }
    let zeta = config.damping_ratio();

    if (zeta - 1.0).abs() < 1e-6 {
        // Critically damped.
        let e = (-w0 * t).exp();
        1.0 - e * (1.0 + w0 * t)
    } else if zeta < 1.0 {
        // Underdamped.
        let root = (1.0 - zeta * zeta).sqrt();
        let wd = w0 * root;
        let e = (-zeta * w0 * t).exp();
        1.0 - e * ((wd * t).cos() + zeta / root * (wd * t).sin())
    } else {
        // Overdamped.
        let z2 = (zeta * zeta - 1.0).sqrt();
        let r1 = -w0 * (zeta - z2);
        let r2 = -w0 * (zeta + z2);
        let c2 = (zeta + z2) / (2.0 * z2);
        let c1 = (zeta - z2) / (2.0 * z2);
        1.0 - (c2 * (r1 * t).exp() - c1 * (r2 * t).exp())
    }
}

/// Upper bound on `|1 - x(t)|`, non-increasing in `t`.
fn deviation_bound(t: f64, config: &SpringConfig) -> f64 {
    let zeta = config.damping_ratio();
    if zeta < 1.0 - 1e-6 {
        // |cos + k sin| <= sqrt(1 + k^2) = 1 / sqrt(1 - zeta^2)
        let w0 = config.natural_frequency();
        (-zeta * w0 * t).exp() / (1.0 - zeta * zeta).sqrt()
    } else {
        (1.0 - step_response(t, config)).abs()
    }
}

fn settle_secs(config: &SpringConfig, threshold: f64) -> ReelResult<f64> {
    config.validate()?;
    if !(threshold.is_finite() && threshold > 0.0) {
        return Err(ReelError::invalid_config(format!(
            "settle threshold must be > 0, got {threshold}"
        )));
    }
    if deviation_bound(0.0, config) < threshold {
        return Ok(0.0);
    }
    if deviation_bound(SETTLE_HORIZON_SECS, config) >= threshold {
        return Err(ReelError::invalid_config(format!(
            "spring does not settle within {SETTLE_HORIZON_SECS}s (damping ratio {:.4})",
            config.damping_ratio()
        )));
    }

    // Invariant: bound(lo) >= threshold > bound(hi).
    let mut lo = 0.0;
    let mut hi = SETTLE_HORIZON_SECS;
    for _ in 0..64 {
        let mid = 0.5 * (lo + hi);
        if deviation_bound(mid, config) < threshold {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    Ok(hi)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
