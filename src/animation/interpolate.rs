use crate::animation::ease::Ease;
use crate::foundation::error::{ReelError, ReelResult};

/// Behavior outside the breakpoint range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Hold the nearest endpoint output.
    #[default]
    Clamp,
    /// Continue the slope of the outermost segment.
    Extend,
}

/// Per-call interpolation options.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InterpolateOptions {
    /// Behavior below the first breakpoint.
    pub extrapolate_left: Extrapolate,
    /// Behavior above the last breakpoint.
    pub extrapolate_right: Extrapolate,
    /// Easing applied to each segment's local progress.
    pub ease: Ease,
}

impl InterpolateOptions {
    /// Clamp on both sides.
    pub fn clamp() -> Self {
        Self::default()
    }

    /// Extend on both sides.
    pub fn extend() -> Self {
        Self {
            extrapolate_left: Extrapolate::Extend,
            extrapolate_right: Extrapolate::Extend,
            ease: Ease::Linear,
        }
    }

    /// Replace the segment easing.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// Linear blend between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Piecewise-linear map from `input_range` to `output_range`.
///
/// Validation errors are reported as [`ReelError::InvalidConfig`]; sampling itself
/// never fails, so hosts can probe arbitrary frames.
pub fn interpolate(
    x: f64,
    input_range: &[f64],
    output_range: &[f64],
    opts: InterpolateOptions,
) -> ReelResult<f64> {
    validate_ranges(input_range, output_range, opts)?;
    Ok(sample_ranges(x, input_range, output_range, opts))
}

/// Validated, reusable form of [`interpolate`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "InterpolatorDef", into = "InterpolatorDef")]
pub struct Interpolator {
    input: Vec<f64>,
    output: Vec<f64>,
    opts: InterpolateOptions,
}

impl Interpolator {
    /// Validate the ranges once.
    pub fn new(input: Vec<f64>, output: Vec<f64>, opts: InterpolateOptions) -> ReelResult<Self> {
        validate_ranges(&input, &output, opts)?;
        Ok(Self {
            input,
            output,
            opts,
        })
    }

    /// Sample the curve at `x`.
    pub fn sample(&self, x: f64) -> f64 {
        sample_ranges(x, &self.input, &self.output, self.opts)
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
struct InterpolatorDef {
    input: Vec<f64>,
    output: Vec<f64>,
    #[serde(flatten)]
    opts: InterpolateOptions,
}

impl TryFrom<InterpolatorDef> for Interpolator {
    type Error = ReelError;

    fn try_from(def: InterpolatorDef) -> Result<Self, Self::Error> {
        Self::new(def.input, def.output, def.opts)
    }
}

impl From<Interpolator> for InterpolatorDef {
    fn from(v: Interpolator) -> Self {
        Self {
            input: v.input,
            output: v.output,
            opts: v.opts,
        }
    }
}

fn validate_ranges(input: &[f64], output: &[f64], opts: InterpolateOptions) -> ReelResult<()> {
    if input.len() < 2 {
        return Err(ReelError::invalid_config(format!(
            "input range needs at least 2 breakpoints, got {}",
            input.len()
        )));
    }
    if input.len() != output.len() {
        return Err(ReelError::invalid_config(format!(
            "input range has {} breakpoints but output range has {}",
            input.len(),
            output.len()
        )));
    }
    if let Some(v) = input.iter().chain(output).find(|v| !v.is_finite()) {
        return Err(ReelError::invalid_config(format!(
            "interpolation ranges must be finite, got {v}"
        )));
    }
    if let Some(w) = input.windows(2).find(|w| w[1] < w[0]) {
        return Err(ReelError::invalid_config(format!(
            "input range must be non-decreasing, got {} after {}",
            w[1], w[0]
        )));
    }
    if !opts.ease.is_finite() {
        return Err(ReelError::invalid_config(
            "cubic-bezier control points must be finite with x in [0, 1]",
        ));
    }
    Ok(())
}

fn sample_ranges(x: f64, input: &[f64], output: &[f64], opts: InterpolateOptions) -> f64 {
    let last = input.len() - 1;
    // NaN probes resolve like frames before the range.
    if x.is_nan() || x < input[0] {
        return match opts.extrapolate_left {
            Extrapolate::Clamp => output[0],
            Extrapolate::Extend => extend(x, input[0], input[1], output[0], output[1]),
        };
    }
    if x > input[last] {
        return match opts.extrapolate_right {
            Extrapolate::Clamp => output[last],
            Extrapolate::Extend => extend(
                x,
                input[last - 1],
                input[last],
                output[last - 1],
                output[last],
            ),
        };
    }

    // First breakpoint strictly greater than x; repeated breakpoints resolve to the later output.
    let idx = input.partition_point(|b| *b <= x);
    if idx > last {
        return output[last];
    }
    let (a, b) = (input[idx - 1], input[idx]);
    let t = (x - a) / (b - a);
    lerp(output[idx - 1], output[idx], opts.ease.apply(t))
}

fn extend(x: f64, a: f64, b: f64, oa: f64, ob: f64) -> f64 {
    let width = b - a;
    if width == 0.0 || x.is_nan() {
        return if x.is_nan() || x < a { oa } else { ob };
    }
    lerp(oa, ob, (x - a) / width)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;
