use serde::{Serialize, Deserialize};

use crate::check::error::{GradCheckError, Result};

/// Default finite-difference step.
pub const DEFAULT_STEP: f64 = 1e-7;
/// Default pass threshold on the per-index difference.
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

/// How the numeric partial derivative is estimated.
///
/// - `Forward` — `(f(x + h) - f(x)) / h`; one extra loss evaluation per index.
/// - `Central` — `(f(x + h) - f(x - h)) / 2h`; two extra evaluations per index,
///   error O(h²) instead of O(h).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceScheme {
    #[default]
    Forward,
    Central,
}

/// What to do when the analytic gradient at a checked index is exactly zero,
/// where the relative difference is undefined.
///
/// - `AbsoluteError` — compare `analytic - estimated` against the tolerance
///   instead.
/// - `Fail`          — the index fails; its reported difference is NaN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroGradientPolicy {
    #[default]
    AbsoluteError,
    Fail,
}

/// Configuration for a `GradientChecker`.
///
/// # Fields
/// - `step`        — perturbation `h` added to each checked coordinate
/// - `tolerance`   — an index fails when `|difference| > tolerance`
/// - `scheme`      — forward or central difference
/// - `zero_policy` — handling of a zero analytic gradient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    pub step: f64,
    pub tolerance: f64,
    pub scheme: DifferenceScheme,
    pub zero_policy: ZeroGradientPolicy,
}

impl CheckConfig {
    /// Forward-difference config with the given step and tolerance.
    pub fn new(step: f64, tolerance: f64) -> Self {
        CheckConfig {
            step,
            tolerance,
            ..CheckConfig::default()
        }
    }

    pub fn with_scheme(mut self, scheme: DifferenceScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn with_zero_policy(mut self, zero_policy: ZeroGradientPolicy) -> Self {
        self.zero_policy = zero_policy;
        self
    }

    /// Rejects steps that are not strictly positive and finite, and
    /// tolerances that are negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(GradCheckError::InvalidConfig(format!(
                "step must be positive and finite, got {}",
                self.step
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(GradCheckError::InvalidConfig(format!(
                "tolerance must be non-negative and finite, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a config from a JSON file. Missing fields take their
    /// default values.
    pub fn load_json(path: &str) -> std::io::Result<CheckConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        CheckConfig {
            step: DEFAULT_STEP,
            tolerance: DEFAULT_TOLERANCE,
            scheme: DifferenceScheme::Forward,
            zero_policy: ZeroGradientPolicy::AbsoluteError,
        }
    }
}
