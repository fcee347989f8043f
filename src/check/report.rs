use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

pub const TABLE_HEADER: &str = "Index i  expect. grad[i] grad[i]   rel. diff.";
pub const PASS_MESSAGE: &str = "The gradient looks correct :)";
pub const FAIL_MESSAGE: &str = "The gradient seems to be wrong";

/// Outcome of checking one coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDiagnostic {
    /// Coordinate of the parameter vector that was perturbed.
    pub index: usize,
    /// Finite-difference estimate of the partial derivative.
    #[serde(deserialize_with = "null_as_nan")]
    pub expected_gradient: f64,
    /// Value returned by the analytic gradient function.
    #[serde(deserialize_with = "null_as_nan")]
    pub actual_gradient: f64,
    /// `(actual - expected) / actual`, or the absolute difference when the
    /// analytic value is zero and the zero policy falls back to it. NaN when
    /// the index failed because of a zero analytic value.
    #[serde(deserialize_with = "null_as_nan")]
    pub relative_difference: f64,
    pub passed: bool,
}

impl fmt::Display for IndexDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:7}   {:9.6}   {:9.6}   {:8.1e}",
            self.index, self.expected_gradient, self.actual_gradient, self.relative_difference
        )
    }
}

/// All per-index diagnostics of one gradient check, in the order the indices
/// were given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradCheckReport {
    pub diagnostics: Vec<IndexDiagnostic>,
    /// `true` iff every checked index passed.
    pub is_valid: bool,
}

impl GradCheckReport {
    pub fn from_diagnostics(diagnostics: Vec<IndexDiagnostic>) -> Self {
        let is_valid = diagnostics.iter().all(|d| d.passed);
        GradCheckReport { diagnostics, is_valid }
    }

    pub fn failures(&self) -> impl Iterator<Item = &IndexDiagnostic> {
        self.diagnostics.iter().filter(|d| !d.passed)
    }

    /// Largest `|relative_difference|` over all indices; NaN entries are
    /// skipped. `0.0` for an empty report.
    pub fn max_abs_difference(&self) -> f64 {
        self.diagnostics
            .iter()
            .map(|d| d.relative_difference.abs())
            .fold(0.0, f64::max)
    }

    pub fn summary(&self) -> &'static str {
        if self.is_valid { PASS_MESSAGE } else { FAIL_MESSAGE }
    }

    /// Serializes the report to a pretty-printed JSON file. Non-finite values
    /// are written as `null` and read back as NaN.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

/// JSON has no NaN or infinity; serde_json writes both as `null`. Reading
/// `null` back gives NaN, so a saved failing report loads again.
fn null_as_nan<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Renders the diagnostic table followed by the pass/fail line.
impl fmt::Display for GradCheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", TABLE_HEADER)?;
        for d in &self.diagnostics {
            writeln!(f, "{}", d)?;
        }
        write!(f, "{}", self.summary())
    }
}
