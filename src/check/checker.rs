use std::io::Write;

use crate::check::check_config::{CheckConfig, ZeroGradientPolicy};
use crate::check::error::{GradCheckError, Result};
use crate::check::finite_diff::estimate_partial;
use crate::check::report::{GradCheckReport, IndexDiagnostic};

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Checks `grad_function` against finite differences of `loss_function` at
/// `x`, for each coordinate in `indices`, with the default `CheckConfig`.
///
/// Writes one diagnostic row per index and a pass/fail line to stdout and
/// returns `Ok(true)` iff every index is within tolerance. `x` is not
/// modified.
///
/// # Errors
/// Out-of-range indices, a gradient of the wrong length, or a failed write to
/// stdout. A gradient that is merely wrong gives `Ok(false)`.
pub fn check_gradient<L, G>(
    loss_function: L,
    grad_function: G,
    x: &[f64],
    indices: &[usize],
) -> Result<bool>
where
    L: Fn(&[f64]) -> f64,
    G: Fn(&[f64]) -> Vec<f64>,
{
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    GradientChecker::default().check_with_writer(loss_function, grad_function, x, indices, &mut out)
}

// ---------------------------------------------------------------------------
// Checker
// ---------------------------------------------------------------------------

/// Finite-difference gradient checker.
///
/// Per call, the loss is evaluated once at `x` plus once per index (twice
/// with the central scheme) and the gradient function exactly once, at `x`.
#[derive(Debug, Clone, Default)]
pub struct GradientChecker {
    pub config: CheckConfig,
}

impl GradientChecker {
    pub fn new(config: CheckConfig) -> Self {
        GradientChecker { config }
    }

    /// Runs the check and returns the diagnostics without printing anything.
    ///
    /// All inputs are validated before the first index is evaluated.
    pub fn run<L, G>(
        &self,
        loss_function: L,
        grad_function: G,
        x: &[f64],
        indices: &[usize],
    ) -> Result<GradCheckReport>
    where
        L: Fn(&[f64]) -> f64,
        G: Fn(&[f64]) -> Vec<f64>,
    {
        self.config.validate()?;
        if let Some(&index) = indices.iter().find(|&&i| i >= x.len()) {
            return Err(GradCheckError::IndexOutOfRange { index, len: x.len() });
        }

        let f_x = loss_function(x);
        let analytic = grad_function(x);
        if analytic.len() != x.len() {
            return Err(GradCheckError::GradientLengthMismatch {
                expected: x.len(),
                actual: analytic.len(),
            });
        }

        let diagnostics = indices
            .iter()
            .map(|&index| {
                let estimated = estimate_partial(
                    &loss_function,
                    x,
                    f_x,
                    index,
                    self.config.step,
                    self.config.scheme,
                )?;
                let d = self.judge(index, estimated, analytic[index]);
                log::debug!(
                    "index {}: estimated {} analytic {} difference {} passed {}",
                    d.index, d.expected_gradient, d.actual_gradient, d.relative_difference, d.passed
                );
                Ok(d)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(GradCheckReport::from_diagnostics(diagnostics))
    }

    /// Runs the check and renders the report to `out`. Nothing is written
    /// when the inputs are rejected.
    pub fn check_with_writer<L, G, W>(
        &self,
        loss_function: L,
        grad_function: G,
        x: &[f64],
        indices: &[usize],
        out: &mut W,
    ) -> Result<bool>
    where
        L: Fn(&[f64]) -> f64,
        G: Fn(&[f64]) -> Vec<f64>,
        W: Write,
    {
        let report = self.run(loss_function, grad_function, x, indices)?;
        writeln!(out, "Checking gradient accuracy")?;
        writeln!(out, "{}", report)?;
        Ok(report.is_valid)
    }

    /// Checks every coordinate of `x`.
    pub fn check_all<L, G, W>(
        &self,
        loss_function: L,
        grad_function: G,
        x: &[f64],
        out: &mut W,
    ) -> Result<bool>
    where
        L: Fn(&[f64]) -> f64,
        G: Fn(&[f64]) -> Vec<f64>,
        W: Write,
    {
        let indices: Vec<usize> = (0..x.len()).collect();
        self.check_with_writer(loss_function, grad_function, x, &indices, out)
    }

    /// Compares one estimate against its analytic value.
    fn judge(&self, index: usize, estimated: f64, analytic: f64) -> IndexDiagnostic {
        let difference = if analytic != 0.0 {
            (analytic - estimated) / analytic
        } else {
            match self.config.zero_policy {
                ZeroGradientPolicy::AbsoluteError => {
                    log::warn!(
                        "analytic gradient at index {} is zero; comparing absolute error instead",
                        index
                    );
                    analytic - estimated
                }
                ZeroGradientPolicy::Fail => f64::NAN,
            }
        };

        // NaN compares false against everything, so test for a pass explicitly.
        let passed = difference.abs() <= self.config.tolerance;

        IndexDiagnostic {
            index,
            expected_gradient: estimated,
            actual_gradient: analytic,
            relative_difference: difference,
            passed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use crate::check::check_config::DifferenceScheme;
    use crate::check::report::{FAIL_MESSAGE, PASS_MESSAGE};

    fn sum_of_squares(v: &[f64]) -> f64 {
        v.iter().map(|x| x * x).sum()
    }

    fn double(v: &[f64]) -> Vec<f64> {
        v.iter().map(|x| 2.0 * x).collect()
    }

    #[test]
    fn exact_gradient_passes() {
        let x = [1.0, -2.0, 3.5, 0.25];
        let report = GradientChecker::default()
            .run(sum_of_squares, double, &x, &[0, 1, 2, 3])
            .unwrap();
        assert!(report.is_valid);
        assert_eq!(report.diagnostics.len(), 4);
    }

    #[test]
    fn zero_gradient_on_non_constant_loss_fails() {
        let x = [1.0, 2.0];
        let report = GradientChecker::default()
            .run(sum_of_squares, |v: &[f64]| vec![0.0; v.len()], &x, &[0, 1])
            .unwrap();
        assert!(!report.is_valid);
        assert_eq!(report.failures().count(), 2);
    }

    #[test]
    fn wrong_scale_fails() {
        let x = [1.0, 2.0];
        let halved = |v: &[f64]| v.to_vec();
        let report = GradientChecker::default().run(sum_of_squares, halved, &x, &[1]).unwrap();
        assert!(!report.is_valid);
        // analytic 2, estimate ~4: (2 - 4) / 2
        assert!((report.diagnostics[0].relative_difference + 1.0).abs() < 1e-5);
    }

    #[test]
    fn zero_analytic_gradient_policies() {
        // Flat at the origin: analytic and estimated are both ~0.
        let x = [0.0, 1.0];

        let absolute = GradientChecker::default().run(sum_of_squares, double, &x, &[0]).unwrap();
        assert!(absolute.is_valid);
        assert!(absolute.diagnostics[0].relative_difference.is_finite());

        let strict = GradientChecker::new(
            CheckConfig::default().with_zero_policy(ZeroGradientPolicy::Fail),
        );
        let report = strict.run(sum_of_squares, double, &x, &[0]).unwrap();
        assert!(!report.is_valid);
        assert!(report.diagnostics[0].relative_difference.is_nan());
    }

    #[test]
    fn non_finite_loss_fails() {
        let x = [1.0];
        let report = GradientChecker::default()
            .run(|_: &[f64]| f64::NAN, |_: &[f64]| vec![1.0], &x, &[0])
            .unwrap();
        assert!(!report.is_valid);
    }

    #[test]
    fn evaluation_counts() {
        let loss_calls = Cell::new(0);
        let grad_calls = Cell::new(0);
        let loss = |v: &[f64]| {
            loss_calls.set(loss_calls.get() + 1);
            sum_of_squares(v)
        };
        let grad = |v: &[f64]| {
            grad_calls.set(grad_calls.get() + 1);
            double(v)
        };
        let x = [1.0, 2.0, 3.0];
        GradientChecker::default().run(&loss, &grad, &x, &[0, 2, 2]).unwrap();
        assert_eq!(loss_calls.get(), 1 + 3);
        assert_eq!(grad_calls.get(), 1);

        loss_calls.set(0);
        let central = GradientChecker::new(CheckConfig::default().with_scheme(DifferenceScheme::Central));
        central.run(&loss, &grad, &x, &[0, 1]).unwrap();
        assert_eq!(loss_calls.get(), 1 + 2 * 2);
    }

    #[test]
    fn index_out_of_range_is_an_error() {
        let loss_calls = Cell::new(0);
        let loss = |v: &[f64]| {
            loss_calls.set(loss_calls.get() + 1);
            sum_of_squares(v)
        };
        let err = GradientChecker::default().run(&loss, double, &[1.0, 2.0], &[0, 2]).unwrap_err();
        assert!(matches!(err, GradCheckError::IndexOutOfRange { index: 2, len: 2 }));
        assert_eq!(loss_calls.get(), 0);
    }

    #[test]
    fn gradient_length_mismatch_is_an_error() {
        let err = GradientChecker::default()
            .run(sum_of_squares, |_: &[f64]| vec![1.0], &[1.0, 2.0], &[0])
            .unwrap_err();
        assert!(matches!(err, GradCheckError::GradientLengthMismatch { expected: 2, actual: 1 }));
    }

    #[test]
    fn invalid_config_is_an_error() {
        let checker = GradientChecker::new(CheckConfig::new(0.0, 1e-5));
        let err = checker.run(sum_of_squares, double, &[1.0], &[0]).unwrap_err();
        assert!(matches!(err, GradCheckError::InvalidConfig(_)));
    }

    #[test]
    fn rejected_inputs_leave_writer_empty() {
        let mut out = Vec::new();
        let err = GradientChecker::default()
            .check_with_writer(sum_of_squares, double, &[1.0, 2.0], &[0, 7], &mut out)
            .unwrap_err();
        assert!(matches!(err, GradCheckError::IndexOutOfRange { index: 7, len: 2 }));
        assert!(out.is_empty());
    }

    #[test]
    fn writer_gets_table_and_summary() {
        let mut out = Vec::new();
        let ok = GradientChecker::default()
            .check_all(sum_of_squares, double, &[1.0, -1.0, 2.0], &mut out)
            .unwrap();
        assert!(ok);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1 + 1 + 3 + 1);
        assert_eq!(lines[0], "Checking gradient accuracy");
        assert_eq!(lines[5], PASS_MESSAGE);

        let mut out = Vec::new();
        let ok = GradientChecker::default()
            .check_with_writer(sum_of_squares, |v: &[f64]| vec![0.0; v.len()], &[1.0], &[0], &mut out)
            .unwrap();
        assert!(!ok);
        assert!(String::from_utf8(out).unwrap().trim_end().ends_with(FAIL_MESSAGE));
    }
}
