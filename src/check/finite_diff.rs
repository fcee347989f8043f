//! Numeric partial derivatives by finite differences.

use crate::check::check_config::DifferenceScheme;
use crate::check::error::{GradCheckError, Result};

/// Estimates ∂f/∂x[index] at `x`.
///
/// `baseline` must be `loss(x)`; it is reused by the forward scheme so the
/// caller evaluates the unperturbed loss only once per check. The perturbation
/// is applied to a private copy, `x` itself is never written.
///
/// # Errors
/// `IndexOutOfRange` if `index >= x.len()`; the loss is not evaluated.
pub fn estimate_partial<L>(
    loss: &L,
    x: &[f64],
    baseline: f64,
    index: usize,
    step: f64,
    scheme: DifferenceScheme,
) -> Result<f64>
where
    L: Fn(&[f64]) -> f64,
{
    if index >= x.len() {
        return Err(GradCheckError::IndexOutOfRange { index, len: x.len() });
    }

    let mut perturbed = x.to_vec();
    let estimate = match scheme {
        DifferenceScheme::Forward => {
            perturbed[index] += step;
            (loss(&perturbed) - baseline) / step
        }
        DifferenceScheme::Central => {
            perturbed[index] = x[index] + step;
            let f_plus = loss(&perturbed);
            perturbed[index] = x[index] - step;
            let f_minus = loss(&perturbed);
            (f_plus - f_minus) / (2.0 * step)
        }
    };
    Ok(estimate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sum_of_squares(v: &[f64]) -> f64 {
        v.iter().map(|x| x * x).sum()
    }

    #[test]
    fn forward_difference_on_quadratic() {
        let x = [1.0, -2.0, 3.0];
        let f_x = sum_of_squares(&x);
        for (i, &xi) in x.iter().enumerate() {
            let d = estimate_partial(&sum_of_squares, &x, f_x, i, 1e-7, DifferenceScheme::Forward).unwrap();
            assert_abs_diff_eq!(d, 2.0 * xi, epsilon = 1e-5);
        }
    }

    #[test]
    fn central_difference_on_transcendental() {
        // d/dx sin(x)·exp(x) = (cos(x) + sin(x))·exp(x)
        let f = |v: &[f64]| v[0].sin() * v[0].exp();
        let x = [1.0];
        let d = estimate_partial(&f, &x, f(&x), 0, 1e-5, DifferenceScheme::Central).unwrap();
        let expected = (1.0_f64.cos() + 1.0_f64.sin()) * 1.0_f64.exp();
        assert_abs_diff_eq!(d, expected, epsilon = 1e-8);
    }

    #[test]
    fn forward_uses_given_baseline() {
        let calls = std::cell::Cell::new(0);
        let f = |v: &[f64]| {
            calls.set(calls.get() + 1);
            v[0]
        };
        let x = [0.5];
        estimate_partial(&f, &x, 0.5, 0, 1e-7, DifferenceScheme::Forward).unwrap();
        assert_eq!(calls.get(), 1);
        estimate_partial(&f, &x, 0.5, 0, 1e-7, DifferenceScheme::Central).unwrap();
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn index_past_end_is_an_error() {
        let calls = std::cell::Cell::new(0);
        let f = |v: &[f64]| {
            calls.set(calls.get() + 1);
            sum_of_squares(v)
        };
        for scheme in [DifferenceScheme::Forward, DifferenceScheme::Central] {
            let err = estimate_partial(&f, &[1.0], 1.0, 5, 1e-7, scheme).unwrap_err();
            assert!(matches!(err, GradCheckError::IndexOutOfRange { index: 5, len: 1 }));
        }
        assert_eq!(calls.get(), 0);
    }
}
