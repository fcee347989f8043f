pub mod check_config;
pub mod checker;
pub mod error;
pub mod finite_diff;
pub mod report;
pub mod sampling;

pub use check_config::{CheckConfig, DifferenceScheme, ZeroGradientPolicy};
pub use checker::{check_gradient, GradientChecker};
pub use error::GradCheckError;
pub use finite_diff::estimate_partial;
pub use report::{GradCheckReport, IndexDiagnostic};
pub use sampling::sample_indices;
