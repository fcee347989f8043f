pub mod math;
pub mod check;
pub mod encode;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use check::{check_gradient, CheckConfig, GradCheckReport, GradientChecker};
pub use check::error::GradCheckError;
pub use encode::{decode_one_hot, encode_one_hot};
pub use encode::error::EncodeError;
