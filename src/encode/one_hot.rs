use crate::encode::error::{EncodeError, Result};
use crate::math::matrix::Matrix;

/// One-hot encodes class labels.
///
/// Row `k` of the result is the `y[k]`-th row of the `n_labels × n_labels`
/// identity: 1.0 at column `y[k]`, 0.0 elsewhere. The result is always
/// `y.len() × n_labels`, also for an empty `y`.
///
/// # Errors
/// - `ZeroWidth` if `n_labels == 0`
/// - `LabelOutOfRange` for the first label `>= n_labels`
pub fn encode_one_hot(y: &[usize], n_labels: usize) -> Result<Matrix> {
    if n_labels == 0 {
        return Err(EncodeError::ZeroWidth);
    }
    if let Some((position, &label)) = y.iter().enumerate().find(|&(_, &label)| label >= n_labels) {
        return Err(EncodeError::LabelOutOfRange { position, label, n_labels });
    }

    let mut res = Matrix::zeros(y.len(), n_labels);
    for (row, &label) in res.data.iter_mut().zip(y) {
        row[label] = 1.0;
    }
    Ok(res)
}

/// Recovers class labels from one-hot (or probability) rows by argmax.
///
/// # Errors
/// `EmptyRow` for the first row with no columns.
pub fn decode_one_hot(encoded: &Matrix) -> Result<Vec<usize>> {
    encoded
        .argmax_rows()
        .into_iter()
        .enumerate()
        .map(|(position, label)| label.ok_or(EncodeError::EmptyRow { position }))
        .collect()
}
