//! Sample moments and co-movement statistics.

use nalgebra::DMatrix;

use crate::error::{MathError, MathResult};

/// Variances at or below this are treated as zero.
///
/// A constant series has a true variance of 0 but the two-pass formula leaves
/// a residue of order 1e-35 from rounding in the mean. Real return series sit
/// many orders of magnitude above this bound.
pub const VARIANCE_EPSILON: f64 = 1e-20;

/// Returns true if `variance` is indistinguishable from zero.
#[must_use]
pub fn is_negligible_variance(variance: f64) -> bool {
    variance.abs() <= VARIANCE_EPSILON
}

/// Arithmetic mean. `None` for an empty sample.
///
/// ```
/// use aurum_math::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean(&[]), None);
/// ```
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample covariance (divides by n - 1).
///
/// Uses the two-pass formula. `sample_covariance(x, x)` performs exactly the
/// same floating-point operations as [`sample_variance`], so ratios of the two
/// are exact for identical inputs.
pub fn sample_covariance(x: &[f64], y: &[f64]) -> MathResult<f64> {
    if x.len() != y.len() {
        return Err(MathError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    let n = x.len();
    if n < 2 {
        return Err(MathError::insufficient_data(2, n));
    }

    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let cross: f64 = x
        .iter()
        .zip(y)
        .map(|(a, b)| (a - mean_x) * (b - mean_y))
        .sum();

    Ok(cross / (n - 1) as f64)
}

/// Sample variance (divides by n - 1).
pub fn sample_variance(values: &[f64]) -> MathResult<f64> {
    sample_covariance(values, values)
}

/// Sample standard deviation (divides by n - 1).
pub fn sample_std_dev(values: &[f64]) -> MathResult<f64> {
    sample_variance(values).map(f64::sqrt)
}

/// Pearson correlation coefficient.
///
/// Fails with [`MathError::DivisionByZero`] when either sample is constant.
pub fn correlation(x: &[f64], y: &[f64]) -> MathResult<f64> {
    let cov = sample_covariance(x, y)?;
    let var_x = sample_variance(x)?;
    let var_y = sample_variance(y)?;

    let denom = var_x * var_y;
    if is_negligible_variance(var_x) || is_negligible_variance(var_y) {
        return Err(MathError::DivisionByZero { value: denom });
    }

    Ok((cov / denom.sqrt()).clamp(-1.0, 1.0))
}

/// Sample covariance matrix of equally long columns.
///
/// Element `(i, j)` is the covariance of `columns[i]` and `columns[j]`.
pub fn covariance_matrix(columns: &[&[f64]]) -> MathResult<DMatrix<f64>> {
    if columns.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }

    let k = columns.len();
    let mut matrix = DMatrix::zeros(k, k);
    for i in 0..k {
        for j in i..k {
            let cov = sample_covariance(columns[i], columns[j])?;
            matrix[(i, j)] = cov;
            matrix[(j, i)] = cov;
        }
    }
    Ok(matrix)
}
