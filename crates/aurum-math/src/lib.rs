//! # Aurum Math
//!
//! Statistical building blocks for the Aurum portfolio analytics library.
//!
//! - **Moments**: mean, sample variance / standard deviation (n-1)
//! - **Co-movement**: sample covariance, Pearson correlation
//! - **Matrices**: sample covariance matrices via `nalgebra`
//!
//! These functions are strict: they return [`MathError`] for empty, too-short
//! or mismatched inputs. The analytics engines decide how each failure maps to
//! a neutral value.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]

pub mod error;
pub mod stats;

pub use error::{MathError, MathResult};
pub use stats::{
    correlation, covariance_matrix, is_negligible_variance, mean, sample_covariance,
    sample_std_dev, sample_variance, VARIANCE_EPSILON,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::stats::*;
}
