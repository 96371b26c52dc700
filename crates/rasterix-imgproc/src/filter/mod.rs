//! Filter operations
//!
//! This module provides the generic 2D convolution engine and the kernel
//! builders that feed it.

/// Filter error types
mod error;
pub use error::FilterError;

/// Convolution kernel type
mod kernel;
pub use kernel::Kernel;

/// Filter kernels
pub mod kernels;
pub use kernels::FilterOp;

/// 2D convolution operations
mod convolution;
pub use convolution::*;

/// Filter operations
mod ops;
pub use ops::*;

/// Separable filter operations
mod separable_filter;
pub use separable_filter::*;
