use rasterix_image::ImageError;

use super::kernels::FilterOp;

/// Errors that can occur during kernel construction or filtering.
#[derive(thiserror::Error, Debug)]
pub enum FilterError {
    /// The intensity parameter is not a finite value in the closed range [0, 5].
    #[error("Intensity must be a finite value between 0.0 and 5.0, got {0}")]
    InvalidIntensity(f64),

    /// The requested operation has no kernel construction rule.
    #[error("No kernel construction rule for operation {0:?}")]
    UnsupportedOperation(FilterOp),

    /// The kernel has zero rows or zero columns.
    #[error("Kernel must have at least one row and one column, got {0}x{1}")]
    MalformedKernel(usize, usize),

    /// The kernel weight buffer does not match the kernel dimensions.
    #[error("Kernel weights length ({0}) does not match the kernel size ({1})")]
    InvalidKernelLength(usize, usize),

    /// Error from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),
}
