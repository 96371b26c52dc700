use rasterix_image::{Image, ImageDtype};

use super::kernels::{self, FilterOp};
use super::{filter_2d, FilterError};

/// Apply the requested filter operation to an image.
///
/// This is the full pipeline: validate the intensity, build the kernel for
/// the operation, then run the 2D convolution. Validation and kernel
/// construction errors are reported before any pixel of `dst` is written,
/// so a failed request leaves the destination untouched.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `op` - The requested filter operation.
/// * `intensity` - Strength parameter in the closed range [0, 5].
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn apply_filter<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    op: FilterOp,
    intensity: f64,
) -> Result<(), FilterError> {
    let kernel = kernels::build_kernel(op, intensity)?;
    filter_2d(src, dst, &kernel)
}

/// Blur an image using a box blur filter.
///
/// The kernel size is derived from the intensity (`round(3 * intensity)`,
/// never below one), so intensity zero degenerates to the identity.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `intensity` - Strength parameter in the closed range [0, 5].
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn box_blur<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    intensity: f64,
) -> Result<(), FilterError> {
    apply_filter(src, dst, FilterOp::BoxBlur, intensity)
}
