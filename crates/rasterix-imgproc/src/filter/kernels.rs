use super::{FilterError, Kernel};

/// The filter operations a caller can request by name.
///
/// Only [`FilterOp::BoxBlur`] has a kernel construction rule in this crate.
/// The remaining variants exist so callers offering the full operation menu
/// get a typed [`FilterError::UnsupportedOperation`] instead of a silently
/// substituted default kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOp {
    /// Uniform averaging blur; kernel size derived from the intensity.
    BoxBlur,
    /// Median blur; rank filter, has no convolution kernel form.
    MedianBlur,
    /// Sharpen; backed by an external vision library.
    Sharpen,
    /// Canny edge detection; backed by an external vision library.
    EdgeDetection,
    /// Non-local means denoising; backed by an external vision library.
    NoiseReduction,
}

/// Validate that an intensity is a finite value in the closed range [0, 5].
///
/// # Errors
///
/// Returns [`FilterError::InvalidIntensity`] for NaN, infinite or
/// out-of-range values.
pub fn validate_intensity(intensity: f64) -> Result<(), FilterError> {
    if !intensity.is_finite() || !(0.0..=5.0).contains(&intensity) {
        return Err(FilterError::InvalidIntensity(intensity));
    }
    Ok(())
}

/// Create a normalized box blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
///
/// # Returns
///
/// A `kernel_size` x `kernel_size` kernel with every weight equal to
/// `1 / (kernel_size * kernel_size)`, so the weights sum to one and the
/// filter preserves overall image brightness.
pub fn box_blur_kernel(kernel_size: usize) -> Result<Kernel, FilterError> {
    let norm = 1.0 / (kernel_size * kernel_size) as f64;
    Kernel::new(kernel_size, kernel_size, vec![norm; kernel_size * kernel_size])
}

/// Create a 1D box blur kernel for the separable filter path.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
///
/// # Returns
///
/// A vector of the kernel.
pub fn box_blur_kernel_1d(kernel_size: usize) -> Vec<f64> {
    vec![1.0 / kernel_size as f64; kernel_size]
}

/// Map an intensity to a box blur kernel size, never below one.
fn box_blur_size(intensity: f64) -> usize {
    ((3.0 * intensity).round() as usize).max(1)
}

/// Build the kernel for the requested operation and intensity.
///
/// The intensity is re-validated here even though the caller boundary is
/// expected to validate it, so an out-of-range value can never reach a
/// kernel construction rule.
///
/// # Arguments
///
/// * `op` - The requested filter operation.
/// * `intensity` - Strength parameter in the closed range [0, 5].
///
/// # Errors
///
/// Returns [`FilterError::InvalidIntensity`] for bad intensities and
/// [`FilterError::UnsupportedOperation`] for operations without a kernel
/// construction rule.
pub fn build_kernel(op: FilterOp, intensity: f64) -> Result<Kernel, FilterError> {
    validate_intensity(intensity)?;

    match op {
        FilterOp::BoxBlur => box_blur_kernel(box_blur_size(intensity)),
        FilterOp::MedianBlur
        | FilterOp::Sharpen
        | FilterOp::EdgeDetection
        | FilterOp::NoiseReduction => Err(FilterError::UnsupportedOperation(op)),
    }
}
