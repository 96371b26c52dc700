use num_traits::Zero;
use rasterix_image::{Image, ImageDtype, ImageError};

use super::FilterError;

/// Apply a separable filter to an image.
///
/// Runs a horizontal 1D pass with `kernel_x` followed by a vertical 1D pass
/// with `kernel_y` over an f64 intermediate buffer, rounding to the pixel
/// type only once at the end. The boundary policy is the same as
/// [`filter_2d`](super::filter_2d): out-of-bounds taps contribute zero and
/// the weights are not renormalized. For an outer-product kernel
/// (`Kernel::from_separable(kernel_y, kernel_x)`) the result matches the
/// direct 2D convolution within floating-point tolerance at a cost of
/// O(W * H * (len_x + len_y) * C) instead of O(W * H * len_x * len_y * C).
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_x` - The horizontal kernel.
/// * `kernel_y` - The vertical kernel.
///
/// # Errors
///
/// Returns [`FilterError::MalformedKernel`] if either kernel is empty, or
/// [`ImageError::InvalidImageSize`] if `src` and `dst` differ in size.
pub fn separable_filter<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_x: &[f64],
    kernel_y: &[f64],
) -> Result<(), FilterError> {
    if kernel_x.is_empty() || kernel_y.is_empty() {
        return Err(FilterError::MalformedKernel(kernel_y.len(), kernel_x.len()));
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        )
        .into());
    }

    let rows = src.rows();
    let cols = src.cols();
    let src_data = src.as_slice();
    let dst_data = dst.as_slice_mut();
    let mut temp = vec![f64::zero(); src_data.len()];

    let half_x = (kernel_x.len() / 2) as isize;
    let half_y = (kernel_y.len() / 2) as isize;

    // horizontal pass
    for r in 0..rows {
        let row_offset = r * cols * C;
        for c in 0..cols {
            let mut acc = [0.0f64; C];
            for (k, &w) in kernel_x.iter().enumerate() {
                let x = c as isize + k as isize - half_x;
                if x >= 0 && x < cols as isize {
                    let idx = row_offset + x as usize * C;
                    for (ch, acc_val) in acc.iter_mut().enumerate() {
                        let v: f64 = src_data[idx + ch].into();
                        *acc_val += v * w;
                    }
                }
            }

            let out_idx = row_offset + c * C;
            for (ch, &acc_val) in acc.iter().enumerate() {
                temp[out_idx + ch] = acc_val;
            }
        }
    }

    // vertical pass
    for r in 0..rows {
        let row_offset = r * cols * C;
        for c in 0..cols {
            let mut acc = [0.0f64; C];
            for (k, &w) in kernel_y.iter().enumerate() {
                let y = r as isize + k as isize - half_y;
                if y >= 0 && y < rows as isize {
                    let idx = y as usize * cols * C + c * C;
                    for (ch, acc_val) in acc.iter_mut().enumerate() {
                        *acc_val += temp[idx + ch] * w;
                    }
                }
            }

            let out_idx = row_offset + c * C;
            for (ch, &acc_val) in acc.iter().enumerate() {
                dst_data[out_idx + ch] = T::from_f64(acc_val);
            }
        }
    }

    Ok(())
}
