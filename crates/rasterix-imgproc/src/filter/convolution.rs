use rasterix_image::{Image, ImageDtype, ImageError};
use rayon::prelude::*;

use super::{FilterError, Kernel};

/// Compute one output row of the convolution.
///
/// Taps whose source coordinate falls outside the image contribute zero to
/// the accumulator and the kernel weights are not renormalized.
fn filter_row<T: ImageDtype, const C: usize>(
    src_data: &[T],
    rows: usize,
    cols: usize,
    kernel: &Kernel,
    row_dst: &mut [T],
    r: usize,
) {
    let half_rows = kernel.half_rows() as isize;
    let half_cols = kernel.half_cols() as isize;

    for c in 0..cols {
        let mut acc = [0.0f64; C];
        for ky in 0..kernel.rows() {
            let y = r as isize + ky as isize - half_rows;
            if y < 0 || y >= rows as isize {
                continue;
            }
            for kx in 0..kernel.cols() {
                let x = c as isize + kx as isize - half_cols;
                if x < 0 || x >= cols as isize {
                    continue;
                }
                let w = kernel.weight(ky, kx);
                let src_idx = (y as usize * cols + x as usize) * C;
                for (ch, acc_val) in acc.iter_mut().enumerate() {
                    let v: f64 = src_data[src_idx + ch].into();
                    *acc_val += v * w;
                }
            }
        }

        let out_idx = c * C;
        for (ch, &acc_val) in acc.iter().enumerate() {
            row_dst[out_idx + ch] = T::from_f64(acc_val);
        }
    }
}

/// Apply a 2D convolution kernel to an image.
///
/// Every output channel value is the weighted sum of the corresponding
/// channel in the kernel neighborhood of the source pixel, accumulated in
/// f64 and stored through [`ImageDtype::from_f64`] (round and saturate for
/// `u8`). Channels are filtered independently; the source is never mutated.
///
/// Boundary policy: taps outside the image contribute zero and the weights
/// are not renormalized, so averaging kernels produce systematically darker
/// values near the edges than an edge-clamped filter would. This is part of
/// the contract; callers that want edge-preserving behavior must pad the
/// source themselves.
///
/// Kernels larger than the image are legal; every out-of-bounds tap is
/// simply skipped.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel` - The convolution kernel.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if `src` and `dst` differ in
/// size.
pub fn filter_2d<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel: &Kernel,
) -> Result<(), FilterError> {
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
    if rows == 0 || cols == 0 {
        return Ok(());
    }

    let src_data = src.as_slice();
    dst.as_slice_mut()
        .chunks_exact_mut(cols * C)
        .enumerate()
        .for_each(|(r, row_dst)| {
            filter_row::<T, C>(src_data, rows, cols, kernel, row_dst, r);
        });

    Ok(())
}

/// Apply a 2D convolution kernel to an image, processing output rows in
/// parallel on the global Rayon thread pool.
///
/// Numerically identical to [`filter_2d`]: each output row reads only the
/// immutable source buffer and writes a disjoint region of the destination,
/// so no synchronization is needed beyond the final join.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel` - The convolution kernel.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if `src` and `dst` differ in
/// size.
pub fn filter_2d_parallel<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel: &Kernel,
) -> Result<(), FilterError> {
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
    if rows == 0 || cols == 0 {
        return Ok(());
    }

    let src_data = src.as_slice();
    dst.as_slice_mut()
        .par_chunks_exact_mut(cols * C)
        .enumerate()
        .for_each(|(r, row_dst)| {
            filter_row::<T, C>(src_data, rows, cols, kernel, row_dst, r);
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use rasterix_image::ImageSize;

    use super::*;
    use crate::filter::kernels::box_blur_kernel;

    fn ramp_rgba(size: ImageSize) -> Image<u8, 4> {
        let data = (0..size.width * size.height * 4)
            .map(|i| (i % 251) as u8)
            .collect();
        Image::new(size, data).unwrap()
    }

    #[test]
    fn test_identity_kernel() -> Result<(), FilterError> {
        let src = ramp_rgba(ImageSize {
            width: 4,
            height: 3,
        });
        let mut dst = Image::from_size_val(src.size(), 0u8)?;

        let kernel = Kernel::new(1, 1, vec![1.0])?;
        filter_2d(&src, &mut dst, &kernel)?;

        assert_eq!(dst.size(), src.size());
        assert_eq!(dst.as_slice(), src.as_slice());

        Ok(())
    }

    #[test]
    fn test_boundary_darkening() -> Result<(), FilterError> {
        let size = ImageSize {
            width: 5,
            height: 5,
        };
        let src = Image::<u8, 4>::from_size_val(size, 200)?;
        let mut dst = Image::from_size_val(size, 0u8)?;

        let kernel = box_blur_kernel(3)?;
        filter_2d(&src, &mut dst, &kernel)?;

        // corners: 4 of 9 taps in bounds, round(200 * 4 / 9) = 89
        for (x, y) in [(0, 0), (4, 0), (0, 4), (4, 4)] {
            for ch in 0..4 {
                assert_eq!(dst.get(x, y, ch), Some(&89));
            }
        }

        // non-corner edges: 6 of 9 taps in bounds, round(200 * 6 / 9) = 133
        assert_eq!(dst.get(2, 0, 0), Some(&133));
        assert_eq!(dst.get(0, 2, 1), Some(&133));

        // interior pixels keep the uniform brightness exactly
        for y in 1..4 {
            for x in 1..4 {
                for ch in 0..4 {
                    assert_eq!(dst.get(x, y, ch), Some(&200));
                }
            }
        }

        Ok(())
    }

    #[test]
    fn test_purity_and_determinism() -> Result<(), FilterError> {
        let src = ramp_rgba(ImageSize {
            width: 7,
            height: 5,
        });
        let src_before = src.as_slice().to_vec();

        let kernel = box_blur_kernel(3)?;

        let mut dst1 = Image::from_size_val(src.size(), 0u8)?;
        filter_2d(&src, &mut dst1, &kernel)?;

        let mut dst2 = Image::from_size_val(src.size(), 0u8)?;
        filter_2d(&src, &mut dst2, &kernel)?;

        assert_eq!(src.as_slice(), src_before.as_slice());
        assert_eq!(dst1.as_slice(), dst2.as_slice());

        Ok(())
    }

    #[test]
    fn test_saturation() -> Result<(), FilterError> {
        let size = ImageSize {
            width: 3,
            height: 3,
        };
        let src = Image::<u8, 4>::from_size_val(size, 255)?;
        let mut dst = Image::from_size_val(size, 0u8)?;

        // weight sum 2.0 on a single tap
        let kernel = Kernel::new(1, 1, vec![2.0])?;
        filter_2d(&src, &mut dst, &kernel)?;
        assert!(dst.as_slice().iter().all(|&v| v == 255));

        // weight sum 4.5 spread over a 3x3 neighborhood
        let kernel = Kernel::new(3, 3, vec![0.5; 9])?;
        filter_2d(&src, &mut dst, &kernel)?;
        assert_eq!(dst.get(1, 1, 0), Some(&255));

        Ok(())
    }

    #[test]
    fn test_parallel_matches_serial() -> Result<(), FilterError> {
        let src = ramp_rgba(ImageSize {
            width: 9,
            height: 6,
        });

        #[rustfmt::skip]
        let kernel = Kernel::new(3, 3, vec![
            0.05, 0.1, 0.05,
            0.1, 0.4, 0.1,
            0.05, 0.1, 0.05,
        ])?;

        let mut dst_serial = Image::from_size_val(src.size(), 0u8)?;
        filter_2d(&src, &mut dst_serial, &kernel)?;

        let mut dst_parallel = Image::from_size_val(src.size(), 0u8)?;
        filter_2d_parallel(&src, &mut dst_parallel, &kernel)?;

        assert_eq!(dst_serial.as_slice(), dst_parallel.as_slice());

        Ok(())
    }

    #[test]
    fn test_kernel_larger_than_image() -> Result<(), FilterError> {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let src = Image::<u8, 1>::from_size_val(size, 100)?;
        let mut dst = Image::from_size_val(size, 0u8)?;

        let kernel = box_blur_kernel(5)?;
        filter_2d(&src, &mut dst, &kernel)?;

        // only the 4 source pixels are ever in bounds: 4 * 100 / 25 = 16
        assert_eq!(dst.as_slice(), &[16, 16, 16, 16]);

        Ok(())
    }

    #[test]
    fn test_even_kernel_top_left_bias() -> Result<(), FilterError> {
        let size = ImageSize {
            width: 3,
            height: 1,
        };
        let src = Image::<u8, 1>::new(size, vec![10, 20, 30])?;
        let mut dst = Image::from_size_val(size, 0u8)?;

        // even width: center offset floors to 1, so the lone weight samples
        // the pixel to the left
        let kernel = Kernel::new(1, 2, vec![1.0, 0.0])?;
        filter_2d(&src, &mut dst, &kernel)?;

        assert_eq!(dst.as_slice(), &[0, 10, 20]);

        Ok(())
    }

    #[test]
    fn test_size_mismatch() -> Result<(), FilterError> {
        let src = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 5,
                height: 5,
            },
            0,
        )?;
        let mut dst = Image::from_size_val(
            ImageSize {
                width: 4,
                height: 5,
            },
            0u8,
        )?;

        let kernel = Kernel::new(1, 1, vec![1.0])?;
        let res = filter_2d(&src, &mut dst, &kernel);
        assert!(matches!(
            res,
            Err(FilterError::Image(ImageError::InvalidImageSize(5, 5, 4, 5)))
        ));

        Ok(())
    }

    #[test]
    fn test_empty_image() -> Result<(), FilterError> {
        let size = ImageSize {
            width: 0,
            height: 0,
        };
        let src = Image::<u8, 4>::new(size, vec![])?;
        let mut dst = Image::new(size, vec![])?;

        let kernel = box_blur_kernel(3)?;
        filter_2d(&src, &mut dst, &kernel)?;

        assert!(dst.as_slice().is_empty());

        Ok(())
    }
}
