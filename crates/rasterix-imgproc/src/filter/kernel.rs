use super::FilterError;

/// A 2D convolution kernel.
///
/// The weights are stored as a flat row-major buffer indexed by
/// `row * cols + col`, with explicit `rows` and `cols` fields so the shape
/// invariant is checked once at construction. Odd dimensions place the
/// center element on the sampled pixel; even dimensions are legal and bias
/// the neighborhood toward the top-left (floor-division center offsets).
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    rows: usize,
    cols: usize,
    weights: Vec<f64>,
}

impl Kernel {
    /// Create a new kernel from its dimensions and row-major weights.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::MalformedKernel`] if `rows` or `cols` is zero,
    /// or [`FilterError::InvalidKernelLength`] if the weight buffer does not
    /// hold exactly `rows * cols` values.
    pub fn new(rows: usize, cols: usize, weights: Vec<f64>) -> Result<Self, FilterError> {
        if rows == 0 || cols == 0 {
            return Err(FilterError::MalformedKernel(rows, cols));
        }
        if weights.len() != rows * cols {
            return Err(FilterError::InvalidKernelLength(weights.len(), rows * cols));
        }
        Ok(Self {
            rows,
            cols,
            weights,
        })
    }

    /// Create a kernel as the outer product of a vertical and a horizontal
    /// 1D kernel.
    ///
    /// Convolving with the result is equivalent to a vertical 1D pass with
    /// `kernel_y` followed by a horizontal 1D pass with `kernel_x`.
    pub fn from_separable(kernel_y: &[f64], kernel_x: &[f64]) -> Result<Self, FilterError> {
        let weights = kernel_y
            .iter()
            .flat_map(|&ky| kernel_x.iter().map(move |&kx| ky * kx))
            .collect();
        Self::new(kernel_y.len(), kernel_x.len(), weights)
    }

    /// Get the number of rows in the kernel.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Get the number of columns in the kernel.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the kernel weights as a flat row-major slice.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Get the weight at the given kernel coordinates.
    pub fn weight(&self, row: usize, col: usize) -> f64 {
        self.weights[row * self.cols + col]
    }

    /// Get the row offset of the kernel center (integer floor).
    pub fn half_rows(&self) -> usize {
        self.rows / 2
    }

    /// Get the column offset of the kernel center (integer floor).
    pub fn half_cols(&self) -> usize {
        self.cols / 2
    }

    /// Get the sum of the kernel weights.
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}
