//! Validated 3-D image stacks (slice, row, col)

use ndarray::{Array2, Array3, ArrayView2, Axis};

use crate::{Result, ViewerError};

/// An ordered stack of equally sized 2-D images.
///
/// Construction guarantees at least one slice and at least one pixel per
/// slice, so every index in `0..len()` has a non-empty image behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageStack {
    data: Array3<f64>,
}

impl ImageStack {
    /// Build a stack from individual slices. Fails on an empty list or on
    /// slices whose shape differs from the first one.
    pub fn from_slices(slices: Vec<Array2<f64>>) -> Result<Self> {
        let Some(first) = slices.first() else {
            return Err(ViewerError::Shape("stack contains no slices".to_string()));
        };
        let expected = first.dim();

        for (index, slice) in slices.iter().enumerate().skip(1) {
            if slice.dim() != expected {
                return Err(ViewerError::Shape(format!(
                    "slice {} has shape {:?}, expected {:?}",
                    index,
                    slice.dim(),
                    expected
                )));
            }
        }

        let views: Vec<ArrayView2<'_, f64>> = slices.iter().map(|s| s.view()).collect();
        let data = ndarray::stack(Axis(0), &views)
            .map_err(|e| ViewerError::Shape(e.to_string()))?;

        Self::from_array(data)
    }

    /// Wrap an existing `(slice, row, col)` array
    pub fn from_array(data: Array3<f64>) -> Result<Self> {
        let (slices, rows, cols) = data.dim();
        if slices == 0 {
            return Err(ViewerError::Shape("stack contains no slices".to_string()));
        }
        if rows == 0 || cols == 0 {
            return Err(ViewerError::Shape(format!(
                "slices have no pixels ({}x{})",
                rows, cols
            )));
        }
        Ok(Self { data })
    }

    /// Number of slices
    pub fn len(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    /// Whether the stack has no slices; never true for a constructed stack
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(rows, cols)` shared by every slice
    pub fn slice_shape(&self) -> (usize, usize) {
        let (_, rows, cols) = self.data.dim();
        (rows, cols)
    }

    /// Borrow slice `index`, or `None` when out of range
    pub fn slice(&self, index: usize) -> Option<ArrayView2<'_, f64>> {
        if index < self.len() {
            Some(self.data.index_axis(Axis(0), index))
        } else {
            None
        }
    }

    pub fn as_array(&self) -> &Array3<f64> {
        &self.data
    }
}
