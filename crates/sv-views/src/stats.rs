//! Value ranges for autoscaling

use ndarray::ArrayView2;
use sv_core::ImageStack;
use tracing::debug;

/// Range used when there is nothing finite to measure
pub const FALLBACK_RANGE: (f64, f64) = (0.0, 1.0);

/// Min and max over the finite values, `None` if there are none
pub fn finite_range<'a, I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a f64>,
{
    values
        .into_iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |range, v| match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Autoscale range of one slice
pub fn slice_range(slice: ArrayView2<'_, f64>) -> (f64, f64) {
    finite_range(slice.iter()).unwrap_or_else(|| {
        debug!("slice has no finite pixels, using fallback range");
        FALLBACK_RANGE
    })
}

/// Range over every pixel of every slice
pub fn stack_range(stack: &ImageStack) -> (f64, f64) {
    finite_range(stack.as_array().iter()).unwrap_or_else(|| {
        debug!("stack has no finite pixels, using fallback range");
        FALLBACK_RANGE
    })
}
