//! Synthetic stacks for trying the viewer without data

use ndarray::{Array2, Array3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sv_core::ImageStack;

use crate::{DataError, Result};

/// Parameters of the demo stack: a cloud that expands and fades over time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemoStackParams {
    pub slices: usize,
    pub rows: usize,
    pub cols: usize,
    /// Peak-to-peak amplitude of the uniform background noise
    pub noise: f64,
    pub seed: u64,
}

impl Default for DemoStackParams {
    fn default() -> Self {
        Self {
            slices: 10,
            rows: 20,
            cols: 20,
            noise: 0.1,
            seed: 42,
        }
    }
}

/// Build the demo stack described by `params`.
///
/// Slice `k` holds a Gaussian of width growing with `k` and constant total
/// weight, so its peak drops as the cloud spreads.
pub fn demo_stack(params: DemoStackParams) -> Result<ImageStack> {
    if !params.noise.is_finite() {
        return Err(DataError::InvalidParams(format!(
            "noise amplitude must be finite, got {}",
            params.noise
        )));
    }

    let mut rng = StdRng::seed_from_u64(params.seed);
    let cy = (params.rows as f64 - 1.0) / 2.0;
    let cx = (params.cols as f64 - 1.0) / 2.0;
    let half_noise = params.noise.abs() / 2.0;

    let mut data = Array3::zeros((params.slices, params.rows, params.cols));
    for k in 0..params.slices {
        let sigma = 1.5 + 0.6 * k as f64;
        let peak = (1.5 / sigma).powi(2);
        let cloud = Array2::from_shape_fn((params.rows, params.cols), |(r, c)| {
            let d2 = (r as f64 - cy).powi(2) + (c as f64 - cx).powi(2);
            peak * (-d2 / (2.0 * sigma * sigma)).exp()
        });
        for ((r, c), value) in cloud.indexed_iter() {
            let noise = if half_noise > 0.0 {
                rng.gen_range(-half_noise..half_noise)
            } else {
                0.0
            };
            data[[k, r, c]] = value + noise;
        }
    }

    Ok(ImageStack::from_array(data)?)
}
