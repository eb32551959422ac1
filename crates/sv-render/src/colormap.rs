//! Color utilities for rasters and color bars

use egui::Color32;
use ndarray::ArrayView2;
use sv_core::ColormapKind;

fn gradient(kind: ColormapKind) -> colorous::Gradient {
    match kind {
        ColormapKind::Viridis => colorous::VIRIDIS,
        ColormapKind::Plasma => colorous::PLASMA,
        ColormapKind::Inferno => colorous::INFERNO,
        ColormapKind::Magma => colorous::MAGMA,
        ColormapKind::Greys => colorous::GREYS,
    }
}

/// Map `value` into `[0, 1]` relative to `[min, max]`.
///
/// A degenerate range puts everything in the middle of the map.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max > min {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.5
    }
}

/// Color at position `t` of a colormap
pub fn colormap_color(kind: ColormapKind, t: f64) -> Color32 {
    let c = gradient(kind).eval_continuous(t.clamp(0.0, 1.0));
    Color32::from_rgb(c.r, c.g, c.b)
}

/// Colorize a raster into row-major RGBA bytes.
///
/// Non-finite pixels come out fully transparent.
pub fn colorize(raster: ArrayView2<'_, f64>, kind: ColormapKind, min: f64, max: f64) -> Vec<u8> {
    let map = gradient(kind);
    let mut rgba = Vec::with_capacity(raster.len() * 4);

    for &value in raster.iter() {
        if value.is_finite() {
            let c = map.eval_continuous(normalize(value, min, max));
            rgba.extend_from_slice(&[c.r, c.g, c.b, 255]);
        } else {
            rgba.extend_from_slice(&[0, 0, 0, 0]);
        }
    }
    rgba
}

/// Evenly spaced tick values for a color bar, `min` first
pub fn legend_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (count - 1) as f64;
            (0..count).map(|i| min + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_normalize_clamps_and_handles_flat_range() {
        assert_eq!(normalize(5.0, 0.0, 10.0), 0.5);
        assert_eq!(normalize(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(normalize(12.0, 0.0, 10.0), 1.0);
        assert_eq!(normalize(3.0, 3.0, 3.0), 0.5);
    }

    #[test]
    fn test_colorize_layout() {
        let raster = array![[0.0, 1.0], [f64::NAN, 0.5]];
        let rgba = colorize(raster.view(), ColormapKind::Greys, 0.0, 1.0);

        assert_eq!(rgba.len(), 16);
        // Row-major: third pixel is the NaN
        assert_eq!(&rgba[8..12], &[0, 0, 0, 0]);
        assert_eq!(rgba[3], 255);

        // Greys runs light to dark
        assert!(rgba[0] > rgba[4]);
    }

    #[test]
    fn test_colormap_endpoints_differ() {
        let low = colormap_color(ColormapKind::Viridis, 0.0);
        let high = colormap_color(ColormapKind::Viridis, 1.0);
        assert_ne!(low, high);
        assert_eq!(colormap_color(ColormapKind::Viridis, 2.0), high);
    }

    #[test]
    fn test_legend_ticks() {
        assert_eq!(legend_ticks(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
        assert_eq!(legend_ticks(2.0, 4.0, 1), vec![2.0]);
        assert!(legend_ticks(0.0, 1.0, 0).is_empty());
    }
}
