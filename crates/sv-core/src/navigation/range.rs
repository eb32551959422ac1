/// A continuous value constrained to a closed real range.
///
/// This is the slider half of a paged slider: it knows nothing about pages,
/// only that values outside `[min, max]` get pulled back in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeInput {
    min: f64,
    max: f64,
    value: f64,
}

impl RangeInput {
    /// Create a range input. `min` and `max` are swapped if given backwards.
    pub fn new(min: f64, max: f64, value: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let mut input = Self { min, max, value: min };
        if let Some(v) = input.clamp(value) {
            input.value = v;
        }
        input
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Clamp a raw value into range. NaN has no position and yields `None`.
    pub fn clamp(&self, raw: f64) -> Option<f64> {
        if raw.is_nan() {
            None
        } else {
            Some(raw.clamp(self.min, self.max))
        }
    }

    /// Store a raw value, clamped. Returns the stored value.
    pub fn set(&mut self, raw: f64) -> Option<f64> {
        let value = self.clamp(raw)?;
        self.value = value;
        Some(value)
    }

    /// Position of the current value as a fraction of the range
    pub fn fraction(&self) -> f64 {
        let span = self.max - self.min;
        if span > 0.0 {
            (self.value - self.min) / span
        } else {
            0.0
        }
    }

    /// Map a fraction of the track (0 = min end, 1 = max end) to a value
    pub fn value_at_fraction(&self, t: f64) -> Option<f64> {
        if t.is_nan() {
            return None;
        }
        Some(self.min + t.clamp(0.0, 1.0) * (self.max - self.min))
    }
}
