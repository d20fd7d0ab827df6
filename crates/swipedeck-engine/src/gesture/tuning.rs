use serde::{Deserialize, Serialize};

/// Thresholds and interpolation constants for the gesture machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureTuning {
    /// Fraction of viewport width a release must exceed to commit a swipe
    pub commit_fraction: f64,
    /// Fraction of viewport width after which the element starts fading
    pub fade_start_fraction: f64,
    /// Opacity is `fade_bias - |dx| / width` once fading
    pub fade_bias: f64,
    /// Expand trigger height is `viewport.height / trigger_divisor`
    pub trigger_divisor: f64,
    /// Corner radius of the element at rest
    pub rest_corner_radius: f64,
    /// The element lifts by `dy / lift_divisor` while expanding
    pub lift_divisor: f64,
    pub snap_back_ms: u64,
}

impl Default for GestureTuning {
    fn default() -> Self {
        Self {
            commit_fraction: 0.25,
            fade_start_fraction: 0.1,
            fade_bias: 1.1,
            trigger_divisor: 4.0,
            rest_corner_radius: 20.0,
            lift_divisor: 1.8,
            snap_back_ms: 500,
        }
    }
}

impl GestureTuning {
    /// The alternate tuning with a shorter expand trigger (`height / 5`)
    pub fn eager_expand() -> Self {
        Self {
            trigger_divisor: 5.0,
            ..Self::default()
        }
    }
}
