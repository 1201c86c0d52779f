#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Curve that shapes a linear `[0, 1]` fraction for renderer-facing motion.
///
/// Timing stays linear throughout the engine; easing is applied only at the
/// edge where progress is handed to a renderer.
pub enum Ease {
    /// Identity; no shaping.
    #[default]
    Linear,
    /// Quadratic accelerate-in.
    InQuad,
    /// Quadratic decelerate-out.
    OutQuad,
    /// Quadratic ease on both ends.
    InOutQuad,
    /// Cubic accelerate-in.
    InCubic,
    /// Cubic decelerate-out; the engine's default entrance.
    OutCubic,
    /// Cubic ease on both ends.
    InOutCubic,
    /// Decelerating overshoot that swings past `1` before settling.
    OutBack,
}

impl Ease {
    /// Shape a fraction; the input clamps into `[0, 1]` first.
    ///
    /// Every curve maps `0` to `0` and `1` to `1`. `OutBack` exceeds `1`
    /// inside the window, so callers that feed the result into geometry
    /// must tolerate overshoot.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::OutBack => {
                // Standard back-out overshoot constants.
                const C1: f64 = 1.70158;
                const C3: f64 = C1 + 1.0;
                1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/ease.rs"]
mod tests;
