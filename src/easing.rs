//! Easing curves for face-turn animation.
//!
//! An easing maps normalized time progress in [0, 1] to animation progress.
//! Curves may overshoot past 1.0 in between (the elastic curve does), but all
//! of them start at exactly 0 and end at exactly 1.

use serde::{Deserialize, Serialize};

/// Easing function variants for face turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant angular velocity.
    Linear,
    /// Cubic ease-out (fast start, slow end).
    OutCubic,
    /// Elastic ease-out: overshoots the target and springs back.
    #[default]
    OutElastic,
}

impl Easing {
    /// Evaluate the easing at time `t`.
    ///
    /// Input is clamped to [0.0, 1.0]; the endpoints map exactly to 0 and 1.
    #[inline]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }

        match self {
            Easing::Linear => t,
            Easing::OutCubic => {
                let omt = 1.0 - t;
                1.0 - omt * omt * omt
            }
            Easing::OutElastic => {
                const C4: f32 = std::f32::consts::TAU / 3.0;
                2f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 3] = [Easing::Linear, Easing::OutCubic, Easing::OutElastic];

    #[test]
    fn test_endpoints_are_exact() {
        for easing in ALL {
            assert_eq!(easing.evaluate(0.0), 0.0, "{easing:?}");
            assert_eq!(easing.evaluate(1.0), 1.0, "{easing:?}");
        }
    }

    #[test]
    fn test_input_clamping() {
        for easing in ALL {
            assert_eq!(easing.evaluate(-0.5), 0.0);
            assert_eq!(easing.evaluate(1.5), 1.0);
        }
    }

    #[test]
    fn test_elastic_overshoots_then_settles() {
        let elastic = Easing::OutElastic;
        let peak = (1..100)
            .map(|i| elastic.evaluate(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0, "elastic curve should overshoot, peak {peak}");
        assert!((elastic.evaluate(0.99) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_out_cubic_is_ease_out() {
        let result_at_quarter = Easing::OutCubic.evaluate(0.25);
        assert!(
            result_at_quarter > 0.25,
            "Ease-out should have value > 0.25 at t=0.25, got {}",
            result_at_quarter
        );
    }

    #[test]
    fn test_deserializes_snake_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            easing: Easing,
        }
        let parsed: Wrapper = toml::from_str("easing = \"out_cubic\"").unwrap();
        assert_eq!(parsed.easing, Easing::OutCubic);
    }
}
