//! Engine configuration with TOML support.
//!
//! All fields use `#[serde(default)]`, so a partial file (e.g. only
//! `quarter_turn_seconds = 0.4`) works.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::ConfigError;

/// Tunables for the lattice geometry and the turn animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Half extent of one cublet.
    pub cublet_size: f32,
    /// Distance between neighbouring cublet centers.
    pub spacing: f32,
    /// Margin added to half the spacing to form the face threshold.
    pub threshold_epsilon: f32,
    /// Duration of one animated quarter turn, in seconds.
    pub quarter_turn_seconds: f32,
    /// Easing applied to turn progress.
    pub easing: Easing,
    /// Seed for random moves. A fixed seed makes shuffles reproducible.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cublet_size: 10.0,
            spacing: 20.0,
            threshold_epsilon: 1.0,
            quarter_turn_seconds: 0.75,
            easing: Easing::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a TOML file and validate it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Coordinate magnitude beyond which a cublet belongs to an outer face.
    #[inline]
    pub fn face_threshold(&self) -> f32 {
        self.spacing / 2.0 + self.threshold_epsilon
    }

    /// Checks the geometric and timing constraints.
    ///
    /// The face threshold must separate the middle layer (at 0) from the outer
    /// layers (at +-spacing) with room to spare on both sides: strictly between
    /// one and one and a half half-spacings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.spacing > 0.0 && self.spacing >= 2.0 * self.cublet_size) {
            return Err(ConfigError::InvalidSpacing {
                spacing: self.spacing,
                cublet_size: self.cublet_size,
            });
        }

        let threshold = self.face_threshold();
        let half_spacing = self.spacing / 2.0;
        let (min, max) = (half_spacing, 1.5 * half_spacing);
        if !(threshold > min && threshold < max) {
            return Err(ConfigError::InvalidThreshold { threshold, min, max });
        }

        if !(self.quarter_turn_seconds.is_finite() && self.quarter_turn_seconds > 0.0) {
            return Err(ConfigError::InvalidDuration {
                seconds: self.quarter_turn_seconds,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        config.validate().unwrap();
        assert_eq!(config.face_threshold(), 11.0);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: EngineConfig =
            toml::from_str("quarter_turn_seconds = 0.4\neasing = \"linear\"").unwrap();
        assert_eq!(config.quarter_turn_seconds, 0.4);
        assert_eq!(config.easing, Easing::Linear);
        assert_eq!(config.spacing, 20.0);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_threshold_must_separate_layers() {
        let zero_margin = EngineConfig {
            threshold_epsilon: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            zero_margin.validate(),
            Err(ConfigError::InvalidThreshold { .. })
        ));

        let too_wide = EngineConfig {
            threshold_epsilon: 5.0,
            ..Default::default()
        };
        assert!(matches!(
            too_wide.validate(),
            Err(ConfigError::InvalidThreshold { .. })
        ));
    }

    #[test]
    fn test_overlapping_cublets_are_rejected() {
        let config = EngineConfig {
            cublet_size: 12.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSpacing { .. })
        ));
    }

    #[test]
    fn test_duration_must_be_positive() {
        let config = EngineConfig {
            quarter_turn_seconds: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDuration { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = EngineConfig::load(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.toml"), "{err}");
    }
}
