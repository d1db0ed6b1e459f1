// Tunables for a particle field. Defaults reproduce the cyan plexus background.

use crate::color::Color;
use crate::error::FieldError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of particles kept alive, regenerated in full on resize.
    pub particle_count: usize,
    /// Pairs strictly closer than this are joined by a line.
    pub connection_distance: f64,
    /// Bound on each velocity component, in surface units per frame.
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    /// RRGGBBAA, the alpha byte is ignored in favour of the opacities below.
    pub color: u32,
    pub particle_alpha: f64,
    /// Opacity of a connection between two coincident particles.
    pub max_line_opacity: f64,
    pub line_width: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            particle_count: 100,
            connection_distance: 150.0,
            max_speed: 0.25,
            min_radius: 1.0,
            max_radius: 3.0,
            color: 0x00f0ffff,
            particle_alpha: 0.5,
            max_line_opacity: 0.3,
            line_width: 1.0,
        }
    }
}

impl FieldConfig {
    pub fn from_json(json: &str) -> Result<FieldConfig, FieldError> {
        let config: FieldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn color(&self) -> Color {
        Color::from_u32(self.color)
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        if !(self.connection_distance.is_finite() && self.connection_distance > 0.0) {
            return Err(invalid(format!(
                "connection_distance must be positive, got {}",
                self.connection_distance
            )));
        }
        if !(self.max_speed.is_finite() && self.max_speed >= 0.0) {
            return Err(invalid(format!(
                "max_speed must be non-negative, got {}",
                self.max_speed
            )));
        }
        if !(self.min_radius.is_finite() && self.max_radius.is_finite()) || self.min_radius < 0.0 {
            return Err(invalid(format!(
                "radius range [{}, {}] must be finite and non-negative",
                self.min_radius, self.max_radius
            )));
        }
        if self.min_radius > self.max_radius {
            return Err(invalid(format!(
                "min_radius {} exceeds max_radius {}",
                self.min_radius, self.max_radius
            )));
        }
        for (name, value) in &[
            ("particle_alpha", self.particle_alpha),
            ("max_line_opacity", self.max_line_opacity),
        ] {
            if !(0.0..=1.0).contains(value) {
                return Err(invalid(format!("{} must lie in [0, 1], got {}", name, value)));
            }
        }
        if !(self.line_width.is_finite() && self.line_width >= 0.0) {
            return Err(invalid(format!(
                "line_width must be non-negative, got {}",
                self.line_width
            )));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> FieldError {
    FieldError::InvalidConfig(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_page_background() {
        let config = FieldConfig::default();
        assert_eq!(config.particle_count, 100);
        assert_eq!(config.connection_distance, 150.0);
        assert_eq!(config.max_speed, 0.25);
        assert_eq!((config.min_radius, config.max_radius), (1.0, 3.0));
        assert_eq!(config.max_line_opacity, 0.3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn json_fills_missing_keys_with_defaults() {
        let config = FieldConfig::from_json(r#"{"particle_count": 40}"#).unwrap();
        assert_eq!(config.particle_count, 40);
        assert_eq!(config.connection_distance, 150.0);
    }

    #[test]
    fn zero_particles_is_valid() {
        let config = FieldConfig {
            particle_count: 0,
            ..FieldConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_threshold() {
        let err = FieldConfig::from_json(r#"{"connection_distance": 0}"#).unwrap_err();
        assert!(matches!(err, FieldError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_inverted_radius_range() {
        let config = FieldConfig {
            min_radius: 4.0,
            max_radius: 2.0,
            ..FieldConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_opacity_above_one() {
        let config = FieldConfig {
            max_line_opacity: 1.5,
            ..FieldConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = FieldConfig::from_json("{particle_count").unwrap_err();
        assert!(matches!(err, FieldError::ConfigParse(_)));
    }
}
