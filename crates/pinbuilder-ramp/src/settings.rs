//! Ramp assembly settings.

use pinbuilder_math::tolerance::DEFAULT_CHAIN_FIT_TOLERANCE;
use serde::{Deserialize, Serialize};

use crate::cross_section::CrossSectionSpec;
use crate::error::{RampError, Result};

/// Default absolute tolerance between the fitted centerline length and the
/// height profile's x-length.
pub const DEFAULT_LENGTH_TOLERANCE: f64 = 1e-3;

/// Tolerances and profiles used to assemble and sweep ramps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RampSettings {
    /// Per-segment length change accepted when fitting centerline samples.
    pub fit_tolerance: f64,
    /// Accepted difference between centerline length and height x-length.
    pub length_tolerance: f64,
    /// Profile swept to build each ramp body.
    pub body: CrossSectionSpec,
    /// Profile swept to cut each ramp channel.
    pub cutter: CrossSectionSpec,
}

impl Default for RampSettings {
    fn default() -> Self {
        Self {
            fit_tolerance: DEFAULT_CHAIN_FIT_TOLERANCE,
            length_tolerance: DEFAULT_LENGTH_TOLERANCE,
            body: CrossSectionSpec::body(),
            cutter: CrossSectionSpec::cutter(),
        }
    }
}

impl RampSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.fit_tolerance.is_nan() || self.fit_tolerance <= 0.0 {
            return Err(RampError::InvalidSettings(
                "fit_tolerance must be positive".into(),
            ));
        }
        if self.length_tolerance.is_nan() || self.length_tolerance <= 0.0 {
            return Err(RampError::InvalidSettings(
                "length_tolerance must be positive".into(),
            ));
        }
        self.body.validate()?;
        self.cutter.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cross_section::CrossSectionKind;

    #[test]
    fn test_defaults_validate() {
        let settings = RampSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.body.kind, CrossSectionKind::Box);
        assert_eq!(settings.cutter.kind, CrossSectionKind::InnerRight);
    }

    #[test]
    fn test_rejects_non_positive_tolerances() {
        let settings = RampSettings {
            fit_tolerance: 0.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = RampSettings {
            length_tolerance: -1e-3,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let settings: RampSettings = toml::from_str(
            r#"
            length_tolerance = 0.5

            [cutter]
            kind = "inner_both"
            "#,
        )
        .unwrap();
        assert_eq!(settings.length_tolerance, 0.5);
        assert_eq!(settings.fit_tolerance, DEFAULT_CHAIN_FIT_TOLERANCE);
        assert_eq!(settings.cutter.kind, CrossSectionKind::InnerBoth);
        assert_eq!(settings.cutter.height(), 25.0);
    }
}
