//! Ramp cross-section profiles.
//!
//! Profiles are drawn in the sweep plane with x across the ramp and y up,
//! centered on the centerline. `w` is the half-width of the ramp floor; the
//! wall thickness, lip overhang and connector height are fixed per
//! `CrossSectionSpec` while the width follows the ramp.

use pinbuilder_math::{Path, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::{RampError, Result};

/// Wall height of every profile except [`CrossSectionKind::Inner`] (mm).
pub const DEFAULT_WALL_HEIGHT: f64 = 25.0;

/// Height of [`CrossSectionKind::Inner`], tall enough to cut through any
/// ramp body (mm).
pub const DEFAULT_INNER_HEIGHT: f64 = 100.0;

/// Shape of a cross-section profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossSectionKind {
    /// Floor, both walls and outward lips.
    #[default]
    Box,
    /// Outer shell only, without the channel floor cut.
    Outer,
    /// The open channel above the floor.
    Inner,
    /// Channel plus clearance above both lips.
    InnerBoth,
    /// Channel plus clearance above the left lip.
    InnerLeft,
    /// Channel plus clearance above the right lip.
    InnerRight,
}

impl CrossSectionKind {
    /// Height used when a profile does not set one.
    pub fn default_height(self) -> f64 {
        match self {
            CrossSectionKind::Inner => DEFAULT_INNER_HEIGHT,
            _ => DEFAULT_WALL_HEIGHT,
        }
    }
}

/// A cross-section shape with its fixed dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossSectionSpec {
    /// Profile shape.
    pub kind: CrossSectionKind,
    /// Wall height above the floor (mm); the kind's default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Wall and floor thickness (mm).
    pub thickness: f64,
    /// Lip overhang beyond the wall (mm).
    pub overhang: f64,
    /// Clearance height above the lips for cutters (mm).
    pub connector: f64,
}

impl CrossSectionSpec {
    /// Default body profile: a [`CrossSectionKind::Box`].
    pub fn body() -> Self {
        Self {
            kind: CrossSectionKind::Box,
            height: None,
            thickness: 2.0,
            overhang: 5.0,
            connector: 25.0,
        }
    }

    /// Default cutter profile: a [`CrossSectionKind::InnerRight`].
    pub fn cutter() -> Self {
        Self {
            kind: CrossSectionKind::InnerRight,
            ..Self::body()
        }
    }

    /// Effective wall height.
    pub fn height(&self) -> f64 {
        self.height.unwrap_or_else(|| self.kind.default_height())
    }

    /// Reject negative dimensions.
    pub fn validate(&self) -> Result<()> {
        let dimensions = [
            ("height", self.height()),
            ("thickness", self.thickness),
            ("overhang", self.overhang),
            ("connector", self.connector),
        ];
        for (name, value) in dimensions {
            if value.is_nan() || value < 0.0 {
                return Err(RampError::InvalidSettings(format!(
                    "cross-section {} must be non-negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// The profile polygon for a ramp floor of half-width `w`.
    pub fn polygon(&self, w: f64) -> Path<2> {
        let h = self.height();
        let t = self.thickness;
        let o = self.overhang;
        let c = self.connector;

        let corners: Vec<(f64, f64)> = match self.kind {
            CrossSectionKind::Box => vec![
                (w, 0.0),
                (w, h),
                (w + t + o, h),
                (w + t + o, h - t),
                (w + t, h - t),
                (w + t, -t),
                (-w - t, -t),
                (-w - t, h - t),
                (-w - t - o, h - t),
                (-w - t - o, h),
                (-w, h),
                (-w, 0.0),
            ],
            CrossSectionKind::Outer => vec![
                (w + t + o, h),
                (w + t + o, h - t),
                (w + t, h - t),
                (w + t, -t),
                (-w - t, -t),
                (-w - t, h - t),
                (-w - t - o, h - t),
                (-w - t - o, h),
            ],
            CrossSectionKind::Inner => vec![(-w, 0.0), (-w, h), (w, h), (w, 0.0)],
            CrossSectionKind::InnerBoth => vec![
                (w, 0.0),
                (w, h),
                (w + o + t, h),
                (w + o + t, h + c),
                (-w - o - t, h + c),
                (-w - o - t, h),
                (-w, h),
                (-w, 0.0),
            ],
            CrossSectionKind::InnerLeft => vec![
                (w, 0.0),
                (w, h + c),
                (-w - o - t, h + c),
                (-w - o - t, h),
                (-w, h),
                (-w, 0.0),
            ],
            CrossSectionKind::InnerRight => vec![
                (w, 0.0),
                (w, h),
                (w + o + t, h),
                (w + o + t, h + c),
                (-w, h + c),
                (-w, 0.0),
            ],
        };

        Path::new(corners.into_iter().map(|(x, y)| Vec2::new(x, y)).collect())
    }
}

impl Default for CrossSectionSpec {
    fn default() -> Self {
        Self::body()
    }
}
