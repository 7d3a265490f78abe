//! The ramp assembler.
//!
//! A ramp is drawn as three kinds of curves sharing an id:
//!
//! - a centerline chain in plan view,
//! - one width marker per centerline segment boundary, whose own length is
//!   the ramp width at that boundary,
//! - a height profile whose x axis is distance along the centerline and
//!   whose y axis is elevation.
//!
//! Sample counts for the centerline are fitted once at construction and
//! reused for validation, lifting and width interpolation, so every derived
//! sequence has one entry per lifted path point.

use pinbuilder_math::{BezierPath, Path, Vec2};
use tracing::debug;

use crate::cross_section::CrossSectionSpec;
use crate::error::{RampError, Result};
use crate::settings::RampSettings;
use crate::sweep::SweepCall;

/// A ramp assembled from its drawn parts.
#[derive(Debug, Clone, PartialEq)]
pub struct Ramp {
    id: String,
    centerline: BezierPath<2>,
    markers: Vec<BezierPath<2>>,
    height: BezierPath<2>,
    samples: Vec<usize>,
    centerline_length: f64,
    length_tolerance: f64,
}

impl Ramp {
    /// Assemble a ramp, fitting centerline sample counts with
    /// `settings.fit_tolerance`.
    ///
    /// Construction does not check validity; see [`validate`](Self::validate).
    ///
    /// # Errors
    ///
    /// [`RampError::Geometry`] if centerline fitting does not converge.
    pub fn new(
        id: impl Into<String>,
        centerline: BezierPath<2>,
        markers: Vec<BezierPath<2>>,
        height: BezierPath<2>,
        settings: &RampSettings,
    ) -> Result<Self> {
        let id = id.into();
        let samples = centerline.fits(settings.fit_tolerance)?;
        let centerline_length = centerline.length(&samples)?;
        debug!(
            ramp = %id,
            segments = centerline.len(),
            markers = markers.len(),
            centerline_length,
            height_x_length = height.x_length(),
            "assembled ramp"
        );

        Ok(Self {
            id,
            centerline,
            markers,
            height,
            samples,
            centerline_length,
            length_tolerance: settings.length_tolerance,
        })
    }

    /// Ramp identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Centerline chain.
    pub fn centerline(&self) -> &BezierPath<2> {
        &self.centerline
    }

    /// Width markers in order along the centerline.
    pub fn markers(&self) -> &[BezierPath<2>] {
        &self.markers
    }

    /// Height profile chain.
    pub fn height(&self) -> &BezierPath<2> {
        &self.height
    }

    /// Fitted sample count per centerline segment.
    pub fn samples(&self) -> &[usize] {
        &self.samples
    }

    /// Centerline length at the fitted sample counts.
    pub fn centerline_length(&self) -> f64 {
        self.centerline_length
    }

    /// One width marker per centerline segment boundary.
    pub fn has_widths(&self) -> bool {
        self.markers.len() == self.centerline.len() + 1
    }

    /// The height profile spans the centerline length.
    pub fn has_heightpath(&self) -> bool {
        (self.centerline_length - self.height.x_length()).abs() <= self.length_tolerance
    }

    /// Both [`has_widths`](Self::has_widths) and
    /// [`has_heightpath`](Self::has_heightpath).
    pub fn is_valid(&self) -> bool {
        self.has_widths() && self.has_heightpath()
    }

    /// Like [`is_valid`](Self::is_valid), reporting the first failed check.
    pub fn validate(&self) -> Result<()> {
        if !self.has_widths() {
            return Err(RampError::WidthCount {
                id: self.id.clone(),
                expected: self.centerline.len() + 1,
                actual: self.markers.len(),
            });
        }
        if !self.has_heightpath() {
            return Err(RampError::LengthMismatch {
                id: self.id.clone(),
                centerline: self.centerline_length,
                height: self.height.x_length(),
            });
        }
        Ok(())
    }

    /// Width at each marker: the marker's chord length.
    pub fn width_values(&self) -> Vec<f64> {
        self.markers.iter().map(|m| m.length_uniform(0)).collect()
    }

    /// The centerline lifted by the height profile.
    pub fn lifted_path(&self) -> Result<Path<3>> {
        self.validate()?;
        Ok(self.centerline.with_height_at(&self.height, &self.samples)?)
    }

    /// Width at every lifted path point.
    ///
    /// Within segment `i` the width is interpolated linearly between markers
    /// `i` and `i + 1` at the segment's sample parameters. Shared stations
    /// between segments appear once.
    pub fn station_widths(&self) -> Result<Vec<f64>> {
        self.validate()?;
        let widths = self.width_values();

        let mut stations = Vec::new();
        for (i, &n) in self.samples.iter().enumerate() {
            let (start, end) = (widths[i], widths[i + 1]);
            let steps = n + 1;
            let first = if i == 0 { 0 } else { 1 };
            stations.extend((first..=steps).map(|j| {
                let u = j as f64 / steps as f64;
                start * (1.0 - u) + end * u
            }));
        }
        Ok(stations)
    }

    /// `[w / w0, 1]` for every station width `w`, with `w0` the first.
    pub fn scales(&self) -> Result<Path<2>> {
        let widths = self.station_widths()?;
        let first = widths[0];
        if first == 0.0 {
            return Err(RampError::ZeroWidth {
                id: self.id.clone(),
            });
        }
        Ok(Path::new(
            widths.iter().map(|w| Vec2::new(w / first, 1.0)).collect(),
        ))
    }

    /// Sweep `profile` along the lifted centerline.
    ///
    /// The profile half-width is half the first marker width; later widths
    /// are carried by the scale sequence.
    ///
    /// # Errors
    ///
    /// The validation errors for an invalid ramp, [`RampError::ZeroWidth`],
    /// and geometry errors from lifting.
    pub fn sweep(&self, profile: &CrossSectionSpec) -> Result<SweepCall> {
        let path = self.lifted_path()?;
        let scales = self.scales()?;
        let half_width = self.width_values()[0] / 2.0;
        Ok(SweepCall {
            cross_section: profile.polygon(half_width),
            path,
            scales,
        })
    }

    /// Sweep of the body profile.
    pub fn body(&self, settings: &RampSettings) -> Result<SweepCall> {
        self.sweep(&settings.body)
    }

    /// Sweep of the cutter profile.
    pub fn cutter(&self, settings: &RampSettings) -> Result<SweepCall> {
        self.sweep(&settings.cutter)
    }
}
