//! A loaded playfield: its drawing features and the ramps collated from
//! them.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use pinbuilder_math::{BezierPath, Vec2};
use pinbuilder_ramp::{Ramp, RampError, RampSettings};
use pinbuilder_svg::{Feature, FeatureKind};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::scad;
use crate::settings::BuildSettings;

/// A ramp id whose parts could not be assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRamp {
    /// Ramp identifier.
    pub id: String,
    /// Why assembly failed.
    pub error: RampError,
}

/// Ramps collated from a set of features.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RampSet {
    /// Assembled ramps in centerline document order. May include ramps
    /// that fail [`Ramp::validate`].
    pub ramps: Vec<Ramp>,
    /// Ids that could not be assembled at all.
    pub rejected: Vec<RejectedRamp>,
}

/// Group ramp parts by id and assemble one [`Ramp`] per centerline.
///
/// Width markers are ordered by their index label. Markers without an index
/// or without path data are skipped with a warning. Ids with a missing
/// centerline or height profile, or whose centerline cannot be fitted, end
/// up in [`RampSet::rejected`].
pub fn collate_ramps(features: &[Feature], settings: &RampSettings) -> RampSet {
    let mut set = RampSet::default();
    let mut seen: HashSet<&str> = HashSet::new();

    for feature in features.iter().filter(|f| f.kind == FeatureKind::RampPath) {
        let Some(id) = feature.ramp_id() else {
            warn!("ramp centerline without an id, skipping");
            continue;
        };
        if !seen.insert(id) {
            warn!(ramp = id, "duplicate ramp centerline, keeping the first");
            continue;
        }
        match assemble(id, feature, features, settings) {
            Ok(ramp) => {
                if let Err(e) = ramp.validate() {
                    warn!(ramp = id, error = %e, "ramp is invalid");
                }
                set.ramps.push(ramp);
            }
            Err(error) => {
                warn!(ramp = id, %error, "ramp rejected");
                set.rejected.push(RejectedRamp {
                    id: id.to_string(),
                    error,
                });
            }
        }
    }

    for feature in features.iter().filter(|f| f.kind.is_ramp_part()) {
        if let Some(id) = feature.ramp_id() {
            if seen.insert(id) {
                warn!(ramp = id, "ramp parts without a centerline");
                set.rejected.push(RejectedRamp {
                    id: id.to_string(),
                    error: RampError::MissingCenterline(id.to_string()),
                });
            }
        }
    }

    set
}

fn assemble(
    id: &str,
    centerline: &Feature,
    features: &[Feature],
    settings: &RampSettings,
) -> pinbuilder_ramp::Result<Ramp> {
    let centerline = centerline
        .path
        .clone()
        .ok_or_else(|| RampError::MissingCenterline(id.to_string()))?;

    let height = features
        .iter()
        .filter(|f| f.kind == FeatureKind::RampHeight && f.ramp_id() == Some(id))
        .find_map(|f| f.path.clone())
        .ok_or_else(|| RampError::MissingHeightProfile(id.to_string()))?;

    let mut markers: Vec<(usize, BezierPath<2>)> = Vec::new();
    for feature in features
        .iter()
        .filter(|f| f.kind == FeatureKind::RampWidth && f.ramp_id() == Some(id))
    {
        match (feature.marker_index(), &feature.path) {
            (Some(index), Some(path)) => markers.push((index, path.clone())),
            (None, _) => warn!(ramp = id, labels = ?feature.labels, "width marker without index"),
            (_, None) => warn!(ramp = id, labels = ?feature.labels, "width marker without path"),
        }
    }
    markers.sort_by_key(|(index, _)| *index);
    let markers = markers.into_iter().map(|(_, path)| path).collect();

    Ramp::new(id, centerline, markers, height, settings)
}

/// A playfield drawing with its collated ramps.
#[derive(Debug, Clone)]
pub struct Playfield {
    name: String,
    features: Vec<Feature>,
    ramps: RampSet,
}

impl Playfield {
    /// Read and collate a drawing file. The playfield is named after the
    /// file stem.
    pub fn load(path: impl AsRef<Path>, settings: &BuildSettings) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let features = pinbuilder_svg::parse_file(path)?;
        Ok(Self::from_features(name, features, &settings.ramp))
    }

    /// Read and collate drawing text.
    pub fn from_svg_str(
        name: impl Into<String>,
        text: &str,
        settings: &BuildSettings,
    ) -> Result<Self> {
        let features = pinbuilder_svg::parse_str(text)?;
        Ok(Self::from_features(name, features, &settings.ramp))
    }

    /// Collate already-read features.
    pub fn from_features(
        name: impl Into<String>,
        features: Vec<Feature>,
        settings: &RampSettings,
    ) -> Self {
        let name = name.into();
        let ramps = collate_ramps(&features, settings);
        info!(
            playfield = %name,
            features = features.len(),
            ramps = ramps.ramps.len(),
            rejected = ramps.rejected.len(),
            "loaded playfield"
        );
        Self {
            name,
            features,
            ramps,
        }
    }

    /// Playfield name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All features in document order.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Assembled ramps, valid or not.
    pub fn ramps(&self) -> &[Ramp] {
        &self.ramps.ramps
    }

    /// Ramp ids that could not be assembled.
    pub fn rejected(&self) -> &[RejectedRamp] {
        &self.ramps.rejected
    }

    /// Document size from the root element, zero if absent.
    pub fn size(&self) -> Vec2 {
        self.features
            .iter()
            .find(|f| f.kind == FeatureKind::PlayfieldDimensions)
            .map(|f| f.frame.size)
            .unwrap_or_else(Vec2::zeros)
    }

    /// The complete script for this playfield.
    pub fn script(&self, settings: &BuildSettings) -> String {
        scad::render(self.ramps(), &settings.ramp)
    }

    /// Write the script into `out`, creating the directory if needed.
    /// Returns the path written.
    pub fn generate(&self, out: impl AsRef<Path>, settings: &BuildSettings) -> Result<PathBuf> {
        let out = out.as_ref();
        std::fs::create_dir_all(out)?;
        let target = out.join(&settings.output.file_name);
        std::fs::write(&target, self.script(settings))?;
        info!(path = %target.display(), "wrote script");
        Ok(target)
    }

    /// A serializable summary.
    pub fn report(&self) -> PlayfieldReport {
        let size = self.size();
        PlayfieldReport {
            name: self.name.clone(),
            width: size.x,
            height: size.y,
            features: self.features.iter().map(FeatureSummary::from).collect(),
            ramps: self.ramps().iter().map(RampSummary::from).collect(),
            rejected: self
                .rejected()
                .iter()
                .map(|r| RejectedSummary {
                    id: r.id.clone(),
                    reason: r.error.to_string(),
                })
                .collect(),
        }
    }
}

/// Summary of a playfield for listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayfieldReport {
    /// Playfield name.
    pub name: String,
    /// Document width.
    pub width: f64,
    /// Document height.
    pub height: f64,
    /// One entry per feature.
    pub features: Vec<FeatureSummary>,
    /// One entry per assembled ramp.
    pub ramps: Vec<RampSummary>,
    /// One entry per rejected ramp id.
    pub rejected: Vec<RejectedSummary>,
}

/// Summary of one feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureSummary {
    /// Feature kind.
    pub kind: FeatureKind,
    /// Label words after the keyword.
    pub labels: Vec<String>,
    /// Segment count of the feature's curve, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<usize>,
    /// Model-space center, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 2]>,
}

impl From<&Feature> for FeatureSummary {
    fn from(feature: &Feature) -> Self {
        Self {
            kind: feature.kind,
            labels: feature.labels.clone(),
            segments: feature.path.as_ref().map(|p| p.len()),
            center: feature.center.map(|c| [c.x, c.y]),
        }
    }
}

/// Summary of one assembled ramp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RampSummary {
    /// Ramp identifier.
    pub id: String,
    /// Centerline segment count.
    pub segments: usize,
    /// Width marker count.
    pub markers: usize,
    /// Fitted centerline length.
    pub centerline_length: f64,
    /// Height profile x-length.
    pub height_length: f64,
    /// Whether the ramp will be generated.
    pub valid: bool,
    /// Validation failure, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
}

impl From<&Ramp> for RampSummary {
    fn from(ramp: &Ramp) -> Self {
        let problem = ramp.validate().err().map(|e| e.to_string());
        Self {
            id: ramp.id().to_string(),
            segments: ramp.centerline().len(),
            markers: ramp.markers().len(),
            centerline_length: ramp.centerline_length(),
            height_length: ramp.height().x_length(),
            valid: problem.is_none(),
            problem,
        }
    }
}

/// Summary of a rejected ramp id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedSummary {
    /// Ramp identifier.
    pub id: String,
    /// Rejection reason.
    pub reason: String,
}
