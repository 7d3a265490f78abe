//! Labeled drawing elements.

use std::fmt;

use pinbuilder_math::{BezierPath, DrawingFrame, Vec2};
use serde::Serialize;

/// What a drawing element represents, decided by the first word of its
/// label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum FeatureKind {
    /// The document root, carrying the playfield size.
    PlayfieldDimensions,
    /// A ramp centerline, `RampPath <id>`.
    RampPath,
    /// A ramp width marker, `RampWidth <id> <index>`.
    RampWidth,
    /// A ramp height profile, `RampHeight <id>`.
    RampHeight,
    /// Flipper pivot.
    FlipperBase,
    /// Flipper tip.
    FlipperTip,
    /// General illumination lamp.
    GeneralIllumination,
    /// Hole through the playfield.
    PlayfieldCutout,
    /// Pop bumper.
    PopBumper,
    /// Post.
    Post,
    /// Saucer.
    Saucer,
    /// Target.
    Target,
    /// Unlabeled or unrecognized element.
    Unknown,
}

const KEYWORDS: &[(&str, FeatureKind)] = &[
    ("PlayfieldDimensions", FeatureKind::PlayfieldDimensions),
    ("RampPath", FeatureKind::RampPath),
    ("RampWidth", FeatureKind::RampWidth),
    ("RampHeight", FeatureKind::RampHeight),
    ("FlipperBase", FeatureKind::FlipperBase),
    ("FlipperTip", FeatureKind::FlipperTip),
    ("GeneralIllumination", FeatureKind::GeneralIllumination),
    ("PlayfieldCutout", FeatureKind::PlayfieldCutout),
    ("PopBumper", FeatureKind::PopBumper),
    ("Post", FeatureKind::Post),
    ("Saucer", FeatureKind::Saucer),
    ("Target", FeatureKind::Target),
    ("Unknown", FeatureKind::Unknown),
];

impl FeatureKind {
    /// Look up a label keyword, falling back to [`FeatureKind::Unknown`].
    pub fn from_keyword(keyword: &str) -> Self {
        KEYWORDS
            .iter()
            .find(|(name, _)| *name == keyword)
            .map(|(_, kind)| *kind)
            .unwrap_or(FeatureKind::Unknown)
    }

    /// The label keyword for this kind.
    pub fn keyword(self) -> &'static str {
        KEYWORDS
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(name, _)| *name)
            .unwrap_or("Unknown")
    }

    /// One of the three kinds that make up a ramp.
    pub fn is_ramp_part(self) -> bool {
        matches!(
            self,
            FeatureKind::RampPath | FeatureKind::RampWidth | FeatureKind::RampHeight
        )
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One labeled element read from a drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Kind from the label keyword.
    pub kind: FeatureKind,
    /// Label words after the keyword.
    pub labels: Vec<String>,
    /// Curve chain from the `d` attribute, in model space.
    pub path: Option<BezierPath<2>>,
    /// Point from `cx`/`cy`, in model space.
    pub center: Option<Vec2>,
    /// Frame the element was read in.
    pub frame: DrawingFrame,
}

impl Feature {
    /// Ramp identifier (first label word) for ramp parts.
    pub fn ramp_id(&self) -> Option<&str> {
        if !self.kind.is_ramp_part() {
            return None;
        }
        self.labels.first().map(String::as_str)
    }

    /// Zero-based marker position (second label word) for width markers.
    pub fn marker_index(&self) -> Option<usize> {
        if self.kind != FeatureKind::RampWidth {
            return None;
        }
        self.labels.get(1)?.parse().ok()
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.ramp_id(), self.marker_index()) {
            (Some(id), Some(index)) => write!(f, "<{} '{}' #{}>", self.kind, id, index),
            (Some(id), None) => write!(f, "<{} '{}'>", self.kind, id),
            _ => write!(f, "<{}>", self.kind),
        }
    }
}
