//! Walks an Inkscape drawing and collects its labeled features.

use std::path::Path;

use pinbuilder_math::{parse_number, BezierPath, DrawingFrame, Vec2};
use regex::Regex;
use tracing::{debug, info, trace};

use crate::error::{Result, SvgError};
use crate::feature::{Feature, FeatureKind};
use crate::xml::{self, Element};

/// SVG element namespace.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Sodipodi editor-state namespace.
pub const SODIPODI_NAMESPACE: &str = "http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd";

/// Inkscape namespace, home of the `label` attribute.
pub const INKSCAPE_NAMESPACE: &str = "http://www.inkscape.org/namespaces/inkscape";

/// SVG elements with no playfield content.
const SKIPPED_TAGS: &[&str] = &["defs", "image", "metadata", "title", "desc"];

const TRANSLATE_PATTERN: &str =
    r"^\s*translate\(\s*([-+0-9.eE]+)\s*(?:[,\s]\s*([-+0-9.eE]+)\s*)?\)\s*$";

/// Read a drawing file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<Feature>> {
    let path = path.as_ref();
    info!(path = %path.display(), "reading drawing");
    let text = std::fs::read_to_string(path)?;
    parse_str(&text)
}

/// Read a drawing from text.
pub fn parse_str(text: &str) -> Result<Vec<Feature>> {
    DrawingReader::new()?.read(text)
}

/// Converts a drawing's element tree into [`Feature`]s.
///
/// Group and element `translate(..)` transforms accumulate into the frame
/// each feature is read in; any other transform is rejected.
#[derive(Debug, Clone)]
pub struct DrawingReader {
    translate: Regex,
}

impl DrawingReader {
    /// Create a reader.
    pub fn new() -> Result<Self> {
        let translate =
            Regex::new(TRANSLATE_PATTERN).map_err(|e| SvgError::BadTransform(e.to_string()))?;
        Ok(Self { translate })
    }

    /// Read every feature in document order.
    ///
    /// # Errors
    ///
    /// Fails on malformed XML, unknown tags, unsupported transforms and
    /// geometry that cannot be parsed.
    pub fn read(&self, text: &str) -> Result<Vec<Feature>> {
        let root = xml::parse_document(text)?;
        let mut features = Vec::new();
        let frame = DrawingFrame::new(Vec2::zeros(), Vec2::zeros());
        self.walk(&root, &frame, &mut features)?;
        debug!(count = features.len(), "collected drawing features");
        Ok(features)
    }

    fn walk(&self, element: &Element, frame: &DrawingFrame, out: &mut Vec<Feature>) -> Result<()> {
        match element.namespace.as_deref() {
            Some(SVG_NAMESPACE) => match element.name.as_str() {
                "svg" => {
                    let frame = DrawingFrame::new(parse_dimensions(element)?, frame.offset);
                    out.push(Feature {
                        kind: FeatureKind::PlayfieldDimensions,
                        labels: Vec::new(),
                        path: None,
                        center: None,
                        frame,
                    });
                    self.walk_children(element, &frame, out)
                }
                "g" => {
                    let frame = frame.translated(self.parse_transform(element)?);
                    self.walk_children(element, &frame, out)
                }
                "path" | "circle" => {
                    out.push(self.read_feature(element, frame)?);
                    Ok(())
                }
                name if SKIPPED_TAGS.contains(&name) => Ok(()),
                _ => Err(SvgError::UnknownTag(element.qualified_name())),
            },
            Some(SODIPODI_NAMESPACE) if element.name == "namedview" => Ok(()),
            _ => Err(SvgError::UnknownTag(element.qualified_name())),
        }
    }

    fn walk_children(
        &self,
        element: &Element,
        frame: &DrawingFrame,
        out: &mut Vec<Feature>,
    ) -> Result<()> {
        element
            .children
            .iter()
            .try_for_each(|child| self.walk(child, frame, out))
    }

    fn read_feature(&self, element: &Element, frame: &DrawingFrame) -> Result<Feature> {
        let frame = frame.translated(self.parse_transform(element)?);

        let label = element.attr_ns(INKSCAPE_NAMESPACE, "label").unwrap_or("Unknown");
        let mut words = label.split_whitespace();
        let kind = FeatureKind::from_keyword(words.next().unwrap_or("Unknown"));
        let labels: Vec<String> = words.map(str::to_string).collect();

        let path = element
            .attr("d")
            .filter(|d| !d.trim().is_empty())
            .map(|d| BezierPath::from_svgd(d, &frame))
            .transpose()?;

        let center = match (element.attr("cx"), element.attr("cy")) {
            (Some(cx), Some(cy)) => {
                Some(frame.to_model(Vec2::new(parse_number(cx)?, parse_number(cy)?)))
            }
            _ => None,
        };

        trace!(%kind, ?labels, segments = path.as_ref().map(|p| p.len()), "read feature");
        Ok(Feature {
            kind,
            labels,
            path,
            center,
            frame,
        })
    }

    /// The translation of an element's `transform`, zero when absent.
    pub fn parse_transform(&self, element: &Element) -> Result<Vec2> {
        let Some(raw) = element.attr("transform") else {
            return Ok(Vec2::zeros());
        };
        let captures = self
            .translate
            .captures(raw)
            .ok_or_else(|| SvgError::BadTransform(raw.to_string()))?;

        let x = captures.get(1).map_or("0", |m| m.as_str());
        let y = captures.get(2).map_or("0", |m| m.as_str());
        let bad = |_| SvgError::BadTransform(raw.to_string());
        Ok(Vec2::new(
            parse_number(x).map_err(bad)?,
            parse_number(y).map_err(bad)?,
        ))
    }
}

/// Document size from the root `width`/`height`, unit suffix stripped.
///
/// A missing attribute reads as zero.
pub fn parse_dimensions(element: &Element) -> Result<Vec2> {
    Ok(Vec2::new(
        parse_dimension(element.attr("width"))?,
        parse_dimension(element.attr("height"))?,
    ))
}

fn parse_dimension(raw: Option<&str>) -> Result<f64> {
    let Some(raw) = raw else {
        return Ok(0.0);
    };
    let number = raw
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%');
    parse_number(number).map_err(|_| SvgError::BadDimension(raw.to_string()))
}
