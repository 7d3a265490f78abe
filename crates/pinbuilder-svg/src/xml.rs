//! Owned XML element tree with resolved namespaces.
//!
//! The drawing walk needs random access to attributes and children, so the
//! streaming reader output is collected into a small tree first.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

use crate::error::{Result, SvgError};

/// An attribute with its namespace resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Namespace URI, `None` for unprefixed attributes.
    pub namespace: Option<String>,
    /// Local name.
    pub name: String,
    /// Unescaped value.
    pub value: String,
}

/// An element with its namespace resolved.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Namespace URI, `None` when unbound.
    pub namespace: Option<String>,
    /// Local name.
    pub name: String,
    /// Attributes in document order.
    pub attributes: Vec<Attribute>,
    /// Child elements in document order. Text content is dropped.
    pub children: Vec<Element>,
}

impl Element {
    /// Check namespace and local name.
    pub fn is(&self, namespace: &str, name: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.name == name
    }

    /// Value of an unprefixed attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.is_none() && a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Value of an attribute in `namespace`.
    pub fn attr_ns(&self, namespace: &str, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.as_deref() == Some(namespace) && a.name == name)
            .map(|a| a.value.as_str())
    }

    /// `{namespace}name`, or just `name` when unbound.
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{{{}}}{}", ns, self.name),
            None => self.name.clone(),
        }
    }
}

/// Parse a document into its root element.
///
/// # Errors
///
/// [`SvgError::Xml`] for malformed input, [`SvgError::EmptyDocument`] if
/// there is no root element.
pub fn parse_document(xml: &str) -> Result<Element> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let (namespace, event) = {
            let (resolved, event) = reader
                .read_resolved_event()
                .map_err(|e| SvgError::Xml(e.to_string()))?;
            (bound_namespace(&resolved), event)
        };

        match event {
            Event::Start(ref e) => {
                let element = read_element(&reader, namespace, e)?;
                stack.push(element);
            }
            Event::Empty(ref e) => {
                let element = read_element(&reader, namespace, e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| SvgError::Xml("unbalanced end tag".into()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(SvgError::Xml("unexpected end of document".into()));
    }
    root.ok_or(SvgError::EmptyDocument)
}

fn read_element(
    reader: &NsReader<&[u8]>,
    namespace: Option<String>,
    start: &BytesStart,
) -> Result<Element> {
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| SvgError::Xml(e.to_string()))?;
        let (resolved, local) = reader.resolve_attribute(attr.key);
        let value = attr
            .unescape_value()
            .map_err(|e| SvgError::Xml(e.to_string()))?;
        attributes.push(Attribute {
            namespace: bound_namespace(&resolved),
            name: lossy(local.as_ref()),
            value: value.into_owned(),
        });
    }

    Ok(Element {
        namespace,
        name: lossy(start.local_name().as_ref()),
        attributes,
        children: Vec::new(),
    })
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(SvgError::Xml("multiple root elements".into())),
    }
    Ok(())
}

fn bound_namespace(resolved: &ResolveResult) -> Option<String> {
    match resolved {
        ResolveResult::Bound(ns) => Some(lossy(ns.as_ref())),
        _ => None,
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<?xml version="1.0"?>
<svg xmlns="http://www.w3.org/2000/svg" xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape" width="10mm">
  <g inkscape:label="Layer 1">
    <path d="M 0,0 L 1,1" inkscape:label="RampPath a &amp; b"/>
  </g>
  <!-- comment -->
</svg>"#;

    #[test]
    fn test_parse_tree_shape() {
        let root = parse_document(DOC).unwrap();
        assert!(root.is("http://www.w3.org/2000/svg", "svg"));
        assert_eq!(root.attr("width"), Some("10mm"));
        assert_eq!(root.children.len(), 1);

        let group = &root.children[0];
        assert!(group.is("http://www.w3.org/2000/svg", "g"));
        let path = &group.children[0];
        assert_eq!(path.name, "path");
        assert_eq!(path.attr("d"), Some("M 0,0 L 1,1"));
    }

    #[test]
    fn test_namespaced_attribute() {
        let root = parse_document(DOC).unwrap();
        let path = &root.children[0].children[0];
        assert_eq!(
            path.attr_ns("http://www.inkscape.org/namespaces/inkscape", "label"),
            Some("RampPath a & b")
        );
        assert_eq!(path.attr("label"), None);
    }

    #[test]
    fn test_qualified_name() {
        let root = parse_document(DOC).unwrap();
        assert_eq!(root.qualified_name(), "{http://www.w3.org/2000/svg}svg");
        let bare = parse_document("<plain/>").unwrap();
        assert_eq!(bare.qualified_name(), "plain");
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(parse_document("<svg><g></svg>"), Err(SvgError::Xml(_))));
        assert!(matches!(parse_document("<svg>"), Err(SvgError::Xml(_))));
        assert!(matches!(parse_document(""), Err(SvgError::EmptyDocument)));
    }
}
