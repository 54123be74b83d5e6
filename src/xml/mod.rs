//! In-memory element tree for workspace exports
//!
//! Architecture: Infrastructure Layer - turns quick-xml's event stream into an owned tree
//! - Elements are matched by local name so prefixed and unprefixed exports both work
//! - Attribute namespaces are resolved once while parsing
//! - Extractors walk the tree; nothing downstream sees quick-xml types

use crate::domain::errors::{ExportError, ExportResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use std::fs;
use std::path::Path;

/// Namespace of the `xsi:type` discriminator attribute
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// A parsed XML document
#[derive(Debug, Clone)]
pub struct XmlDocument {
    root: XmlElement,
}

/// A single attribute with its resolved namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// Qualified name as written, e.g. `xsi:type`
    pub qname: String,
    /// Namespace URI the prefix resolved to
    pub namespace: Option<String>,
    /// Local part of the name
    pub local_name: String,
    pub value: String,
}

/// An element with its attributes, children and text content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    local_name: String,
    attributes: Vec<XmlAttribute>,
    children: Vec<XmlElement>,
    text: Option<String>,
}

impl XmlDocument {
    /// Parse a document held in memory
    pub fn parse(xml: &str) -> ExportResult<Self> {
        let xml = xml.trim_start_matches('\u{FEFF}');
        let mut reader = NsReader::from_str(xml);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    return Err(ExportError::xml(format!(
                        "at byte {}: {e}",
                        reader.buffer_position()
                    )))
                }
            };

            match event {
                Event::Start(start) => {
                    stack.push(element_from(&reader, &start)?);
                }
                Event::Empty(start) => {
                    let element = element_from(&reader, &start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let mut element = stack
                        .pop()
                        .ok_or_else(|| ExportError::xml("closing tag without an open element"))?;
                    element.finish();
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    if let Some(open) = stack.last_mut() {
                        let text = text
                            .unescape()
                            .map_err(|e| ExportError::xml(format!("bad text content: {e}")))?;
                        open.push_text(&text);
                    }
                }
                Event::CData(data) => {
                    if let Some(open) = stack.last_mut() {
                        open.push_text(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions, doctypes
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(ExportError::xml(format!(
                "unexpected end of document inside <{}>",
                open.local_name
            )));
        }

        let root = root.ok_or_else(|| ExportError::xml("document has no root element"))?;
        Ok(Self { root })
    }

    /// Read and parse a document from disk
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ExportResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            std::io::Error::new(e.kind(), format!("failed to read '{}': {e}", path.display()))
        })?;

        tracing::debug!("Parsing {} ({} bytes)", path.display(), contents.len());
        Self::parse(&contents)
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }
}

fn element_from(reader: &NsReader<&[u8]>, start: &BytesStart<'_>) -> ExportResult<XmlElement> {
    let local_name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut attributes = Vec::new();

    for attr in start.attributes() {
        let attr = attr.map_err(|e| {
            ExportError::xml(format!("malformed attribute on <{local_name}>: {e}"))
        })?;

        let (resolved, attr_local) = reader.resolve_attribute(attr.key);
        let namespace = match resolved {
            ResolveResult::Bound(Namespace(uri)) => Some(String::from_utf8_lossy(uri).into_owned()),
            _ => None,
        };
        let value = attr
            .unescape_value()
            .map_err(|e| ExportError::xml(format!("bad attribute value on <{local_name}>: {e}")))?
            .into_owned();

        attributes.push(XmlAttribute {
            qname: String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            namespace,
            local_name: String::from_utf8_lossy(attr_local.as_ref()).into_owned(),
            value,
        });
    }

    Ok(XmlElement {
        local_name,
        attributes,
        children: Vec::new(),
        text: None,
    })
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> ExportResult<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(ExportError::xml("document has more than one root element")),
    }
    Ok(())
}

impl XmlElement {
    /// Build an element by hand
    pub fn new(local_name: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            ..Default::default()
        }
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    pub fn attributes(&self) -> &[XmlAttribute] {
        &self.attributes
    }

    /// Attribute by namespace URI and local name
    pub fn attribute_ns(&self, namespace: &str, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.as_deref() == Some(namespace) && a.local_name == local_name)
            .map(|a| a.value.as_str())
    }

    /// Attribute by qualified name as written
    pub fn attribute(&self, qname: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.qname == qname)
            .map(|a| a.value.as_str())
    }

    /// The `xsi:type` discriminator. Falls back to the literal `xsi:type`
    /// qname when the document forgot to declare the prefix.
    pub fn xsi_type(&self) -> Option<&str> {
        self.attribute_ns(XSI_NAMESPACE, "type")
            .or_else(|| self.attribute("xsi:type"))
    }

    /// Local part of `xsi:type` (`esri:DEFeatureClass` -> `DEFeatureClass`)
    pub fn xsi_type_local(&self) -> Option<&str> {
        self.xsi_type().map(strip_prefix)
    }

    /// Text content; `None` for elements with no text at all
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// Direct children with the given local name
    pub fn children_named<'a>(
        &'a self,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.local_name == local_name)
    }

    /// First direct child with the given local name
    pub fn child(&self, local_name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.local_name == local_name)
    }

    /// Text of the first direct child with the given local name
    pub fn child_text(&self, local_name: &str) -> Option<&str> {
        self.child(local_name).and_then(XmlElement::text)
    }

    /// All descendants in document order, excluding `self`
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// First descendant with the given local name and `xsi:type` local part
    pub fn find_typed(&self, local_name: &str, type_local: &str) -> Option<&XmlElement> {
        self.descendants()
            .find(|e| e.local_name == local_name && e.xsi_type_local() == Some(type_local))
    }

    pub fn with_attribute(mut self, qname: &str, value: impl Into<String>) -> Self {
        let (namespace, local_name) = match qname.split_once(':') {
            Some(("xsi", local)) => (Some(XSI_NAMESPACE.to_string()), local.to_string()),
            Some((_, local)) => (None, local.to_string()),
            None => (None, qname.to_string()),
        };
        self.attributes.push(XmlAttribute {
            qname: qname.to_string(),
            namespace,
            local_name,
            value: value.into(),
        });
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.text.get_or_insert_with(String::new).push_str(text);
    }

    /// Drop indentation whitespace collected between child elements
    fn finish(&mut self) {
        if !self.children.is_empty()
            && self.text.as_deref().is_some_and(|t| t.trim().is_empty())
        {
            self.text = None;
        }
    }
}

/// Pre-order iterator over an element's descendants
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

/// Drop a namespace prefix from a qualified value
pub fn strip_prefix(value: &str) -> &str {
    value.rsplit_once(':').map(|(_, local)| local).unwrap_or(value)
}
