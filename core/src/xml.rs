//! A small owned XML tree and the lookups the response mappers use.
//!
//! Responses are tiny (a user, a page of photos), so the whole body is read
//! into an [`Element`] tree with quick-xml and mapped afterwards. Lookups
//! follow DOM conventions: attributes by name, "first child element with this
//! tag", and descendant search in document order.

use std::str::FromStr;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::XmlError;

/// A node inside an element: a child element or a run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element with its attributes and children in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(&text.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// The attribute value, or an empty string when absent.
    pub fn attr_or_empty(&self, name: &str) -> String {
        self.attr(name).unwrap_or_default().to_string()
    }

    /// An owned attribute value, `None` when absent or empty.
    pub fn attr_string(&self, name: &str) -> Option<String> {
        self.attr(name).filter(|v| !v.is_empty()).map(str::to_string)
    }

    /// `true` only when the attribute is exactly `"1"`.
    pub fn flag(&self, name: &str) -> bool {
        self.attr(name) == Some("1")
    }

    pub fn attr_parse<T: FromStr>(&self, name: &str) -> Option<T> {
        self.attr(name).and_then(|v| v.trim().parse().ok())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.children
    }

    /// Child elements in document order.
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children().filter(move |e| e.name == name)
    }

    /// First child element with this tag.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children().find(|e| e.name == name)
    }

    pub fn first_child(&self) -> Option<&Element> {
        self.children().next()
    }

    /// Consume the element, keeping only its child elements.
    pub fn into_children(self) -> Vec<Element> {
        self.children
            .into_iter()
            .filter_map(|n| match n {
                Node::Element(e) => Some(e),
                Node::Text(_) => None,
            })
            .collect()
    }

    /// Text content of the first child element with this tag.
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name).map(Element::text)
    }

    /// Concatenated text of the element's direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|n| match n {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// All descendant elements with this tag, in document order. The element
    /// itself is not included.
    pub fn descendants(&self, name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, out: &mut Vec<&'a Element>) {
        for child in self.children() {
            if child.name == name {
                out.push(child);
            }
            child.collect_descendants(name, out);
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(Node::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(Node::Text(text.to_string()));
        }
    }
}

fn start_element(e: &BytesStart<'_>) -> Result<Element, XmlError> {
    let name = e.name();
    let tag = std::str::from_utf8(name.as_ref()).map_err(|err| XmlError::Decode(err.to_string()))?;
    let mut element = Element::new(tag);
    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|err| XmlError::Decode(err.to_string()))?;
        let raw = std::str::from_utf8(&attr.value).map_err(|err| XmlError::Decode(err.to_string()))?;
        let value = quick_xml::escape::unescape(raw).map_err(|err| XmlError::Decode(err.to_string()))?;
        element.attributes.push((key.to_string(), value.into_owned()));
    }
    Ok(element)
}

/// Parse a document and return its root element.
///
/// Whitespace-only text inside an element that has element children is
/// dropped; all other text is kept verbatim with entities resolved.
pub fn parse(xml: &str) -> Result<Element, XmlError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if root.is_some() {
                    return Err(XmlError::Unbalanced("content after root element".to_string()));
                }
                stack.push(start_element(&e)?);
            }
            Event::Empty(e) => {
                let element = start_element(&e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(e) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| XmlError::Unbalanced("end tag without start tag".to_string()))?;
                let name = e.name();
                if name.as_ref() != element.name.as_bytes() {
                    return Err(XmlError::Unbalanced(format!(
                        "</{}> closes <{}>",
                        String::from_utf8_lossy(name.as_ref()),
                        element.name
                    )));
                }
                attach(&mut stack, &mut root, drop_layout_whitespace(element))?;
            }
            Event::Text(e) => {
                let decoded = e.decode().map_err(|err| XmlError::Decode(err.to_string()))?;
                let unescaped =
                    quick_xml::escape::unescape(&decoded).map_err(|err| XmlError::Decode(err.to_string()))?;
                if let Some(current) = stack.last_mut() {
                    current.push_text(&unescaped);
                }
            }
            Event::GeneralRef(e) => {
                let resolved = match e.resolve_char_ref().map_err(|err| XmlError::Decode(err.to_string()))? {
                    Some(ch) => ch.to_string(),
                    None => {
                        let entity = e.decode().map_err(|err| XmlError::Decode(err.to_string()))?;
                        quick_xml::escape::resolve_xml_entity(&entity)
                            .ok_or_else(|| XmlError::Decode(format!("unknown entity &{entity};")))?
                            .to_string()
                    }
                };
                if let Some(current) = stack.last_mut() {
                    current.push_text(&resolved);
                }
            }
            Event::CData(e) => {
                if let Some(current) = stack.last_mut() {
                    current.push_text(&String::from_utf8_lossy(&e));
                }
            }
            Event::Eof => break,
            // Declaration, comments, processing instructions, doctype.
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::Unbalanced(format!("unexpected end of input inside <{}>", open.name)));
    }
    root.ok_or(XmlError::MissingRoot)
}

/// Indentation between child elements is not content. Leaf text, and
/// whitespace next to an entity or CDATA section, is kept as written.
fn drop_layout_whitespace(mut element: Element) -> Element {
    if element.children.iter().any(|n| matches!(n, Node::Element(_))) {
        element
            .children
            .retain(|n| !matches!(n, Node::Text(t) if t.trim().is_empty()));
    }
    element
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => return Err(XmlError::Unbalanced("multiple root elements".to_string())),
    }
    Ok(())
}
