use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::core::{Result, VoucherError};

/// An owned XML element: name, attributes, concatenated text and children.
///
/// The vendor's exports are record-oriented (no mixed content worth keeping),
/// so text is collected per element and trimmed by the reader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Attribute value, trimmed; `None` when absent or blank.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Own text, trimmed; `None` when blank.
    pub fn trimmed_text(&self) -> Option<&str> {
        let t = self.text.trim();
        (!t.is_empty()).then_some(t)
    }

    /// First direct child with this name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Trimmed text of the first direct child with this name; `None` when
    /// the child is missing or blank.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(Element::trimmed_text)
    }

    /// First non-blank text among the named children, in the order given.
    pub fn first_child_text(&self, names: &[&str]) -> Option<&str> {
        names.iter().find_map(|n| self.child_text(n))
    }

    /// All descendants (not including `self`) with this name, in document order.
    pub fn descendants<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        collect_descendants(self, name, &mut found);
        found
    }

    /// First descendant with this name, in document order.
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.children.iter().find_map(|c| {
            if c.name == name {
                Some(c)
            } else {
                c.find(name)
            }
        })
    }
}

fn collect_descendants<'a>(el: &'a Element, name: &str, found: &mut Vec<&'a Element>) {
    for child in &el.children {
        if child.name == name {
            found.push(child);
        }
        collect_descendants(child, name, found);
    }
}

/// Parse a document into its root element.
///
/// Mismatched or unclosed tags, undefined entities, a missing root or a
/// second root element are all [`VoucherError::Xml`].
pub fn parse_document(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            VoucherError::Xml(format!(
                "parse error at byte {}: {e}",
                reader.buffer_position()
            ))
        })?;
        match event {
            Event::Start(ref e) => stack.push(start_element(e)?),
            Event::Empty(ref e) => {
                let el = start_element(e)?;
                attach(el, &mut stack, &mut root)?;
            }
            Event::Text(ref e) => {
                let text = e
                    .unescape()
                    .map_err(|err| VoucherError::Xml(format!("bad text content: {err}")))?;
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&text);
                }
            }
            Event::CData(ref e) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Event::End(_) => {
                let el = stack
                    .pop()
                    .ok_or_else(|| VoucherError::Xml("unexpected closing tag".into()))?;
                attach(el, &mut stack, &mut root)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(VoucherError::Xml(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }
    root.ok_or_else(|| VoucherError::Xml("document has no root element".into()))
}

fn start_element(e: &BytesStart<'_>) -> Result<Element> {
    let name = std::str::from_utf8(e.name().as_ref())
        .map_err(|err| VoucherError::Xml(format!("non UTF-8 element name: {err}")))?
        .to_string();
    let mut el = Element::new(name);
    for attr in e.attributes() {
        let attr = attr.map_err(|err| VoucherError::Xml(format!("bad attribute: {err}")))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|err| VoucherError::Xml(format!("non UTF-8 attribute name: {err}")))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|err| VoucherError::Xml(format!("bad attribute value: {err}")))?
            .into_owned();
        el.attributes.push((key, value));
    }
    Ok(el)
}

fn attach(el: Element, stack: &mut [Element], root: &mut Option<Element>) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(el),
        None if root.is_none() => *root = Some(el),
        None => {
            return Err(VoucherError::Xml(format!(
                "second root element <{}>",
                el.name
            )));
        }
    }
    Ok(())
}
