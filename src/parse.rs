//! SVG parsing from XML.

use std::borrow::Cow;

use quick_xml::NsReader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::name::{QName, ResolveResult};

use crate::ast::*;
use crate::error::ParseError;
use crate::log;

const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Deepest element nesting accepted, counting the root as level 1.
pub const MAX_NESTING_DEPTH: usize = 1024;

/// Parse an SVG string into an [`SvgAst`].
///
/// Comments, CDATA sections and processing instructions are dropped, text is
/// trimmed and whitespace-only text disappears. Attribute names and values are
/// kept exactly as written, but must still be well-formed: undeclared
/// namespace prefixes, references to unknown entities and `<` in attribute
/// values are rejected. Entities declared in the DOCTYPE are known.
pub fn parse_svg(svg: &str) -> Result<SvgAst, ParseError> {
    if svg.trim().is_empty() {
        return Err(ParseError::new("SVG input is empty"));
    }

    let source = with_xlink_namespace(svg);
    let root = SvgReader::new(&source).read_document()?;
    let metadata = extract_metadata(&root);

    log::debug!(
        nodes = root.node_count(),
        attributes = root.attribute_count(),
        "parsed svg"
    );

    Ok(SvgAst { root, metadata })
}

/// Declare the xlink namespace when the document uses `xlink:` without it.
fn with_xlink_namespace(svg: &str) -> Cow<'_, str> {
    if svg.contains("xlink:") && !svg.contains("xmlns:xlink") {
        log::debug!("injecting missing xmlns:xlink declaration");
        Cow::Owned(svg.replacen(
            "<svg",
            &format!("<svg xmlns:xlink=\"{XLINK_NAMESPACE}\""),
            1,
        ))
    } else {
        Cow::Borrowed(svg)
    }
}

fn extract_metadata(root: &SvgElement) -> SvgMetadata {
    let attr = |name: &str| {
        root.get_attr(name)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    SvgMetadata {
        view_box: attr("viewBox"),
        xmlns: attr("xmlns"),
        width: attr("width"),
        height: attr("height"),
    }
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

/// XML `Name` production, loosened to accept any non-ASCII character.
fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    let start_ok = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == ':' || !c.is_ascii());
    start_ok
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.') || !c.is_ascii())
}

/// Internal entity declarations (`<!ENTITY name "value">`) from a DOCTYPE.
///
/// Parameter entities and external entities are ignored.
fn internal_entities(doctype: &str) -> Vec<(String, String)> {
    let mut entities = Vec::new();
    let mut rest = doctype;

    while let Some(pos) = rest.find("<!ENTITY") {
        rest = rest[pos + "<!ENTITY".len()..].trim_start();
        if rest.starts_with('%') {
            continue;
        }
        let name_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let (name, tail) = rest.split_at(name_end);
        let tail = tail.trim_start();
        let Some(quote) = tail.chars().next().filter(|&c| matches!(c, '"' | '\'')) else {
            continue;
        };
        let Some(value_end) = tail[1..].find(quote) else {
            break;
        };
        entities.push((name.to_string(), tail[1..1 + value_end].to_string()));
        rest = &tail[1 + value_end..];
    }

    entities
}

/// `xml:` and `xmlns:` are bound by definition and never need a declaration.
fn needs_declaration(name: QName) -> bool {
    name.prefix()
        .is_some_and(|prefix| !matches!(prefix.as_ref(), b"xml" | b"xmlns"))
}

struct SvgReader<'a> {
    reader: NsReader<&'a [u8]>,
    source: &'a str,
    entities: Vec<(String, String)>,
}

impl<'a> SvgReader<'a> {
    fn new(source: &'a str) -> Self {
        let mut reader = NsReader::from_str(source);
        reader.config_mut().check_end_names = true;
        Self {
            reader,
            source,
            entities: Vec::new(),
        }
    }

    fn resolve_entity(&self, name: &str) -> Option<&str> {
        resolve_predefined_entity(name).or_else(|| {
            self.entities
                .iter()
                .find(|(declared, _)| declared == name)
                .map(|(_, value)| value.as_str())
        })
    }

    fn next_event(&mut self) -> Result<Event<'a>, ParseError> {
        match self.reader.read_event() {
            Ok(event) => Ok(event),
            Err(e) => Err(ParseError::new(format!("XML parsing error: {e}"))
                .at_offset(self.source, self.reader.error_position() as usize)),
        }
    }

    fn error_here(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message).at_offset(self.source, self.reader.buffer_position() as usize)
    }

    fn utf8<'t>(&self, bytes: &'t [u8]) -> Result<&'t str, ParseError> {
        std::str::from_utf8(bytes).map_err(|e| self.error_here(format!("UTF-8 error: {e}")))
    }

    /// Read the whole document and return its root element.
    fn read_document(&mut self) -> Result<SvgElement, ParseError> {
        let root = loop {
            match self.next_event()? {
                Event::Start(start) => {
                    self.expect_svg_root(&start)?;
                    break self.read_element(&start)?;
                }
                Event::Empty(start) => {
                    self.expect_svg_root(&start)?;
                    break self.element_from_start(&start)?;
                }
                Event::Text(text) if !is_blank(&text) => {
                    return Err(self.error_here("Text content before the root element"));
                }
                Event::Eof => return Err(ParseError::new("No root element found")),
                Event::DocType(doctype) => {
                    self.entities = internal_entities(self.utf8(&doctype)?);
                }
                _ => {
                    // XML declaration, comments and PIs before the root
                }
            }
        };

        loop {
            match self.next_event()? {
                Event::Eof => break,
                Event::Start(_) | Event::Empty(_) | Event::End(_) => {
                    return Err(self.error_here("Extra content at the end of the document"));
                }
                Event::Text(text) if !is_blank(&text) => {
                    return Err(self.error_here("Extra content at the end of the document"));
                }
                _ => {}
            }
        }

        Ok(root)
    }

    fn expect_svg_root(&self, start: &BytesStart) -> Result<(), ParseError> {
        let local = start.local_name();
        let name = self.utf8(local.as_ref())?;
        if name.eq_ignore_ascii_case("svg") {
            Ok(())
        } else {
            Err(self.error_here(format!("Root element must be <svg>, found <{name}>")))
        }
    }

    /// Read the content of `start` up to its matching end tag.
    ///
    /// Open elements are kept on an explicit stack, so input nesting only
    /// costs heap until [`MAX_NESTING_DEPTH`] is reached.
    fn read_element(&mut self, start: &BytesStart) -> Result<SvgElement, ParseError> {
        let mut open = vec![self.element_from_start(start)?];

        loop {
            match self.next_event()? {
                Event::Start(start) => {
                    self.check_depth(open.len() + 1)?;
                    open.push(self.element_from_start(&start)?);
                }
                Event::Empty(start) => {
                    self.check_depth(open.len() + 1)?;
                    let child = self.element_from_start(&start)?;
                    if let Some(parent) = open.last_mut() {
                        parent.children.push(SvgNode::Element(child));
                    }
                }
                Event::End(_) => {
                    let Some(element) = open.pop() else {
                        return Err(self.error_here("Unexpected closing tag"));
                    };
                    match open.last_mut() {
                        Some(parent) => parent.children.push(SvgNode::Element(element)),
                        None => return Ok(element),
                    }
                }
                Event::Text(text) => {
                    let text = self.text_content(&text)?;
                    if !text.is_empty()
                        && let Some(parent) = open.last_mut()
                    {
                        parent.children.push(SvgNode::Text(text.to_string()));
                    }
                }
                Event::Eof => {
                    let tag = open.last().map_or("svg", |e| e.tag_name.as_str());
                    return Err(self.error_here(format!(
                        "Unexpected end of file: <{tag}> is never closed"
                    )));
                }
                _ => {
                    // comments, CDATA and processing instructions never become nodes
                }
            }
        }
    }

    fn check_depth(&self, depth: usize) -> Result<(), ParseError> {
        if depth > MAX_NESTING_DEPTH {
            Err(self.error_here(format!(
                "Elements are nested deeper than {MAX_NESTING_DEPTH} levels"
            )))
        } else {
            Ok(())
        }
    }

    /// Trimmed raw text. Entity references are checked but left undecoded.
    fn text_content<'t>(&self, text: &'t BytesText) -> Result<&'t str, ParseError> {
        text.unescape_with(|name| self.resolve_entity(name))
            .map_err(|e| self.error_here(format!("Invalid text content: {e}")))?;
        Ok(self.utf8(text)?.trim())
    }

    fn element_from_start(&self, start: &BytesStart) -> Result<SvgElement, ParseError> {
        let qname = self.utf8(start.name().into_inner())?;
        if !is_xml_name(qname) {
            return Err(self.error_here(format!("Invalid element name `{qname}`")));
        }
        if let (ResolveResult::Unknown(prefix), _) = self.reader.resolve_element(start.name()) {
            return Err(self.undeclared_prefix(&prefix, qname));
        }

        let local = start.local_name();
        let tag_name = self.utf8(local.as_ref())?.to_lowercase();
        let mut element = SvgElement::new(tag_name);

        // Repeated names are collapsed below, keeping the last occurrence.
        let mut attrs = start.attributes();
        attrs.with_checks(false);

        for attr in attrs {
            let attr = attr.map_err(|e| self.error_here(format!("Invalid attribute: {e}")))?;
            let (name, value) = self.attribute(&attr)?;

            if let Some(pos) = element.attributes.iter().position(|a| a.name == name) {
                log::warn!(
                    attribute = name.as_str(),
                    element = element.tag_name.as_str(),
                    "duplicate attribute, keeping the last value"
                );
                element.attributes.remove(pos);
            }
            element.attributes.push(SvgAttribute { name, value });
        }

        Ok(element)
    }

    fn attribute(&self, attr: &Attribute) -> Result<(String, String), ParseError> {
        let name = self.utf8(attr.key.into_inner())?;
        if !is_xml_name(name) {
            return Err(self.error_here(format!("Invalid attribute name `{name}`")));
        }
        if needs_declaration(attr.key)
            && let (ResolveResult::Unknown(prefix), _) = self.reader.resolve_attribute(attr.key)
        {
            return Err(self.undeclared_prefix(&prefix, name));
        }

        let value = self.utf8(&attr.value)?;
        if value.contains('<') {
            return Err(self.error_here(format!("`<` is not allowed in the value of `{name}`")));
        }
        attr.unescape_value_with(|name| self.resolve_entity(name))
            .map_err(|e| self.error_here(format!("Invalid value for `{name}`: {e}")))?;

        Ok((name.to_string(), value.to_string()))
    }

    fn undeclared_prefix(&self, prefix: &[u8], name: &str) -> ParseError {
        self.error_here(format!(
            "Namespace prefix `{}` is not declared (in `{name}`)",
            String::from_utf8_lossy(prefix)
        ))
    }
}
