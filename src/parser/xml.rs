//! Minimal XML element tree built from `quick-xml` events.
//!
//! Only what class reference files need: element names, attributes, text
//! content (entities resolved, whitespace kept) and nested children.

use anyhow::{anyhow, bail, Context, Result};
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;

#[derive(Debug, Default)]
pub struct Element {
    pub name: String,
    attributes: Vec<(String, String)>,
    /// Text inside this element before its first child
    text: String,
    children: Vec<Element>,
}

impl Element {
    /// Attribute value, or an empty string when absent.
    pub fn attr(&self, name: &str) -> &str {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// First direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with the given name, in document order.
    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Elements matching a slash-separated child path, e.g. `methods/method`.
    pub fn find_all<'a>(&'a self, path: &str) -> Vec<&'a Element> {
        let mut current = vec![self];
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current = current
                .into_iter()
                .flat_map(|e| e.children.iter().filter(|c| c.name == segment))
                .collect();
        }
        current
    }

    /// Text of the first direct child with the given name, or empty.
    pub fn child_text(&self, name: &str) -> &str {
        self.child(name).map(Element::text).unwrap_or("")
    }
}

/// Parse a whole document and return its root element.
pub fn parse(content: &str) -> Result<Element> {
    let content = normalize_line_endings(content);
    let mut reader = Reader::from_str(&content);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let position = reader.buffer_position();
        match reader
            .read_event()
            .with_context(|| format!("malformed XML at byte {}", position))?
        {
            Event::Start(e) => {
                stack.push(open_element(&e)?);
            }
            Event::Empty(e) => {
                let element = open_element(&e)?;
                close_element(element, &mut stack, &mut root)?;
            }
            Event::End(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                let element = stack
                    .pop()
                    .ok_or_else(|| anyhow!("unexpected closing tag </{}>", name))?;
                if element.name != name {
                    bail!("expected </{}>, found </{}>", element.name, name);
                }
                close_element(element, &mut stack, &mut root)?;
            }
            Event::Text(e) => {
                push_text(&mut stack, &String::from_utf8_lossy(e.as_ref()));
            }
            Event::CData(e) => {
                push_text(&mut stack, &String::from_utf8_lossy(&e.into_inner()));
            }
            Event::GeneralRef(e) => {
                let entity = String::from_utf8_lossy(e.as_ref()).to_string();
                let resolved = resolve_entity(&entity)
                    .ok_or_else(|| anyhow!("unknown entity &{};", entity))?;
                push_text(&mut stack, &resolved);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        bail!("unclosed element <{}>", open.name);
    }
    root.ok_or_else(|| anyhow!("document has no root element"))
}

/// XML line-end handling: `\r\n` and lone `\r` become `\n` before parsing.
fn normalize_line_endings(content: &str) -> Cow<'_, str> {
    if content.contains('\r') {
        Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(content)
    }
}

/// Append text to the open element, unless a child has already been seen.
fn push_text(stack: &mut [Element], text: &str) {
    if let Some(current) = stack.last_mut() {
        if current.children.is_empty() {
            current.text.push_str(text);
        }
    }
}

fn open_element(start: &BytesStart) -> Result<Element> {
    let mut element = Element {
        name: String::from_utf8_lossy(start.name().as_ref()).to_string(),
        ..Element::default()
    };
    for attr in start.attributes() {
        let attr = attr.context("malformed attribute")?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let raw = String::from_utf8_lossy(&attr.value).to_string();
        let value = unescape(&raw)
            .with_context(|| format!("bad escape in attribute {}", key))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

/// Attach a finished element to its parent, or make it the root.
fn close_element(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => bail!("multiple root elements"),
    }
    Ok(())
}

fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        _ => {}
    }

    let code = if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        entity.strip_prefix('#')?.parse::<u32>().ok()?
    };
    char::from_u32(code).map(|c| c.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_and_attributes() {
        let root = parse(
            r#"<class name="Foo" inherits="Bar"><methods><method name="a"/><method name="b"/></methods></class>"#,
        )
        .unwrap();
        assert_eq!(root.name, "class");
        assert_eq!(root.attr("name"), "Foo");
        assert_eq!(root.attr("inherits"), "Bar");
        let names: Vec<_> = root
            .find_all("methods/method")
            .iter()
            .map(|m| m.attr("name"))
            .collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn missing_attribute_is_empty() {
        let root = parse("<class/>").unwrap();
        assert_eq!(root.attr("inherits"), "");
        assert_eq!(root.child_text("description"), "");
        assert!(root.find_all("members/member").is_empty());
    }

    #[test]
    fn text_keeps_whitespace_and_resolves_entities() {
        let root = parse("<d>\n\t\tA &amp; B &lt;x&gt; &#x41;&#66;\n\t</d>").unwrap();
        assert_eq!(root.text(), "\n\t\tA & B <x> AB\n\t");
    }

    #[test]
    fn attribute_entities_resolved() {
        let root = parse(r#"<param default="&quot;hi&quot;"/>"#).unwrap();
        assert_eq!(root.attr("default"), "\"hi\"");
    }

    #[test]
    fn cdata_is_text() {
        let root = parse("<d><![CDATA[a < b]]></d>").unwrap();
        assert_eq!(root.text(), "a < b");
    }

    #[test]
    fn text_excludes_children() {
        let root = parse("<member>before<x>inner</x>after</member>").unwrap();
        assert_eq!(root.text(), "before");
        assert_eq!(root.child_text("x"), "inner");
    }

    #[test]
    fn text_stops_at_empty_child() {
        let root = parse("<m>before<x/>after &amp; more</m>").unwrap();
        assert_eq!(root.text(), "before");
    }

    #[test]
    fn line_endings_normalized() {
        let root = parse("<d title=\"a\r\nb\">a\r\nb\rc</d>").unwrap();
        assert_eq!(root.text(), "a\nb\nc");
        assert_eq!(root.attr("title"), "a\nb");
    }

    #[test]
    fn mismatched_tags_fail() {
        assert!(parse("<a><b></a>").is_err());
    }

    #[test]
    fn unclosed_root_fails() {
        assert!(parse("<class><description>").is_err());
    }

    #[test]
    fn empty_document_fails() {
        assert!(parse("").is_err());
    }
}
