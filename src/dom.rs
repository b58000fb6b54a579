//! A minimal text-only document tree.
//!
//! Untrusted values can only enter the tree as text nodes or attribute
//! values, and both are escaped when the tree is serialized. Tag and
//! attribute names are `&'static str`, so data read at runtime can never
//! become markup.

/// A node in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with attributes and children
    Element(Element),
    /// A text node
    Text(String),
}

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &["input", "br", "hr", "meta", "link", "img"];

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attributes: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder form of [`Element::set_attr`].
    pub fn with_attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder form of [`Element::set_text`].
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Builder form of [`Element::append`].
    pub fn with_child(mut self, child: Element) -> Self {
        self.append(child);
        self
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attr(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attributes.retain(|(n, _)| *n != name);
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Replace all children with a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children.clear();
        self.children.push(Node::Text(text.into()));
    }

    /// Concatenated text of this element and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }

    /// Append a child element.
    pub fn append(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Remove all children.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child elements, skipping text nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Mutable child elements, skipping text nodes.
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// First child element with the given tag.
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.child_elements().find(|e| e.tag == tag)
    }

    /// Mutable form of [`Element::child`].
    pub fn child_mut(&mut self, tag: &str) -> Option<&mut Element> {
        self.child_elements_mut().find(|e| e.tag == tag)
    }

    /// Depth-first search for an element with the given `id` attribute.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.attr("id") == Some(id) {
            return Some(self);
        }
        self.child_elements().find_map(|e| e.find_by_id(id))
    }

    /// Mutable form of [`Element::find_by_id`].
    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.attr("id") == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|n| match n {
            Node::Element(e) => e.find_by_id_mut(id),
            Node::Text(_) => None,
        })
    }

    /// Serialize the element to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag) {
            return;
        }

        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(&escape(t)),
                Node::Element(e) => e.write_html(out),
            }
        }

        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

/// Escape text for use as HTML content or a quoted attribute value.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_escaped() {
        let td = Element::new("td").with_text("<img src=x onerror=alert(1)>");
        assert_eq!(td.to_html(), "<td>&lt;img src=x onerror=alert(1)&gt;</td>");
        assert_eq!(td.text_content(), "<img src=x onerror=alert(1)>");
    }

    #[test]
    fn test_attribute_is_escaped() {
        let option = Element::new("option")
            .with_attr("value", "\" onclick=\"x")
            .with_text("a & b");
        assert_eq!(
            option.to_html(),
            "<option value=\"&quot; onclick=&quot;x\">a &amp; b</option>"
        );
    }

    #[test]
    fn test_void_element() {
        let input = Element::new("input").with_attr("id", "searchInput").with_attr("value", "x");
        assert_eq!(input.to_html(), "<input id=\"searchInput\" value=\"x\">");
    }

    #[test]
    fn test_set_attr_replaces() {
        let mut el = Element::new("select").with_attr("disabled", "");
        el.set_attr("id", "a");
        el.set_attr("id", "b");
        assert_eq!(el.attr("id"), Some("b"));
        el.remove_attr("disabled");
        assert!(!el.has_attr("disabled"));
    }

    #[test]
    fn test_find_by_id_and_clear() {
        let mut root = Element::new("div").with_child(
            Element::new("table")
                .with_attr("id", "productsTable")
                .with_child(Element::new("tbody").with_attr("id", "body")),
        );

        let body = root.find_by_id_mut("body").unwrap();
        body.append(Element::new("tr"));
        body.append(Element::new("tr"));
        assert_eq!(root.find_by_id("body").unwrap().child_elements().count(), 2);

        root.find_by_id_mut("body").unwrap().clear();
        assert!(root.find_by_id("body").unwrap().children().is_empty());
        assert!(root.find_by_id("missing").is_none());
    }
}
