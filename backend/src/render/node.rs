//! Minimal typed HTML tree.
//!
//! Components build [`Element`] values rather than strings so tests can
//! inspect structure and attribute precedence before serialisation.

/// Elements that never carry children or a closing tag.
const VOID_ELEMENTS: [&str; 6] = ["br", "hr", "img", "input", "meta", "source"];

/// A node in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nested element.
    Element(Element),
    /// Text, escaped on output.
    Text(String),
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Self::Element(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// An HTML element with ordered attributes.
///
/// Attribute names are unique: setting an existing name replaces its value in
/// place. Boolean attributes are stored without a value.
///
/// # Examples
/// ```
/// use storefront::render::Element;
///
/// let link = Element::new("a").attr("href", "/collections").child("Shop");
/// assert_eq!(link.to_html(), r#"<a href="/collections">Shop</a>"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attributes: Vec<(String, Option<String>)>,
    children: Vec<Node>,
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "sibling identity is not part of the markup")
    )]
    key: Option<String>,
}

impl Element {
    /// Empty element named `tag`.
    #[must_use]
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            children: Vec::new(),
            key: None,
        }
    }

    /// Set `name` to `value`.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name.into(), Some(value.into()));
        self
    }

    /// Set a boolean attribute.
    #[must_use]
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.set(name.into(), None);
        self
    }

    /// Apply several attributes in order.
    #[must_use]
    pub fn attrs<I>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (String, Option<String>)>,
    {
        for (name, value) in attributes {
            self.set(name, value);
        }
        self
    }

    /// Append a child node.
    #[must_use]
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append several child nodes.
    #[must_use]
    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Identity among siblings; not rendered.
    #[must_use]
    pub fn keyed(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Serialise to HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn set(&mut self, name: String, value: Option<String>) {
        match self.attributes.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            if let Some(value) = value {
                out.push_str("=\"");
                out.push_str(&escape(value, true));
                out.push('"');
            }
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&self.tag) {
            return;
        }
        for child in &self.children {
            match child {
                Node::Text(value) => out.push_str(&escape(value, false)),
                Node::Element(element) => element.write_html(out),
            }
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

/// Read access for component tests.
#[cfg(test)]
impl Element {
    /// Sibling identity, if set.
    #[must_use]
    pub(crate) fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Value of `name`; boolean attributes read as an empty string.
    #[must_use]
    pub(crate) fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_deref().unwrap_or(""))
    }

    /// Attribute names in render order.
    pub(crate) fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|(name, _)| name.as_str())
    }

    /// Direct children.
    #[must_use]
    pub(crate) fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    /// Every descendant element named `tag`, in document order, including
    /// `self`.
    #[must_use]
    pub(crate) fn find_all(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(tag, &mut found);
        found
    }

    /// Concatenated text of all descendants.
    #[must_use]
    pub(crate) fn text_content(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            match child {
                Node::Text(value) => text.push_str(value),
                Node::Element(element) => text.push_str(&element.text_content()),
            }
        }
        text
    }

    fn collect<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        if self.tag == tag {
            found.push(self);
        }
        for child in &self.children {
            if let Node::Element(element) = child {
                element.collect(tag, found);
            }
        }
    }
}

fn escape(value: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}
