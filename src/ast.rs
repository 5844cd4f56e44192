//! SVG Abstract Syntax Tree

/// A parsed SVG document plus the metadata pulled off its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgAst {
    /// The root `<svg>` element
    pub root: SvgElement,
    pub metadata: SvgMetadata,
}

/// Sizing and namespace attributes of the root element, copied out of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SvgMetadata {
    pub view_box: Option<String>,
    pub xmlns: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
}

/// An attribute exactly as written in the source, prefix included
/// (e.g. `xlink:href`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgAttribute {
    pub name: String,
    pub value: String,
}

impl SvgAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An SVG element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgElement {
    /// Lower-cased local name (e.g. "rect", "lineargradient")
    pub tag_name: String,
    /// Attributes in document order
    pub attributes: Vec<SvgAttribute>,
    pub children: Vec<SvgNode>,
}

/// A node in the SVG tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SvgNode {
    Element(SvgElement),
    /// Trimmed, non-empty text
    Text(String),
}

impl SvgNode {
    /// Tag name of an element, `#text` for text nodes.
    pub fn tag_name(&self) -> &str {
        match self {
            SvgNode::Element(e) => &e.tag_name,
            SvgNode::Text(_) => "#text",
        }
    }

    pub fn as_element(&self) -> Option<&SvgElement> {
        match self {
            SvgNode::Element(e) => Some(e),
            SvgNode::Text(_) => None,
        }
    }
}

impl SvgElement {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Get an attribute value by its full name.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Check if this element has a specific tag name.
    pub fn is(&self, tag_name: &str) -> bool {
        self.tag_name == tag_name
    }

    /// Iterate over child elements only (skip text).
    pub fn child_elements(&self) -> impl Iterator<Item = &SvgElement> {
        self.children.iter().filter_map(SvgNode::as_element)
    }

    /// Number of nodes in this subtree, this element included.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| match child {
                SvgNode::Element(e) => e.node_count(),
                SvgNode::Text(_) => 1,
            })
            .sum::<usize>()
    }

    /// Number of attributes in this subtree.
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
            + self
                .child_elements()
                .map(SvgElement::attribute_count)
                .sum::<usize>()
    }
}

impl SvgAst {
    /// Recursively visit all elements in the tree.
    pub fn for_each_element(&self, mut f: impl FnMut(&SvgElement)) {
        fn visit(elem: &SvgElement, f: &mut impl FnMut(&SvgElement)) {
            f(elem);
            for child in elem.child_elements() {
                visit(child, f);
            }
        }
        visit(&self.root, &mut f);
    }
}
