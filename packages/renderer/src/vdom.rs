use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Virtual DOM node
///
/// Attributes and styles are ordered maps so that rendering the same
/// block twice yields byte-identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML element
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        styles: BTreeMap<String, String>,
        children: Vec<VNode>,
        /// Block id for top-level block containers
        #[serde(skip_serializing_if = "Option::is_none")]
        key: Option<String>,
    },

    /// Text node
    Text { content: String },

    /// Error node (shown inline instead of failing the whole page)
    Error { message: String },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            children: Vec::new(),
            key: None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        VNode::Error {
            message: message.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    /// Boolean attribute (`disabled`, `allowfullscreen`, ...)
    pub fn with_flag(self, key: impl Into<String>) -> Self {
        self.with_attr(key, "")
    }

    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attr("class", class)
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn with_text(self, content: impl Into<String>) -> Self {
        self.with_child(VNode::text(content))
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        if let VNode::Element {
            key: ref mut node_key,
            ..
        } = self
        {
            *node_key = Some(key.into());
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            VNode::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            _ => None,
        }
    }

    pub fn style(&self, name: &str) -> Option<&str> {
        match self {
            VNode::Element { styles, .. } => styles.get(name).map(String::as_str),
            _ => None,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Depth-first search for the first element with `tag`
    pub fn find_tag(&self, tag: &str) -> Option<&VNode> {
        if self.tag() == Some(tag) {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find_tag(tag))
    }

    /// All elements with `tag`, in document order
    pub fn find_all(&self, tag: &str) -> Vec<&VNode> {
        let mut found = Vec::new();
        self.collect_tag(tag, &mut found);
        found
    }

    fn collect_tag<'a>(&'a self, tag: &str, found: &mut Vec<&'a VNode>) {
        if self.tag() == Some(tag) {
            found.push(self);
        }
        for child in self.children() {
            child.collect_tag(tag, found);
        }
    }

    /// Concatenated text content of this subtree
    pub fn text_content(&self) -> String {
        match self {
            VNode::Text { content } => content.clone(),
            VNode::Error { message } => message.clone(),
            VNode::Element { children, .. } => {
                children.iter().map(VNode::text_content).collect::<Vec<_>>().join("")
            }
        }
    }
}

/// Rendered page: one root node per block, in block order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VirtualDomDocument {
    pub title: String,
    pub nodes: Vec<VNode>,
}

impl VirtualDomDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            nodes: Vec::new(),
        }
    }

    pub fn add_node(&mut self, node: VNode) {
        self.nodes.push(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_on_text_is_noop() {
        let node = VNode::text("hi").with_attr("a", "b").with_child(VNode::text("x"));
        assert_eq!(node, VNode::text("hi"));
    }

    #[test]
    fn test_find_and_text_content() {
        let tree = VNode::element("div")
            .with_child(VNode::element("h1").with_text("Title"))
            .with_child(VNode::element("p").with_text("Body"))
            .with_child(VNode::element("p").with_text("More"));

        assert_eq!(tree.find_tag("h1").unwrap().text_content(), "Title");
        assert_eq!(tree.find_all("p").len(), 2);
        assert_eq!(tree.text_content(), "TitleBodyMore");
    }
}
