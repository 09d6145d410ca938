//! Owned HTML tree used for normalization and diffing.
//!
//! Trees are built from `scraper`'s parse output. Ownership only runs from
//! parent to child: there are no parent pointers, so the differ can walk the
//! structure without any cycle handling.

use std::mem;

use ego_tree::iter::Children;
use ego_tree::NodeRef;
use scraper::{Html, Node as ScraperNode};

use crate::HtmlCompareOptions;

/// Root of a parsed fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub children: Vec<Node>,
}

/// A node in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Only present when comments are not ignored.
    Comment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Node>,
}

// Dropping iteratively keeps deeply nested trees off the call stack.
impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let Node::Element(mut element) = node {
                pending.append(&mut element.children);
            }
        }
    }
}

/// An element attribute. Boolean attributes carry no value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            value: value.map(Into::into).filter(|v: &String| !v.is_empty()),
        }
    }
}

impl Node {
    /// The name a DOM would report for this node (`div`, `#text`, `#comment`).
    pub fn node_name(&self) -> &str {
        match self {
            Node::Element(element) => &element.name,
            Node::Text(_) => "#text",
            Node::Comment(_) => "#comment",
        }
    }

    pub fn element(
        name: impl Into<String>,
        attrs: Vec<Attribute>,
        children: Vec<Node>,
    ) -> Self {
        Node::Element(Element {
            name: name.into(),
            attrs,
            children,
        })
    }

    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(value.into())
    }
}

/// Parse `html` as a fragment (no implied `<html>`/`<body>`).
///
/// Malformed markup is recovered by the HTML5 parser; whatever tree it
/// builds is accepted as-is.
pub fn parse_fragment(html: &str, options: &HtmlCompareOptions) -> Fragment {
    let document = Html::parse_fragment(html);
    // scraper wraps fragment content in a synthetic <html> element
    let root = *document.root_element();
    Fragment {
        children: convert_children(root, options),
    }
}

/// An element (or a template's content fragment) whose children are still
/// being converted.
struct Pending<'a> {
    /// `None` for a content fragment: its children join the enclosing list.
    element: Option<(String, Vec<Attribute>)>,
    children: Vec<Node>,
    source: Children<'a, ScraperNode>,
}

impl<'a> Pending<'a> {
    fn new(element: Option<(String, Vec<Attribute>)>, node: NodeRef<'a, ScraperNode>) -> Self {
        Self {
            element,
            children: Vec::new(),
            source: node.children(),
        }
    }

    fn close_into(self, siblings: &mut Vec<Node>) {
        match self.element {
            Some((name, attrs)) => siblings.push(Node::Element(Element {
                name,
                attrs,
                children: self.children,
            })),
            None => siblings.extend(self.children),
        }
    }
}

/// Convert the children of `parent` depth-first with an explicit stack, so
/// nesting depth is bounded by memory rather than the call stack.
fn convert_children(parent: NodeRef<'_, ScraperNode>, options: &HtmlCompareOptions) -> Vec<Node> {
    let mut ancestors: Vec<Pending<'_>> = Vec::new();
    let mut current = Pending::new(None, parent);
    loop {
        match current.source.next() {
            Some(child) => match child.value() {
                ScraperNode::Element(element) => {
                    let attrs = element
                        .attrs()
                        .filter(|(name, _)| options.keeps_attribute(name))
                        .map(|(name, value)| Attribute::new(name, Some(value)))
                        .collect();
                    let opened = Pending::new(Some((element.name().to_string(), attrs)), child);
                    ancestors.push(mem::replace(&mut current, opened));
                }
                // <template> contents hang off a fragment child of the element
                ScraperNode::Fragment => {
                    ancestors.push(mem::replace(&mut current, Pending::new(None, child)));
                }
                ScraperNode::Text(text) => current.children.push(Node::Text((**text).to_owned())),
                ScraperNode::Comment(comment) if !options.ignore_comments => {
                    current.children.push(Node::Comment((**comment).to_owned()))
                }
                _ => {}
            },
            None => match ancestors.pop() {
                Some(parent) => {
                    let finished = mem::replace(&mut current, parent);
                    finished.close_into(&mut current.children);
                }
                None => return current.children,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;

    #[test]
    fn test_parses_fragment_without_document_wrappers() {
        let fragment = parse_fragment("<p>hi</p>text", &HtmlCompareOptions::default());
        assert_eq!(
            fragment.children,
            vec![
                Node::element("p", vec![], vec![Node::text("hi")]),
                Node::text("text"),
            ]
        );
    }

    #[test]
    fn test_empty_attribute_value_is_boolean() {
        let fragment = parse_fragment(
            "<input checked=\"\" type=\"checkbox\">",
            &HtmlCompareOptions::default(),
        );
        let Node::Element(input) = &fragment.children[0] else {
            panic!("expected an element, got {:?}", fragment.children[0]);
        };
        assert!(input
            .attrs
            .contains(&Attribute::new("checked", None::<String>)));
        assert!(input
            .attrs
            .contains(&Attribute::new("type", Some("checkbox"))));
    }

    #[test]
    fn test_comments_follow_options() {
        let html = "<div><!-- note --><p>x</p></div>";

        let fragment = parse_fragment(html, &HtmlCompareOptions::default());
        let Node::Element(div) = &fragment.children[0] else {
            panic!("expected an element");
        };
        assert_eq!(div.children.len(), 1);

        let fragment = parse_fragment(html, &presets::strict());
        let Node::Element(div) = &fragment.children[0] else {
            panic!("expected an element");
        };
        assert_eq!(div.children[0], Node::Comment(" note ".to_string()));
    }

    #[test]
    fn test_ignored_attributes_are_dropped() {
        let fragment = parse_fragment("<h1 id=\"a\" class=\"t\">T</h1>", &presets::markdown());
        let Node::Element(h1) = &fragment.children[0] else {
            panic!("expected an element");
        };
        assert_eq!(h1.attrs, vec![Attribute::new("class", Some("t"))]);
    }

    #[test]
    fn test_node_names() {
        assert_eq!(Node::element("span", vec![], vec![]).node_name(), "span");
        assert_eq!(Node::text("x").node_name(), "#text");
        assert_eq!(Node::Comment("x".into()).node_name(), "#comment");
    }

    #[test]
    fn test_template_contents_are_kept() {
        let fragment = parse_fragment(
            "<template><p>x</p>tail</template>",
            &HtmlCompareOptions::default(),
        );
        assert_eq!(
            fragment.children,
            vec![Node::element(
                "template",
                vec![],
                vec![
                    Node::element("p", vec![], vec![Node::text("x")]),
                    Node::text("tail"),
                ],
            )]
        );
    }

    #[test]
    fn test_deep_nesting_converts() {
        let depth = 5_000;
        let html = format!("{}x{}", "<div>".repeat(depth), "</div>".repeat(depth));
        let fragment = parse_fragment(&html, &HtmlCompareOptions::default());

        let mut levels = 0;
        let mut children = &fragment.children;
        while let [Node::Element(element)] = children.as_slice() {
            assert_eq!(element.name, "div");
            levels += 1;
            children = &element.children;
        }
        assert_eq!(levels, depth);
        assert_eq!(children, &vec![Node::text("x")]);
    }
}
