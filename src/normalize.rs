//! In-place canonicalization of parsed trees.
//!
//! After normalization, attribute order, class token order and whitespace at
//! the edges of a child list no longer distinguish two trees.

use crate::tracing_macros::trace;
use crate::tree::{Attribute, Fragment, Node};

/// Normalize every node under the fragment root.
pub fn normalize(fragment: &mut Fragment) {
    trim_edge_whitespace(&mut fragment.children);
    normalize_nodes(&mut fragment.children);
}

/// Normalize each node of a sequence in place.
///
/// Levels are processed from an explicit work list, so nesting depth is not
/// limited by the call stack.
pub fn normalize_nodes(nodes: &mut [Node]) {
    let mut pending = vec![nodes];
    while let Some(level) = pending.pop() {
        for node in level {
            if let Node::Element(element) = node {
                trace!("normalizing <{}>", element.name);
                normalize_attributes(&mut element.attrs);
                trim_edge_whitespace(&mut element.children);
                pending.push(element.children.as_mut_slice());
            }
        }
    }
}

/// Sort class tokens, then sort attributes by case-insensitive name.
///
/// The sort is stable, so attributes whose names compare equal keep their
/// parse order.
pub fn normalize_attributes(attrs: &mut [Attribute]) {
    for attr in attrs.iter_mut().filter(|attr| attr.name == "class") {
        attr.value = attr.value.as_deref().and_then(sort_class_tokens);
    }
    attrs.sort_by_cached_key(|attr| attr.name.to_lowercase());
}

fn sort_class_tokens(value: &str) -> Option<String> {
    let mut tokens: Vec<&str> = value.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }
    tokens.sort_unstable();
    Some(tokens.join(" "))
}

/// Strip leading whitespace from a leading text child and trailing whitespace
/// from a trailing text child.
///
/// A line break right after a start tag or right before an end tag is not
/// content. A lone text child gets both ends stripped.
pub fn trim_edge_whitespace(children: &mut [Node]) {
    if let Some(Node::Text(value)) = children.first_mut() {
        let start = value.len() - value.trim_start().len();
        value.drain(..start);
    }
    if let Some(Node::Text(value)) = children.last_mut() {
        let len = value.trim_end().len();
        value.truncate(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(name: &str, value: &str) -> Attribute {
        Attribute::new(name, Some(value))
    }

    #[test]
    fn test_sorts_attributes_case_insensitively() {
        let mut attrs = vec![attr("id", "y"), attr("Href", "x"), attr("alt", "z")];
        normalize_attributes(&mut attrs);
        let names: Vec<_> = attrs.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["alt", "Href", "id"]);
    }

    #[test]
    fn test_attribute_sort_is_stable() {
        let mut attrs = vec![
            attr("data-b", "1"),
            attr("DATA-A", "first"),
            attr("data-a", "second"),
            attr("Data-A", "third"),
        ];
        normalize_attributes(&mut attrs);
        let values: Vec<_> = attrs.iter().map(|a| a.value.as_deref().unwrap()).collect();
        assert_eq!(values, ["first", "second", "third", "1"]);
    }

    #[test]
    fn test_sorts_class_tokens() {
        let mut attrs = vec![attr("class", "  b  c\ta\n")];
        normalize_attributes(&mut attrs);
        assert_eq!(attrs[0].value.as_deref(), Some("a b c"));

        let mut attrs = vec![Attribute {
            name: "class".into(),
            value: Some("   ".into()),
        }];
        normalize_attributes(&mut attrs);
        assert_eq!(attrs[0].value, None);
    }

    #[test]
    fn test_only_class_tokens_are_sorted() {
        let mut attrs = vec![attr("rel", "nofollow noopener")];
        normalize_attributes(&mut attrs);
        assert_eq!(attrs[0].value.as_deref(), Some("nofollow noopener"));
    }

    #[test]
    fn test_trims_only_edge_text() {
        let mut children = vec![
            Node::text("\n  lead "),
            Node::element("b", vec![], vec![]),
            Node::text(" mid "),
            Node::element("i", vec![], vec![]),
            Node::text(" tail\n"),
        ];
        trim_edge_whitespace(&mut children);
        assert_eq!(children[0], Node::text("lead "));
        assert_eq!(children[2], Node::text(" mid "));
        assert_eq!(children[4], Node::text(" tail"));
    }

    #[test]
    fn test_single_text_child_trimmed_both_ends() {
        let mut children = vec![Node::text("\n  hi\n")];
        trim_edge_whitespace(&mut children);
        assert_eq!(children, vec![Node::text("hi")]);
    }

    #[test]
    fn test_edge_elements_untouched() {
        let mut children = vec![
            Node::element("b", vec![], vec![]),
            Node::text("  x  "),
            Node::element("i", vec![], vec![]),
        ];
        let before = children.clone();
        trim_edge_whitespace(&mut children);
        assert_eq!(children, before);
    }

    #[test]
    fn test_normalize_descends_every_level() {
        let mut fragment = Fragment {
            children: vec![Node::element(
                "div",
                vec![attr("id", "a"), attr("class", "y x")],
                vec![
                    Node::text(" \n"),
                    Node::element("p", vec![], vec![Node::text("  deep  ")]),
                ],
            )],
        };
        normalize(&mut fragment);
        assert_eq!(
            fragment.children,
            vec![Node::element(
                "div",
                vec![attr("class", "x y"), attr("id", "a")],
                vec![
                    Node::text(""),
                    Node::element("p", vec![], vec![Node::text("deep")]),
                ],
            )]
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut fragment = Fragment {
            children: vec![
                Node::text("  a "),
                Node::element(
                    "span",
                    vec![attr("title", "t"), attr("class", "c b a")],
                    vec![Node::text(" s ")],
                ),
            ],
        };
        normalize(&mut fragment);
        let once = fragment.clone();
        normalize(&mut fragment);
        assert_eq!(fragment, once);
    }

    #[test]
    fn test_normalizes_deeply_nested_trees() {
        let depth = 5_000;
        let mut node = Node::text("  leaf  ");
        for _ in 0..depth {
            node = Node::element("div", vec![attr("class", "b a")], vec![node]);
        }
        let mut fragment = Fragment {
            children: vec![node],
        };
        normalize(&mut fragment);

        let mut levels = 0;
        let mut children = &fragment.children;
        while let [Node::Element(element)] = children.as_slice() {
            assert_eq!(element.attrs, vec![attr("class", "a b")]);
            levels += 1;
            children = &element.children;
        }
        assert_eq!(levels, depth);
        assert_eq!(children, &vec![Node::text("leaf")]);
    }
}
