//! Resolve a difference path against a tree.

use crate::diff::PathStep;
use crate::tree::{Attribute, Fragment, Node};

/// Whatever a path resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    Fragment(&'a Fragment),
    Node(&'a Node),
    Attribute(&'a Attribute),
    Nodes(&'a [Node]),
    Attributes(&'a [Attribute]),
}

impl<'a> Target<'a> {
    /// Item `index` of a child or attribute sequence.
    pub fn index(self, index: usize) -> Option<Target<'a>> {
        match self {
            Target::Nodes(nodes) => nodes.get(index).map(Target::Node),
            Target::Attributes(attrs) => attrs.get(index).map(Target::Attribute),
            _ => None,
        }
    }

    fn child_nodes(self) -> Option<Target<'a>> {
        match self {
            Target::Fragment(fragment) => Some(Target::Nodes(&fragment.children)),
            Target::Node(Node::Element(element)) => Some(Target::Nodes(&element.children)),
            _ => None,
        }
    }

    fn attrs(self) -> Option<Target<'a>> {
        match self {
            Target::Node(Node::Element(element)) => Some(Target::Attributes(&element.attrs)),
            _ => None,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Target::Fragment(_) => "fragment",
            Target::Node(_) => "node",
            Target::Attribute(_) => "attribute",
            Target::Nodes(_) => "child list",
            Target::Attributes(_) => "attribute list",
        }
    }
}

/// Follow `path` from the fragment root.
///
/// Index, `childNodes` and `attrs` steps descend. The first field step ends
/// the walk and the value reached so far is returned, so a path ending in
/// `nodeName` or `value` resolves to the node or attribute that owns the
/// field. Returns `None` when a step does not apply, e.g. an index past the
/// end of a sequence.
pub fn walk<'a>(tree: &'a Fragment, path: &[PathStep]) -> Option<Target<'a>> {
    let mut leaf = Target::Fragment(tree);
    for step in path {
        leaf = match *step {
            PathStep::Index(index) => leaf.index(index)?,
            PathStep::ChildNodes => leaf.child_nodes()?,
            PathStep::Attrs => leaf.attrs()?,
            PathStep::Field(_) => break,
        };
    }
    Some(leaf)
}
