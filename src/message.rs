//! Human-readable descriptions of differences.

use crate::diff::{Difference, Path};
use crate::error::{HtmlCompareError, Side};
use crate::tree::{Attribute, Node};
use crate::walk::Target;

/// Describe `diff`, given what its path resolves to in each tree.
///
/// For [`Difference::ArrayItem`] the targets are the sequences the index
/// applies to.
pub fn describe(
    diff: &Difference,
    lhs: Option<Target<'_>>,
    rhs: Option<Target<'_>>,
) -> Result<String, HtmlCompareError> {
    describe_at(diff, diff.path(), lhs, rhs)
}

fn describe_at(
    diff: &Difference,
    path: &Path,
    lhs: Option<Target<'_>>,
    rhs: Option<Target<'_>>,
) -> Result<String, HtmlCompareError> {
    match diff {
        Difference::Added { .. } => Ok(format!(
            "{} has been added",
            describe_side(rhs, Side::Right, path)?
        )),
        Difference::Edited { .. } => Ok(format!(
            "{} was changed to {}",
            describe_side(lhs, Side::Left, path)?,
            describe_side(rhs, Side::Right, path)?
        )),
        Difference::Deleted { .. } => Ok(format!(
            "{} has been removed",
            describe_side(lhs, Side::Left, path)?
        )),
        Difference::ArrayItem { index, item, .. } => describe_at(
            item,
            path,
            lhs.and_then(|target| target.index(*index)),
            rhs.and_then(|target| target.index(*index)),
        ),
    }
}

fn describe_side(
    target: Option<Target<'_>>,
    side: Side,
    path: &Path,
) -> Result<String, HtmlCompareError> {
    let target = target.ok_or_else(|| HtmlCompareError::UnresolvedNode {
        side,
        path: path.clone(),
    })?;
    match target {
        Target::Node(node) => Ok(describe_node(node)),
        Target::Attribute(attr) => Ok(describe_attribute(attr)),
        other => Err(HtmlCompareError::UndescribableValue {
            side,
            kind: other.kind(),
            path: path.clone(),
        }),
    }
}

/// `text "..."`, `tag <name>` or `comment "..."`.
pub fn describe_node(node: &Node) -> String {
    match node {
        Node::Text(value) => format!("text \"{value}\""),
        Node::Element(element) => format!("tag <{}>", element.name),
        Node::Comment(data) => format!("comment \"{data}\""),
    }
}

/// `attribute [name="value"]`, or `attribute [name]` without a value.
pub fn describe_attribute(attr: &Attribute) -> String {
    match attr.value.as_deref() {
        Some(value) if !value.is_empty() => format!("attribute [{}=\"{value}\"]", attr.name),
        _ => format!("attribute [{}]", attr.name),
    }
}
