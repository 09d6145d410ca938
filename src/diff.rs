//! Structural diff between two normalized trees.
//!
//! Records come out depth-first in a fixed field order: an element's
//! `nodeName`, then its `attrs`, then its `childNodes`. Text nodes compare
//! their `value`, comments their `data`. Sequences compare index by index;
//! surplus items on either side become [`Difference::ArrayItem`] records.

use std::fmt;

use crate::tree::{Attribute, Fragment, Node};

/// One step of a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep {
    /// Position inside a child or attribute sequence.
    Index(usize),
    /// The child sequence of a fragment or element.
    ChildNodes,
    /// The attribute sequence of an element.
    Attrs,
    /// A leaf field (`nodeName`, `value`, `name`, ...). Walks stop here.
    Field(&'static str),
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Index(index) => write!(f, "{index}"),
            PathStep::ChildNodes => f.write_str("childNodes"),
            PathStep::Attrs => f.write_str("attrs"),
            PathStep::Field(name) => f.write_str(name),
        }
    }
}

/// Location of a difference, starting from the fragment root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path(Vec<PathStep>);

impl Path {
    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }
}

impl From<Vec<PathStep>> for Path {
    fn from(steps: Vec<PathStep>) -> Self {
        Path(steps)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

/// A value captured by a difference record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Str(String),
    Node(Node),
    Attribute(Attribute),
    Nodes(Vec<Node>),
    Attributes(Vec<Attribute>),
}

/// A single difference between the left and right trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Difference {
    /// Present on the right only.
    Added { path: Path, rhs: Value },
    /// Present on both sides with different values.
    Edited { path: Path, lhs: Value, rhs: Value },
    /// Present on the left only.
    Deleted { path: Path, lhs: Value },
    /// A change to item `index` of the sequence at `path`. The inner record's
    /// path is empty.
    ArrayItem {
        path: Path,
        index: usize,
        item: Box<Difference>,
    },
}

impl Difference {
    pub fn path(&self) -> &Path {
        match self {
            Difference::Added { path, .. }
            | Difference::Edited { path, .. }
            | Difference::Deleted { path, .. }
            | Difference::ArrayItem { path, .. } => path,
        }
    }
}

/// Compute every difference between two fragments, in traversal order.
///
/// An empty result means the trees are structurally identical. Traversal
/// uses an explicit task stack and a single shared path buffer, so deeply
/// nested trees need neither call stack nor per-level path copies.
pub fn diff(lhs: &Fragment, rhs: &Fragment) -> Vec<Difference> {
    let mut out = Vec::new();
    let mut path = Vec::new();
    let mut tasks = vec![Task::Children {
        lhs: &lhs.children,
        rhs: &rhs.children,
        depth: 0,
    }];

    while let Some(task) = tasks.pop() {
        match task {
            Task::Children { lhs, rhs, depth } => {
                path.truncate(depth);
                path.push(PathStep::ChildNodes);
                let depth = path.len();
                // Surplus items are reported after every common index
                tasks.push(Task::Surplus { lhs, rhs, depth });
                for (index, (left, right)) in lhs.iter().zip(rhs).enumerate().rev() {
                    tasks.push(Task::Node {
                        lhs: left,
                        rhs: right,
                        depth,
                        index,
                    });
                }
            }
            Task::Node {
                lhs,
                rhs,
                depth,
                index,
            } => {
                path.truncate(depth);
                path.push(PathStep::Index(index));
                if let Some(children) = diff_node(lhs, rhs, &mut path, &mut out) {
                    tasks.push(children);
                }
            }
            Task::Surplus { lhs, rhs, depth } => {
                path.truncate(depth);
                push_surplus(lhs, rhs, &path, &mut out);
            }
        }
    }
    out
}

/// Pending work for [`diff`]. `depth` is the length `path` must be cut back
/// to before the task's own steps are pushed.
enum Task<'a> {
    /// Compare two child lists owned by the node at `depth`.
    Children {
        lhs: &'a [Node],
        rhs: &'a [Node],
        depth: usize,
    },
    /// Compare item `index` of the child lists at `depth`.
    Node {
        lhs: &'a Node,
        rhs: &'a Node,
        depth: usize,
        index: usize,
    },
    /// Report items past the end of the shorter child list at `depth`.
    Surplus {
        lhs: &'a [Node],
        rhs: &'a [Node],
        depth: usize,
    },
}

/// Compare two nodes located at `path`. Returns the child lists still to be
/// compared when both are elements.
fn diff_node<'a>(
    lhs: &'a Node,
    rhs: &'a Node,
    path: &mut Vec<PathStep>,
    out: &mut Vec<Difference>,
) -> Option<Task<'a>> {
    match (lhs, rhs) {
        (Node::Element(left), Node::Element(right)) => {
            edit_str(path, "nodeName", &left.name, &right.name, out);
            diff_attributes(&left.attrs, &right.attrs, path, out);
            return Some(Task::Children {
                lhs: &left.children,
                rhs: &right.children,
                depth: path.len(),
            });
        }
        (Node::Text(left), Node::Text(right)) => edit_str(path, "value", left, right, out),
        (Node::Comment(left), Node::Comment(right)) => edit_str(path, "data", left, right, out),
        (left, right) => {
            edit_str(path, "nodeName", left.node_name(), right.node_name(), out);
            for (step, value) in own_fields(left) {
                out.push(Difference::Deleted {
                    path: at(path, step),
                    lhs: value,
                });
            }
            for (step, value) in own_fields(right) {
                out.push(Difference::Added {
                    path: at(path, step),
                    rhs: value,
                });
            }
        }
    }
    None
}

fn diff_attributes(
    lhs: &[Attribute],
    rhs: &[Attribute],
    path: &mut Vec<PathStep>,
    out: &mut Vec<Difference>,
) {
    path.push(PathStep::Attrs);
    for (index, (left, right)) in lhs.iter().zip(rhs).enumerate() {
        path.push(PathStep::Index(index));
        edit_str(path, "name", &left.name, &right.name, out);
        edit_str(
            path,
            "value",
            left.value.as_deref().unwrap_or_default(),
            right.value.as_deref().unwrap_or_default(),
            out,
        );
        path.pop();
    }
    push_surplus(lhs, rhs, path, out);
    path.pop();
}

/// Something a difference record can carry as a [`Value`].
trait Capture {
    fn capture(&self) -> Value;
}

impl Capture for Node {
    fn capture(&self) -> Value {
        Value::Node(self.clone())
    }
}

impl Capture for Attribute {
    fn capture(&self) -> Value {
        Value::Attribute(self.clone())
    }
}

/// Items of the longer sequence at `path` beyond the end of the shorter one.
fn push_surplus<T: Capture>(lhs: &[T], rhs: &[T], path: &[PathStep], out: &mut Vec<Difference>) {
    for (index, left) in lhs.iter().enumerate().skip(rhs.len()) {
        out.push(Difference::ArrayItem {
            path: Path(path.to_vec()),
            index,
            item: Box::new(Difference::Deleted {
                path: Path::default(),
                lhs: left.capture(),
            }),
        });
    }
    for (index, right) in rhs.iter().enumerate().skip(lhs.len()) {
        out.push(Difference::ArrayItem {
            path: Path(path.to_vec()),
            index,
            item: Box::new(Difference::Added {
                path: Path::default(),
                rhs: right.capture(),
            }),
        });
    }
}

fn at(path: &[PathStep], step: PathStep) -> Path {
    let mut steps = Vec::with_capacity(path.len() + 1);
    steps.extend_from_slice(path);
    steps.push(step);
    Path(steps)
}

fn edit_str(path: &[PathStep], field: &'static str, lhs: &str, rhs: &str, out: &mut Vec<Difference>) {
    if lhs != rhs {
        out.push(Difference::Edited {
            path: at(path, PathStep::Field(field)),
            lhs: Value::Str(lhs.to_string()),
            rhs: Value::Str(rhs.to_string()),
        });
    }
}

/// Fields other than `nodeName`. Nodes of different kinds share none of them.
fn own_fields(node: &Node) -> Vec<(PathStep, Value)> {
    match node {
        Node::Element(element) => vec![
            (PathStep::Field("tagName"), Value::Str(element.name.clone())),
            (PathStep::Attrs, Value::Attributes(element.attrs.clone())),
            (PathStep::ChildNodes, Value::Nodes(element.children.clone())),
        ],
        Node::Text(value) => vec![(PathStep::Field("value"), Value::Str(value.clone()))],
        Node::Comment(data) => vec![(PathStep::Field("data"), Value::Str(data.clone()))],
    }
}
