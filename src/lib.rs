//! Semantic equivalence of HTML fragments for test assertions.
//!
//! Two fragments are equivalent when they parse to the same structure once
//! formatting noise is removed: whitespace between tags, whitespace at the
//! edges of an element's content, attribute order and class token order.
//! When they differ, the first structural difference is reported as a
//! sentence such as `text "hi" was changed to text "bye"`.
//!
//! # Example
//! ```
//! use html_equiv::{compare, Comparison};
//!
//! let html1 = "<div><p>Hello</p></div>";
//! let html2 = "<div>\n  <p>Hello</p>\n</div>";
//! assert_eq!(compare(html1, html2).unwrap(), Comparison::Equivalent);
//!
//! let result = compare("<p>hi</p>", "<p>bye</p>").unwrap();
//! assert_eq!(result.message(), Some("text \"hi\" was changed to text \"bye\""));
//! ```
//!
//! For testing, you can use the provided assertion macros:
//! ```
//! # use html_equiv::assert_html_eq;
//! assert_html_eq!(
//!     "<div><p>Hello</p></div>",
//!     "<div>\n  <p>Hello</p>\n</div>"
//! );
//! ```

/// Asserts that two HTML strings are equivalent, optionally with custom comparison options.
///
/// Panics with a description of the first difference otherwise.
///
/// # Examples
/// ```
/// use html_equiv::assert_html_eq;
///
/// assert_html_eq!(
///     "<a href=\"x\" class=\"b a\">link</a>",
///     "<a class=\"a b\" href=\"x\">link</a>"
/// );
///
/// // With custom options
/// use html_equiv::presets;
/// assert_html_eq!(
///     "<h1 id=\"intro\">Title</h1>",
///     "<h1 id=\"title\">Title</h1>",
///     presets::markdown()
/// );
/// ```
#[macro_export]
macro_rules! assert_html_eq {
    ($left:expr, $right:expr $(,)?) => {
        $crate::assert_html_eq!($left, $right, $crate::HtmlCompareOptions::default())
    };
    ($left:expr, $right:expr, $options:expr $(,)?) => {{
        match (&$left, &$right, &$options) {
            (left_val, right_val, options) => {
                let comparer = $crate::HtmlComparer::with_options(options.clone());
                match comparer.compare(left_val, right_val) {
                    Ok($crate::Comparison::Equivalent) => {}
                    Ok($crate::Comparison::Different(message)) => {
                        panic!(
                            "\n\
                            {}\n\n\
                            left HTML:\n\
                            {}\n\n\
                            right HTML:\n\
                            {}\
                        ",
                            message, left_val, right_val
                        );
                    }
                    Err(err) => panic!("HTML comparison failed: {}", err),
                }
            }
        }
    }};
}

/// Asserts that two HTML strings are not equivalent, optionally with custom comparison options.
///
/// # Examples
/// ```
/// use html_equiv::assert_html_ne;
///
/// assert_html_ne!(
///     "<div><p>Hello</p></div>",
///     "<div><p>Different</p></div>"
/// );
/// ```
#[macro_export]
macro_rules! assert_html_ne {
    ($left:expr, $right:expr $(,)?) => {
        $crate::assert_html_ne!($left, $right, $crate::HtmlCompareOptions::default())
    };
    ($left:expr, $right:expr, $options:expr $(,)?) => {{
        match (&$left, &$right, &$options) {
            (left_val, right_val, options) => {
                let comparer = $crate::HtmlComparer::with_options(options.clone());
                match comparer.compare(left_val, right_val) {
                    Ok($crate::Comparison::Different(_)) => {}
                    Ok($crate::Comparison::Equivalent) => {
                        panic!("expected HTML not to be equivalent\n\nHTML:\n{}", left_val);
                    }
                    Err(err) => panic!("HTML comparison failed: {}", err),
                }
            }
        }
    }};
}

mod tracing_macros;

pub mod diff;
mod error;
pub mod format;
pub mod message;
pub mod normalize;
mod options;
pub mod tree;
pub mod walk;

pub use error::{HtmlCompareError, Side};
pub use options::{presets, HtmlCompareOptions};

use diff::Difference;
use tracing_macros::debug;
use tree::Fragment;

/// Outcome of comparing two fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    Equivalent,
    /// Describes the first difference found.
    Different(String),
}

impl Comparison {
    pub fn is_equivalent(&self) -> bool {
        matches!(self, Comparison::Equivalent)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Comparison::Equivalent => None,
            Comparison::Different(message) => Some(message),
        }
    }
}

/// Main struct for comparing HTML
#[derive(Debug, Default)]
pub struct HtmlComparer {
    options: HtmlCompareOptions,
}

impl HtmlComparer {
    /// Create a new HTML comparer with default options.
    pub fn new() -> Self {
        Self {
            options: HtmlCompareOptions::default(),
        }
    }

    /// Create a new HTML comparer with custom options
    pub fn with_options(options: HtmlCompareOptions) -> Self {
        Self { options }
    }

    /// Format, parse and normalize one input.
    pub fn prepare(&self, html: &str) -> Fragment {
        let mut fragment = tree::parse_fragment(&format::format_html(html), &self.options);
        normalize::normalize(&mut fragment);
        fragment
    }

    /// Every difference between two HTML strings, in traversal order.
    pub fn differences(&self, lhs: &str, rhs: &str) -> Vec<Difference> {
        diff::diff(&self.prepare(lhs), &self.prepare(rhs))
    }

    /// Compare two HTML strings.
    ///
    /// Only the first difference is described, even when there are more.
    /// `Err` means a difference could not be described, which is a bug in
    /// this crate rather than a property of the inputs.
    pub fn compare(&self, lhs: &str, rhs: &str) -> Result<Comparison, HtmlCompareError> {
        let lhs_tree = self.prepare(lhs);
        let rhs_tree = self.prepare(rhs);

        let differences = diff::diff(&lhs_tree, &rhs_tree);
        debug!("found {} differences", differences.len());

        let Some(first) = differences.first() else {
            return Ok(Comparison::Equivalent);
        };

        let steps = first.path().steps();
        let message = message::describe(
            first,
            walk::walk(&lhs_tree, steps),
            walk::walk(&rhs_tree, steps),
        )?;
        debug!("first difference at {}: {}", first.path(), message);

        Ok(Comparison::Different(message))
    }
}

/// Compare two HTML strings with default options.
pub fn compare(lhs: &str, rhs: &str) -> Result<Comparison, HtmlCompareError> {
    HtmlComparer::new().compare(lhs, rhs)
}
