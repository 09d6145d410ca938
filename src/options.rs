use std::collections::HashSet;

/// Configuration for HTML comparison
///
/// The defaults ignore comments, so `<div><!-- a --><p>x</p></div>` and
/// `<div><p>x</p></div>` are equivalent. A DOM-level comparison that keeps
/// comment nodes would report the comment as removed; use
/// [`presets::strict`] (or set `ignore_comments: false`) to get that.
#[derive(Debug, Clone)]
pub struct HtmlCompareOptions {
    /// Drop comment nodes before comparing (default `true`)
    pub ignore_comments: bool,
    /// Attributes dropped from every element before comparing (lowercase names)
    pub ignored_attributes: HashSet<String>,
}

impl Default for HtmlCompareOptions {
    fn default() -> Self {
        Self {
            ignore_comments: true,
            ignored_attributes: HashSet::new(),
        }
    }
}

impl HtmlCompareOptions {
    pub(crate) fn keeps_attribute(&self, name: &str) -> bool {
        !self.ignored_attributes.contains(name)
    }
}

/// Convenience functions for creating common comparison configurations
pub mod presets {
    use super::*;

    /// Options where comments are significant
    pub fn strict() -> HtmlCompareOptions {
        HtmlCompareOptions {
            ignore_comments: false,
            ignored_attributes: HashSet::new(),
        }
    }

    /// Options suitable for testing markdown output, where heading ids are generated
    pub fn markdown() -> HtmlCompareOptions {
        HtmlCompareOptions {
            ignore_comments: true,
            ignored_attributes: {
                let mut set = HashSet::new();
                set.insert("id".to_string());
                set
            },
        }
    }
}
