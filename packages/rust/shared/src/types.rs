//! Core domain types for documentation trees.

use std::fmt;

/// Reserved file name holding a directory's own front matter.
pub const INDEX_FILENAME: &str = "_index.md";

/// Extension identifying Markdown documents.
pub const MD_EXT: &str = ".md";

/// Separator emitted after every section and document.
pub const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// Placeholder emitted for a directory without documents or subsections.
pub const NO_CONTENT: &str = "No content.";

// ---------------------------------------------------------------------------
// DocMeta
// ---------------------------------------------------------------------------

/// Front-matter fields scanned from a document or a directory's index file.
///
/// Values are kept as scanned; an empty value is stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocMeta {
    /// Raw ordering weight text.
    pub weight: Option<String>,
    /// Display title.
    pub title: Option<String>,
    /// One-line description.
    pub description: Option<String>,
}

impl DocMeta {
    /// Numeric ordering key: the parsed weight, or 0 when absent or unparseable.
    pub fn sort_weight(&self) -> i64 {
        self.weight
            .as_deref()
            .and_then(|w| w.trim().parse().ok())
            .unwrap_or(0)
    }

    /// True once every field holds a value.
    pub fn is_complete(&self) -> bool {
        self.weight.is_some() && self.title.is_some() && self.description.is_some()
    }
}

// ---------------------------------------------------------------------------
// SectionNumber
// ---------------------------------------------------------------------------

/// Hierarchical section label, e.g. `1.2.1`.
///
/// Never empty; each component is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionNumber(Vec<u32>);

impl SectionNumber {
    /// The label of the document root: `1`.
    pub fn root() -> Self {
        Self(vec![1])
    }

    /// Label of the `index`-th (1-based) subsection of this section.
    pub fn child(&self, index: u32) -> Self {
        let mut parts = self.0.clone();
        parts.push(index);
        Self(parts)
    }

    /// Number of components (the root has depth 1).
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn components(&self) -> &[u32] {
        &self.0
    }
}

impl Default for SectionNumber {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for SectionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = self.0.iter();
        if let Some(first) = parts.next() {
            write!(f, "{first}")?;
        }
        for part in parts {
            write!(f, ".{part}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(weight: Option<&str>) -> DocMeta {
        DocMeta {
            weight: weight.map(String::from),
            ..DocMeta::default()
        }
    }

    #[test]
    fn sort_weight_parses_or_defaults() {
        assert_eq!(meta(Some("3")).sort_weight(), 3);
        assert_eq!(meta(Some(" -2 ")).sort_weight(), -2);
        assert_eq!(meta(Some("\"10\"")).sort_weight(), 0);
        assert_eq!(meta(None).sort_weight(), 0);
    }

    #[test]
    fn section_number_display() {
        let root = SectionNumber::root();
        assert_eq!(root.to_string(), "1");
        assert_eq!(root.child(2).to_string(), "1.2");
        assert_eq!(root.child(2).child(1).to_string(), "1.2.1");
        assert_eq!(root.child(2).child(1).depth(), 3);
    }

    #[test]
    fn child_leaves_parent_untouched() {
        let parent = SectionNumber::root().child(3);
        let child = parent.child(1);
        assert_eq!(parent.components(), &[1, 3]);
        assert_eq!(child.components(), &[1, 3, 1]);
    }
}
