//! Directory classification for documentation trees.
//!
//! Each direct child of a directory is either the index file, a leaf
//! document, a subsection, or ignored. Leaves and subsections are returned
//! sorted by front-matter weight.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument, trace};

use docbinder_markdown::extract_file_metadata;
use docbinder_shared::{DocMeta, DocbinderError, INDEX_FILENAME, MD_EXT, Result};

/// A leaf document or subsection candidate within a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Front matter of the document, or of the subsection's index file.
    pub meta: DocMeta,
    /// Path of the document or subsection directory.
    pub path: PathBuf,
}

impl Entry {
    /// Title for listings and headings, falling back to the path.
    pub fn display_title(&self) -> String {
        self.meta
            .title
            .clone()
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Classified contents of one directory.
#[derive(Debug, Clone, Default)]
pub struct DirListing {
    /// Title from the directory's own index file.
    pub title: Option<String>,
    /// Description from the directory's own index file.
    pub description: Option<String>,
    /// Leaf documents, sorted by weight.
    pub documents: Vec<Entry>,
    /// Subdirectories, sorted by the weight declared in their index files.
    pub subsections: Vec<Entry>,
}

impl DirListing {
    /// True when the directory holds neither documents nor subsections.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty() && self.subsections.is_empty()
    }
}

/// Scan the direct children of `dir` and classify them.
///
/// The index file's weight is discarded: a directory's position is decided
/// by its parent. Ties in weight keep directory-listing order.
#[instrument(level = "debug", skip_all, fields(dir = %dir.display()))]
pub fn list_directory(dir: &Path) -> Result<DirListing> {
    let mut listing = DirListing::default();

    for entry in std::fs::read_dir(dir).map_err(|e| DocbinderError::io(dir, e))? {
        let entry = entry.map_err(|e| DocbinderError::io(dir, e))?;
        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();

        if path.is_dir() {
            let meta = extract_dir_metadata(&path)?;
            listing.subsections.push(Entry { meta, path });
        } else if path.is_file() && name == INDEX_FILENAME {
            let meta = extract_file_metadata(&path)?;
            listing.title = meta.title;
            listing.description = meta.description;
        } else if path.is_file() && name.ends_with(MD_EXT) {
            let meta = extract_file_metadata(&path)?;
            listing.documents.push(Entry { meta, path });
        } else {
            trace!(path = %path.display(), "ignoring entry");
        }
    }

    sort_by_weight(&mut listing.documents);
    sort_by_weight(&mut listing.subsections);

    debug!(
        documents = listing.documents.len(),
        subsections = listing.subsections.len(),
        "directory classified"
    );

    Ok(listing)
}

/// Front matter of a directory, read from its index file when present.
pub fn extract_dir_metadata(dir: &Path) -> Result<DocMeta> {
    for entry in std::fs::read_dir(dir).map_err(|e| DocbinderError::io(dir, e))? {
        let entry = entry.map_err(|e| DocbinderError::io(dir, e))?;
        if entry.file_name() == INDEX_FILENAME {
            return extract_file_metadata(&entry.path());
        }
    }

    Ok(DocMeta::default())
}

/// Stable ascending sort by numeric weight.
fn sort_by_weight(entries: &mut [Entry]) {
    entries.sort_by_key(|entry| entry.meta.sort_weight());
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    fn entry(title: Option<&str>, weight: Option<&str>, path: &str) -> Entry {
        Entry {
            meta: DocMeta {
                weight: weight.map(String::from),
                title: title.map(String::from),
                description: None,
            },
            path: PathBuf::from(path),
        }
    }

    #[test]
    fn classifies_children() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        write(&root.join("_index.md"), "title: Root\nweight: 99\ndescription: Top\n");
        write(&root.join("a.md"), "title: A\nweight: 1\n");
        write(&root.join("notes.txt"), "title: Not markdown\n");
        write(&root.join("sub/_index.md"), "title: Sub\nweight: 2\n");
        std::fs::create_dir_all(root.join("bare")).unwrap();

        let listing = list_directory(root).unwrap();

        assert_eq!(listing.title.as_deref(), Some("Root"));
        assert_eq!(listing.description.as_deref(), Some("Top"));
        assert_eq!(listing.documents.len(), 1);
        assert_eq!(listing.documents[0].meta.title.as_deref(), Some("A"));
        assert_eq!(listing.subsections.len(), 2);
        assert!(!listing.is_empty());

        let bare = listing
            .subsections
            .iter()
            .find(|e| e.path.ends_with("bare"))
            .unwrap();
        assert_eq!(bare.meta, DocMeta::default());
    }

    #[test]
    fn sorts_documents_and_subsections_by_weight() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        write(&root.join("c.md"), "title: C\nweight: 30\n");
        write(&root.join("a.md"), "title: A\nweight: 10\n");
        write(&root.join("b.md"), "title: B\nweight: 20\n");
        write(&root.join("z/_index.md"), "title: Z\nweight: 5\n");
        write(&root.join("y/_index.md"), "title: Y\nweight: 50\n");
        write(&root.join("x/_index.md"), "title: X\nweight: -1\n");

        let listing = list_directory(root).unwrap();

        let docs: Vec<_> = listing.documents.iter().map(Entry::display_title).collect();
        assert_eq!(docs, ["A", "B", "C"]);
        let subs: Vec<_> = listing.subsections.iter().map(Entry::display_title).collect();
        assert_eq!(subs, ["X", "Z", "Y"]);
    }

    #[test]
    fn missing_weight_sorts_as_zero() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        write(&root.join("late.md"), "title: Late\nweight: 2\n");
        write(&root.join("plain.md"), "Just text.\n");
        write(&root.join("early.md"), "title: Early\nweight: -3\n");

        let listing = list_directory(root).unwrap();

        assert_eq!(listing.documents[0].display_title(), "Early");
        assert!(listing.documents[1].path.ends_with("plain.md"));
        assert_eq!(listing.documents[2].display_title(), "Late");
    }

    #[test]
    fn sort_is_stable_for_equal_weights() {
        let mut entries = vec![
            entry(Some("first"), Some("1"), "1.md"),
            entry(Some("second"), None, "2.md"),
            entry(Some("third"), Some("1"), "3.md"),
            entry(Some("fourth"), Some("junk"), "4.md"),
        ];

        sort_by_weight(&mut entries);

        let titles: Vec<_> = entries.iter().map(Entry::display_title).collect();
        assert_eq!(titles, ["second", "fourth", "first", "third"]);
    }

    #[test]
    fn index_only_directory_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        write(&tmp.path().join("_index.md"), "title: Lonely\n");

        let listing = list_directory(tmp.path()).unwrap();
        assert!(listing.is_empty());
        assert_eq!(listing.title.as_deref(), Some("Lonely"));
    }

    #[test]
    fn dir_metadata_without_index_is_absent() {
        let tmp = tempfile::tempdir().unwrap();
        write(&tmp.path().join("page.md"), "title: Page\n");

        assert_eq!(extract_dir_metadata(tmp.path()).unwrap(), DocMeta::default());
    }

    #[test]
    fn dir_metadata_reads_index() {
        let tmp = tempfile::tempdir().unwrap();
        write(&tmp.path().join("_index.md"), "title: Guide\nweight: 4\ndescription: How-to\n");

        let meta = extract_dir_metadata(tmp.path()).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Guide"));
        assert_eq!(meta.weight.as_deref(), Some("4"));
        assert_eq!(meta.description.as_deref(), Some("How-to"));
    }

    #[test]
    fn display_title_falls_back_to_path() {
        let untitled = entry(None, None, "/docs/page.md");
        assert_eq!(untitled.display_title(), "/docs/page.md");
    }

    #[test]
    fn missing_directory_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = list_directory(&tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, DocbinderError::Io { .. }));
    }
}
