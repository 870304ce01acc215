//! Section headers and "Content" listings.
//!
//! Pure text builders for the fragments the assembler emits around each
//! directory's documents.

use std::path::Path;

use docbinder_shared::SectionNumber;

use crate::walker::{DirListing, Entry};

/// Description shown for listing entries that declare none.
const DEFAULT_DESCRIPTION: &str = "subsection";

/// Numbered heading for a directory, followed by its description if any.
///
/// Falls back to the directory name when the index file has no title.
pub fn section_header(number: &SectionNumber, dir: &Path, listing: &DirListing) -> String {
    let title = listing.title.clone().unwrap_or_else(|| dir_name(dir));

    let mut out = format!("# Section {number} \"{title}\"\n\n");
    if let Some(description) = &listing.description {
        out.push_str(description);
        out.push_str("\n\n");
    }
    out
}

/// Bullet list of a directory's documents, then its subsections.
pub fn content_listing(listing: &DirListing) -> String {
    let mut out = String::from("## Content\n\n");
    for entry in listing.documents.iter().chain(&listing.subsections) {
        let description = entry
            .meta
            .description
            .as_deref()
            .unwrap_or(DEFAULT_DESCRIPTION);
        out.push_str(&format!("* {} &mdash; {description}\n\n", entry.display_title()));
    }
    out
}

/// Heading placed above a leaf document's content.
pub fn document_title(entry: &Entry) -> String {
    format!("# {}\n\n", entry.display_title())
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
