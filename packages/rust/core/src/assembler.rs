//! Documentation tree assembler.
//!
//! Walks a content tree depth-first and emits its sections, listings and
//! documents as an ordered stream of fragments:
//!
//! ```text
//! # Section 1 "Root"          header (+ description)
//! ## Content                  listing, when the directory has entries
//! ---                         separator
//! # A                         title of each leaf document
//! <a.md>                      body of the document
//! ---                         separator
//! # Section 1.1 "Sub"         subsections, recursively
//! ...
//! ```
//!
//! A directory with neither documents nor subsections emits `No content.`
//! in place of its listing and documents.

use std::ops::AddAssign;
use std::path::Path;

use tracing::{debug, info, instrument};

use docbinder_markdown::rewrite_parent_links;
use docbinder_shared::{DocbinderError, NO_CONTENT, Result, SECTION_SEPARATOR, SectionNumber};

use crate::sink::{FragmentKind, FragmentSink};
use crate::toc;
use crate::walker::{self, DirListing, Entry};

/// Options controlling how fragments are produced.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Text emitted after every section and document.
    pub separator: String,
    /// Rewrite `[label](../target)` links against the document's directory.
    pub rewrite_parent_links: bool,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            separator: SECTION_SEPARATOR.to_string(),
            rewrite_parent_links: false,
        }
    }
}

/// Counts gathered while assembling a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssembleStats {
    /// Directories visited, the root included.
    pub sections: usize,
    /// Leaf documents emitted.
    pub documents: usize,
    /// Directories that emitted the "No content." placeholder.
    pub empty_sections: usize,
}

impl AddAssign for AssembleStats {
    fn add_assign(&mut self, other: Self) {
        self.sections += other.sections;
        self.documents += other.documents;
        self.empty_sections += other.empty_sections;
    }
}

/// Emits a documentation tree into a [`FragmentSink`].
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    options: AssembleOptions,
}

impl Assembler {
    pub fn new(options: AssembleOptions) -> Self {
        Self { options }
    }

    /// Assemble `dir` as section `number`, recursing into its subsections.
    ///
    /// Subsection `i` (1-based, in weight order) is numbered `number.i`.
    /// Any filesystem error aborts the whole assembly.
    #[instrument(skip_all, fields(dir = %dir.display(), section = %number))]
    pub fn assemble(
        &self,
        dir: &Path,
        number: &SectionNumber,
        sink: &mut dyn FragmentSink,
    ) -> Result<AssembleStats> {
        info!("entering directory");

        let listing = walker::list_directory(dir)?;
        let mut stats = AssembleStats {
            sections: 1,
            ..AssembleStats::default()
        };

        sink.emit(FragmentKind::Header, &toc::section_header(number, dir, &listing))?;

        if listing.is_empty() {
            sink.emit(FragmentKind::Placeholder, NO_CONTENT)?;
            self.separator(sink)?;
            stats.empty_sections = 1;
            return Ok(stats);
        }

        sink.emit(FragmentKind::Toc, &toc::content_listing(&listing))?;
        self.separator(sink)?;

        self.emit_documents(dir, &listing, sink)?;
        stats.documents = listing.documents.len();

        for (index, subsection) in (1u32..).zip(&listing.subsections) {
            stats += self.assemble(&subsection.path, &number.child(index), sink)?;
        }

        Ok(stats)
    }

    fn emit_documents(
        &self,
        dir: &Path,
        listing: &DirListing,
        sink: &mut dyn FragmentSink,
    ) -> Result<()> {
        if listing.documents.is_empty() {
            return Ok(());
        }

        let link_base = if self.options.rewrite_parent_links {
            Some(std::path::absolute(dir).map_err(|e| DocbinderError::io(dir, e))?)
        } else {
            None
        };

        for document in &listing.documents {
            debug!(path = %document.path.display(), "processing document");
            sink.emit(FragmentKind::Title, &toc::document_title(document))?;
            sink.emit(FragmentKind::Body, &read_body(document, link_base.as_deref())?)?;
            self.separator(sink)?;
        }

        Ok(())
    }

    fn separator(&self, sink: &mut dyn FragmentSink) -> Result<()> {
        sink.emit(FragmentKind::Separator, &self.options.separator)
    }
}

/// Document text, with parent links rewritten against `link_base` when given.
fn read_body(document: &Entry, link_base: Option<&Path>) -> Result<String> {
    let text = std::fs::read_to_string(&document.path)
        .map_err(|e| DocbinderError::io(&document.path, e))?;

    Ok(match link_base {
        Some(base) => rewrite_parent_links(&text, base),
        None => text,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
