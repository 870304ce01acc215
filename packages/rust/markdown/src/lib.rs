//! Front-matter scanning and link rewriting for Markdown documents.
//!
//! Documentation trees generated for static site builders carry their
//! ordering metadata as `key: value` lines near the top of each file. This
//! crate reads those lines without parsing the surrounding Markdown.

mod links;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{instrument, trace};

use docbinder_shared::{DocMeta, DocbinderError, Result};

pub use links::rewrite_parent_links;

/// Front-matter field markers, matched as substrings of a stripped line.
const TITLE_MARKER: &str = "title:";
const WEIGHT_MARKER: &str = "weight:";
const DESCRIPTION_MARKER: &str = "description:";

/// Scan a Markdown file's leading lines for title, weight and description.
///
/// A file without any marker yields an all-`None` [`DocMeta`].
#[instrument(level = "trace", skip_all, fields(path = %path.display()))]
pub fn extract_file_metadata(path: &Path) -> Result<DocMeta> {
    let file = File::open(path).map_err(|e| DocbinderError::io(path, e))?;
    extract_metadata(BufReader::new(file)).map_err(|e| DocbinderError::io(path, e))
}

/// Scan lines from `reader` until all three fields are found or input ends.
///
/// Each stripped line is checked for `title:`, then `weight:`, then
/// `description:`; only the first marker found on a line is applied. The
/// value is the stripped line minus the marker's length in characters,
/// left-trimmed, so the marker is expected at the start of the line. A later
/// match overwrites an earlier one.
pub fn extract_metadata<R: BufRead>(reader: R) -> std::io::Result<DocMeta> {
    let mut meta = DocMeta::default();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if line.contains(TITLE_MARKER) {
            meta.title = value_after(line, TITLE_MARKER);
        } else if line.contains(WEIGHT_MARKER) {
            meta.weight = value_after(line, WEIGHT_MARKER);
        } else if line.contains(DESCRIPTION_MARKER) {
            meta.description = value_after(line, DESCRIPTION_MARKER);
        }

        if meta.is_complete() {
            trace!("all front-matter fields found");
            break;
        }
    }

    Ok(meta)
}

/// Drop the marker's length in characters from the start of `line`.
fn value_after(line: &str, marker: &str) -> Option<String> {
    let skip = marker.chars().count();
    let start = line
        .char_indices()
        .nth(skip)
        .map(|(idx, _)| idx)
        .unwrap_or(line.len());
    let value = line[start..].trim_start();
    (!value.is_empty()).then(|| value.to_string())
}
