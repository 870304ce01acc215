//! Output sinks for assembled fragments.
//!
//! The assembler emits fragments in rendering order. [`WriterSink`] appends
//! them to one stream; [`ScratchSink`] materializes each as a file so an
//! external converter can take the ordered list as its inputs.

use std::fmt;
use std::io::Write;
use std::path::PathBuf;

use tracing::trace;

use docbinder_shared::{DocbinderError, Result};

/// Kind of an emitted fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    Header,
    Toc,
    Title,
    Body,
    Separator,
    Placeholder,
}

impl FragmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Toc => "toc",
            Self::Title => "title",
            Self::Body => "body",
            Self::Separator => "separator",
            Self::Placeholder => "placeholder",
        }
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination for assembled fragments.
pub trait FragmentSink {
    /// Append one fragment. Fragments arrive in rendering order.
    fn emit(&mut self, kind: FragmentKind, text: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Direct-write sink
// ---------------------------------------------------------------------------

/// Appends every fragment to a writer.
pub struct WriterSink<W: Write> {
    writer: W,
    /// Path reported in I/O errors.
    target: PathBuf,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W, target: impl Into<PathBuf>) -> Self {
        Self {
            writer,
            target: target.into(),
        }
    }

    /// Flush and return the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer
            .flush()
            .map_err(|e| DocbinderError::io(&self.target, e))?;
        Ok(self.writer)
    }
}

impl<W: Write> FragmentSink for WriterSink<W> {
    fn emit(&mut self, _kind: FragmentKind, text: &str) -> Result<()> {
        self.writer
            .write_all(text.as_bytes())
            .map_err(|e| DocbinderError::io(&self.target, e))
    }
}

// ---------------------------------------------------------------------------
// Scratch-file sink
// ---------------------------------------------------------------------------

/// Writes each fragment to its own numbered file inside a scratch directory.
///
/// Separator fragments share one file, written on first use. The scratch
/// directory belongs to the caller, which must keep it alive until the
/// fragment list has been consumed.
pub struct ScratchSink {
    dir: PathBuf,
    fragments: Vec<PathBuf>,
    separator: Option<(String, PathBuf)>,
    written: usize,
}

impl ScratchSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            fragments: Vec::new(),
            separator: None,
            written: 0,
        }
    }

    /// Ordered fragment paths emitted so far.
    pub fn fragments(&self) -> &[PathBuf] {
        &self.fragments
    }

    /// Consume the sink, returning fragment paths in rendering order.
    pub fn into_fragments(self) -> Vec<PathBuf> {
        self.fragments
    }

    fn write_fragment(&mut self, kind: FragmentKind, text: &str) -> Result<PathBuf> {
        self.written += 1;
        let path = self.dir.join(format!("{:05}-{kind}.md", self.written));
        std::fs::write(&path, text).map_err(|e| DocbinderError::io(&path, e))?;
        trace!(path = %path.display(), %kind, "fragment written");
        Ok(path)
    }

    fn separator_path(&mut self, text: &str) -> Result<PathBuf> {
        if let Some((cached, path)) = &self.separator {
            if cached == text {
                return Ok(path.clone());
            }
        }
        let path = self.write_fragment(FragmentKind::Separator, text)?;
        self.separator = Some((text.to_string(), path.clone()));
        Ok(path)
    }
}

impl FragmentSink for ScratchSink {
    fn emit(&mut self, kind: FragmentKind, text: &str) -> Result<()> {
        let path = match kind {
            FragmentKind::Separator => self.separator_path(text)?,
            _ => self.write_fragment(kind, text)?,
        };
        self.fragments.push(path);
        Ok(())
    }
}

/// Read and concatenate fragment files in order.
#[cfg(test)]
pub(crate) fn concat_fragments(fragments: &[PathBuf]) -> Result<String> {
    let mut out = String::new();
    for path in fragments {
        out.push_str(&std::fs::read_to_string(path).map_err(|e| DocbinderError::io(path, e))?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_sink_appends_in_order() {
        let mut sink = WriterSink::new(Vec::new(), "out.md");
        sink.emit(FragmentKind::Header, "# H\n\n").unwrap();
        sink.emit(FragmentKind::Placeholder, "No content.").unwrap();
        sink.emit(FragmentKind::Separator, "\n\n---\n\n").unwrap();

        let bytes = sink.finish().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "# H\n\nNo content.\n\n---\n\n");
    }

    #[test]
    fn scratch_sink_writes_numbered_files() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sink = ScratchSink::new(tmp.path());
        sink.emit(FragmentKind::Header, "# H\n\n").unwrap();
        sink.emit(FragmentKind::Body, "body").unwrap();

        let fragments = sink.into_fragments();
        assert_eq!(fragments.len(), 2);
        assert!(fragments[0].ends_with("00001-header.md"));
        assert!(fragments[1].ends_with("00002-body.md"));
        assert_eq!(std::fs::read_to_string(&fragments[1]).unwrap(), "body");
    }

    #[test]
    fn scratch_sink_reuses_separator_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sink = ScratchSink::new(tmp.path());
        sink.emit(FragmentKind::Separator, "\n\n---\n\n").unwrap();
        sink.emit(FragmentKind::Body, "x").unwrap();
        sink.emit(FragmentKind::Separator, "\n\n---\n\n").unwrap();

        let fragments = sink.fragments();
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[0], fragments[2]);
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 2);
    }

    #[test]
    fn concat_restores_rendering_order() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sink = ScratchSink::new(tmp.path());
        sink.emit(FragmentKind::Title, "# A\n\n").unwrap();
        sink.emit(FragmentKind::Body, "text").unwrap();
        sink.emit(FragmentKind::Separator, "|").unwrap();
        sink.emit(FragmentKind::Body, "more").unwrap();
        sink.emit(FragmentKind::Separator, "|").unwrap();

        let text = concat_fragments(sink.fragments()).unwrap();
        assert_eq!(text, "# A\n\ntext|more|");
    }

    #[test]
    fn scratch_sink_missing_dir_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sink = ScratchSink::new(tmp.path().join("gone"));
        let err = sink.emit(FragmentKind::Header, "x").unwrap_err();
        assert!(matches!(err, DocbinderError::Io { .. }));
    }
}
