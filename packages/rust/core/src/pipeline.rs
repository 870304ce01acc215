//! End-to-end bundling pipelines: content tree → Markdown, HTML or PDF.
//!
//! `bundle_markdown` writes the assembled document straight to the output
//! file. `bundle_html` and `bundle_pdf` materialize every fragment in a
//! scratch directory, hand the ordered list to the external converters, and
//! remove the scratch directory when they return.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tempfile::TempDir;
use tracing::{debug, info, instrument};

use docbinder_shared::{DocbinderError, Result, SectionNumber};

use crate::assembler::{AssembleOptions, AssembleStats, Assembler};
use crate::render::Converters;
use crate::sink::{ScratchSink, WriterSink};

/// Name of the intermediate HTML file inside the scratch directory.
const INTERMEDIATE_HTML: &str = "bundle.html";

/// Input and output locations for one bundling run.
#[derive(Debug, Clone)]
pub struct BundleRequest {
    /// Root of the documentation content tree.
    pub source: PathBuf,
    /// File to create or overwrite.
    pub output: PathBuf,
    /// Parent directory for the scratch directory (system temp dir when `None`).
    pub scratch_parent: Option<PathBuf>,
}

impl BundleRequest {
    pub fn new(source: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
            scratch_parent: None,
        }
    }
}

/// Result of a bundling run.
#[derive(Debug, Clone)]
pub struct BundleReport {
    /// Path of the written artifact.
    pub output: PathBuf,
    /// Directories assembled, the root included.
    pub sections: usize,
    /// Leaf documents included.
    pub documents: usize,
    /// Directories rendered as "No content.".
    pub empty_sections: usize,
    /// Fragment files handed to the converter (0 for direct writes).
    pub fragments: usize,
    /// Total elapsed time.
    pub elapsed: Duration,
}

impl BundleReport {
    fn new(output: &Path, stats: AssembleStats, fragments: usize, start: Instant) -> Self {
        Self {
            output: output.to_path_buf(),
            sections: stats.sections,
            documents: stats.documents,
            empty_sections: stats.empty_sections,
            fragments,
            elapsed: start.elapsed(),
        }
    }
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when the pipeline completes.
    fn done(&self, report: &BundleReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn done(&self, _report: &BundleReport) {}
}

// ---------------------------------------------------------------------------
// Pipelines
// ---------------------------------------------------------------------------

/// Assemble the tree directly into a Markdown file.
#[instrument(skip_all, fields(source = %request.source.display(), output = %request.output.display()))]
pub fn bundle_markdown(
    request: &BundleRequest,
    progress: &dyn ProgressReporter,
) -> Result<BundleReport> {
    let start = Instant::now();
    check_source(&request.source)?;

    progress.phase("Assembling Markdown");
    let file = File::create(&request.output).map_err(|e| DocbinderError::io(&request.output, e))?;
    let mut sink = WriterSink::new(BufWriter::new(file), &request.output);

    let stats = Assembler::default().assemble(&request.source, &SectionNumber::root(), &mut sink)?;
    sink.finish()?;

    let report = BundleReport::new(&request.output, stats, 0, start);
    info!(
        sections = report.sections,
        documents = report.documents,
        "Markdown bundle written"
    );
    progress.done(&report);
    Ok(report)
}

/// Assemble the tree into fragments and convert them to standalone HTML.
#[instrument(skip_all, fields(source = %request.source.display(), output = %request.output.display()))]
pub fn bundle_html(
    request: &BundleRequest,
    converters: &Converters,
    progress: &dyn ProgressReporter,
) -> Result<BundleReport> {
    let start = Instant::now();
    check_source(&request.source)?;
    check_extension(&request.output, ".html")?;

    let prerendered = prerender(request, progress)?;

    progress.phase("Converting to HTML");
    converters
        .html
        .convert(&prerendered.fragments, &request.output)?;

    let report = prerendered.report(&request.output, start);
    info!(fragments = report.fragments, "HTML bundle written");
    progress.done(&report);
    Ok(report)
}

/// Assemble the tree into fragments, convert them to HTML, then render a PDF.
#[instrument(skip_all, fields(source = %request.source.display(), output = %request.output.display()))]
pub fn bundle_pdf(
    request: &BundleRequest,
    converters: &Converters,
    progress: &dyn ProgressReporter,
) -> Result<BundleReport> {
    let start = Instant::now();
    check_source(&request.source)?;
    check_extension(&request.output, ".pdf")?;

    let prerendered = prerender(request, progress)?;
    let html_path = prerendered.scratch.path().join(INTERMEDIATE_HTML);

    progress.phase("Converting to HTML");
    converters.html.convert(&prerendered.fragments, &html_path)?;

    progress.phase("Rendering PDF");
    converters.pdf.convert(&[html_path], &request.output)?;

    let report = prerendered.report(&request.output, start);
    info!(fragments = report.fragments, "PDF bundle written");
    progress.done(&report);
    Ok(report)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fragments materialized in a scratch directory that lives as long as this value.
struct Prerendered {
    scratch: TempDir,
    fragments: Vec<PathBuf>,
    stats: AssembleStats,
}

impl Prerendered {
    fn report(&self, output: &Path, start: Instant) -> BundleReport {
        BundleReport::new(output, self.stats, self.fragments.len(), start)
    }
}

/// Assemble the tree into fragment files, rewriting parent links.
fn prerender(request: &BundleRequest, progress: &dyn ProgressReporter) -> Result<Prerendered> {
    let scratch = create_scratch(request.scratch_parent.as_deref())?;
    debug!(scratch = %scratch.path().display(), "scratch directory created");

    progress.phase("Assembling fragments");
    let assembler = Assembler::new(AssembleOptions {
        rewrite_parent_links: true,
        ..AssembleOptions::default()
    });
    let mut sink = ScratchSink::new(scratch.path());
    let stats = assembler.assemble(&request.source, &SectionNumber::root(), &mut sink)?;
    let fragments = sink.into_fragments();

    info!(
        sections = stats.sections,
        documents = stats.documents,
        fragments = fragments.len(),
        "fragments assembled"
    );

    Ok(Prerendered {
        scratch,
        fragments,
        stats,
    })
}

fn create_scratch(parent: Option<&Path>) -> Result<TempDir> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("docbinder-");
    match parent {
        Some(dir) => builder.tempdir_in(dir).map_err(|e| DocbinderError::io(dir, e)),
        None => builder
            .tempdir()
            .map_err(|e| DocbinderError::io(std::env::temp_dir(), e)),
    }
}

/// The source must exist and be a directory.
fn check_source(source: &Path) -> Result<()> {
    if !source.exists() {
        return Err(DocbinderError::precondition(format!(
            "source {} does not exist",
            source.display()
        )));
    }
    if !source.is_dir() {
        return Err(DocbinderError::precondition(format!(
            "source {} is not a directory",
            source.display()
        )));
    }
    Ok(())
}

/// The output file name must end with `extension` (e.g. `.pdf`).
fn check_extension(output: &Path, extension: &str) -> Result<()> {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if name.ends_with(extension) {
        Ok(())
    } else {
        Err(DocbinderError::precondition(format!(
            "output {} must end with {extension}",
            output.display()
        )))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
