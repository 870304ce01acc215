//! External converters: Markdown → HTML (`pandoc`) and HTML → PDF (`wkhtmltopdf`).
//!
//! Both tools are spawned as subprocesses with the input file list and the
//! output path. A tool that cannot be started, or that exits unsuccessfully,
//! fails the run; there are no retries.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info, instrument};

use docbinder_shared::{AppConfig, DocbinderError, PdfConfig, Result};

/// A tool that turns an ordered list of input files into one output file.
pub trait Converter {
    /// Tool name used in logs and errors.
    fn name(&self) -> &str;

    /// Convert `inputs` (in order) into `output`.
    fn convert(&self, inputs: &[PathBuf], output: &Path) -> Result<()>;
}

/// The converters used by the pre-render pipelines.
pub struct Converters {
    /// Markdown fragments → standalone HTML.
    pub html: Box<dyn Converter>,
    /// Standalone HTML → PDF.
    pub pdf: Box<dyn Converter>,
}

impl Converters {
    /// Build the `pandoc` + `wkhtmltopdf` pair from configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            html: Box::new(Pandoc {
                program: config.converters.pandoc.clone(),
                extra_args: config.converters.pandoc_args.clone(),
            }),
            pdf: Box::new(Wkhtmltopdf {
                program: config.converters.wkhtmltopdf.clone(),
                options: config.pdf.clone(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// pandoc
// ---------------------------------------------------------------------------

/// Markdown → standalone HTML via `pandoc`.
#[derive(Debug, Clone)]
pub struct Pandoc {
    pub program: String,
    pub extra_args: Vec<String>,
}

impl Pandoc {
    fn command(&self, inputs: &[PathBuf], output: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["--from", "markdown", "--to", "html", "--standalone"])
            .args(&self.extra_args)
            .arg("--output")
            .arg(output)
            .args(inputs);
        cmd
    }
}

impl Converter for Pandoc {
    fn name(&self) -> &str {
        "pandoc"
    }

    #[instrument(skip_all, fields(inputs = inputs.len(), output = %output.display()))]
    fn convert(&self, inputs: &[PathBuf], output: &Path) -> Result<()> {
        info!("converting Markdown to HTML");
        run(self.name(), self.command(inputs, output))
    }
}

// ---------------------------------------------------------------------------
// wkhtmltopdf
// ---------------------------------------------------------------------------

/// HTML → PDF via `wkhtmltopdf`.
#[derive(Debug, Clone)]
pub struct Wkhtmltopdf {
    pub program: String,
    pub options: PdfConfig,
}

impl Wkhtmltopdf {
    fn command(&self, input: &Path, output: &Path) -> Command {
        let opts = &self.options;
        let mut cmd = Command::new(&self.program);
        if opts.enable_local_file_access {
            cmd.arg("--enable-local-file-access");
        }
        cmd.args(["--load-media-error-handling", opts.load_media_error_handling.as_str()])
            .args(["--load-error-handling", opts.load_error_handling.as_str()]);
        cmd.arg(if opts.images { "--images" } else { "--no-images" });
        cmd.args(&opts.extra_args).arg(input).arg(output);
        cmd
    }
}

impl Converter for Wkhtmltopdf {
    fn name(&self) -> &str {
        "wkhtmltopdf"
    }

    #[instrument(skip_all, fields(output = %output.display()))]
    fn convert(&self, inputs: &[PathBuf], output: &Path) -> Result<()> {
        let [input] = inputs else {
            return Err(DocbinderError::converter(
                self.name(),
                format!("expected exactly one HTML input, got {}", inputs.len()),
            ));
        };
        info!(input = %input.display(), "rendering HTML to PDF");
        run(self.name(), self.command(input, output))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run `cmd` to completion, mapping spawn failures and bad exit codes to errors.
fn run(tool: &str, mut cmd: Command) -> Result<()> {
    debug!(tool, ?cmd, "spawning converter");

    let output = cmd
        .stdin(Stdio::null())
        .output()
        .map_err(|e| {
            DocbinderError::converter(
                tool,
                format!("failed to spawn {:?}: {e}. Is it installed?", cmd.get_program()),
            )
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr: String = stderr.trim().chars().take(2000).collect();
        let message = if stderr.is_empty() {
            output.status.to_string()
        } else {
            format!("{}: {stderr}", output.status)
        };
        return Err(DocbinderError::converter(tool, message));
    }

    debug!(tool, "converter finished");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn args(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn pandoc_arguments() {
        let pandoc = Pandoc {
            program: "pandoc".into(),
            extra_args: vec!["--toc".into()],
        };
        let inputs = vec![PathBuf::from("/s/00001-header.md"), PathBuf::from("/s/00002-toc.md")];
        let cmd = pandoc.command(&inputs, Path::new("/s/bundle.html"));

        assert_eq!(cmd.get_program(), "pandoc");
        assert_eq!(
            args(&cmd),
            [
                "--from",
                "markdown",
                "--to",
                "html",
                "--standalone",
                "--toc",
                "--output",
                "/s/bundle.html",
                "/s/00001-header.md",
                "/s/00002-toc.md",
            ]
        );
    }

    #[test]
    fn wkhtmltopdf_default_arguments() {
        let renderer = Wkhtmltopdf {
            program: "wkhtmltopdf".into(),
            options: PdfConfig::default(),
        };
        let cmd = renderer.command(Path::new("in.html"), Path::new("out.pdf"));

        assert_eq!(
            args(&cmd),
            [
                "--enable-local-file-access",
                "--load-media-error-handling",
                "skip",
                "--load-error-handling",
                "skip",
                "--images",
                "in.html",
                "out.pdf",
            ]
        );
    }

    #[test]
    fn wkhtmltopdf_respects_disabled_options() {
        let renderer = Wkhtmltopdf {
            program: "wkhtmltopdf".into(),
            options: PdfConfig {
                enable_local_file_access: false,
                images: false,
                load_error_handling: "abort".into(),
                ..PdfConfig::default()
            },
        };
        let cmd = renderer.command(Path::new("in.html"), Path::new("out.pdf"));
        let args = args(&cmd);

        assert!(!args.contains(&"--enable-local-file-access".to_string()));
        assert!(args.contains(&"--no-images".to_string()));
        assert!(args.windows(2).any(|w| w == ["--load-error-handling", "abort"]));
    }

    #[test]
    fn wkhtmltopdf_requires_single_input() {
        let renderer = Wkhtmltopdf {
            program: "wkhtmltopdf".into(),
            options: PdfConfig::default(),
        };
        let err = renderer
            .convert(&[PathBuf::from("a.html"), PathBuf::from("b.html")], Path::new("out.pdf"))
            .unwrap_err();
        assert!(matches!(err, DocbinderError::Converter { .. }));
    }

    #[test]
    fn missing_program_is_converter_error() {
        let pandoc = Pandoc {
            program: "docbinder-test-no-such-program".into(),
            extra_args: vec![],
        };
        let err = pandoc
            .convert(&[PathBuf::from("in.md")], Path::new("out.html"))
            .unwrap_err();
        assert!(err.to_string().contains("failed to spawn"));
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_converter_error() {
        let err = run("false", Command::new("false")).unwrap_err();
        assert!(matches!(err, DocbinderError::Converter { ref tool, .. } if tool == "false"));
    }

    #[test]
    fn from_config_uses_configured_programs() {
        let mut config = AppConfig::default();
        config.converters.pandoc = "/opt/bin/pandoc".into();
        let converters = Converters::from_config(&config);
        assert_eq!(converters.html.name(), "pandoc");
        assert_eq!(converters.pdf.name(), "wkhtmltopdf");
    }
}
