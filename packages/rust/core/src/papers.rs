//! LaTeX paper conversion.
//!
//! Each paper source directly under the source root is handed to the
//! converter (pandoc by default), which writes a standalone HTML page with
//! MathJax math rendering into the output directory.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use docsplice_shared::{DocspliceError, Result};

use crate::process::{ToolInvocation, ToolRunner};

/// Configuration for paper conversion.
#[derive(Debug, Clone)]
pub struct PaperConfig {
    /// Directory holding the paper sources (not searched recursively).
    pub source_root: PathBuf,
    /// Directory the HTML pages are written to.
    pub output_root: PathBuf,
    /// Converter executable.
    pub converter: String,
    /// Extension of paper sources (e.g. `tex`).
    pub extension: String,
}

/// Convert every paper. Returns the HTML paths produced, in source order.
///
/// Stops at the first converter failure; pages already written are kept.
#[instrument(skip_all, fields(src = %config.source_root.display(), out = %config.output_root.display()))]
pub fn convert_papers(config: &PaperConfig, runner: &dyn ToolRunner) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(&config.output_root)
        .map_err(|e| DocspliceError::io(&config.output_root, e))?;

    let mut written = Vec::new();
    for source in paper_sources(&config.source_root, &config.extension)? {
        let output = html_path(&config.output_root, &source);
        info!(paper = %source.display(), "converting paper");

        runner.run(&converter_invocation(&config.converter, &source, &output))?;
        written.push(output);
    }

    info!(count = written.len(), "paper conversion complete");
    Ok(written)
}

/// `<converter> <src> -f latex -t html -s -o <out> --mathjax`
fn converter_invocation(converter: &str, source: &Path, output: &Path) -> ToolInvocation {
    ToolInvocation::new(
        converter,
        [
            source.to_string_lossy().into_owned(),
            "-f".into(),
            "latex".into(),
            "-t".into(),
            "html".into(),
            "-s".into(),
            "-o".into(),
            output.to_string_lossy().into_owned(),
            "--mathjax".into(),
        ],
    )
}

fn html_path(output_root: &Path, source: &Path) -> PathBuf {
    let name = source.with_extension("html");
    output_root.join(name.file_name().unwrap_or(name.as_os_str()))
}

/// Paper sources directly inside `dir`, sorted by name.
fn paper_sources(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| DocspliceError::io(dir, e))?;

    let mut sources = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DocspliceError::io(dir, e))?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(extension) {
            sources.push(path);
        }
    }
    sources.sort();
    Ok(sources)
}
