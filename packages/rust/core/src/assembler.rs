//! Documentation tree assembler.
//!
//! Takes the extracted samples and a raw-docs tree, then writes the final
//! docs tree to disk: Markdown files with their sample directives resolved,
//! asset files copied through unchanged, relative layout preserved.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use docsplice_markdown::Document;
use docsplice_shared::{DocspliceError, Result, SampleSet};

use crate::fsutil::{copy_file, mirror_path, remove_tree, write_file};

/// Output from a successful docs assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleResult {
    /// Root of the written docs tree.
    pub output_root: PathBuf,
    /// Number of Markdown documents written.
    pub documents: usize,
    /// Number of asset files copied.
    pub assets: usize,
    /// Total directives substituted.
    pub directives: usize,
}

/// Configuration for docs assembly.
#[derive(Debug, Clone)]
pub struct AssembleConfig {
    /// Raw docs tree (read only).
    pub source_root: PathBuf,
    /// Output tree, cleared before writing.
    pub output_root: PathBuf,
    /// Extension of documents that get directive substitution (e.g. `md`).
    pub document_extension: String,
    /// Extensions copied byte-for-byte.
    pub asset_extensions: Vec<String>,
}

/// Observer for per-file assembly progress.
pub trait AssembleObserver {
    /// Called after each output file is written.
    fn file_written(&self, path: &Path);
}

impl<F: Fn(&Path)> AssembleObserver for F {
    fn file_written(&self, path: &Path) {
        self(path)
    }
}

/// Assemble the docs tree.
///
/// Layout:
/// ```text
/// <source_root>/                 <output_root>/
/// ├── _index.md          ──►     ├── _index.md        (directives resolved)
/// ├── guide/                     ├── guide/
/// │   ├── actions.md     ──►     │   ├── actions.md
/// │   └── turn.mp4       ──►     │   └── turn.mp4     (copied as-is)
/// └── notes.txt                  └── (not copied)
/// ```
#[instrument(skip_all, fields(src = %config.source_root.display(), out = %config.output_root.display(), samples = samples.len()))]
pub fn assemble_docs(
    config: &AssembleConfig,
    samples: &SampleSet,
    observer: &dyn AssembleObserver,
) -> Result<AssembleResult> {
    remove_tree(&config.output_root)?;

    let mut result = AssembleResult {
        output_root: config.output_root.clone(),
        documents: 0,
        assets: 0,
        directives: 0,
    };

    // Documents first, then assets
    for path in files_with_extensions(&config.source_root, &[config.document_extension.as_str()])? {
        let dest = mirror_path(&config.source_root, &path, &config.output_root)?;
        result.directives += write_document(&path, &dest, samples)?;
        result.documents += 1;
        observer.file_written(&dest);
    }

    let asset_exts: Vec<&str> = config.asset_extensions.iter().map(String::as_str).collect();
    for path in files_with_extensions(&config.source_root, &asset_exts)? {
        let dest = mirror_path(&config.source_root, &path, &config.output_root)?;
        copy_file(&path, &dest)?;
        debug!(path = %dest.display(), "copied asset");
        result.assets += 1;
        observer.file_written(&dest);
    }

    info!(
        documents = result.documents,
        assets = result.assets,
        directives = result.directives,
        "docs assembly complete"
    );

    Ok(result)
}

/// Render one document and write it. Returns the number of directives it held.
fn write_document(src: &Path, dest: &Path, samples: &SampleSet) -> Result<usize> {
    info!(path = %src.display(), "processing document");
    let text = std::fs::read_to_string(src).map_err(|e| DocspliceError::io(src, e))?;
    let doc = Document::parse(src, text);

    // Render fully before touching the destination
    let rendered = doc.render(samples)?;
    write_file(dest, &rendered)?;

    debug!(path = %dest.display(), directives = doc.directives.len(), "wrote document");
    Ok(doc.directives.len())
}

/// All regular files under `root` with one of `extensions`, in sorted order.
fn files_with_extensions(root: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| DocspliceError::walk(root, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| extensions.contains(&ext));
        if matches {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
