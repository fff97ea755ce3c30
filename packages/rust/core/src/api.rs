//! API reference publishing.
//!
//! Runs the library's doc-generation build, then copies each module's
//! generated trees into `<output_root>/<version>/<module>/<dir>`.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use docsplice_shared::{ApiOutput, ApiVersion, DocspliceError, Result};

use crate::fsutil::copy_tree;
use crate::process::{ToolInvocation, ToolRunner};

/// Configuration for API publishing.
#[derive(Debug, Clone)]
pub struct ApiPublishConfig {
    /// Library checkout the build tool runs in.
    pub source_root: PathBuf,
    /// Site directory that receives one subdirectory per version.
    pub output_root: PathBuf,
    pub build_tool: String,
    pub tasks: Vec<String>,
    pub modules: Vec<String>,
    pub outputs: Vec<ApiOutput>,
}

/// Build and publish the API docs for `version`. Returns the directories
/// written.
///
/// An already-published destination is never overwritten.
#[instrument(skip_all, fields(version = %version, src = %config.source_root.display()))]
pub fn publish_api(
    config: &ApiPublishConfig,
    version: &ApiVersion,
    runner: &dyn ToolRunner,
) -> Result<Vec<PathBuf>> {
    let version_root = config.output_root.join(version.url_segment());

    // Fail before the (slow) build if this version is already published
    let targets = copy_targets(config, &version_root);
    if let Some((_, dest)) = targets.iter().find(|(_, dest)| dest.exists()) {
        return Err(DocspliceError::config(format!(
            "{} already exists; refusing to overwrite published docs for {version}",
            dest.display()
        )));
    }

    runner.run(
        &ToolInvocation::new(&config.build_tool, &config.tasks).in_dir(&config.source_root),
    )?;

    let mut written = Vec::with_capacity(targets.len());
    for (from, to) in targets {
        if !from.is_dir() {
            return Err(DocspliceError::io(
                &from,
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "expected generated docs were not produced by the build",
                ),
            ));
        }
        let files = copy_tree(&from, &to)?;
        info!(from = %from.display(), to = %to.display(), files, "copied API docs");
        written.push(to);
    }

    info!(dirs = written.len(), root = %version_root.display(), "API docs published");
    Ok(written)
}

/// `(generated tree, destination)` for every module/output pair.
fn copy_targets(config: &ApiPublishConfig, version_root: &Path) -> Vec<(PathBuf, PathBuf)> {
    config
        .modules
        .iter()
        .flat_map(|module| {
            config.outputs.iter().map(move |output| {
                (
                    config.source_root.join(module).join(&output.from),
                    version_root.join(module).join(&output.to),
                )
            })
        })
        .collect()
}
