//! End-to-end commands: samples (extract → assemble), papers, api.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, instrument};

use docsplice_shared::{BuildConfig, Result};

use crate::api::{ApiPublishConfig, publish_api};
use crate::assembler::{AssembleConfig, AssembleResult, assemble_docs};
use crate::papers::{PaperConfig, convert_papers};
use crate::process::ToolRunner;

impl From<&BuildConfig> for AssembleConfig {
    fn from(config: &BuildConfig) -> Self {
        Self {
            source_root: config.doc_source_root.clone(),
            output_root: config.doc_output_root.clone(),
            document_extension: config.samples.document_extension.clone(),
            asset_extensions: config.samples.asset_extensions.clone(),
        }
    }
}

impl From<&BuildConfig> for PaperConfig {
    fn from(config: &BuildConfig) -> Self {
        Self {
            source_root: config.paper_source_root.clone(),
            output_root: config.paper_output_root.clone(),
            converter: config.papers.converter.clone(),
            extension: config.papers.extension.clone(),
        }
    }
}

impl From<&BuildConfig> for ApiPublishConfig {
    fn from(config: &BuildConfig) -> Self {
        Self {
            source_root: config.api_source_root.clone(),
            output_root: config.api_output_root.clone(),
            build_tool: config.api.build_tool.clone(),
            tasks: config.api.tasks.clone(),
            modules: config.api.modules.clone(),
            outputs: config.api.outputs.clone(),
        }
    }
}

/// Result of the `samples` command.
#[derive(Debug)]
pub struct SamplesReport {
    /// Number of samples extracted.
    pub sample_count: usize,
    /// What the assembler wrote.
    pub assembly: AssembleResult,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each docs file is written.
    fn file_written(&self, path: &Path);
    /// Called when the pipeline completes.
    fn done(&self, report: &SamplesReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn file_written(&self, _path: &Path) {}
    fn done(&self, _report: &SamplesReport) {}
}

/// Run the `samples` command.
///
/// 1. Extract samples from the sample source tree
/// 2. Clear the docs output tree and rebuild it from the raw docs
///
/// Extraction completes before the output tree is touched, so a duplicate
/// sample name leaves the previous output in place.
#[instrument(skip_all, fields(src = %config.sample_source_root.display()))]
pub fn build_samples(
    config: &BuildConfig,
    progress: &dyn ProgressReporter,
) -> Result<SamplesReport> {
    let start = Instant::now();

    progress.phase("Extracting samples");
    let samples =
        docsplice_extractor::extract_samples(&config.sample_source_root, &config.samples.languages)?;

    progress.phase("Assembling docs");
    let assembly = assemble_docs(&AssembleConfig::from(config), &samples, &|path: &Path| {
        progress.file_written(path)
    })?;

    let report = SamplesReport {
        sample_count: samples.len(),
        assembly,
        elapsed: start.elapsed(),
    };

    info!(
        samples = report.sample_count,
        documents = report.assembly.documents,
        elapsed = ?report.elapsed,
        "samples pipeline complete"
    );
    progress.done(&report);

    Ok(report)
}

/// Run the `papers` command.
pub fn build_papers(config: &BuildConfig, runner: &dyn ToolRunner) -> Result<Vec<PathBuf>> {
    convert_papers(&PaperConfig::from(config), runner)
}

/// Run the `api` command. The config must carry a version.
pub fn build_api(config: &BuildConfig, runner: &dyn ToolRunner) -> Result<Vec<PathBuf>> {
    let version = config.require_version()?;
    publish_api(&ApiPublishConfig::from(config), version, runner)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use docsplice_shared::{AppConfig, ApiVersion, DocspliceError};

    use super::*;
    use crate::process::testing::RecordingRunner;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "docsplice-pipeline-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn populate(root: &Path) {
        write(
            root,
            "app/TeamCode/src/main/java/MoveSamples.java",
            "public class MoveSamples {\n    void run() {\n        // sample: move\n        doMove();\n        // end sample\n    }\n}\n",
        );
        write(
            root,
            "site/content/raw-docs/guides/moving.md",
            "# Moving\n\n<!-- sample: move -->\n\nDone.\n",
        );
    }

    #[derive(Default)]
    struct RecordingProgress {
        phases: RefCell<Vec<String>>,
        files: RefCell<usize>,
        finished: RefCell<bool>,
    }

    impl ProgressReporter for RecordingProgress {
        fn phase(&self, name: &str) {
            self.phases.borrow_mut().push(name.to_string());
        }
        fn file_written(&self, _path: &Path) {
            *self.files.borrow_mut() += 1;
        }
        fn done(&self, _report: &SamplesReport) {
            *self.finished.borrow_mut() = true;
        }
    }

    #[test]
    fn samples_pipeline_end_to_end() {
        let tmp = temp_dir();
        populate(&tmp);
        let config = BuildConfig::resolve(&AppConfig::default(), &tmp, None);
        let progress = RecordingProgress::default();

        let report = build_samples(&config, &progress).unwrap();

        assert_eq!(report.sample_count, 1);
        assert_eq!(report.assembly.documents, 1);
        assert_eq!(
            std::fs::read_to_string(tmp.join("site/content/docs/guides/moving.md")).unwrap(),
            "# Moving\n\n```java\ndoMove();\n\n```\n\nDone.\n"
        );
        assert_eq!(*progress.phases.borrow(), ["Extracting samples", "Assembling docs"]);
        assert_eq!(*progress.files.borrow(), 1);
        assert!(*progress.finished.borrow());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn duplicate_sample_leaves_previous_output() {
        let tmp = temp_dir();
        populate(&tmp);
        let config = BuildConfig::resolve(&AppConfig::default(), &tmp, None);
        build_samples(&config, &SilentProgress).unwrap();

        write(&tmp, "app/Other.kt", "// sample: move\nagain()\n// end sample\n");
        let err = build_samples(&config, &SilentProgress).unwrap_err();

        assert!(matches!(err, DocspliceError::DuplicateSample { .. }));
        assert!(tmp.join("site/content/docs/guides/moving.md").exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn api_requires_version() {
        let tmp = temp_dir();
        let config = BuildConfig::resolve(&AppConfig::default(), &tmp, None);
        let runner = RecordingRunner::default();

        let err = build_api(&config, &runner).unwrap_err();

        assert!(matches!(err, DocspliceError::Config { .. }));
        assert!(runner.calls.borrow().is_empty());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn api_runs_build_tool_in_api_source_root() {
        let tmp = temp_dir();
        let version = ApiVersion::parse("v1.2").unwrap();
        let mut app = AppConfig::default();
        app.paths.api_source = "lib".into();
        let config = BuildConfig::resolve(&app, &tmp, Some(version));
        let runner = RecordingRunner::default();

        // No dokka output is produced by the fake, so the copy step fails.
        let err = build_api(&config, &runner).unwrap_err();

        assert!(matches!(err, DocspliceError::Io { .. }));
        let calls = runner.calls.borrow();
        assert_eq!(calls[0].working_dir.as_deref(), Some(tmp.join("lib").as_path()));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn papers_use_configured_converter() {
        let tmp = temp_dir();
        write(&tmp, "papers/src/ramsete.tex", "\\begin{document}\\end{document}");
        let mut app = AppConfig::default();
        app.paths.paper_source = "papers/src".into();
        app.papers.converter = "/usr/local/bin/pandoc".into();
        let config = BuildConfig::resolve(&app, &tmp, None);
        let runner = RecordingRunner::default();

        let written = build_papers(&config, &runner).unwrap();

        assert_eq!(written, [tmp.join("site/static/papers/ramsete.html")]);
        assert_eq!(runner.calls.borrow()[0].program, "/usr/local/bin/pandoc");

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
