//! Build configuration for docsplice.
//!
//! Project config lives at `<root>/docsplice.toml`. Every field has a
//! default, so a missing file yields the standard site layout.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocspliceError, Result};
use crate::types::{ApiVersion, Language};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "docsplice.toml";

// ---------------------------------------------------------------------------
// Config structs (matching docsplice.toml schema)
// ---------------------------------------------------------------------------

/// Top-level project config, deserialized from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Input and output locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Sample extraction and doc assembly.
    #[serde(default)]
    pub samples: SamplesConfig,

    /// LaTeX paper conversion.
    #[serde(default)]
    pub papers: PapersConfig,

    /// API reference publishing.
    #[serde(default)]
    pub api: ApiConfig,
}

/// `[paths]` section. Relative paths are resolved against the project root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_sample_source")]
    pub sample_source: PathBuf,

    #[serde(default = "default_doc_source")]
    pub doc_source: PathBuf,

    /// Removed and recreated on every `samples` run.
    #[serde(default = "default_doc_output")]
    pub doc_output: PathBuf,

    #[serde(default = "default_paper_source")]
    pub paper_source: PathBuf,

    #[serde(default = "default_paper_output")]
    pub paper_output: PathBuf,

    /// Checkout of the library whose API docs get published.
    #[serde(default = "default_api_source")]
    pub api_source: PathBuf,

    #[serde(default = "default_api_output")]
    pub api_output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            sample_source: default_sample_source(),
            doc_source: default_doc_source(),
            doc_output: default_doc_output(),
            paper_source: default_paper_source(),
            paper_output: default_paper_output(),
            api_source: default_api_source(),
            api_output: default_api_output(),
        }
    }
}

fn default_sample_source() -> PathBuf {
    "app".into()
}
fn default_doc_source() -> PathBuf {
    "site/content/raw-docs".into()
}
fn default_doc_output() -> PathBuf {
    "site/content/docs".into()
}
fn default_paper_source() -> PathBuf {
    "../doc/pdf".into()
}
fn default_paper_output() -> PathBuf {
    "site/static/papers".into()
}
fn default_api_source() -> PathBuf {
    "../road-runner".into()
}
fn default_api_output() -> PathBuf {
    "site/public/docs".into()
}

/// `[samples]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplesConfig {
    /// Source extensions scanned for samples, with their fence tags.
    #[serde(default = "default_languages")]
    pub languages: Vec<Language>,

    /// Extension of documentation files that may contain directives.
    #[serde(default = "default_document_extension")]
    pub document_extension: String,

    /// Binary files copied through unchanged.
    #[serde(default = "default_asset_extensions")]
    pub asset_extensions: Vec<String>,
}

impl Default for SamplesConfig {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            document_extension: default_document_extension(),
            asset_extensions: default_asset_extensions(),
        }
    }
}

fn default_languages() -> Vec<Language> {
    vec![Language::new("java", "java"), Language::new("kt", "kotlin")]
}
fn default_document_extension() -> String {
    "md".into()
}
fn default_asset_extensions() -> Vec<String> {
    vec!["mp4".into(), "png".into(), "jpg".into()]
}

/// `[papers]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PapersConfig {
    /// LaTeX to HTML converter executable.
    #[serde(default = "default_converter")]
    pub converter: String,

    /// Extension of paper sources.
    #[serde(default = "default_paper_extension")]
    pub extension: String,
}

impl Default for PapersConfig {
    fn default() -> Self {
        Self {
            converter: default_converter(),
            extension: default_paper_extension(),
        }
    }
}

fn default_converter() -> String {
    "pandoc".into()
}
fn default_paper_extension() -> String {
    "tex".into()
}

/// `[api]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Build tool, run from the API source root.
    #[serde(default = "default_build_tool")]
    pub build_tool: String,

    /// Tasks passed to the build tool.
    #[serde(default = "default_tasks")]
    pub tasks: Vec<String>,

    /// Modules whose generated docs are published.
    #[serde(default = "default_modules")]
    pub modules: Vec<String>,

    /// Generated trees copied per module.
    #[serde(default = "default_outputs")]
    pub outputs: Vec<ApiOutput>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            build_tool: default_build_tool(),
            tasks: default_tasks(),
            modules: default_modules(),
            outputs: default_outputs(),
        }
    }
}

/// One generated tree: `<module>/<from>` is copied to `<version>/<module>/<to>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiOutput {
    pub from: PathBuf,
    pub to: PathBuf,
}

fn default_build_tool() -> String {
    "./gradlew".into()
}
fn default_tasks() -> Vec<String> {
    vec!["dokkaHtml".into(), "dokkaJavadoc".into()]
}
fn default_modules() -> Vec<String> {
    vec!["core".into(), "actions".into()]
}
fn default_outputs() -> Vec<ApiOutput> {
    vec![
        ApiOutput {
            from: "build/dokka/html".into(),
            to: "kdoc".into(),
        },
        ApiOutput {
            from: "build/dokka/javadoc".into(),
            to: "javadoc".into(),
        },
    ]
}

// ---------------------------------------------------------------------------
// Build config (runtime, resolved against the project root)
// ---------------------------------------------------------------------------

/// Runtime build configuration — config file merged with CLI flags, paths
/// made absolute against the project root.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub sample_source_root: PathBuf,
    pub doc_source_root: PathBuf,
    pub doc_output_root: PathBuf,
    pub paper_source_root: PathBuf,
    pub paper_output_root: PathBuf,
    pub api_source_root: PathBuf,
    pub api_output_root: PathBuf,
    /// Only present for the `api` command.
    pub version: Option<ApiVersion>,
    pub samples: SamplesConfig,
    pub papers: PapersConfig,
    pub api: ApiConfig,
}

impl BuildConfig {
    /// Resolve `config` against `root`.
    pub fn resolve(config: &AppConfig, root: &Path, version: Option<ApiVersion>) -> Self {
        let paths = &config.paths;
        Self {
            sample_source_root: root.join(&paths.sample_source),
            doc_source_root: root.join(&paths.doc_source),
            doc_output_root: root.join(&paths.doc_output),
            paper_source_root: root.join(&paths.paper_source),
            paper_output_root: root.join(&paths.paper_output),
            api_source_root: root.join(&paths.api_source),
            api_output_root: root.join(&paths.api_output),
            version,
            samples: config.samples.clone(),
            papers: config.papers.clone(),
            api: config.api.clone(),
        }
    }

    /// The version, or a config error naming the flag that supplies it.
    pub fn require_version(&self) -> Result<&ApiVersion> {
        self.version
            .as_ref()
            .ok_or_else(|| DocspliceError::config("an API version is required (--version)"))
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Path of the config file inside a project root.
pub fn config_file_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Load the project config. Returns defaults if the file does not exist.
pub fn load_config(root: &Path) -> Result<AppConfig> {
    let path = config_file_path(root);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the project config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DocspliceError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        DocspliceError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Write a default config file into `root`. Refuses to overwrite.
/// Returns the path to the created file.
pub fn init_config(root: &Path) -> Result<PathBuf> {
    let path = config_file_path(root);
    if path.exists() {
        return Err(DocspliceError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    std::fs::create_dir_all(root).map_err(|e| DocspliceError::io(root, e))?;

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| DocspliceError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DocspliceError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
