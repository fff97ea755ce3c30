//! Core domain types for docsplice builds.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocspliceError, Result};

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// A source-file extension and the code-fence tag its samples render with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// File extension without the dot (e.g. `kt`).
    pub extension: String,
    /// Fence info string (e.g. `kotlin`).
    pub tag: String,
}

impl Language {
    pub fn new(extension: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            tag: tag.into(),
        }
    }

    /// Whether `path` carries this language's extension.
    pub fn matches(&self, path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()) == Some(self.extension.as_str())
    }
}

// ---------------------------------------------------------------------------
// Sample
// ---------------------------------------------------------------------------

/// A named code excerpt extracted from a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// Unique sample name.
    pub name: String,
    /// Fence tag of the language the sample was written in.
    pub language: String,
    /// De-indented body text.
    pub body: String,
    /// File the sample was declared in.
    pub source: PathBuf,
}

impl Sample {
    /// The sample wrapped in a language-tagged code fence.
    pub fn rendered(&self) -> String {
        format!("```{}\n{}\n```\n", self.language, self.body)
    }
}

// ---------------------------------------------------------------------------
// SampleSet
// ---------------------------------------------------------------------------

/// All samples collected during one build, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct SampleSet {
    samples: BTreeMap<String, Sample>,
}

impl SampleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sample. Names are unique across the whole set.
    pub fn insert(&mut self, sample: Sample) -> Result<()> {
        if let Some(existing) = self.samples.get(&sample.name) {
            return Err(DocspliceError::DuplicateSample {
                name: sample.name,
                first: existing.source.clone(),
                second: sample.source,
            });
        }
        self.samples.insert(sample.name.clone(), sample);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Sample> {
        self.samples.get(name)
    }

    /// Look up a sample referenced from `document`, failing if it is unknown.
    pub fn require(&self, name: &str, document: &Path) -> Result<&Sample> {
        self.get(name).ok_or_else(|| DocspliceError::MissingSample {
            name: name.to_string(),
            document: document.to_path_buf(),
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ApiVersion
// ---------------------------------------------------------------------------

/// A release version for published API docs, e.g. `v1.0.0-beta2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiVersion(String);

impl ApiVersion {
    /// Validate a user-supplied version. It must start with `v`.
    pub fn parse(raw: &str) -> Result<Self> {
        if !raw.starts_with('v') {
            return Err(DocspliceError::InvalidVersion {
                version: raw.to_string(),
            });
        }
        Ok(Self(raw.to_string()))
    }

    /// Directory name used on the site: dots become dashes.
    pub fn url_segment(&self) -> String {
        self.0.replace('.', "-")
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ApiVersion {
    type Err = DocspliceError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}
