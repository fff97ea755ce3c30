//! Sample directive substitution for Markdown documents.
//!
//! A directive is a line of the form `<!-- sample: <name> -->`. Rendering a
//! [`Document`] replaces each directive line with the named sample's fenced
//! code block and leaves every other byte untouched.

use std::ops::Range;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use docsplice_shared::{Result, SampleSet};

static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^<!-- sample: (.+) -->(?:\r?\n|\z)").expect("valid regex")
});

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One directive occurrence inside a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Byte range of the whole directive line, including its newline.
    pub range: Range<usize>,
    /// Referenced sample name.
    pub name: String,
}

/// A documentation source file and the directives found in it.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub text: String,
    pub directives: Vec<Directive>,
}

impl Document {
    /// Scan `text` for directives.
    pub fn parse(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let text = text.into();
        let directives = DIRECTIVE_RE
            .captures_iter(&text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                Some(Directive {
                    range: whole.range(),
                    name: caps[1].trim().to_string(),
                })
            })
            .collect();

        Self {
            path: path.into(),
            text,
            directives,
        }
    }

    /// Substitute every directive with its rendered sample.
    ///
    /// Fails on the first unknown sample name; nothing is returned for a
    /// document that cannot be fully resolved.
    #[instrument(skip_all, fields(path = %self.path.display(), directives = self.directives.len()))]
    pub fn render(&self, samples: &SampleSet) -> Result<String> {
        let mut out = String::with_capacity(self.text.len());
        let mut last_end = 0;

        for directive in &self.directives {
            let sample = samples.require(&directive.name, &self.path)?;
            out.push_str(&self.text[last_end..directive.range.start]);
            out.push_str(&sample.rendered());
            last_end = directive.range.end;
        }
        out.push_str(&self.text[last_end..]);

        debug!(in_len = self.text.len(), out_len = out.len(), "document rendered");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use docsplice_shared::{DocspliceError, Sample};

    use super::*;

    fn splice(path: &Path, text: &str, samples: &SampleSet) -> Result<String> {
        Document::parse(path, text).render(samples)
    }

    fn samples() -> SampleSet {
        let mut set = SampleSet::new();
        for (name, body) in [("A", "alpha();\n"), ("B", "beta();\n")] {
            set.insert(Sample {
                name: name.into(),
                language: "java".into(),
                body: body.into(),
                source: "Samples.java".into(),
            })
            .unwrap();
        }
        set
    }

    #[test]
    fn no_directives_is_identity() {
        let text = "# Title\n\nSome `code` and <!-- a comment -->\n";
        let out = splice(Path::new("intro.md"), text, &samples()).unwrap();
        assert_eq!(out, text);
    }

    #[test]
    fn directives_replaced_in_order() {
        let text = "before\n<!-- sample: A -->\nbetween\n<!-- sample: B -->\nafter\n";
        let s = samples();
        let out = splice(Path::new("guide.md"), text, &s).unwrap();

        let expected = format!(
            "before\n{}between\n{}after\n",
            s.get("A").unwrap().rendered(),
            s.get("B").unwrap().rendered()
        );
        assert_eq!(out, expected);
        assert!(!out.contains("<!-- sample:"));
    }

    #[test]
    fn parse_records_ranges_and_names() {
        let text = "x\n<!-- sample: A -->\n<!-- sample: B -->";
        let doc = Document::parse("d.md", text);
        assert_eq!(doc.directives.len(), 2);
        assert_eq!(doc.directives[0].name, "A");
        assert_eq!(&text[doc.directives[0].range.clone()], "<!-- sample: A -->\n");
        assert_eq!(&text[doc.directives[1].range.clone()], "<!-- sample: B -->");
    }

    #[test]
    fn same_sample_may_be_used_twice() {
        let text = "<!-- sample: A -->\n<!-- sample: A -->\n";
        let s = samples();
        let out = splice(Path::new("twice.md"), text, &s).unwrap();
        let rendered = s.get("A").unwrap().rendered();
        assert_eq!(out, format!("{rendered}{rendered}"));
    }

    #[test]
    fn indented_directive_is_left_alone() {
        let text = "  <!-- sample: A -->\n";
        let out = splice(Path::new("code.md"), text, &samples()).unwrap();
        assert_eq!(out, text);
    }

    #[test]
    fn unknown_sample_fails() {
        let text = "<!-- sample: A -->\n<!-- sample: ghost -->\n";
        let err = splice(Path::new("docs/bad.md"), text, &samples()).unwrap_err();
        match err {
            DocspliceError::MissingSample { name, document } => {
                assert_eq!(name, "ghost");
                assert_eq!(document, PathBuf::from("docs/bad.md"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn crlf_directives_are_replaced() {
        let text = "Intro\r\n<!-- sample: A -->\r\nOutro\r\n";
        let s = samples();
        let out = splice(Path::new("windows.md"), text, &s).unwrap();
        assert_eq!(
            out,
            format!("Intro\r\n{}Outro\r\n", s.get("A").unwrap().rendered())
        );
    }

    #[test]
    fn crlf_unknown_sample_fails() {
        let text = "Intro\r\n<!-- sample: ghost -->\r\nOutro\r\n";
        let err = splice(Path::new("windows.md"), text, &samples()).unwrap_err();
        assert!(matches!(err, DocspliceError::MissingSample { ref name, .. } if name == "ghost"));
    }
}
