//! Single-file sample scanning.
//!
//! A sample starts at a line containing `// sample: <name>` and runs up to
//! the next `// end sample`. Whatever precedes the comment token on the start
//! line sets how much indentation is removed from the body.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use docsplice_shared::{DocspliceError, Language, Result, Sample};

static START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([^\n]*)// sample: (.+)\n").expect("valid regex")
});

static END_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"// end sample\r?(?:\n|\z)").expect("valid regex")
});

/// Extract every sample declared in `text`, in order of appearance.
///
/// `path` is only recorded on the samples and in errors.
pub fn scan_source(text: &str, language: &Language, path: &Path) -> Result<Vec<Sample>> {
    let mut samples = Vec::new();
    let mut pos = 0;

    while let Some(caps) = START_RE.captures_at(text, pos) {
        let Some(marker) = caps.get(0) else { break };
        let prefix_len = caps[1].chars().count();
        let name = caps[2].trim_end().to_string();

        let body_start = marker.end();
        let Some(end) = END_RE.find_at(text, body_start) else {
            return Err(DocspliceError::UnterminatedSample {
                name,
                path: path.to_path_buf(),
            });
        };

        samples.push(Sample {
            name,
            language: language.tag.clone(),
            body: unindent(&text[body_start..end.start()], prefix_len),
            source: path.to_path_buf(),
        });

        pos = end.end();
    }

    Ok(samples)
}

/// Remove up to `width` leading whitespace characters from every line.
/// CRLF line endings come out as plain `\n`.
fn unindent(body: &str, width: usize) -> String {
    body.split('\n')
        .map(|line| strip_indent(line.strip_suffix('\r').unwrap_or(line), width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_indent(line: &str, width: usize) -> &str {
    let cut = line
        .char_indices()
        .take(width)
        .take_while(|(_, c)| c.is_whitespace())
        .last()
        .map_or(0, |(i, c)| i + c.len_utf8());
    &line[cut..]
}
