//! Sample extraction from Java/Kotlin source trees.
//!
//! Walks a source root, scans every file whose extension maps to a
//! configured [`Language`], and collects the annotated regions into a
//! [`SampleSet`]. Sample names are unique across the whole tree.

mod scanner;

use std::path::Path;

use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use docsplice_shared::{DocspliceError, Language, Result, SampleSet};

pub use scanner::scan_source;

/// Collect every sample declared under `root`.
///
/// Files are visited in sorted order, so a duplicate name is always reported
/// against the same pair of files.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn extract_samples(root: &Path, languages: &[Language]) -> Result<SampleSet> {
    let mut samples = SampleSet::new();
    let mut files_scanned = 0usize;

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| DocspliceError::walk(root, e))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Some(language) = languages.iter().find(|l| l.matches(path)) else {
            continue;
        };

        info!(path = %path.display(), "processing source file");
        let text = std::fs::read_to_string(path).map_err(|e| DocspliceError::io(path, e))?;
        files_scanned += 1;

        for sample in scan_source(&text, language, path)? {
            debug!(name = %sample.name, path = %path.display(), "found sample");
            samples.insert(sample)?;
        }
    }

    info!(files_scanned, samples = samples.len(), "sample extraction complete");

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "docsplice-extractor-test-{}",
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

    fn languages() -> Vec<Language> {
        vec![Language::new("java", "java"), Language::new("kt", "kotlin")]
    }

    #[test]
    fn collects_samples_across_files() {
        let tmp = temp_dir();
        write(
            &tmp,
            "src/main/java/ActionsSamples.java",
            "class A {\n    // sample: actionsDecl\n    class Drive {}\n    // end sample\n\n    // sample: actionsRun\n    run();\n    // end sample\n}\n",
        );
        write(
            &tmp,
            "src/main/kotlin/Turns.kt",
            "fun f() {\n    // sample: turn\n    drive.turn(90.0)\n    // end sample\n}\n",
        );

        let samples = extract_samples(&tmp, &languages()).unwrap();

        assert_eq!(samples.len(), 3);
        assert_eq!(samples.get("actionsDecl").unwrap().body, "class Drive {}\n");
        assert_eq!(samples.get("actionsRun").unwrap().language, "java");
        let turn = samples.get("turn").unwrap();
        assert_eq!(turn.language, "kotlin");
        assert_eq!(turn.rendered(), "```kotlin\ndrive.turn(90.0)\n\n```\n");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ignores_unconfigured_extensions() {
        let tmp = temp_dir();
        write(&tmp, "notes.txt", "// sample: stray\nx\n// end sample\n");
        write(&tmp, "build.gradle", "// sample: gradle\nx\n// end sample\n");

        let samples = extract_samples(&tmp, &languages()).unwrap();
        assert!(samples.is_empty());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn duplicate_across_files_fails() {
        let tmp = temp_dir();
        write(&tmp, "a/One.java", "// sample: move\none();\n// end sample\n");
        write(&tmp, "b/Two.kt", "// sample: move\ntwo()\n// end sample\n");

        let err = extract_samples(&tmp, &languages()).unwrap_err();
        match err {
            DocspliceError::DuplicateSample { name, first, second } => {
                assert_eq!(name, "move");
                assert!(first.ends_with("a/One.java"));
                assert!(second.ends_with("b/Two.kt"));
            }
            other => panic!("unexpected error: {other}"),
        }

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn duplicate_within_one_file_fails() {
        let tmp = temp_dir();
        write(
            &tmp,
            "Same.java",
            "// sample: twice\na();\n// end sample\n// sample: twice\nb();\n// end sample\n",
        );

        let err = extract_samples(&tmp, &languages()).unwrap_err();
        assert!(matches!(err, DocspliceError::DuplicateSample { .. }));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_root_is_io_error() {
        let tmp = temp_dir();
        let err = extract_samples(&tmp.join("absent"), &languages()).unwrap_err();
        assert!(matches!(err, DocspliceError::Io { .. }));

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
