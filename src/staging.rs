//! Staging of analysis inputs as temporary `.java` files
//!
//! The engine only reads files, so file, class and method inputs are written
//! to the configured temp directory first. The staged file is removed when
//! the [`StagedSource`] is dropped.

use crate::error::ReadabilityResult;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

const TAB_REPLACEMENT: &str = "    ";
const METHOD_WRAPPER_OPEN: &str = "class MyClass{\n\n";
const METHOD_WRAPPER_CLOSE: &str = "}\n";

/// A Java source written to a temporary file
#[derive(Debug)]
pub struct StagedSource {
    file: NamedTempFile,
}

impl StagedSource {
    /// Stage the contents of an existing Java file
    pub fn file(input: &Path, temp_dir: &Path) -> ReadabilityResult<Self> {
        let source = std::fs::read_to_string(input)?;
        Self::class(&source, temp_dir)
    }

    /// Stage a class (or any complete compilation unit) given as text
    pub fn class(source: &str, temp_dir: &Path) -> ReadabilityResult<Self> {
        Self::write(&format!("{}\n", expand_tabs(source)), temp_dir)
    }

    /// Stage a single method, wrapped in a class so the engine can parse it
    pub fn method(source: &str, temp_dir: &Path) -> ReadabilityResult<Self> {
        Self::write(&wrap_method(source), temp_dir)
    }

    fn write(contents: &str, temp_dir: &Path) -> ReadabilityResult<Self> {
        std::fs::create_dir_all(temp_dir)?;
        let mut file = tempfile::Builder::new()
            .prefix("rsm-")
            .suffix(".java")
            .tempfile_in(temp_dir)?;
        file.write_all(contents.as_bytes())?;
        file.flush()?;
        debug!("Staged {} bytes at {}", contents.len(), file.path().display());
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

fn expand_tabs(source: &str) -> String {
    source.replace('\t', TAB_REPLACEMENT)
}

fn wrap_method(source: &str) -> String {
    format!(
        "{}{}\n{}",
        METHOD_WRAPPER_OPEN,
        expand_tabs(source),
        METHOD_WRAPPER_CLOSE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_expands_tabs_and_appends_newline() {
        let dir = tempfile::tempdir().unwrap();
        let staged = StagedSource::class("class A {\n\tint x;\n}", dir.path()).unwrap();
        let written = std::fs::read_to_string(staged.path()).unwrap();
        assert_eq!(written, "class A {\n    int x;\n}\n");
        assert_eq!(staged.path().extension().and_then(|e| e.to_str()), Some("java"));
    }

    #[test]
    fn test_method_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let staged = StagedSource::method("void f() {\n\treturn;\n}", dir.path()).unwrap();
        let written = std::fs::read_to_string(staged.path()).unwrap();
        assert_eq!(written, "class MyClass{\n\nvoid f() {\n    return;\n}\n}\n");
    }

    #[test]
    fn test_file_is_staged_and_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Lamp.java");
        std::fs::write(&input, "class Lamp {}").unwrap();

        let staging_dir = dir.path().join("staging");
        let staged = StagedSource::file(&input, &staging_dir).unwrap();
        let path = staged.path().to_path_buf();
        assert!(path.starts_with(&staging_dir));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "class Lamp {}\n");

        drop(staged);
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_input_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StagedSource::file(&dir.path().join("Nope.java"), dir.path()).unwrap_err();
        assert!(matches!(err, crate::error::ReadabilityError::Io(_)));
    }
}
