use std::fs::{OpenOptions, create_dir_all};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::errors::GenerationError;
use crate::model::GeneratedFile;

/// Writes generated files below a root directory and records what was
/// written.
#[derive(Debug)]
pub struct OutputWriter {
    root: PathBuf,
    written: Vec<GeneratedFile>,
}

impl OutputWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: Vec::new(),
        }
    }

    /// Write `contents` to `relative` (a `/`-separated path below the root).
    pub fn write(&mut self, relative: &str, contents: &[u8]) -> Result<(), GenerationError> {
        let path = self.resolve(relative)?;
        write_bytes_atomic(&path, contents).map_err(|source| GenerationError::Write {
            path: path.clone(),
            source,
        })?;

        let sha256 = hex::encode(Sha256::digest(contents));
        debug!(path = %path.display(), bytes = contents.len(), "file written");
        self.written.push(GeneratedFile {
            path: relative.to_string(),
            sha256,
            bytes: contents.len() as u64,
        });
        Ok(())
    }

    pub fn written(&self) -> &[GeneratedFile] {
        &self.written
    }

    pub fn into_written(self) -> Vec<GeneratedFile> {
        self.written
    }

    fn resolve(&self, relative: &str) -> Result<PathBuf, GenerationError> {
        let relative_path = Path::new(relative);
        let escapes = relative_path.components().any(|component| {
            !matches!(component, Component::Normal(_) | Component::CurDir)
        });
        if relative.is_empty() || escapes {
            return Err(GenerationError::InvalidPath(relative.to_string()));
        }
        Ok(self.root.join(relative_path))
    }
}

/// Write through a sibling temp file and rename it into place.
pub fn write_bytes_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path(path)?;
    let result = write_and_rename(&tmp_path, path, data);
    if result.is_err() {
        let _ = std::fs::remove_file(&tmp_path);
    }
    result
}

fn write_and_rename(tmp_path: &Path, path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);

    std::fs::rename(tmp_path, path)
}

fn temp_path(path: &Path) -> io::Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "invalid path for atomic write")
    })?;
    let tmp_name = format!("{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_paths_outside_the_root() {
        let writer = OutputWriter::new("/tmp/out");
        assert!(writer.resolve("../escape.rs").is_err());
        assert!(writer.resolve("/etc/passwd").is_err());
        assert!(writer.resolve("").is_err());
        assert_eq!(
            writer.resolve("model/user.rs").expect("valid"),
            PathBuf::from("/tmp/out/model/user.rs")
        );
    }

    #[test]
    fn records_hashes_of_written_files() {
        let root = std::env::temp_dir().join(format!("dbmlgen_writer_{}", uuid::Uuid::new_v4()));
        let mut writer = OutputWriter::new(&root);
        writer.write("a/b.rs", b"abc").expect("write");

        let written = writer.written();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].path, "a/b.rs");
        assert_eq!(
            written[0].sha256,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        let stored = std::fs::read(root.join("a/b.rs")).expect("read back");
        assert_eq!(stored, b"abc");
        assert!(!root.join("a/b.rs.tmp").exists());

        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn failed_write_leaves_no_temp_file() {
        let root = std::env::temp_dir().join(format!("dbmlgen_writer_{}", uuid::Uuid::new_v4()));
        // A non-empty directory in the way makes the final rename fail.
        let target = root.join("taken.rs");
        create_dir_all(&target).expect("create blocking dir");
        std::fs::write(target.join("keep"), b"x").expect("fill blocking dir");

        assert!(write_bytes_atomic(&target, b"abc").is_err());
        assert!(!root.join("taken.rs.tmp").exists());
        assert!(target.join("keep").exists());

        std::fs::remove_dir_all(&root).ok();
    }
}
