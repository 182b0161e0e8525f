//! Hash-based incremental write-out of rendered files.
//!
//! The materializer keeps a manifest of content hashes next to the output it
//! owns. On each run a file is rewritten only when its hash changed, and
//! files recorded in the manifest but absent from the current output are
//! deleted. Writes go through a temp file in the destination directory and
//! are persisted atomically, so a crashed run never leaves a half-written
//! file behind.

use std::{
    collections::BTreeMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::{
    engine::RenderedOutput,
    error::{Error, Result},
};

/// Manifest file name, relative to the output root.
pub const MANIFEST_FILE: &str = ".tandem-manifest.toml";

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct Manifest {
    /// Relative path -> hex SHA-256 of the file content, sorted by path so
    /// the serialized manifest is byte-stable.
    #[serde(default)]
    files: BTreeMap<String, String>,
}

/// Counts of what one [`Materializer::apply`] call actually did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeStats {
    pub written: usize,
    pub skipped: usize,
    pub deleted: usize,
}

/// Writes rendered output beneath an output root it owns.
pub struct Materializer {
    root: PathBuf,
    force: bool,
}

impl Materializer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            force: false,
        }
    }

    /// Rewrite every file regardless of recorded hashes. Recovers from
    /// out-of-band edits to generated files.
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Bring the output root in sync with `output`.
    pub fn apply(&self, output: &RenderedOutput) -> Result<MaterializeStats> {
        let manifest_path = self.root.join(MANIFEST_FILE);
        let previous = load_manifest(&manifest_path);
        let mut next = Manifest::default();
        let mut stats = MaterializeStats::default();

        for (relative, text) in output.iter() {
            let hash = content_hash(text);
            let path = self.root.join(relative);
            let unchanged =
                !self.force && path.exists() && previous.files.get(relative) == Some(&hash);
            if unchanged {
                stats.skipped += 1;
            } else {
                write_atomic(&path, text)?;
                debug!(path = %path.display(), "wrote generated file");
                stats.written += 1;
            }
            next.files.insert(relative.to_string(), hash);
        }

        // Files we produced in an earlier run but no longer do.
        for relative in previous.files.keys() {
            if next.files.contains_key(relative) {
                continue;
            }
            let path = self.root.join(relative);
            if path.exists() {
                fs::remove_file(&path).map_err(|e| Error::materialization(&path, e))?;
                debug!(path = %path.display(), "deleted orphaned file");
                stats.deleted += 1;
            }
        }

        if next != previous {
            persist_manifest(&manifest_path, &next)?;
        }
        Ok(stats)
    }
}

fn load_manifest(path: &Path) -> Manifest {
    let Ok(text) = fs::read_to_string(path) else {
        return Manifest::default();
    };
    match toml::from_str(&text) {
        Ok(manifest) => manifest,
        Err(error) => {
            // A corrupt manifest just means every file gets rewritten.
            warn!(path = %path.display(), %error, "ignoring unreadable manifest");
            Manifest::default()
        }
    }
}

fn persist_manifest(path: &Path, manifest: &Manifest) -> Result<()> {
    let text = toml::to_string_pretty(manifest).map_err(|e| {
        Box::new(Error::ManifestPersist {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
    })?;
    write_atomic(path, &text)
}

fn content_hash(text: &str) -> String {
    format!("{:x}", Sha256::digest(text.as_bytes()))
}

/// Write through a sibling temp file and persist it over the destination.
fn write_atomic(path: &Path, text: &str) -> Result<()> {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent {
        fs::create_dir_all(parent).map_err(|e| Error::materialization(parent, e))?;
    }
    let dir = parent.unwrap_or_else(|| Path::new("."));
    let mut temp =
        tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::materialization(path, e))?;
    temp.write_all(text.as_bytes())
        .map_err(|e| Error::materialization(path, e))?;
    temp.persist(path)
        .map_err(|e| Error::materialization(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(files: &[(&str, &str)]) -> RenderedOutput {
        files
            .iter()
            .map(|(p, t)| (p.to_string(), t.to_string()))
            .collect()
    }

    #[test]
    fn test_first_run_writes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let materializer = Materializer::new(dir.path());

        let stats = materializer
            .apply(&output(&[
                ("models/order.ts", "export class OrderDto {}\n"),
                ("models/user.ts", "export class UserDto {}\n"),
            ]))
            .unwrap();

        assert_eq!(stats.written, 2);
        assert_eq!(stats.skipped, 0);
        assert_eq!(
            fs::read_to_string(dir.path().join("models/order.ts")).unwrap(),
            "export class OrderDto {}\n"
        );
        assert!(dir.path().join(MANIFEST_FILE).exists());
    }

    #[test]
    fn test_second_run_with_same_output_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let materializer = Materializer::new(dir.path());
        let rendered = output(&[("models/order.ts", "export class OrderDto {}\n")]);

        materializer.apply(&rendered).unwrap();
        let manifest_before = fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap();
        let stats = materializer.apply(&rendered).unwrap();

        assert_eq!(stats.written, 0);
        assert_eq!(stats.skipped, 1);
        let manifest_after = fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap();
        assert_eq!(manifest_before, manifest_after);
    }

    #[test]
    fn test_changed_content_rewrites_only_that_file() {
        let dir = tempfile::tempdir().unwrap();
        let materializer = Materializer::new(dir.path());

        materializer
            .apply(&output(&[("a.ts", "one\n"), ("b.ts", "two\n")]))
            .unwrap();
        let stats = materializer
            .apply(&output(&[("a.ts", "one\n"), ("b.ts", "changed\n")]))
            .unwrap();

        assert_eq!(stats.written, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("b.ts")).unwrap(),
            "changed\n"
        );
    }

    #[test]
    fn test_removed_file_is_deleted() {
        let dir = tempfile::tempdir().unwrap();
        let materializer = Materializer::new(dir.path());

        materializer
            .apply(&output(&[("a.ts", "one\n"), ("b.ts", "two\n")]))
            .unwrap();
        let stats = materializer.apply(&output(&[("a.ts", "one\n")])).unwrap();

        assert_eq!(stats.deleted, 1);
        assert!(!dir.path().join("b.ts").exists());
        assert!(dir.path().join("a.ts").exists());
    }

    #[test]
    fn test_already_absent_orphan_is_not_counted_as_deleted() {
        let dir = tempfile::tempdir().unwrap();
        let materializer = Materializer::new(dir.path());

        materializer
            .apply(&output(&[("a.ts", "one\n"), ("b.ts", "two\n")]))
            .unwrap();
        fs::remove_file(dir.path().join("b.ts")).unwrap();

        let stats = materializer.apply(&output(&[("a.ts", "one\n")])).unwrap();
        assert_eq!(stats.deleted, 0);
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn test_force_rewrites_despite_matching_hash() {
        let dir = tempfile::tempdir().unwrap();
        let rendered = output(&[("a.ts", "one\n")]);

        Materializer::new(dir.path()).apply(&rendered).unwrap();
        // Simulate an out-of-band edit the hash check would not notice
        // if the manifest were trusted blindly.
        fs::write(dir.path().join("a.ts"), "tampered\n").unwrap();

        let lenient = Materializer::new(dir.path()).apply(&rendered).unwrap();
        assert_eq!(lenient.written, 0);

        let forced = Materializer::new(dir.path())
            .force(true)
            .apply(&rendered)
            .unwrap();
        assert_eq!(forced.written, 1);
        assert_eq!(fs::read_to_string(dir.path().join("a.ts")).unwrap(), "one\n");
    }

    #[test]
    fn test_missing_file_is_rewritten_even_with_matching_hash() {
        let dir = tempfile::tempdir().unwrap();
        let rendered = output(&[("a.ts", "one\n")]);

        Materializer::new(dir.path()).apply(&rendered).unwrap();
        fs::remove_file(dir.path().join("a.ts")).unwrap();

        let stats = Materializer::new(dir.path()).apply(&rendered).unwrap();
        assert_eq!(stats.written, 1);
        assert!(dir.path().join("a.ts").exists());
    }

    #[test]
    fn test_corrupt_manifest_falls_back_to_full_write() {
        let dir = tempfile::tempdir().unwrap();
        let rendered = output(&[("a.ts", "one\n")]);

        Materializer::new(dir.path()).apply(&rendered).unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), "not [valid toml").unwrap();

        let stats = Materializer::new(dir.path()).apply(&rendered).unwrap();
        assert_eq!(stats.written, 1);
    }
}
