// imgpress/src/processors/staging.rs
use crate::core::{ImageKind, ManifestEntry, Result};
use crate::utils::is_supported_format;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGES_SUBDIR: &str = "images";

/// Working copy of the target's images. Removed on drop when `cleanup` is set.
#[derive(Debug)]
pub struct StagingDir {
    root: PathBuf,
    cleanup: bool,
}

impl StagingDir {
    pub fn acquire(requested: Option<&Path>, cleanup: bool) -> Result<Self> {
        let staging = match requested {
            Some(dir) => Self::claim(dir, cleanup),
            None => Self {
                root: tempfile::Builder::new()
                    .prefix("imgpress-")
                    .tempdir()?
                    .keep(),
                cleanup,
            },
        };

        staging.ensure()?;
        Ok(staging)
    }

    /// Takes ownership of `dir` without touching the filesystem.
    ///
    /// Dropping the result still honors `cleanup`, so a caller-supplied
    /// directory is released even when the run fails before staging starts.
    pub fn claim(dir: &Path, cleanup: bool) -> Self {
        Self {
            root: dir.to_path_buf(),
            cleanup,
        }
    }

    pub fn ensure(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        log::debug!("Staging directory: {}", self.root.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join(IMAGES_SUBDIR)
    }

    pub fn cleanup_requested(&self) -> bool {
        self.cleanup
    }

    pub fn staged_path(&self, entry: &ManifestEntry) -> PathBuf {
        self.images_dir().join(&entry.relative)
    }

    /// True when a prior run already left optimized images here.
    pub fn has_reusable_output(&self) -> bool {
        let images = self.images_dir();
        if !images.is_dir() {
            return false;
        }

        WalkDir::new(&images)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .any(|entry| entry.file_type().is_file() && is_supported_format(entry.path()))
    }

    /// Copies every entry into `images/`, preserving relative layout.
    pub fn mirror(&self, manifest: &[ManifestEntry]) -> Result<usize> {
        let copied = self.copy_entries(manifest.iter())?;
        log::info!("Copied {} file(s) to {}", copied, self.images_dir().display());
        Ok(copied)
    }

    /// Puts the originals of `kind` back, discarding whatever a tool left behind.
    pub fn restore(&self, manifest: &[ManifestEntry], kind: ImageKind) -> Result<usize> {
        self.copy_entries(manifest.iter().filter(|entry| entry.kind == kind))
    }

    fn copy_entries<'m>(&self, entries: impl Iterator<Item = &'m ManifestEntry>) -> Result<usize> {
        let mut copied = 0;
        for entry in entries {
            let staged = self.staged_path(entry);
            if let Some(parent) = staged.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(&entry.source, &staged)?;
            copied += 1;
        }
        Ok(copied)
    }

    /// Whether any staged file of `kind` is present.
    pub fn contains_kind(&self, kind: ImageKind) -> bool {
        WalkDir::new(self.images_dir())
            .into_iter()
            .filter_map(|entry| entry.ok())
            .any(|entry| {
                entry.file_type().is_file() && ImageKind::from_path(entry.path()) == Some(kind)
            })
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        if !self.cleanup {
            return;
        }

        match std::fs::remove_dir_all(&self.root) {
            Ok(()) => log::debug!("Removed staging directory {}", self.root.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!(
                "Failed to remove staging directory {}: {}",
                self.root.display(),
                e
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use assert_fs::TempDir;

    fn entry(root: &Path, relative: &str) -> ManifestEntry {
        let relative = PathBuf::from(relative);
        ManifestEntry {
            source: root.join(&relative),
            kind: ImageKind::from_path(&relative).unwrap(),
            relative,
        }
    }

    #[test]
    fn mirror_preserves_layout() {
        let source = TempDir::new().unwrap();
        source.child("a.png").write_binary(b"aaaa").unwrap();
        source.child("deep/er/b.svg").write_str("<svg/>").unwrap();
        let manifest = vec![
            entry(source.path(), "a.png"),
            entry(source.path(), "deep/er/b.svg"),
        ];

        let scratch = TempDir::new().unwrap();
        let staging = StagingDir::acquire(Some(scratch.path()), false).unwrap();
        assert!(!staging.has_reusable_output());

        assert_eq!(staging.mirror(&manifest).unwrap(), 2);
        assert_eq!(std::fs::read(scratch.path().join("images/a.png")).unwrap(), b"aaaa");
        scratch.child("images/deep/er/b.svg").assert("<svg/>");
        assert!(staging.has_reusable_output());
        assert!(staging.contains_kind(ImageKind::Raster));
        assert!(staging.contains_kind(ImageKind::Vector));
    }

    #[test]
    fn reuse_ignores_non_images() {
        let scratch = TempDir::new().unwrap();
        scratch.child("images/notes.txt").write_str("x").unwrap();
        let staging = StagingDir::acquire(Some(scratch.path()), false).unwrap();
        assert!(!staging.has_reusable_output());
    }

    #[test]
    fn cleanup_on_drop_only_when_requested() {
        let kept = TempDir::new().unwrap();
        let kept_dir = kept.path().join("stage");
        drop(StagingDir::acquire(Some(&kept_dir), false).unwrap());
        assert!(kept_dir.is_dir());

        let removed_dir = kept.path().join("gone");
        drop(StagingDir::acquire(Some(&removed_dir), true).unwrap());
        assert!(!removed_dir.exists());
    }

    #[test]
    fn claim_does_not_create_but_still_cleans_up() {
        let scratch = TempDir::new().unwrap();
        let fresh = scratch.path().join("fresh");
        let claimed = StagingDir::claim(&fresh, false);
        assert!(!fresh.exists());
        claimed.ensure().unwrap();
        assert!(fresh.is_dir());

        let previous = scratch.child("previous");
        previous.child("images/a.png").write_binary(b"old").unwrap();
        drop(StagingDir::claim(previous.path(), true));
        assert!(!previous.path().exists());
    }

    #[test]
    fn restore_resets_only_one_kind() {
        let source = TempDir::new().unwrap();
        source.child("a.png").write_binary(b"original png").unwrap();
        source.child("b.svg").write_str("<svg>original</svg>").unwrap();
        let manifest = vec![entry(source.path(), "a.png"), entry(source.path(), "b.svg")];

        let scratch = TempDir::new().unwrap();
        let staging = StagingDir::acquire(Some(scratch.path()), false).unwrap();
        staging.mirror(&manifest).unwrap();
        std::fs::write(scratch.path().join("images/a.png"), b"").unwrap();
        std::fs::write(scratch.path().join("images/b.svg"), b"<svg/>").unwrap();

        assert_eq!(staging.restore(&manifest, ImageKind::Raster).unwrap(), 1);
        assert_eq!(
            std::fs::read(scratch.path().join("images/a.png")).unwrap(),
            b"original png"
        );
        scratch.child("images/b.svg").assert("<svg/>");
    }

    #[test]
    fn temporary_staging_is_unique() {
        let first = StagingDir::acquire(None, true).unwrap();
        let second = StagingDir::acquire(None, true).unwrap();
        assert_ne!(first.path(), second.path());
        assert!(first.path().is_dir());
    }
}
