// imgpress/src/processors/resolver.rs
use crate::core::{ImageKind, ImgpressError, ManifestEntry, Result, Target};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub fn resolve_target(path: &Path) -> Result<Target> {
    if path.is_file() {
        if ImageKind::from_path(path).is_none() {
            return Err(ImgpressError::UnsupportedFileType(path.to_path_buf()));
        }

        let absolute = path.canonicalize()?;
        let file_name = absolute
            .file_name()
            .map(PathBuf::from)
            .ok_or_else(|| ImgpressError::TargetNotFound(path.to_path_buf()))?;
        let root = absolute
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| ImgpressError::TargetNotFound(path.to_path_buf()))?;

        log::debug!("Resolved file target {} in {}", file_name.display(), root.display());
        return Ok(Target::File { root, file_name });
    }

    if path.is_dir() {
        let absolute = path.canonicalize()?;
        log::debug!("Resolved directory target {}", absolute.display());
        return Ok(Target::Directory(absolute));
    }

    Err(ImgpressError::TargetNotFound(path.to_path_buf()))
}

/// Lists every supported image under the target, in file-name order.
pub fn build_manifest(target: &Target) -> Result<Vec<ManifestEntry>> {
    match target {
        Target::File { root, file_name } => {
            let source = root.join(file_name);
            let kind = ImageKind::from_path(&source)
                .ok_or_else(|| ImgpressError::UnsupportedFileType(source.clone()))?;
            Ok(vec![ManifestEntry {
                source,
                relative: file_name.clone(),
                kind,
            }])
        }
        Target::Directory(root) => {
            let mut entries = Vec::new();
            for entry in WalkDir::new(root).sort_by_file_name() {
                let entry = entry?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let Some(kind) = ImageKind::from_path(entry.path()) else {
                    continue;
                };
                let relative = entry
                    .path()
                    .strip_prefix(root)
                    .map(Path::to_path_buf)
                    .map_err(|_| {
                        ImgpressError::InvalidParameter(format!(
                            "{} is outside {}",
                            entry.path().display(),
                            root.display()
                        ))
                    })?;
                entries.push(ManifestEntry {
                    source: entry.into_path(),
                    relative,
                    kind,
                });
            }

            log::debug!("Found {} image(s) under {}", entries.len(), root.display());
            Ok(entries)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use assert_fs::TempDir;

    #[test]
    fn accepts_every_supported_extension_in_any_case() {
        let temp = TempDir::new().unwrap();
        for name in ["a.png", "b.JPG", "c.jpeg", "d.Gif", "e.SVG"] {
            let file = temp.child(name);
            file.write_binary(b"data").unwrap();
            let target = resolve_target(file.path()).unwrap();
            assert!(matches!(target, Target::File { .. }), "{name}");
        }
    }

    #[test]
    fn rejects_other_extensions() {
        let temp = TempDir::new().unwrap();
        for name in ["a.webp", "b.txt", "c.png.bak", "noext"] {
            let file = temp.child(name);
            file.write_binary(b"data").unwrap();
            assert!(matches!(
                resolve_target(file.path()),
                Err(ImgpressError::UnsupportedFileType(_))
            ));
        }
    }

    #[test]
    fn missing_path_is_not_found() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            resolve_target(&temp.path().join("ghost")),
            Err(ImgpressError::TargetNotFound(_))
        ));
    }

    #[test]
    fn file_target_records_root_and_name() {
        let temp = TempDir::new().unwrap();
        let file = temp.child("logo.svg");
        file.write_str("<svg/>").unwrap();

        let target = resolve_target(file.path()).unwrap();
        let manifest = build_manifest(&target).unwrap();

        assert_eq!(target.root(), temp.path().canonicalize().unwrap());
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest[0].relative, PathBuf::from("logo.svg"));
        assert_eq!(manifest[0].kind, ImageKind::Vector);
    }

    #[test]
    fn directory_manifest_is_recursive_and_filtered() {
        let temp = TempDir::new().unwrap();
        temp.child("b.png").write_binary(b"png").unwrap();
        temp.child("nested/a.jpg").write_binary(b"jpg").unwrap();
        temp.child("nested/readme.md").write_str("no").unwrap();
        temp.child("icons/x.svg").write_str("<svg/>").unwrap();

        let target = resolve_target(temp.path()).unwrap();
        let manifest = build_manifest(&target).unwrap();
        let relative: Vec<_> = manifest.iter().map(|e| e.relative.clone()).collect();

        assert_eq!(
            relative,
            vec![
                PathBuf::from("b.png"),
                PathBuf::from("icons/x.svg"),
                PathBuf::from("nested/a.jpg"),
            ]
        );
    }
}
