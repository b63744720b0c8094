// imgpress/src/processors/prober.rs
use crate::core::{ImgpressError, Result, ToolConfig};
use std::path::{Path, PathBuf};

/// Executables found for this run. `None` means that class is skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Toolset {
    pub raster: Option<PathBuf>,
    pub vector: Option<PathBuf>,
}

pub fn probe_tools(tools: &ToolConfig) -> Result<Toolset> {
    let toolset = Toolset {
        raster: find_executable(&tools.raster),
        vector: find_executable(&tools.vector),
    };

    match (&toolset.raster, &toolset.vector) {
        (None, None) => return Err(ImgpressError::NoOptimizersAvailable),
        (None, Some(_)) => log::warn!(
            "{} not found, PNG/JPEG/GIF optimization will be skipped",
            tools.raster
        ),
        (Some(_), None) => log::warn!("{} not found, SVG optimization will be skipped", tools.vector),
        (Some(_), Some(_)) => {}
    }

    log::debug!("Probed tools: {:?}", toolset);
    Ok(toolset)
}

#[cfg(windows)]
const LAUNCHER_EXTENSIONS: &[&str] = &["exe", "cmd", "bat"];
#[cfg(not(windows))]
const LAUNCHER_EXTENSIONS: &[&str] = &[];

/// Looks `name` up on `PATH`, or checks it directly when it contains a separator.
///
/// Returns the path that matched, launcher extension included. Launchers are
/// tried first since npm also drops an extensionless shell script beside `svgo.cmd`.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    let candidate = Path::new(name);
    if candidate.components().count() > 1 {
        return resolve_with(candidate, LAUNCHER_EXTENSIONS, is_executable);
    }

    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .find_map(|dir| resolve_with(&dir.join(name), LAUNCHER_EXTENSIONS, is_executable))
}

fn resolve_with(path: &Path, extensions: &[&str], accept: impl Fn(&Path) -> bool) -> Option<PathBuf> {
    extensions
        .iter()
        .map(|ext| {
            let mut name = path.as_os_str().to_os_string();
            name.push(".");
            name.push(ext);
            PathBuf::from(name)
        })
        .chain(std::iter::once(path.to_path_buf()))
        .find(|candidate| accept(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
