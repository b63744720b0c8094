// imgpress/src/core/mod.rs
pub mod pipeline;

use std::path::{Path, PathBuf};
use thiserror::Error;

pub const RASTER_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];
pub const VECTOR_EXTENSIONS: [&str; 1] = ["svg"];

pub const DEFAULT_RASTER_TOOL: &str = "imageoptim";
pub const DEFAULT_VECTOR_TOOL: &str = "svgo";

/// svgo config shipped with the crate: `preset-default`, keeps `viewBox`, multipass.
pub const BUNDLED_SVGO_CONFIG: &str = include_str!("../../assets/svgo.config.js");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Raster,
    Vector,
}

impl ImageKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        if RASTER_EXTENSIONS.contains(&ext.as_str()) {
            Some(ImageKind::Raster)
        } else if VECTOR_EXTENSIONS.contains(&ext.as_str()) {
            Some(ImageKind::Vector)
        } else {
            None
        }
    }
}

/// A resolved, absolute optimization target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    File { root: PathBuf, file_name: PathBuf },
    Directory(PathBuf),
}

impl Target {
    /// Directory that relative manifest paths are computed against.
    pub fn root(&self) -> &Path {
        match self {
            Target::File { root, .. } => root,
            Target::Directory(dir) => dir,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub source: PathBuf,
    pub relative: PathBuf,
    pub kind: ImageKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Improved,
    Unchanged,
    Regressed,
}

impl FileStatus {
    pub fn icon(&self) -> &'static str {
        match self {
            FileStatus::Improved => "✅",
            FileStatus::Unchanged => "⬜",
            FileStatus::Regressed => "⚠️",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileResult {
    pub entry: ManifestEntry,
    pub staged: PathBuf,
    pub original_size: u64,
    pub optimized_size: u64,
    pub saved: i64,
    pub percentage: f64,
    pub status: FileStatus,
}

impl FileResult {
    /// Size that counts toward the aggregate: the optimized size only if it will be applied.
    pub fn effective_size(&self) -> u64 {
        match self.status {
            FileStatus::Improved => self.optimized_size,
            _ => self.original_size,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregate {
    pub total_original: u64,
    pub total_effective: u64,
    pub total_saved: u64,
    pub total_percentage: f64,
}

/// What an optimizer class ended up doing for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    Absent,
    NothingToDo,
    Skipped,
    Failed(String),
    Succeeded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub raster: ToolOutcome,
    pub vector: ToolOutcome,
}

impl Invocation {
    pub fn outcome(&self, kind: ImageKind) -> &ToolOutcome {
        match kind {
            ImageKind::Raster => &self.raster,
            ImageKind::Vector => &self.vector,
        }
    }

    /// Classes whose tool failed; their staged output must not be trusted.
    pub fn failed_kinds(&self) -> Vec<ImageKind> {
        [ImageKind::Raster, ImageKind::Vector]
            .into_iter()
            .filter(|kind| matches!(self.outcome(*kind), ToolOutcome::Failed(_)))
            .collect()
    }
}

/// How a run terminated, for callers that need more than the exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    NoImages,
    NothingToApply,
    Declined,
    Applied(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    pub raster: String,
    pub vector: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            raster: DEFAULT_RASTER_TOOL.to_string(),
            vector: DEFAULT_VECTOR_TOOL.to_string(),
        }
    }
}

impl ToolConfig {
    /// Honors `IMGPRESS_IMAGEOPTIM` and `IMGPRESS_SVGO` overrides.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            raster: non_empty_var("IMGPRESS_IMAGEOPTIM").unwrap_or(defaults.raster),
            vector: non_empty_var("IMGPRESS_SVGO").unwrap_or(defaults.vector),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone)]
pub struct OptimizeConfig {
    pub target: PathBuf,
    pub svgo_config: Option<PathBuf>,
    pub temp_dir: Option<PathBuf>,
    pub cleanup: bool,
    pub assume_yes: bool,
    pub tools: ToolConfig,
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        Self {
            target: PathBuf::from("."),
            svgo_config: None,
            temp_dir: None,
            cleanup: false,
            assume_yes: false,
            tools: ToolConfig::default(),
        }
    }
}

impl OptimizeConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(config) = &self.svgo_config {
            if !config.is_file() {
                return Err(ImgpressError::SvgoConfigNotFound(config.clone()));
            }
        }

        if let Some(dir) = &self.temp_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(ImgpressError::InvalidParameter(format!(
                    "Staging path exists but is not a directory: {}",
                    dir.display()
                )));
            }
        }

        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ImgpressError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Target not found: {0}")]
    TargetNotFound(PathBuf),

    #[error("Unsupported file type: {0} (supported: png, jpg, jpeg, gif, svg)")]
    UnsupportedFileType(PathBuf),

    #[error("Unknown flag: {0}")]
    UnknownFlag(String),

    #[error("No optimizers available: install imageoptim and/or svgo")]
    NoOptimizersAvailable,

    #[error("svgo config not found: {0}")]
    SvgoConfigNotFound(PathBuf),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, ImgpressError>;
