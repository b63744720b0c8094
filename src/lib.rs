mod cli;
mod core;
mod processors;
mod utils;

pub use cli::Cli;
pub use crate::core::pipeline::{ImageOptimizer, RunSummary};
pub use crate::core::{
    Aggregate, FileResult, FileStatus, ImageKind, ImgpressError, Invocation, ManifestEntry,
    OptimizeConfig, Result, RunOutcome, Target, ToolConfig, ToolOutcome, BUNDLED_SVGO_CONFIG,
};
pub use processors::{
    apply, build_manifest, build_report, find_executable, parse_confirmation, probe_tools,
    prompt, render_report, resolve_target, Decision, OptimizerInvoker, Report, StagingDir, Toolset,
};
pub use utils::{format_kb, is_supported_format, paint, percentage_saved, stderr_is_terminal, Color};

pub mod prelude {
    pub use crate::{Cli, ImageOptimizer, OptimizeConfig, RunOutcome, ToolConfig};
}
