// imgpress/src/processors/mod.rs
pub mod apply;
pub mod invoker;
pub mod prober;
pub mod report;
pub mod resolver;
pub mod staging;

pub use apply::{apply, parse_confirmation, prompt, Decision};
pub use invoker::OptimizerInvoker;
pub use prober::{find_executable, probe_tools, Toolset};
pub use report::{build_report, render_report, Report};
pub use resolver::{build_manifest, resolve_target};
pub use staging::StagingDir;

pub mod prelude {
    pub use super::{
        apply, build_manifest, build_report, probe_tools, prompt, render_report, resolve_target,
        Decision, OptimizerInvoker, StagingDir,
    };
}
