// imgpress/src/processors/invoker.rs
use crate::core::{ImageKind, Invocation, ToolOutcome};
use crate::processors::prober::Toolset;
use crate::processors::staging::StagingDir;
use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

pub struct OptimizerInvoker<'a> {
    toolset: &'a Toolset,
    svgo_config: Option<&'a Path>,
}

impl<'a> OptimizerInvoker<'a> {
    pub fn new(toolset: &'a Toolset, svgo_config: Option<&'a Path>) -> Self {
        Self { toolset, svgo_config }
    }

    /// Runs each available optimizer once over the staged tree. Never fails.
    pub fn invoke(&self, staging: &StagingDir) -> Invocation {
        let images = staging.images_dir();

        let raster = match &self.toolset.raster {
            None => ToolOutcome::Absent,
            Some(_) if !staging.contains_kind(ImageKind::Raster) => ToolOutcome::NothingToDo,
            Some(tool) => run_tool(tool, &raster_args(&images), "Optimizing PNG/JPEG/GIF"),
        };

        let vector = match &self.toolset.vector {
            None => ToolOutcome::Absent,
            Some(_) if !staging.contains_kind(ImageKind::Vector) => ToolOutcome::NothingToDo,
            Some(tool) => run_tool(
                tool,
                &vector_args(&images, self.svgo_config),
                "Optimizing SVG",
            ),
        };

        Invocation { raster, vector }
    }

    pub fn skipped() -> Invocation {
        Invocation {
            raster: ToolOutcome::Skipped,
            vector: ToolOutcome::Skipped,
        }
    }
}

pub fn raster_args(images: &Path) -> Vec<OsString> {
    vec![images.as_os_str().to_os_string()]
}

pub fn vector_args(images: &Path, config: Option<&Path>) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-r".into(),
        "-f".into(),
        images.as_os_str().to_os_string(),
        "--multipass".into(),
    ];
    if let Some(config) = config {
        args.push("--config".into());
        args.push(config.as_os_str().to_os_string());
    }
    args
}

fn run_tool(tool: &Path, args: &[OsString], message: &'static str) -> ToolOutcome {
    log::debug!("Running {} {:?}", tool.display(), args);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = match Command::new(tool).args(args).output() {
        Ok(output) if output.status.success() => {
            log::debug!("{}", String::from_utf8_lossy(&output.stdout).trim_end());
            ToolOutcome::Succeeded
        }
        Ok(output) => ToolOutcome::Failed(format!(
            "{} exited with {}: {}",
            tool.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )),
        Err(e) => ToolOutcome::Failed(format!("failed to start {}: {}", tool.display(), e)),
    };

    spinner.finish_and_clear();

    if let ToolOutcome::Failed(reason) = &outcome {
        log::warn!("{}; staged files for this class are unchanged", reason);
    }
    outcome
}
