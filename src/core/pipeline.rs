// imgpress/src/core/pipeline.rs
use super::{Invocation, OptimizeConfig, Result, RunOutcome};
use crate::processors::prelude::*;
use crate::processors::Report;
use std::io::{BufRead, Write};

/// Everything one run produced, for callers that want more than the outcome.
#[derive(Debug)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub invocation: Option<Invocation>,
    pub report: Option<Report>,
}

pub struct ImageOptimizer {
    config: OptimizeConfig,
}

impl ImageOptimizer {
    pub fn new(config: OptimizeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OptimizeConfig {
        &self.config
    }

    /// Runs resolve, stage, optimize, report and the apply gate in order.
    ///
    /// The staging directory is released when this returns, on every path.
    /// A caller-supplied directory is claimed before validation, so `cleanup`
    /// also covers runs that fail early.
    pub fn run<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> Result<RunSummary> {
        let claimed = self
            .config
            .temp_dir
            .as_deref()
            .map(|dir| StagingDir::claim(dir, self.config.cleanup));

        self.config.validate()?;

        let target = resolve_target(&self.config.target)?;
        let manifest = build_manifest(&target)?;
        if manifest.is_empty() {
            writeln!(out, "No image files found in {}", target.root().display())?;
            return Ok(RunSummary {
                outcome: RunOutcome::NoImages,
                invocation: None,
                report: None,
            });
        }
        log::info!("Found {} image file(s)", manifest.len());

        let toolset = probe_tools(&self.config.tools)?;

        let staging = match claimed {
            Some(staging) => {
                staging.ensure()?;
                staging
            }
            None => StagingDir::acquire(None, self.config.cleanup)?,
        };
        let invocation = if staging.has_reusable_output() {
            writeln!(
                out,
                "Reusing optimized files in {}",
                staging.images_dir().display()
            )?;
            OptimizerInvoker::skipped()
        } else {
            staging.mirror(&manifest)?;
            OptimizerInvoker::new(&toolset, self.config.svgo_config.as_deref()).invoke(&staging)
        };
        log::debug!("Optimizer outcomes: {:?}", invocation);

        for kind in invocation.failed_kinds() {
            let restored = staging.restore(&manifest, kind)?;
            log::warn!("Discarded output for {} {:?} file(s) after tool failure", restored, kind);
        }

        let report = build_report(&manifest, &staging)?;
        render_report(&report, out)?;

        let improved = report.improved().count();
        let outcome = if improved == 0 {
            writeln!(out, "\nNothing to apply.")?;
            RunOutcome::NothingToApply
        } else {
            let decision = if self.config.assume_yes {
                Decision::Confirmed
            } else {
                prompt(input, out, improved)?
            };

            match decision {
                Decision::Confirmed => RunOutcome::Applied(apply(&report, out)?),
                Decision::Declined => {
                    writeln!(out, "No files were changed.")?;
                    RunOutcome::Declined
                }
            }
        };

        if !staging.cleanup_requested() {
            writeln!(
                out,
                "Optimized files kept in {}",
                staging.path().display()
            )?;
        }

        Ok(RunSummary {
            outcome,
            invocation: Some(invocation),
            report: Some(report),
        })
    }
}
