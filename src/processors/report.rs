// imgpress/src/processors/report.rs
use crate::core::{Aggregate, FileResult, FileStatus, ManifestEntry, Result};
use crate::processors::staging::StagingDir;
use crate::utils::{fit_column, format_kb, percentage_saved};
use std::io::Write;

const NAME_WIDTH: usize = 40;
const SIZE_WIDTH: usize = 12;
const PERCENT_WIDTH: usize = 8;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub results: Vec<FileResult>,
    /// Manifest entries whose staged copy is absent or empty. Never applied.
    pub missing: Vec<ManifestEntry>,
    pub aggregate: Aggregate,
}

impl Report {
    pub fn count(&self, status: FileStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    /// Files whose staged copy will overwrite the original on apply.
    pub fn improved(&self) -> impl Iterator<Item = &FileResult> {
        self.results
            .iter()
            .filter(|r| r.status == FileStatus::Improved)
    }
}

pub fn classify(original: u64, optimized: u64) -> (i64, FileStatus) {
    let saved = original as i64 - optimized as i64;
    let status = match saved {
        s if s > 0 => FileStatus::Improved,
        s if s < 0 => FileStatus::Regressed,
        _ => FileStatus::Unchanged,
    };
    (saved, status)
}

pub fn build_report(manifest: &[ManifestEntry], staging: &StagingDir) -> Result<Report> {
    let mut report = Report::default();

    for entry in manifest {
        let staged = staging.staged_path(entry);
        if !staged.is_file() {
            log::warn!("No staged copy for {}", entry.relative.display());
            report.missing.push(entry.clone());
            continue;
        }

        let original_size = std::fs::metadata(&entry.source)?.len();
        let optimized_size = std::fs::metadata(&staged)?.len();
        if optimized_size == 0 && original_size > 0 {
            log::warn!("Staged copy of {} is empty", entry.relative.display());
            report.missing.push(entry.clone());
            continue;
        }

        let (saved, status) = classify(original_size, optimized_size);

        report.results.push(FileResult {
            entry: entry.clone(),
            staged,
            original_size,
            optimized_size,
            saved,
            percentage: percentage_saved(original_size, saved),
            status,
        });
    }

    report.aggregate = aggregate(&report.results);
    Ok(report)
}

pub fn aggregate(results: &[FileResult]) -> Aggregate {
    let total_original: u64 = results.iter().map(|r| r.original_size).sum();
    let total_effective: u64 = results.iter().map(FileResult::effective_size).sum();
    let total_saved = total_original.saturating_sub(total_effective);

    Aggregate {
        total_original,
        total_effective,
        total_saved,
        total_percentage: percentage_saved(total_original, total_saved as i64),
    }
}

pub fn render_report<W: Write>(report: &Report, out: &mut W) -> std::io::Result<()> {
    let rule = "-".repeat(NAME_WIDTH + 3 + SIZE_WIDTH * 3 + PERCENT_WIDTH + 3);

    writeln!(out)?;
    writeln!(out, "Optimization Report")?;
    writeln!(out, "{}", rule)?;
    writeln!(
        out,
        "   {} {:>sw$}{:>sw$}{:>sw$}{:>pw$}",
        fit_column("File", NAME_WIDTH),
        "Original",
        "Optimized",
        "Saved",
        "%",
        sw = SIZE_WIDTH,
        pw = PERCENT_WIDTH,
    )?;
    writeln!(out, "{}", rule)?;

    for result in &report.results {
        let (delta, percent) = match result.status {
            FileStatus::Regressed => (
                format!("+{}", format_kb(result.saved.unsigned_abs())),
                format!("+{:.1}%", result.percentage.abs()),
            ),
            _ => (
                format_kb(result.saved.unsigned_abs()),
                format!("{:.1}%", result.percentage),
            ),
        };

        writeln!(
            out,
            "{} {} {:>sw$}{:>sw$}{:>sw$}{:>pw$}",
            result.status.icon(),
            fit_column(&result.entry.relative.display().to_string(), NAME_WIDTH),
            format_kb(result.original_size),
            format_kb(result.optimized_size),
            delta,
            percent,
            sw = SIZE_WIDTH,
            pw = PERCENT_WIDTH,
        )?;
    }

    let totals = &report.aggregate;
    writeln!(out, "{}", rule)?;
    writeln!(
        out,
        "   {} {:>sw$}{:>sw$}{:>sw$}{:>pw$}",
        fit_column("Total", NAME_WIDTH),
        format_kb(totals.total_original),
        format_kb(totals.total_effective),
        format_kb(totals.total_saved),
        format!("{:.1}%", totals.total_percentage),
        sw = SIZE_WIDTH,
        pw = PERCENT_WIDTH,
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "Summary: {} improved, {} unchanged, {} regressed",
        report.count(FileStatus::Improved),
        report.count(FileStatus::Unchanged),
        report.count(FileStatus::Regressed),
    )?;

    for entry in &report.missing {
        writeln!(
            out,
            "Warning: no usable optimized copy of {}, skipped",
            entry.relative.display()
        )?;
    }

    Ok(())
}
