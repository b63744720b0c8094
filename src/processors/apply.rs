// imgpress/src/processors/apply.rs
use crate::core::Result;
use crate::processors::report::Report;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirmed,
    Declined,
}

pub fn parse_confirmation(answer: &str) -> Decision {
    let answer = answer.trim();
    if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
        Decision::Confirmed
    } else {
        Decision::Declined
    }
}

/// Asks once on `out` and reads one line from `input`. EOF declines.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, count: usize) -> Result<Decision> {
    write!(
        out,
        "\nApply optimized versions to {} file(s)? [y/N] ",
        count
    )?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(parse_confirmation(&line))
}

/// Copies every improved staged file over its original. Returns how many were written.
pub fn apply<W: Write>(report: &Report, out: &mut W) -> Result<usize> {
    let mut applied = 0;
    for result in report.improved() {
        std::fs::copy(&result.staged, &result.entry.source)?;
        writeln!(out, "Updated {}", result.entry.source.display())?;
        applied += 1;
    }

    log::debug!("Overwrote {} original(s) from staging", applied);
    Ok(applied)
}
