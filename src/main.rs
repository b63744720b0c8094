use clap::error::ErrorKind;
use clap::Parser;
use imgpress::prelude::*;
use imgpress::{paint, stderr_is_terminal, Color, ImgpressError};
use log::LevelFilter;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return usage_error(e),
    };

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .init();

    match run(cli) {
        Ok(outcome) => {
            log::debug!("Finished: {:?}", outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            let label = paint("Error:", Color::Red, stderr_is_terminal());
            eprintln!("{} {:#}", label, e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<RunOutcome> {
    use anyhow::Context;
    use std::io::IsTerminal;

    let config = cli.into_config(ToolConfig::from_env());
    let target = config.target.clone();
    let optimizer = ImageOptimizer::new(config);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();

    let summary = optimizer
        .run(&mut input, &mut out)
        .with_context(|| format!("optimizing {}", target.display()))?;

    if let RunOutcome::Applied(count) = summary.outcome {
        let done = format!("Applied {} optimized file(s).", count);
        println!("{}", paint(&done, Color::Green, std::io::stdout().is_terminal()));
    }

    Ok(summary.outcome)
}

/// Help and version exit 0; every other parse failure is an unknown flag or bad usage.
fn usage_error(e: clap::Error) -> ExitCode {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = e.print();
            ExitCode::SUCCESS
        }
        ErrorKind::UnknownArgument => {
            let flag = e
                .get(clap::error::ContextKind::InvalidArg)
                .map(|value| value.to_string())
                .unwrap_or_default();
            let label = paint("Error:", Color::Red, stderr_is_terminal());
            eprintln!("{} {}", label, ImgpressError::UnknownFlag(flag));
            eprintln!("Run with --help for usage.");
            ExitCode::FAILURE
        }
        _ => {
            let _ = e.print();
            ExitCode::FAILURE
        }
    }
}
