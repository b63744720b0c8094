// imgpress/src/cli.rs
use crate::core::{OptimizeConfig, ToolConfig};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "imgpress",
    version,
    about = "Preview and apply lossless image optimization with imageoptim and svgo",
    after_help = "Pass the same TEMP_DIR twice to preview first and apply on the second run."
)]
pub struct Cli {
    /// Image file or directory to optimize (png, jpg, jpeg, gif, svg)
    pub target: PathBuf,

    /// svgo config file; an empty string uses svgo's defaults
    pub svgo_config: Option<String>,

    /// Staging directory to create or reuse
    pub temp_dir: Option<PathBuf>,

    /// Remove the staging directory on exit
    #[arg(long)]
    pub cleanup: bool,

    /// Apply without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn into_config(self, tools: ToolConfig) -> OptimizeConfig {
        OptimizeConfig {
            target: self.target,
            svgo_config: self
                .svgo_config
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            temp_dir: self.temp_dir,
            cleanup: self.cleanup,
            assume_yes: self.yes,
            tools,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn empty_svgo_config_means_defaults() {
        let cli = Cli::try_parse_from(["imgpress", "img", "", "/tmp/stage"]).unwrap();
        let config = cli.into_config(ToolConfig::default());
        assert_eq!(config.svgo_config, None);
        assert_eq!(config.temp_dir, Some(PathBuf::from("/tmp/stage")));
    }

    #[test]
    fn flags_and_positionals() {
        let cli = Cli::try_parse_from(["imgpress", "--cleanup", "logo.svg", "svgo.config.js"]).unwrap();
        assert!(cli.cleanup);
        let config = cli.into_config(ToolConfig::default());
        assert_eq!(config.svgo_config, Some(PathBuf::from("svgo.config.js")));
        assert!(!config.assume_yes);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let err = Cli::try_parse_from(["imgpress", "--bogus", "img"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn help_is_not_an_error_kind() {
        let err = Cli::try_parse_from(["imgpress", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }
}
