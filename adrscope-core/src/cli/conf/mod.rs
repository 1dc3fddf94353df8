mod check;
mod dump;
mod init;

pub use check::*;
use clap::Subcommand;
pub use dump::*;
pub use init::*;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate an analysis config file and exit
    Check {
        /// Path to config file
        #[arg(default_value = "adrscope.toml")]
        path: PathBuf,

        /// Print the bare error message instead of a rendered diagnostic
        #[arg(short, long, default_value = "false")]
        plain: bool,
    },

    /// Print resolved configuration (defaults if no path is given)
    Dump {
        path: Option<PathBuf>,

        /// Output as JSON
        #[arg(long, conflicts_with = "yaml")]
        json: bool,

        /// Output as YAML
        #[arg(long)]
        yaml: bool,
    },

    /// Write a config file holding the default values
    Init {
        /// Path of the config file to create
        #[arg(default_value = "adrscope.toml")]
        path: PathBuf,
    },
}

pub fn run(cmd: ConfigCmd) -> anyhow::Result<()> {
    match cmd {
        ConfigCmd::Check { path, plain } => check(path, plain),
        ConfigCmd::Dump { path, json, yaml } => dump(path, json, yaml),
        ConfigCmd::Init { path } => init(path),
    }
}
