use std::path::PathBuf;

use clap::Parser;

use crate::service::RunMode;

#[derive(Parser)]
#[command(name = "tgdigest", about = "Summarize recent posts of Telegram channels")]
pub struct Cli {
    /// Collect and summarize, print the digest instead of sending it.
    #[arg(long, conflicts_with = "preview")]
    pub dry_run: bool,

    /// Only collect and print what would be summarized.
    #[arg(long)]
    pub preview: bool,

    /// Settings file, `Settings.toml` in the working directory by default.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn mode(&self) -> RunMode {
        match (self.preview, self.dry_run) {
            (true, _) => RunMode::Preview,
            (false, true) => RunMode::DryRun,
            (false, false) => RunMode::Full,
        }
    }
}
