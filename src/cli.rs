use crate::config::{ConfigFile, InstallConfig};
use crate::installer;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about = "Download and install Terraform, updating the user PATH", long_about = None)]
pub struct Args {
    /// Terraform release to install (defaults to the built-in version)
    #[arg(value_name = "VERSION")]
    pub release: Option<String>,
    /// Directory to install into
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
    /// TOML settings file with `version` and `install_dir` keys
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Main CLI entry point
pub fn run() -> Result<()> {
    let args = Args::parse();

    let file = match args.config.as_deref() {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };

    let config = InstallConfig::resolve(args.release, args.dir, file)?;
    installer::install(&config)
}
