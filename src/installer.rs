use crate::archive;
use crate::config::InstallConfig;
use crate::download;
use crate::pathenv::{self, PathUpdate};
use crate::verify;
use anyhow::{Context, Result};
use std::fs;

/// Run the full install pipeline: create the directory, download and
/// extract the release archive, register the directory on the user PATH,
/// and verify the executable runs. The first failing step aborts the run.
pub fn install(config: &InstallConfig) -> Result<()> {
    let install_dir = &config.install_dir;

    if !install_dir.exists() {
        println!(
            "Creating installation folder at {} ...",
            install_dir.display()
        );
        fs::create_dir_all(install_dir).with_context(|| {
            format!(
                "Failed to create installation folder: {}",
                install_dir.display()
            )
        })?;
    }

    let url = config.download_url();
    let archive_path = config.archive_path();
    println!("Downloading Terraform {} from {url} ...", config.version);
    download::download_file(&url, &archive_path)?;

    println!("Extracting Terraform into {} ...", install_dir.display());
    archive::extract_zip(&archive_path, install_dir)?;

    // A leftover archive is not worth failing a completed install over
    if let Err(err) = fs::remove_file(&archive_path) {
        println!(
            "Warning: failed to remove {}: {err}",
            archive_path.display()
        );
    }

    match pathenv::persist_in_path(install_dir)? {
        PathUpdate::Added => {
            println!(
                "Added {} to the user PATH. Restart your shell for the change to take effect.",
                install_dir.display()
            );
        }
        PathUpdate::AlreadyPresent => {
            println!("{} is already present in your PATH.", install_dir.display());
        }
        #[cfg(unix)]
        PathUpdate::NoProfileFound => {
            println!(
                "Could not find a shell profile; add {} to your PATH manually.",
                install_dir.display()
            );
        }
    }

    println!("Verifying Terraform installation...");
    verify::verify_install(&config.executable_path())
}
