use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

/// Run the installed executable with `-v` and print the version banner it
/// reports
pub fn verify_install(executable: &Path) -> Result<()> {
    if !executable.exists() {
        return Err(anyhow::anyhow!(
            "Terraform may not be installed correctly: {} does not exist",
            executable.display()
        ));
    }

    let output = Command::new(executable)
        .arg("-v")
        .output()
        .with_context(|| format!("Failed to run {}", executable.display()))?;

    if !output.status.success() {
        return Err(anyhow::anyhow!(
            "Terraform may not be installed correctly: {} exited with code {}",
            executable.display(),
            output.status.code().unwrap_or(-1)
        ));
    }

    print!("{}", String::from_utf8_lossy(&output.stdout));
    Ok(())
}
