use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Download a file via blocking HTTP/HTTPS GET
pub fn download_file(url: &str, path: &Path) -> Result<()> {
    let response = ureq::get(url)
        .call()
        .with_context(|| format!("Failed to download: {url}"))?;

    if response.status() != 200 {
        return Err(anyhow::anyhow!(
            "Download failed with status: {}",
            response.status()
        ));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut file = fs::File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;

    std::io::copy(&mut response.into_reader(), &mut file).with_context(|| {
        // Clean up the partial file on failure
        let _ = fs::remove_file(path);
        format!("Failed to write to file: {}", path.display())
    })?;

    // Ensure data is written to disk
    file.sync_all()
        .with_context(|| format!("Failed to sync file: {}", path.display()))?;

    let file_size = file.metadata()?.len();
    println!("Downloaded: {} ({} bytes)", path.display(), file_size);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_download_unreachable_host_fails() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("terraform.zip");

        // Port 1 on loopback refuses connections
        let result = download_file("http://127.0.0.1:1/terraform.zip", &dest);
        assert!(result.is_err());
        assert!(!dest.exists());
    }
}
