use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use zip::ZipArchive;

/// Extract a ZIP archive into a directory, overwriting existing files
pub fn extract_zip(zip_path: &Path, extract_to: &Path) -> Result<()> {
    let file = fs::File::open(zip_path)
        .with_context(|| format!("Failed to open zip file: {}", zip_path.display()))?;

    let mut archive = ZipArchive::new(file).with_context(|| "Failed to read zip archive")?;

    fs::create_dir_all(extract_to).with_context(|| {
        format!(
            "Failed to create extraction directory: {}",
            extract_to.display()
        )
    })?;

    let mut extracted_count = 0;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .with_context(|| format!("Failed to access zip entry {i}"))?;

        let outpath = extract_to.join(entry.mangled_name());

        if entry.name().ends_with('/') {
            // Directory
            fs::create_dir_all(&outpath)
                .with_context(|| format!("Failed to create directory: {}", outpath.display()))?;
        } else {
            // File
            if let Some(p) = outpath.parent() {
                if !p.exists() {
                    fs::create_dir_all(p).with_context(|| {
                        format!("Failed to create parent directory: {}", p.display())
                    })?;
                }
            }

            let mut outfile = fs::File::create(&outpath).with_context(|| {
                format!("Failed to create extracted file: {}", outpath.display())
            })?;

            std::io::copy(&mut entry, &mut outfile)
                .with_context(|| format!("Failed to extract file: {}", outpath.display()))?;
        }

        // Set file permissions on Unix-like systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                fs::set_permissions(&outpath, fs::Permissions::from_mode(mode))?;
            }
        }

        extracted_count += 1;
    }

    println!("Extracted {extracted_count} files");
    Ok(())
}
