use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Terraform release installed when no version is given
pub const DEFAULT_VERSION: &str = "1.11.4";

const RELEASES_BASE: &str = "https://releases.hashicorp.com/terraform";

/// Resolved installer configuration
#[derive(Debug, Clone)]
pub struct InstallConfig {
    pub version: String,
    pub install_dir: PathBuf,
}

/// Optional TOML settings file
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub version: Option<String>,
    pub install_dir: Option<PathBuf>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

impl InstallConfig {
    /// Resolve the effective configuration: CLI overrides win over the
    /// settings file, which wins over the built-in defaults.
    pub fn resolve(
        version: Option<String>,
        install_dir: Option<PathBuf>,
        file: ConfigFile,
    ) -> Result<Self> {
        let version = version
            .or(file.version)
            .unwrap_or_else(|| DEFAULT_VERSION.to_string());

        let install_dir = match install_dir.or(file.install_dir) {
            Some(dir) => dir,
            None => default_install_dir()?,
        };

        Ok(Self {
            version,
            install_dir,
        })
    }

    /// URL of the release archive for this version on the current platform
    pub fn download_url(&self) -> String {
        format!(
            "{RELEASES_BASE}/{v}/terraform_{v}_{platform}.zip",
            v = self.version,
            platform = platform_segment()
        )
    }

    /// Where the archive lives while it is being downloaded
    pub fn archive_path(&self) -> PathBuf {
        self.install_dir.join("terraform.zip")
    }

    /// Path of the installed executable
    pub fn executable_path(&self) -> PathBuf {
        self.install_dir.join(executable_name())
    }
}

/// `<os>_<arch>` segment used in HashiCorp release artifact names
pub fn platform_segment() -> String {
    let os = match std::env::consts::OS {
        "macos" => "darwin",
        other => other,
    };

    let arch = match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        other => other,
    };

    format!("{os}_{arch}")
}

pub fn executable_name() -> &'static str {
    if cfg!(windows) {
        "terraform.exe"
    } else {
        "terraform"
    }
}

/// Default install directory when neither the CLI nor the settings file
/// names one
pub fn default_install_dir() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        Ok(PathBuf::from(r"C:\terraform"))
    }

    #[cfg(not(windows))]
    {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
        Ok(home.join(".local").join("terraform"))
    }
}
