use anyhow::Result;
use std::path::Path;

#[cfg(windows)]
pub const PATH_SEPARATOR: char = ';';
#[cfg(not(windows))]
pub const PATH_SEPARATOR: char = ':';

/// Persistent store for the user-scope PATH value
pub trait PathStore {
    fn read(&self) -> Result<String>;
    fn write(&mut self, value: &str) -> Result<()>;
}

/// Outcome of a PATH update attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathUpdate {
    Added,
    AlreadyPresent,
    #[cfg(unix)]
    NoProfileFound,
}

/// Append a directory to the stored PATH unless it already appears there.
///
/// Presence is a plain substring check: entries differing only in case or
/// a trailing separator count as absent, and pre-existing duplicates are
/// left alone.
pub fn ensure_in_path<S: PathStore>(store: &mut S, dir: &Path) -> Result<PathUpdate> {
    let current = store.read()?;
    let dir_str = dir.to_string_lossy();

    if current.contains(dir_str.as_ref()) {
        return Ok(PathUpdate::AlreadyPresent);
    }

    let updated = if current.is_empty() {
        dir_str.into_owned()
    } else {
        format!("{current}{PATH_SEPARATOR}{dir_str}")
    };

    store.write(&updated)?;
    Ok(PathUpdate::Added)
}

/// User PATH backed by `HKCU\Environment` in the registry
#[cfg(windows)]
pub struct UserEnvironment;

#[cfg(windows)]
impl PathStore for UserEnvironment {
    fn read(&self) -> Result<String> {
        use anyhow::Context;
        use winreg::RegKey;
        use winreg::enums::{HKEY_CURRENT_USER, KEY_READ};

        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let env = hkcu
            .open_subkey_with_flags("Environment", KEY_READ)
            .context("Failed to open HKCU\\Environment registry key")?;

        Ok(env.get_value("Path").unwrap_or_default())
    }

    fn write(&mut self, value: &str) -> Result<()> {
        use anyhow::Context;
        use winreg::RegKey;
        use winreg::enums::{HKEY_CURRENT_USER, KEY_WRITE};

        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let env = hkcu
            .open_subkey_with_flags("Environment", KEY_WRITE)
            .context("Failed to open HKCU\\Environment registry key")?;

        env.set_value("Path", &value)
            .context("Failed to update PATH in registry")?;
        Ok(())
    }
}

/// Persist a directory into the user PATH
#[cfg(windows)]
pub fn persist_in_path(dir: &Path) -> Result<PathUpdate> {
    ensure_in_path(&mut UserEnvironment, dir)
}

#[cfg(unix)]
const PROFILE_MARKER: &str = "# Added by tfget";

/// Persist a directory into the user PATH.
///
/// There is no user-scope environment store on Unix, so the export line is
/// appended to the first shell profile that exists.
#[cfg(unix)]
pub fn persist_in_path(dir: &Path) -> Result<PathUpdate> {
    use anyhow::Context;

    let home = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;

    let candidates = [
        home.join(".bashrc"),
        home.join(".bash_profile"),
        home.join(".zshrc"),
        home.join(".profile"),
    ];

    let Some(profile) = candidates.iter().find(|p| p.exists()) else {
        return Ok(PathUpdate::NoProfileFound);
    };

    ensure_in_profile(profile, dir)
        .with_context(|| format!("Failed to update profile: {}", profile.display()))
}

/// Append an export line for `dir` to a shell profile unless the profile
/// already mentions it (substring check, same fragility as the registry
/// store).
#[cfg(unix)]
fn ensure_in_profile(profile: &Path, dir: &Path) -> Result<PathUpdate> {
    use std::fs::OpenOptions;
    use std::io::Write;

    let content = std::fs::read_to_string(profile)?;
    let dir_str = dir.to_string_lossy();

    if content.contains(dir_str.as_ref()) {
        return Ok(PathUpdate::AlreadyPresent);
    }

    let mut file = OpenOptions::new().append(true).open(profile)?;
    write!(
        file,
        "\n{PROFILE_MARKER}\nexport PATH=\"$PATH:{dir_str}\"\n"
    )?;

    Ok(PathUpdate::Added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// In-memory stand-in for the real environment store
    #[derive(Default)]
    struct MemoryStore {
        value: String,
        writes: usize,
    }

    impl PathStore for MemoryStore {
        fn read(&self) -> Result<String> {
            Ok(self.value.clone())
        }

        fn write(&mut self, value: &str) -> Result<()> {
            self.value = value.to_string();
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_appends_missing_directory() {
        let mut store = MemoryStore {
            value: format!("/usr/bin{PATH_SEPARATOR}/usr/local/bin"),
            writes: 0,
        };

        let result = ensure_in_path(&mut store, Path::new("/opt/terraform")).unwrap();
        assert_eq!(result, PathUpdate::Added);
        assert_eq!(
            store.value,
            format!("/usr/bin{PATH_SEPARATOR}/usr/local/bin{PATH_SEPARATOR}/opt/terraform")
        );
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn test_empty_path_gets_bare_directory() {
        let mut store = MemoryStore::default();

        let result = ensure_in_path(&mut store, Path::new("/opt/terraform")).unwrap();
        assert_eq!(result, PathUpdate::Added);
        assert_eq!(store.value, "/opt/terraform");
    }

    #[test]
    fn test_present_directory_is_left_alone() {
        let original = format!("/usr/bin{PATH_SEPARATOR}/opt/terraform");
        let mut store = MemoryStore {
            value: original.clone(),
            writes: 0,
        };

        let result = ensure_in_path(&mut store, Path::new("/opt/terraform")).unwrap();
        assert_eq!(result, PathUpdate::AlreadyPresent);
        assert_eq!(store.value, original);
        assert_eq!(store.writes, 0);
    }

    #[test]
    fn test_second_run_does_not_duplicate() {
        let mut store = MemoryStore::default();
        let dir = PathBuf::from("/opt/terraform");

        assert_eq!(ensure_in_path(&mut store, &dir).unwrap(), PathUpdate::Added);
        assert_eq!(
            ensure_in_path(&mut store, &dir).unwrap(),
            PathUpdate::AlreadyPresent
        );
        assert_eq!(store.value.matches("/opt/terraform").count(), 1);
    }

    #[test]
    fn test_substring_match_counts_as_present() {
        // A longer entry containing the directory as a substring blocks the
        // append; this mirrors the containment check, not entry equality.
        let mut store = MemoryStore {
            value: "/opt/terraform-old".to_string(),
            writes: 0,
        };

        let result = ensure_in_path(&mut store, Path::new("/opt/terraform")).unwrap();
        assert_eq!(result, PathUpdate::AlreadyPresent);
    }

    #[test]
    fn test_case_variant_counts_as_absent() {
        let mut store = MemoryStore {
            value: "/opt/Terraform".to_string(),
            writes: 0,
        };

        let result = ensure_in_path(&mut store, Path::new("/opt/terraform")).unwrap();
        assert_eq!(result, PathUpdate::Added);
    }

    #[cfg(unix)]
    #[test]
    fn test_profile_append_and_idempotence() {
        use std::fs;

        let temp = tempfile::TempDir::new().unwrap();
        let profile = temp.path().join(".bashrc");
        fs::write(&profile, "# existing config\n").unwrap();

        let dir = Path::new("/opt/terraform");
        assert_eq!(
            ensure_in_profile(&profile, dir).unwrap(),
            PathUpdate::Added
        );

        let content = fs::read_to_string(&profile).unwrap();
        assert!(content.contains("# existing config"));
        assert!(content.contains(PROFILE_MARKER));
        assert!(content.contains("export PATH=\"$PATH:/opt/terraform\""));

        assert_eq!(
            ensure_in_profile(&profile, dir).unwrap(),
            PathUpdate::AlreadyPresent
        );
        let content = fs::read_to_string(&profile).unwrap();
        assert_eq!(content.matches("/opt/terraform").count(), 1);
    }
}
