use std::{ffi::OsString, path::PathBuf};

use anyhow::{anyhow, Result};

const STATE_DIR_NAME: &str = "screentime";

/// Directory the analyzer keeps its own logs in. An explicit `--dir` wins over the platform
/// default. Created if missing.
pub fn state_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    let path = match explicit {
        Some(path) => path,
        None => platform_state_dir(|name| std::env::var_os(name))?,
    };
    std::fs::create_dir_all(&path)?;
    Ok(path)
}

#[cfg(windows)]
fn platform_state_dir(var: impl Fn(&str) -> Option<OsString>) -> Result<PathBuf> {
    let mut path = var("APPDATA")
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("APPDATA should be present on Windows"))?;
    path.push(STATE_DIR_NAME);
    Ok(path)
}

/// `$XDG_STATE_HOME/screentime`, or `$HOME/.local/state/screentime` when that is unset.
#[cfg(not(windows))]
fn platform_state_dir(var: impl Fn(&str) -> Option<OsString>) -> Result<PathBuf> {
    let mut path = var("XDG_STATE_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| var("HOME").map(|home| PathBuf::from(home).join(".local/state")))
        .ok_or_else(|| anyhow!("Neither XDG_STATE_HOME nor HOME is set, pass --dir"))?;
    path.push(STATE_DIR_NAME);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::{ffi::OsString, path::PathBuf};

    use anyhow::Result;
    use tempfile::tempdir;

    use super::{platform_state_dir, state_dir};

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<OsString> {
        let pairs = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), OsString::from(v)))
            .collect::<Vec<_>>();
        move |name| {
            pairs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        }
    }

    #[test]
    fn test_explicit_dir_is_created() -> Result<()> {
        let dir = tempdir()?;
        let wanted = dir.path().join("nested").join("state");

        let path = state_dir(Some(wanted.clone()))?;

        assert_eq!(path, wanted);
        assert!(path.is_dir());
        Ok(())
    }

    #[cfg(not(windows))]
    #[test]
    fn test_xdg_state_home_is_preferred() -> Result<()> {
        let path = platform_state_dir(env(&[("XDG_STATE_HOME", "/xdg"), ("HOME", "/home/u")]))?;
        assert_eq!(path, PathBuf::from("/xdg/screentime"));
        Ok(())
    }

    #[cfg(not(windows))]
    #[test]
    fn test_home_is_used_without_xdg() -> Result<()> {
        let path = platform_state_dir(env(&[("XDG_STATE_HOME", ""), ("HOME", "/home/u")]))?;
        assert_eq!(path, PathBuf::from("/home/u/.local/state/screentime"));
        Ok(())
    }

    #[test]
    fn test_missing_environment_is_an_error() {
        assert!(platform_state_dir(env(&[])).is_err());
    }
}
