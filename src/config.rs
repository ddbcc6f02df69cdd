use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("megaverse"))
}

/// Resolved runtime configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub candidate_id: String,
    pub base_url: String,
}

/// On-disk config file (`~/.config/megaverse/config.json`).
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub candidate_id: Option<String>,
    pub base_url: Option<String>,
}

impl ConfigFile {
    /// Load config.json if present.
    pub fn load() -> Result<Option<Self>> {
        let path = config_dir()?.join("config.json");
        Self::load_from(&path)
    }

    fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        let file = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config format in {}", path.display()))?;
        Ok(Some(file))
    }
}

/// Resolve the runtime configuration.
///
/// Flags and environment (already merged by clap) win over the config
/// file; the base URL falls back to the public challenge API.
pub fn resolve(candidate_id: Option<String>, base_url: Option<String>) -> Result<Config> {
    let file = ConfigFile::load()?;
    resolve_with(candidate_id, base_url, file)
}

fn resolve_with(
    candidate_id: Option<String>,
    base_url: Option<String>,
    file: Option<ConfigFile>,
) -> Result<Config> {
    let file = file.unwrap_or_default();

    let Some(candidate_id) = candidate_id.or(file.candidate_id) else {
        bail!(
            "no candidate id configured.\n\n  Set one with:\n    export CM_CANDIDATE_ID=<your-id>\n    megaverse build --candidate-id <your-id>\n\n  Or add \"candidate_id\" to ~/.config/megaverse/config.json"
        );
    };

    let base_url = base_url
        .or(file.base_url)
        .unwrap_or_else(|| megakit::DEFAULT_BASE_URL.to_string());

    Ok(Config {
        candidate_id,
        base_url: base_url.trim_end_matches('/').to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_flag_wins_over_file() {
        let file = ConfigFile {
            candidate_id: Some("from-file".to_string()),
            base_url: None,
        };
        let config = resolve_with(Some("from-flag".to_string()), None, Some(file)).unwrap();
        assert_eq!(config.candidate_id, "from-flag");
        assert_eq!(config.base_url, megakit::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_resolve_falls_back_to_file() {
        let file = ConfigFile {
            candidate_id: Some("from-file".to_string()),
            base_url: Some("https://staging.example.com/".to_string()),
        };
        let config = resolve_with(None, None, Some(file)).unwrap();
        assert_eq!(config.candidate_id, "from-file");
        // Trailing slash is trimmed
        assert_eq!(config.base_url, "https://staging.example.com");
    }

    #[test]
    fn test_resolve_missing_candidate_id() {
        let result = resolve_with(None, None, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = ConfigFile::load_from(&dir.path().join("config.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"candidate_id": "abc", "base_url": null}"#).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap().unwrap();
        assert_eq!(loaded.candidate_id.as_deref(), Some("abc"));
        assert!(loaded.base_url.is_none());
    }

    #[test]
    fn test_load_from_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        assert!(ConfigFile::load_from(&path).is_err());
    }
}
