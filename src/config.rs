use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::web::DEFAULT_SCRIPT_FILTERS;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AbiscopeConfig {
    pub exports: Option<String>,
    pub scope_delimiter: Option<String>,
    pub script_filters: Option<Vec<String>>,
}

impl AbiscopeConfig {
    pub fn exports_dir(&self) -> PathBuf {
        PathBuf::from(self.exports.as_deref().unwrap_or("exports"))
    }

    pub fn scope_delimiter(&self) -> &str {
        self.scope_delimiter.as_deref().unwrap_or("const ")
    }

    pub fn script_filters(&self) -> Vec<String> {
        self.script_filters
            .clone()
            .unwrap_or_else(|| DEFAULT_SCRIPT_FILTERS.map(String::from).to_vec())
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("abiscope.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<AbiscopeConfig>> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: AbiscopeConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &AbiscopeConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abiscope.toml");
        assert!(load_config(Some(&path)).unwrap().is_none());
    }

    #[test]
    fn test_defaults() {
        let config = AbiscopeConfig::default();
        assert_eq!(config.exports_dir(), PathBuf::from("exports"));
        assert_eq!(config.scope_delimiter(), "const ");
        assert_eq!(config.script_filters(), vec!["index", "main"]);
    }

    #[test]
    fn test_write_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abiscope.toml");
        let config = AbiscopeConfig {
            exports: Some("out".to_string()),
            scope_delimiter: Some("var ".to_string()),
            script_filters: Some(vec!["bundle".to_string()]),
        };
        write_config(&path, &config, false).unwrap();
        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.exports_dir(), PathBuf::from("out"));
        assert_eq!(loaded.scope_delimiter(), "var ");
        assert_eq!(loaded.script_filters(), vec!["bundle"]);
    }

    #[test]
    fn test_write_refuses_to_clobber_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abiscope.toml");
        let config = AbiscopeConfig::default();
        write_config(&path, &config, false).unwrap();
        assert!(write_config(&path, &config, false).is_err());
        assert!(write_config(&path, &config, true).is_ok());
    }
}
