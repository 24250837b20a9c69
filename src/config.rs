use crate::builder::{BuildOptions, LabelMode};
use crate::relation::Palette;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RefgraphConfig {
    pub analysis: AnalysisConfig,
    pub palette: Palette,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Reject sources with syntax errors instead of analyzing the recovered tree
    pub strict: bool,
    pub label: LabelMode,
    pub excerpt_width: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let options = BuildOptions::default();
        Self {
            strict: true,
            label: options.labels,
            excerpt_width: options.excerpt_width,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 7878 }
    }
}

impl RefgraphConfig {
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            labels: self.analysis.label,
            excerpt_width: self.analysis.excerpt_width,
            palette: self.palette.clone(),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("refgraph.toml")
}

/// Load the config file, falling back to defaults when it does not exist
pub fn load_config(path: Option<&Path>) -> Result<RefgraphConfig> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(RefgraphConfig::default());
    }

    let contents = std::fs::read_to_string(&path)?;
    toml::from_str(&contents).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}

pub fn write_config(path: &Path, config: &RefgraphConfig, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::Config(format!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        )));
    }

    let contents = toml::to_string_pretty(config).map_err(|e| Error::Config(e.to_string()))?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(&dir.path().join("refgraph.toml"))).unwrap();
        assert_eq!(config, RefgraphConfig::default());
        assert!(config.analysis.strict);
        assert_eq!(config.server.port, 7878);
    }

    #[test]
    fn test_partial_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("refgraph.toml");
        std::fs::write(
            &path,
            "[analysis]\nlabel = \"excerpt\"\n\n[palette]\nreference = \"#ff0000\"\n",
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.analysis.label, LabelMode::Excerpt);
        assert!(config.analysis.strict);
        assert_eq!(config.palette.reference, "#ff0000");
        assert_eq!(config.palette.return_argument, "pink");

        let options = config.build_options();
        assert_eq!(options.labels, LabelMode::Excerpt);
        assert_eq!(options.palette.reference, "#ff0000");
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("refgraph.toml");
        std::fs::write(&path, "[analysis]\nstrict = \"sometimes\"\n").unwrap();

        assert!(matches!(load_config(Some(&path)), Err(Error::Config(_))));
    }

    #[test]
    fn test_write_config_roundtrip_and_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("refgraph.toml");
        let config = RefgraphConfig::default();

        write_config(&path, &config, false).unwrap();
        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &config, true).unwrap();

        assert_eq!(load_config(Some(&path)).unwrap(), config);
    }
}
