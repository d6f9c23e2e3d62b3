//! Configuration management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Feed filtering options
    #[serde(default)]
    pub filtering: FilteringConfig,

    /// Output options
    #[serde(default)]
    pub output: OutputConfig,
}

/// Feed filtering options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilteringConfig {
    /// Accept a feed entry only when its primary category matches the
    /// requested category exactly.
    #[serde(default)]
    pub force_primary: bool,
}

/// Output options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Verbose logging of unchanged feeds and skipped entries.
    #[serde(default)]
    pub debug_messages: bool,

    /// Directory the papers file is written into.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            debug_messages: false,
            path: default_output_path(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("./output")
}

/// Load configuration from a TOML file, with `ARXIV_HARVESTER_*`
/// environment variables overriding file values.
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(config::Environment::with_prefix("ARXIV_HARVESTER").separator("__"))
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.filtering.force_primary);
        assert!(!config.output.debug_messages);
        assert_eq!(config.output.path, PathBuf::from("./output"));
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let toml_content = r#"
[filtering]
force_primary = true

[output]
debug_messages = true
path = "/tmp/papers"
"#;
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(&path).unwrap();
        assert!(config.filtering.force_primary);
        assert!(config.output.debug_messages);
        assert_eq!(config.output.path, PathBuf::from("/tmp/papers"));
    }

    #[test]
    fn test_load_config_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[filtering]\nforce_primary = true\n").unwrap();

        let config = load_config(&path).unwrap();
        assert!(config.filtering.force_primary);
        assert!(!config.output.debug_messages);
        assert_eq!(config.output.path, PathBuf::from("./output"));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.toml");
        std::fs::write(&path, "invalid = toml = content").unwrap();

        assert!(load_config(&path).is_err());
    }
}
