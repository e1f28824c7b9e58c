use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use featex::jobs::JobSpec;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub destination: DestinationConfig,
    /// Jobs to run; the built-in jobs when empty
    #[serde(default)]
    pub jobs: Vec<JobSpec>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    Directory { path: PathBuf },
    Remote { url: String },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Directory {
            path: PathBuf::from("data"),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DestinationConfig {
    Directory { path: PathBuf },
    Remote { url: String },
}

impl Default for DestinationConfig {
    fn default() -> Self {
        DestinationConfig::Directory {
            path: PathBuf::from("exports"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            destination: DestinationConfig::default(),
            jobs: Vec::new(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config file")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use featex::export::ExportFormat;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.source, SourceConfig::default());
        assert_eq!(config.destination, DestinationConfig::default());
        assert!(config.jobs.is_empty());
    }

    #[test]
    fn test_full_config() {
        let config = Config::parse(
            r#"
            [source]
            kind = "remote"
            url = "https://features.example.com/"

            [destination]
            kind = "directory"
            path = "/tmp/exports"

            [[jobs]]
            name = "bay_area"
            dataset = "FAO/GAUL/2015/level2"
            format = "csv"
            selectors = ["ADM2_NAME"]
            folder = "norcal"

            [jobs.filter]
            op = "in"
            field = "ADM2_NAME"
            values = ["Alameda", "Marin", "Alameda"]
            "#,
        )
        .unwrap();

        assert_eq!(
            config.source,
            SourceConfig::Remote {
                url: "https://features.example.com/".to_string()
            }
        );
        assert_eq!(config.jobs.len(), 1);
        assert_eq!(config.jobs[0].format, ExportFormat::Csv);
        assert_eq!(config.jobs[0].folder.as_deref(), Some("norcal"));
    }

    #[test]
    fn test_unknown_source_kind_rejected() {
        assert!(Config::parse("[source]\nkind = \"bucket\"\npath = \"x\"").is_err());
    }
}
