//! @ai:module:intent Configuration for scanning and deck export
//! @ai:module:layer infrastructure
//! @ai:module:public_api ExportConfig
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::header::DEFAULT_KEYWORD;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// @ai:intent Settings shared by the scanners, the assembler and the package writer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportConfig {
    #[serde(default = "default_keyword")]
    pub keyword: String,
    #[serde(default = "default_deck")]
    pub default_deck: String,
    #[serde(default = "default_package_name")]
    pub package_name: String,
    #[serde(default = "default_true")]
    pub align_content_left: bool,
    #[serde(default = "default_line_break")]
    pub line_break: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            keyword: default_keyword(),
            default_deck: default_deck(),
            package_name: default_package_name(),
            align_content_left: true,
            line_break: default_line_break(),
        }
    }
}

fn default_keyword() -> String {
    DEFAULT_KEYWORD.to_string()
}

fn default_deck() -> String {
    "Default".to_string()
}

fn default_package_name() -> String {
    "deck_package.json".to_string()
}

fn default_line_break() -> String {
    "<br>".to_string()
}

fn default_true() -> bool {
    true
}

impl ExportConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ExportConfig::default();
        assert_eq!(config.keyword, "anki");
        assert_eq!(config.default_deck, "Default");
        assert_eq!(config.package_name, "deck_package.json");
        assert!(config.align_content_left);
        assert_eq!(config.line_break, "<br>");
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("anki-md.toml");
        std::fs::write(&path, "keyword = \"card\"\nalign_content_left = false\n").unwrap();

        let config = ExportConfig::load(&path).unwrap();

        assert_eq!(config.keyword, "card");
        assert!(!config.align_content_left);
        assert_eq!(config.default_deck, "Default");
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("anki-md.toml");
        let config = ExportConfig {
            default_deck: "Rust::Basics".to_string(),
            ..Default::default()
        };

        config.save(&path).unwrap();

        assert_eq!(ExportConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.toml");
        std::fs::write(&path, "keyword = [").unwrap();

        let err = ExportConfig::load(&path).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }
}
