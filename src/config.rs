//! Editor configuration persistence
//!
//! Stores session policy in `~/.config/tagbuf/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::TagValidation;
use crate::codec::{CodecOptions, SerialForm};
use crate::error::ConfigError;

/// Tag editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEditorConfig {
    /// External form used to initialize and emit the buffer
    #[serde(default)]
    pub form: SerialForm,

    /// Trim surrounding whitespace of text entries when decoding the list
    /// form and when reconciling the surface
    #[serde(default)]
    pub trim_text: bool,

    /// Which identifiers may become tokens
    #[serde(default)]
    pub validation: TagValidation,

    /// Promote typed `{identifier}` text to tokens on reconcile, not only on load
    #[serde(default)]
    pub promote_typed_tokens: bool,

    /// Maximum number of undo steps
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_history_limit() -> usize {
    100
}

impl Default for TagEditorConfig {
    fn default() -> Self {
        Self {
            form: SerialForm::default(),
            trim_text: false,
            validation: TagValidation::default(),
            promote_typed_tokens: false,
            history_limit: default_history_limit(),
        }
    }
}

impl TagEditorConfig {
    /// Decoding policy derived from this config
    pub fn codec_options(&self) -> CodecOptions {
        CodecOptions {
            trim_text: self.trim_text,
            validation: self.validation,
            promote_typed_tokens: self.promote_typed_tokens,
        }
    }

    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = crate::config_paths::config_file().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save config to a specific file
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_yaml() {
        let config = TagEditorConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, TagEditorConfig::default());
        assert_eq!(config.history_limit, 100);
    }

    #[test]
    fn test_parse_all_fields() {
        let yaml = "form: list\n\
                    trim_text: true\n\
                    validation: any\n\
                    promote_typed_tokens: true\n\
                    history_limit: 5\n";
        let config = TagEditorConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.form, SerialForm::List);
        assert!(config.trim_text);
        assert_eq!(config.validation, TagValidation::Any);
        assert!(config.promote_typed_tokens);
        assert_eq!(config.history_limit, 5);

        let options = config.codec_options();
        assert!(options.trim_text);
        assert!(options.promote_typed_tokens);
    }

    #[test]
    fn test_rejects_unknown_form() {
        assert!(TagEditorConfig::from_yaml_str("form: html\n").is_err());
    }
}
