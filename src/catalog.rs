//! Token catalog: identifier to display label mapping.
//!
//! The catalog is owned by the presentation layer. The buffer only consults
//! it to look up labels and to decide whether an identifier may become a token.
//!
//! Catalog files are flat YAML maps:
//!
//! ```yaml
//! first_name: First name
//! gift: Gift card
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::editable::TokenId;
use crate::error::ConfigError;

/// Mapping from token identifier to display label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagCatalog {
    labels: BTreeMap<TokenId, String>,
}

impl TagCatalog {
    pub fn new() -> Self {
        Self {
            labels: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, id: impl Into<TokenId>, label: impl Into<String>) {
        self.labels.insert(id.into(), label.into());
    }

    pub fn label(&self, id: &str) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.labels.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Entries in identifier order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.labels.iter().map(|(id, label)| (id.as_str(), label.as_str()))
    }

    /// Parse a catalog from a YAML map
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a catalog from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_yaml_str(&content)?;
        tracing::info!("Loaded {} catalog entries from {}", catalog.len(), path.display());
        Ok(catalog)
    }
}

impl<K, V> FromIterator<(K, V)> for TagCatalog
where
    K: Into<TokenId>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            labels: iter
                .into_iter()
                .map(|(id, label)| (id.into(), label.into()))
                .collect(),
        }
    }
}

/// Policy deciding which identifiers may become tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagValidation {
    /// Any identifier is accepted
    Any,
    /// Only identifiers present in the catalog are accepted
    #[default]
    Catalog,
}

impl TagValidation {
    /// Check whether `id` may become a token
    pub fn accepts(self, id: &str, catalog: &TagCatalog) -> bool {
        match self {
            TagValidation::Any => true,
            TagValidation::Catalog => catalog.contains(id),
        }
    }
}

/// Whether `id` can be written as `{id}` and read back as the same token
pub fn is_bracketable(id: &str) -> bool {
    !id.is_empty() && !id.contains('}')
}
