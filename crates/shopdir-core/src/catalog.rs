//! Local shop catalog files.
//!
//! A catalog is either a bare list of shops or a `{ shops: [...] }` document,
//! in JSON or YAML. The format is chosen by file extension.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::shop::ShopRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    /// `.yaml` and `.yml` are YAML; anything else is read as JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Wrapped { shops: Vec<ShopRecord> },
    Bare(Vec<ShopRecord>),
}

impl CatalogDocument {
    fn into_shops(self) -> Vec<ShopRecord> {
        match self {
            Self::Wrapped { shops } | Self::Bare(shops) => shops,
        }
    }
}

/// Load and validate a catalog file.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Vec<ShopRecord>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let shops = parse_catalog(&content, CatalogFormat::from_path(path))?;
    tracing::debug!(path = %path.display(), count = shops.len(), "loaded shop catalog");
    Ok(shops)
}

/// Parse and validate catalog text.
///
/// # Errors
///
/// Returns [`ConfigError`] if the content cannot be parsed or fails validation.
pub fn parse_catalog(content: &str, format: CatalogFormat) -> Result<Vec<ShopRecord>, ConfigError> {
    let document: CatalogDocument = match format {
        CatalogFormat::Json => serde_json::from_str(content)?,
        CatalogFormat::Yaml => serde_yaml::from_str(content)?,
    };

    let shops = document.into_shops();
    validate_catalog(&shops)?;
    Ok(shops)
}

fn validate_catalog(shops: &[ShopRecord]) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for shop in shops {
        if shop.id.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "shop '{}' has an empty id",
                shop.name
            )));
        }

        if !seen_ids.insert(shop.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate shop id: '{}'",
                shop.id
            )));
        }
    }

    Ok(())
}
