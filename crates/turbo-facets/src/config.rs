//! Facet engine configuration.

use serde::{Deserialize, Serialize};

use crate::search::RATING_THRESHOLDS;
use crate::view::ViewMode;
use crate::FacetError;

/// Configuration for a listing page's facet engine.
///
/// Every field has a default, so an empty document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetsConfig {
    /// Key-value entry holding the view-mode preference.
    #[serde(default = "default_view_mode_key")]
    pub view_mode_key: String,

    /// View mode used when nothing valid is stored.
    #[serde(default)]
    pub default_view_mode: ViewMode,

    /// Brand values shown before the "show more" control.
    #[serde(default = "default_brand_facet_limit")]
    pub brand_facet_limit: usize,

    /// Thresholds offered by the rating facet, in display order.
    #[serde(default = "default_rating_thresholds")]
    pub rating_thresholds: Vec<u8>,

    /// Path fragment that marks a category listing page.
    #[serde(default = "default_listing_path_marker")]
    pub listing_path_marker: String,
}

fn default_view_mode_key() -> String {
    "products_view_mode".to_string()
}

fn default_brand_facet_limit() -> usize {
    10
}

fn default_rating_thresholds() -> Vec<u8> {
    vec![5, 4, 3, 2, 1]
}

fn default_listing_path_marker() -> String {
    "/category/".to_string()
}

impl Default for FacetsConfig {
    fn default() -> Self {
        Self {
            view_mode_key: default_view_mode_key(),
            default_view_mode: ViewMode::default(),
            brand_facet_limit: default_brand_facet_limit(),
            rating_thresholds: default_rating_thresholds(),
            listing_path_marker: default_listing_path_marker(),
        }
    }
}

impl FacetsConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, FacetError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, FacetError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a file, JSON when the path ends in `.json`, TOML otherwise.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &str) -> Result<Self, FacetError> {
        let content = std::fs::read_to_string(path).map_err(|source| FacetError::ConfigRead {
            path: path.to_string(),
            source,
        })?;

        if path.ends_with(".json") {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Reject values the engine can't work with.
    pub fn validate(&self) -> Result<(), FacetError> {
        if self.view_mode_key.trim().is_empty() {
            return Err(FacetError::InvalidConfig(
                "view_mode_key must not be empty".to_string(),
            ));
        }
        if let Some(bad) = self
            .rating_thresholds
            .iter()
            .find(|t| !RATING_THRESHOLDS.contains(*t))
        {
            return Err(FacetError::InvalidConfig(format!(
                "rating threshold {} outside 1..=5",
                bad
            )));
        }
        Ok(())
    }

    /// Check if a page is a category listing.
    ///
    /// Either the path carries the listing marker or the page already
    /// rendered a product-list container.
    pub fn is_listing_page(&self, path: &str, has_list_container: bool) -> bool {
        has_list_container
            || (!self.listing_path_marker.is_empty() && path.contains(&self.listing_path_marker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = FacetsConfig::from_toml_str("").unwrap();
        assert_eq!(config, FacetsConfig::default());
        assert_eq!(config.view_mode_key, "products_view_mode");
        assert_eq!(config.brand_facet_limit, 10);
    }

    #[test]
    fn test_toml_overrides() {
        let config = FacetsConfig::from_toml_str(
            r#"
            view_mode_key = "listing_view"
            default_view_mode = "list"
            rating_thresholds = [4, 3]
            "#,
        )
        .unwrap();
        assert_eq!(config.view_mode_key, "listing_view");
        assert_eq!(config.default_view_mode, ViewMode::List);
        assert_eq!(config.rating_thresholds, vec![4, 3]);
        assert_eq!(config.listing_path_marker, "/category/");
    }

    #[test]
    fn test_json_config() {
        let config = FacetsConfig::from_json_str(r#"{"brand_facet_limit": 4}"#).unwrap();
        assert_eq!(config.brand_facet_limit, 4);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            FacetsConfig::from_toml_str("view_mode_key = \"\""),
            Err(FacetError::InvalidConfig(_))
        ));
        assert!(matches!(
            FacetsConfig::from_toml_str("rating_thresholds = [6]"),
            Err(FacetError::InvalidConfig(msg)) if msg.contains('6')
        ));
        assert!(matches!(
            FacetsConfig::from_toml_str("default_view_mode = \"tiles\""),
            Err(FacetError::Toml(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            FacetsConfig::load("/nonexistent/facets.toml"),
            Err(FacetError::ConfigRead { .. })
        ));
    }

    #[test]
    fn test_listing_detection() {
        let config = FacetsConfig::default();
        assert!(config.is_listing_page("/category/shoes", false));
        assert!(config.is_listing_page("/search", true));
        assert!(!config.is_listing_page("/product/12", false));
    }
}
