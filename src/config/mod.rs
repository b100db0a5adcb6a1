//! Configuration loading and management

use crate::core::error::{ConfigError, Error};
use serde::{Deserialize, Serialize};

/// Configuration for the dashboard data layer
///
/// Every field has a default matching the product's current behavior, so
/// an empty config file (or none at all) is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Page size of the filtered invoices listing
    pub items_per_page: usize,

    /// How many invoices the "latest invoices" panel shows
    pub latest_invoices: usize,

    /// View path invalidated and redirected to after mutations
    pub invoices_path: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            items_per_page: 6,
            latest_invoices: 5,
            invoices_path: "/dashboard/invoices".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| {
            Error::Config(ConfigError::ParseError {
                file: Some(path.to_string()),
                message: e.to_string(),
            })
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, Error> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}
