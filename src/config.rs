//! Configuration management for Mega Zap

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::models::PipelineVariant;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

/// Postal address of the publisher
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AddressConfig {
    pub delivery_point: String,
    pub city: String,
    pub administrative_area: String,
    pub postal_code: String,
    pub country: String,
}

/// Online resource (link) as it appears in distribution entries
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ResourceConfig {
    pub href: String,
    pub title: String,
    pub description: String,
    pub function: String,
}

/// Publisher written as the sole distributor of every processed record
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PublisherConfig {
    pub name: String,
    pub href: String,
    pub href_title: String,
    pub phone: String,
    pub email: String,
    pub address: AddressConfig,
    pub website: ResourceConfig,
    pub ordering: ResourceConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Record revision processed when a request does not name one
    pub variant: PipelineVariant,
    /// Contacts with this email are always given the `author` role
    pub maintainer_email: String,
    /// Base of the per-item landing page, `<base>/<file_identifier>`
    pub item_base_url: String,
    pub item_namespace: String,
    pub initiative_type: String,
    /// Hierarchy level given to the series record
    pub hierarchy_level: String,
    pub publisher: PublisherConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix MEGAZAP_), e.g. MEGAZAP_SERVER__PORT
            .add_source(
                Environment::with_prefix("MEGAZAP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Override port from PORT env var if present
            .set_override_option("server.port", env::var("PORT").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            name: "Mapping and Geographic Information Centre, British Antarctic Survey".to_string(),
            href: "https://ror.org/01rhff309".to_string(),
            href_title: "ror".to_string(),
            phone: "+44 (0)1223 221400".to_string(),
            email: "magic@bas.ac.uk".to_string(),
            address: AddressConfig {
                delivery_point: "British Antarctic Survey, High Cross, Madingley Road".to_string(),
                city: "Cambridge".to_string(),
                administrative_area: "Cambridgeshire".to_string(),
                postal_code: "CB3 0ET".to_string(),
                country: "United Kingdom".to_string(),
            },
            website: ResourceConfig {
                href: "https://www.bas.ac.uk/teams/magic".to_string(),
                title: "Mapping and Geographic Information Centre (MAGIC) - BAS public website"
                    .to_string(),
                description: "General information about the BAS Mapping and Geographic Information Centre (MAGIC) from the British Antarctic Survey (BAS) public website.".to_string(),
                function: "information".to_string(),
            },
            ordering: ResourceConfig {
                href: "https://www.bas.ac.uk/data/our-data/maps/how-to-order-a-map/".to_string(),
                title: "Map ordering information - BAS public website".to_string(),
                description: "Access information on how to order item.".to_string(),
                function: "order".to_string(),
            },
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            variant: PipelineVariant::default(),
            maintainer_email: "magic@bas.ac.uk".to_string(),
            item_base_url: "https://data.bas.ac.uk/items".to_string(),
            item_namespace: "data.bas.ac.uk".to_string(),
            initiative_type: "paperMap".to_string(),
            hierarchy_level: "paperMapProduct".to_string(),
            publisher: PublisherConfig::default(),
        }
    }
}
