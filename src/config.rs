use crate::domain::{Domain, DomainError, FieldType, IndexField};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Observability configuration
    pub observability: ObservabilityConfig,

    /// Search configuration
    pub search: SearchConfig,

    /// Domains served by this gateway, seeded at startup
    #[serde(default)]
    pub domains: Vec<DomainConfig>,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: CSG_)
            .add_source(
                config::Environment::with_prefix("CSG")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,

    /// Service name
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Field name substituted for unqualified simple-query terms when the
    /// domain configures no default search field
    #[serde(default = "default_fallback_search_field")]
    pub fallback_search_field: String,

    /// Default number of hits per page
    #[serde(default = "default_page_size")]
    pub default_size: usize,
}

/// A domain definition from the configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainConfig {
    pub name: String,

    /// Fixed domain id; generated when absent
    pub id: Option<String>,

    pub default_search_field: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    pub search: Option<bool>,
    pub facet: Option<bool>,
    pub result: Option<bool>,
}

impl DomainConfig {
    /// Build the domain this configuration entry describes.
    pub fn build(&self) -> Result<Domain, DomainError> {
        let mut domain = Domain::new(self.name.clone())?;
        if let Some(id) = &self.id {
            domain = domain.with_id(id.clone());
        }
        if let Some(field) = &self.default_search_field {
            domain = domain.with_default_search_field(field.clone());
        }
        for field_config in &self.fields {
            let mut field = IndexField::new(&field_config.name, field_config.field_type);
            if let Some(search) = field_config.search {
                field = field.with_search_enabled(search);
            }
            if let Some(facet) = field_config.facet {
                field = field.with_facet_enabled(facet);
            }
            if let Some(result) = field_config.result {
                field = field.with_result_enabled(result);
            }
            domain.define_field(field)?;
        }
        Ok(domain)
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "cloudsearch-gateway".to_string()
}

fn default_fallback_search_field() -> String {
    "label".to_string()
}

fn default_page_size() -> usize {
    10
}
