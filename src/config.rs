use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct LeafletConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Directory that `.cook` files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// List walker configuration
    #[serde(default)]
    pub listing: ListingConfig,
}

/// Configuration for walking a paginated recipe list
#[derive(Debug, Deserialize, Clone)]
pub struct ListingConfig {
    /// Delay between two list pages in milliseconds
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,
    /// Stop after this many pages
    #[serde(default)]
    pub max_pages: Option<usize>,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_delay_ms: default_page_delay_ms(),
            max_pages: None,
        }
    }
}

impl Default for LeafletConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            output_dir: default_output_dir(),
            listing: ListingConfig::default(),
        }
    }
}

// Default value functions
fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; LeafletBot/1.0)".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_page_delay_ms() -> u64 {
    5000
}

impl LeafletConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with LEAFLET__ prefix
    /// 2. leaflet.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: LEAFLET__LISTING__PAGE_DELAY_MS
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.listing.page_delay_ms)
    }
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<LeafletConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("leaflet").required(false))
        // Use double underscore for nested: LEAFLET__LISTING__MAX_PAGES
        .add_source(
            Environment::with_prefix("LEAFLET")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
