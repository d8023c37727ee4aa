use thiserror::Error;

/// Errors that can occur while scraping, annotating or writing a recipe
#[derive(Error, Debug)]
pub enum LeafletError {
    /// Failed to fetch a page from a URL
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// No extractor could read a recipe from the page
    #[error("The domain is currently not supported, {domain}")]
    UnsupportedSource { domain: String },

    /// Failed to parse a page or list response
    #[error("Failed to parse recipe: {0}")]
    ParseError(String),

    /// A required recipe field was missing or empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Error parsing HTTP headers
    #[error("Header parse error: {0}")]
    HeaderError(#[from] reqwest::header::InvalidHeaderValue),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Failed to read or write a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid JSON input
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl LeafletError {
    /// Whether a batch should skip this item and continue
    pub fn is_item_level(&self) -> bool {
        matches!(
            self,
            LeafletError::UnsupportedSource { .. }
                | LeafletError::ParseError(_)
                | LeafletError::MissingField(_)
                | LeafletError::FetchError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_source_message() {
        let err = LeafletError::UnsupportedSource {
            domain: "example.com".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "The domain is currently not supported, example.com"
        );
        assert!(err.is_item_level());
    }

    #[test]
    fn test_builder_error_is_not_item_level() {
        let err = LeafletError::BuilderError("no source".to_string());
        assert!(!err.is_item_level());
    }
}
