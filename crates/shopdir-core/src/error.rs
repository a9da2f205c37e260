use thiserror::Error;

/// Errors raised while interpreting shop data.
///
/// None of these abort a whole listing on their own: the nearby pipeline
/// skips the offending record and the caller decides what to show.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("invalid coordinate: lat={lat}, lon={lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("malformed schedule entry for {day}: {field}=\"{value}\" is not HH:MM")]
    MalformedScheduleEntry {
        day: String,
        field: &'static str,
        value: String,
    },

    #[error("shop {shop_id} has no usable location.coordinates")]
    MissingShopLocation { shop_id: String },

    #[error("invalid time context \"{0}\"; expected \"local\", \"utc\" or \"+HH:MM\"")]
    InvalidTimeContext(String),
}

/// Errors raised while loading configuration or a local shop catalog.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read shop catalog {path}: {source}")]
    CatalogIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON shop catalog: {0}")]
    CatalogJson(#[from] serde_json::Error),

    #[error("failed to parse YAML shop catalog: {0}")]
    CatalogYaml(#[from] serde_yaml::Error),

    #[error("shop catalog validation failed: {0}")]
    Validation(String),
}
