use thiserror::Error;

/// Failures of the device address lookup.
#[derive(Error, Debug)]
pub enum DeviceAddressError {
    #[error("Device address permission has not been granted")]
    PermissionDenied,

    #[error("Device address API returned HTTP {status}")]
    Status { status: u16 },

    #[error("Device address request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Device address response could not be parsed: {message}")]
    Malformed { message: String },
}

/// Failures of the geocoding provider. Not found is kept apart from an
/// unavailable service even though both currently end up as a transient error.
#[derive(Error, Debug)]
pub enum GeocodingError {
    #[error("Address not found: {0}")]
    NotFound(String),

    #[error("Geocoding service unavailable: {0}")]
    Unavailable(String),

    #[error("Geocoding parse error: {0}")]
    ParseError(String),
}

/// Failures of the bike station data provider.
#[derive(Error, Debug)]
pub enum StationDataError {
    #[error("Station data request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Station data API returned HTTP {status}")]
    Status { status: u16 },

    #[error("Station data query returned errors: {message}")]
    Query { message: String },

    #[error("Station data parse error: {message}")]
    ParseError { message: String },
}

#[derive(Error, Debug)]
pub enum SkillError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid application id: {received}")]
    InvalidApplicationId { received: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error(transparent)]
    DeviceAddress(#[from] DeviceAddressError),

    #[error(transparent)]
    Geocoding(#[from] GeocodingError),

    #[error(transparent)]
    StationData(#[from] StationDataError),
}

impl SkillError {
    /// Upstream failures that a later invocation may not hit again.
    pub fn is_transient(&self) -> bool {
        match self {
            SkillError::ApiError(_) | SkillError::Geocoding(_) | SkillError::StationData(_) => true,
            SkillError::DeviceAddress(e) => !matches!(
                e,
                DeviceAddressError::PermissionDenied | DeviceAddressError::Malformed { .. }
            ),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, SkillError>;
