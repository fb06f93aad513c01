use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Unable to read dotenv file: {0}")]
    Dotenv(String),
    #[error(transparent)]
    TomlDeserialize(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerialize(#[from] toml::ser::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidRegex(#[from] regex::Error),
    #[error("Cannot ask an empty question")]
    EmptyQuery,

    // requests
    #[error(transparent)]
    Request(#[from] reqwest::Error),
    #[error("Request failed with unexpected status {0}")]
    UnexpectedStatus(u16),

    // backend
    #[error("This device is not paired with the backend")]
    NotPaired,
    #[error("No backend token is configured, set POLYMATH_BACKEND_TOKEN")]
    MissingBackendToken,
    #[error("No device uuid is configured, set POLYMATH_DEVICE_UUID")]
    MissingDeviceUuid,
}
