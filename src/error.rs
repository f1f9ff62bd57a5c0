use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProbeError>;

/// Failures that can occur while building or sending a probe, or while loading settings.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("request failed")]
    Transport(#[from] reqwest::Error),

    #[error("invalid header value for {name}")]
    InvalidHeader {
        name: &'static str,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },

    #[error("invalid url")]
    Url(#[from] url::ParseError),

    #[error("failed to read config file {path}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}
