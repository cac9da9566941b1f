use reqwest::StatusCode;

/// Errors surfaced by the flow sheet data-access and activation paths.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("request to {url} failed with status {status}")]
    UnexpectedStatus { url: String, status: StatusCode },

    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no {0} parameters configured for this section")]
    MissingParams(&'static str),

    #[error("invalid service configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid base url: {0}")]
    BaseUrl(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
