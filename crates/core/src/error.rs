use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid response body: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("regex error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("backend answered {status}: {details}")]
    BackendResponse { status: u16, details: String },

    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("invalid postcode: {0:?}")]
    InvalidPostcode(String),

    #[error("invalid postcode or location not found: {0}")]
    UnknownPostcode(String),

    #[error("base url cannot carry path segments: {0}")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("record index {index} is out of range for {len} displayed records")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("filters applied before any postcode was searched")]
    NoPostcode,

    #[error(transparent)]
    Request(#[from] FetchError),
}

pub type Result<T, E = FetchError> = std::result::Result<T, E>;
