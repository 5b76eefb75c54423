use thiserror::Error;

/// Errors surfaced by the weather data client.
///
/// Every fetch either succeeds completely or fails with one of these;
/// no partial result is ever returned alongside an error.
#[derive(Debug, Error)]
pub enum Error {
    /// A required credential is missing. Raised before any request is sent.
    #[error("{0}")]
    Configuration(String),

    /// The city name was blank after trimming. Raised before any request
    /// is sent.
    #[error("city name must not be empty")]
    EmptyQuery,

    /// The provider answered with a non-success status, or with a body
    /// that does not match its documented shape. The message is taken
    /// verbatim from the provider's error body where available.
    #[error("{message}")]
    Provider { status: u16, message: String },

    /// Transport-level failure: the request produced no response at all.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl Error {
    /// City names that did not resolve come back as a provider 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Provider { status: 404, .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
