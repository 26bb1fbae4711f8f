use thiserror::Error;

/// Ошибки обращения к API магазина
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("cannot decode response of {url}: {message}. Response: {preview}")]
    Decode {
        url: String,
        message: String,
        preview: String,
    },

    #[error("HTTP client error: {0}")]
    Client(String),

    #[error("order source is not initialized")]
    NotInitialized,
}
