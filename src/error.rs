/// Everything that can go wrong on the fallible paths of the crate
///
/// Awaiting a [crate::client::Route] never produces one of these; they are only surfaced by
/// [crate::client::Route::send] and the configuration helpers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never completed an HTTP exchange (connection, TLS, timeout, body read)
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// The response body could not be decoded as the expected shape
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("API key must be set either via argument or GEMINI_API_KEY environment variable")]
    MissingApiKey,
    #[error("unrecognized {kind} `{value}`")]
    UnknownVariant { kind: &'static str, value: String },
}
