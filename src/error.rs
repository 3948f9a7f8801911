use thiserror::Error as ThisError;

/// The error type returned by the router itself.
///
/// Handler errors never end up here: they keep the handler's own error type and are handed back to the
/// caller of [`Router::dispatch`](./struct.Router.html#method.dispatch) untouched.
#[derive(Debug, ThisError)]
pub enum Error {
    /// A route path could not be compiled into a matcher. This is a programming error in the route
    /// definition and should abort startup.
    ///
    /// Literal path parts are regex-escaped, so characters like `(` or `.` never cause it. In practice it means the
    /// compiled pattern went over the regex size limit.
    #[error("could not compile a matcher for the route path {path:?}: {source}")]
    InvalidPattern {
        path: String,
        #[source]
        source: regex::Error,
    },

    /// The request body could not be collected.
    #[error("could not read the request body: {0}")]
    Body(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A JSON payload could not be encoded or decoded.
    #[error("invalid json payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_pattern<P: Into<String>>(path: P, source: regex::Error) -> Self {
        Error::InvalidPattern {
            path: path.into(),
            source,
        }
    }
}
