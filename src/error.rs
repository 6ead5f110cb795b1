use thiserror::Error;

/// Failure talking to one of the remote HTTP APIs.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unexpected response shape: {0}")]
    Shape(String),
}

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("failed to fetch {url}: {source}")]
    ScheduleFetch {
        url: String,
        #[source]
        source: HttpError,
    },

    #[error("round {value:?} of {title} is not an integer")]
    RoundFormat { title: String, value: String },

    #[error("failed to submit {title}: {source}")]
    RemoteSubmission {
        title: String,
        #[source]
        source: HttpError,
    },

    #[error("configuration error: {0}")]
    Config(String),
}
