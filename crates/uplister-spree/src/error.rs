use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("login at {url} rejected: {reason}")]
    LoginRejected { url: String, reason: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid admin base URL \"{url}\": {reason}")]
    InvalidAdminUrl { url: String, reason: String },

    #[error("admin console rejected {sku}: {reason}")]
    Rejected { sku: String, reason: String },
}
