pub mod client;
pub mod driver;
pub mod error;
pub mod images;
mod retry;

pub use client::{CreateResponse, SpreeClient};
pub use driver::{SpreeDriver, SubmissionDriver};
pub use error::UploadError;
pub use images::{download_images, DownloadedImage};
