//! Bulk image transfer: concurrent download from the source CDN, multipart
//! upload to the listing.
//!
//! Downloads for one product fire all at once and fail independently; the
//! batch never aborts because a single URL is dead, and only the succeeded
//! subset is uploaded.

use futures::future::join_all;
use reqwest::multipart::{Form, Part};

use crate::client::SpreeClient;
use crate::error::UploadError;

/// One successfully downloaded image, ready for upload.
#[derive(Debug, Clone)]
pub struct DownloadedImage {
    pub url: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Downloads every URL concurrently, tolerating individual failures.
///
/// Returns only the subset that succeeded, in the order the URLs were given.
pub async fn download_images(client: &reqwest::Client, urls: &[String]) -> Vec<DownloadedImage> {
    let downloads = urls.iter().map(|url| async move {
        match download_one(client, url).await {
            Ok(image) => Some(image),
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "image download failed, skipping");
                None
            }
        }
    });
    join_all(downloads).await.into_iter().flatten().collect()
}

async fn download_one(client: &reqwest::Client, url: &str) -> Result<DownloadedImage, UploadError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(UploadError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }
    let bytes = response.bytes().await?.to_vec();
    Ok(DownloadedImage {
        url: url.to_owned(),
        file_name: file_name_from_url(url),
        bytes,
    })
}

/// Last path segment of the URL, or a fixed name when the URL has none.
fn file_name_from_url(url: &str) -> String {
    url.rsplit('/')
        .next()
        .map(|segment| segment.split(['?', '#']).next().unwrap_or(segment))
        .filter(|s| !s.is_empty())
        .unwrap_or("image.jpg")
        .to_string()
}

impl SpreeClient {
    /// Uploads each image to the listing's image endpoint, one multipart
    /// post per image. Returns the number uploaded.
    ///
    /// # Errors
    ///
    /// Stops at the first image the console refuses; earlier uploads stay.
    pub async fn upload_images(
        &self,
        slug: &str,
        images: Vec<DownloadedImage>,
    ) -> Result<usize, UploadError> {
        let url = self.admin_url(&format!("/products/{slug}/images"));
        let mut uploaded = 0usize;

        for image in images {
            let part = Part::bytes(image.bytes).file_name(image.file_name);
            let form = Form::new().part("image[attachment]", part);
            let response = self.http().post(&url).multipart(form).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(UploadError::UnexpectedStatus {
                    status: status.as_u16(),
                    url,
                });
            }
            uploaded += 1;
        }
        Ok(uploaded)
    }
}
