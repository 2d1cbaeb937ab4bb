//! The submission seam between normalization and the admin console.
//!
//! The run loop only sees [`SubmissionDriver`], so tests drive it with a
//! double while production uses [`SpreeDriver`]: create → (on duplicate SKU)
//! update → stock → properties → images, reporting one outcome per product.

use uplister_core::{NormalizedProduct, SubmissionOutcome, SubmissionStatus};

use crate::client::{CreateResponse, SpreeClient};
use crate::error::UploadError;
use crate::images::download_images;

/// Accepts one normalized product at a time and reports its outcome.
#[allow(async_fn_in_trait)]
pub trait SubmissionDriver {
    /// Submits a single product. `Err` means the product failed; the caller
    /// records it and moves on; a failure must never abort the batch.
    async fn submit(&self, product: &NormalizedProduct) -> Result<SubmissionOutcome, UploadError>;
}

/// Production driver backed by [`SpreeClient`].
pub struct SpreeDriver {
    client: SpreeClient,
    shipping_category_id: Option<String>,
    sku_suffix: Option<String>,
    /// Image transfer can be disabled for dry-ish runs where only the
    /// listing data matters.
    transfer_images: bool,
}

impl SpreeDriver {
    #[must_use]
    pub fn new(
        client: SpreeClient,
        shipping_category_id: Option<String>,
        sku_suffix: Option<String>,
        transfer_images: bool,
    ) -> Self {
        Self {
            client,
            shipping_category_id,
            sku_suffix,
            transfer_images,
        }
    }

    /// Authenticates the underlying session once per run.
    ///
    /// # Errors
    ///
    /// Propagates [`SpreeClient::login`] failures; without a session no
    /// product can be submitted.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), UploadError> {
        self.client.login(email, password).await
    }

    async fn submit_inner(
        &self,
        product: &NormalizedProduct,
    ) -> Result<SubmissionOutcome, UploadError> {
        let shipping = self.shipping_category_id.as_deref();
        let suffix = self.sku_suffix.as_deref();

        let (status, resource_url) = match self
            .client
            .create_product(product, shipping, suffix)
            .await?
        {
            CreateResponse::Created { resource_url } => {
                (SubmissionStatus::Created, resource_url)
            }
            CreateResponse::DuplicateSku => {
                tracing::info!(
                    sku = %product.sku,
                    "SKU already listed, switching to update path"
                );
                let resource_url = self
                    .client
                    .update_product(product, shipping, suffix)
                    .await?;
                (SubmissionStatus::Updated, resource_url)
            }
        };

        // Follow-up steps refine an already-created listing; their failures
        // are logged but do not change the product's outcome.
        if let Err(e) = self.client.set_stock(&product.slug, product.stock_quantity).await {
            tracing::warn!(sku = %product.sku, error = %e, "stock update failed");
        }
        if !product.specifications.is_empty() {
            if let Err(e) = self
                .client
                .set_properties(&product.slug, &product.specifications)
                .await
            {
                tracing::warn!(sku = %product.sku, error = %e, "property upload failed");
            }
        }
        if self.transfer_images && product.has_images() {
            let images = download_images(self.client.http(), &product.images).await;
            let fetched = images.len();
            match self.client.upload_images(&product.slug, images).await {
                Ok(uploaded) => {
                    tracing::debug!(
                        sku = %product.sku,
                        fetched,
                        uploaded,
                        "image transfer finished"
                    );
                }
                Err(e) => {
                    tracing::warn!(sku = %product.sku, error = %e, "image upload failed");
                }
            }
        }

        Ok(SubmissionOutcome {
            status,
            resource_url: Some(resource_url),
        })
    }
}

impl SubmissionDriver for SpreeDriver {
    async fn submit(&self, product: &NormalizedProduct) -> Result<SubmissionOutcome, UploadError> {
        self.submit_inner(product).await
    }
}
