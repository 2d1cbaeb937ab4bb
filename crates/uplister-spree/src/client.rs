//! HTTP client for the storefront admin console.
//!
//! Drives the admin console with plain form posts: one login per run (the
//! cookie store carries the session), then one create (or update, on a
//! duplicate SKU) per product, followed by stock and property posts. Every
//! navigation goes through the linear-backoff retry in [`crate::retry`].

use std::time::Duration;

use reqwest::Client;

use uplister_core::{NormalizedProduct, Specification};

use crate::error::UploadError;
use crate::retry::retry_navigation;

/// Validation banner the admin console renders when a SKU already exists.
/// Its presence switches the driver from create to update.
pub(crate) const DUPLICATE_SKU_MARKER: &str = "has already been taken";

/// Banner rendered on a failed login.
const LOGIN_REJECTED_MARKER: &str = "Invalid email or password";

/// Outcome of a product-create post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateResponse {
    Created { resource_url: String },
    /// The destination already has this SKU; the caller should update
    /// the existing listing instead.
    DuplicateSku,
}

/// Form-level HTTP client for a Spree admin console.
#[derive(Debug)]
pub struct SpreeClient {
    client: Client,
    base_url: String,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl SpreeClient {
    /// Creates a client with configured timeout, `User-Agent`, retry policy,
    /// and a cookie store for the admin session.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::InvalidAdminUrl`] for a non-http(s) base URL
    /// and [`UploadError::Http`] if the underlying client cannot be built.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, UploadError> {
        let parsed = reqwest::Url::parse(base_url).map_err(|e| UploadError::InvalidAdminUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(UploadError::InvalidAdminUrl {
                url: base_url.to_owned(),
                reason: format!("unsupported scheme \"{}\"", parsed.scheme()),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            max_retries,
            backoff_base_ms,
        })
    }

    /// The underlying HTTP client, shared with image downloads.
    #[must_use]
    pub fn http(&self) -> &Client {
        &self.client
    }

    pub(crate) fn admin_url(&self, path: &str) -> String {
        format!("{}/admin{path}", self.base_url)
    }

    /// Authenticates the admin session. Must be called once before any
    /// product operation; the cookie store keeps the session afterwards.
    ///
    /// # Errors
    ///
    /// - [`UploadError::LoginRejected`]: credentials refused.
    /// - [`UploadError::UnexpectedStatus`] / [`UploadError::Http`]: after
    ///   retries are exhausted.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), UploadError> {
        let url = self.admin_url("/login");
        retry_navigation(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .post(&url)
                    .form(&[("spree_user[email]", email), ("spree_user[password]", password)])
                    .send()
                    .await?;
                let status = response.status();
                let body = response.text().await?;

                if body.contains(LOGIN_REJECTED_MARKER) {
                    return Err(UploadError::LoginRejected {
                        url,
                        reason: "credentials refused".to_string(),
                    });
                }
                if !status.is_success() {
                    return Err(UploadError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }
                Ok(())
            }
        })
        .await
    }

    /// Posts the new-product form.
    ///
    /// Returns [`CreateResponse::DuplicateSku`] when the console's
    /// validation banner reports the SKU as taken, so the caller can switch
    /// to the update path instead of failing the product.
    ///
    /// # Errors
    ///
    /// [`UploadError::UnexpectedStatus`] for non-2xx responses without the
    /// duplicate banner, [`UploadError::Http`] for transport failures.
    pub async fn create_product(
        &self,
        product: &NormalizedProduct,
        shipping_category_id: Option<&str>,
        sku_suffix: Option<&str>,
    ) -> Result<CreateResponse, UploadError> {
        let url = self.admin_url("/products");
        let form = product_form(product, shipping_category_id, sku_suffix);

        retry_navigation(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            let form = form.clone();
            async move {
                let response = self.client.post(&url).form(&form).send().await?;
                let status = response.status();
                let final_url = response.url().clone();
                let body = response.text().await?;

                if body.contains(DUPLICATE_SKU_MARKER) {
                    return Ok(CreateResponse::DuplicateSku);
                }
                if !status.is_success() {
                    return Err(UploadError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                // A successful create redirects to the product's admin page;
                // if the console didn't redirect, fall back to the slug path.
                let resource_url = if final_url.path().ends_with("/admin/products") {
                    self.admin_url(&format!("/products/{}/edit", product.slug))
                } else {
                    final_url.to_string()
                };
                Ok(CreateResponse::Created { resource_url })
            }
        })
        .await
    }

    /// Updates the existing listing that owns this product's SKU.
    ///
    /// Returns the listing's admin URL.
    ///
    /// # Errors
    ///
    /// [`UploadError::Rejected`] when the console still refuses the form,
    /// otherwise as [`Self::create_product`].
    pub async fn update_product(
        &self,
        product: &NormalizedProduct,
        shipping_category_id: Option<&str>,
        sku_suffix: Option<&str>,
    ) -> Result<String, UploadError> {
        let url = self.admin_url(&format!("/products/{}", product.slug));
        let form = product_form(product, shipping_category_id, sku_suffix);

        retry_navigation(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            let form = form.clone();
            async move {
                let response = self.client.put(&url).form(&form).send().await?;
                let status = response.status();
                let final_url = response.url().clone();
                let body = response.text().await?;

                if !status.is_success() {
                    return Err(UploadError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }
                if body.contains("error") && body.contains(DUPLICATE_SKU_MARKER) {
                    return Err(UploadError::Rejected {
                        sku: product.sku.clone(),
                        reason: "update rejected by validation".to_string(),
                    });
                }

                let resource_url = if final_url.path().ends_with(&format!(
                    "/admin/products/{}",
                    product.slug
                )) {
                    self.admin_url(&format!("/products/{}/edit", product.slug))
                } else {
                    final_url.to_string()
                };
                Ok(resource_url)
            }
        })
        .await
    }

    /// Sets the on-hand stock count for a listing.
    ///
    /// # Errors
    ///
    /// [`UploadError::UnexpectedStatus`] / [`UploadError::Http`] after
    /// retries are exhausted.
    pub async fn set_stock(&self, slug: &str, quantity: i64) -> Result<(), UploadError> {
        let url = self.admin_url(&format!("/products/{slug}/stock_items"));
        let quantity = quantity.to_string();
        retry_navigation(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            let quantity = quantity.clone();
            async move {
                let response = self
                    .client
                    .post(&url)
                    .form(&[("stock_movement[quantity]", quantity.as_str())])
                    .send()
                    .await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(UploadError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }
                Ok(())
            }
        })
        .await
    }

    /// Posts one product property per specification pair, in feed order.
    ///
    /// # Errors
    ///
    /// Stops at the first property that fails after retries.
    pub async fn set_properties(
        &self,
        slug: &str,
        specifications: &[Specification],
    ) -> Result<(), UploadError> {
        let url = self.admin_url(&format!("/products/{slug}/product_properties"));
        for spec in specifications {
            retry_navigation(self.max_retries, self.backoff_base_ms, || {
                let url = url.clone();
                async move {
                    let response = self
                        .client
                        .post(&url)
                        .form(&[
                            ("product_property[property_name]", spec.name.as_str()),
                            ("product_property[value]", spec.value.as_str()),
                        ])
                        .send()
                        .await?;
                    let status = response.status();
                    if !status.is_success() {
                        return Err(UploadError::UnexpectedStatus {
                            status: status.as_u16(),
                            url,
                        });
                    }
                    Ok(())
                }
            })
            .await?;
        }
        Ok(())
    }
}

/// Builds the product form fields shared by create and update.
///
/// The available-on date is set two days in the past so the listing is live
/// immediately, matching the back-office convention for imported products.
fn product_form(
    product: &NormalizedProduct,
    shipping_category_id: Option<&str>,
    sku_suffix: Option<&str>,
) -> Vec<(&'static str, String)> {
    let available_on = (chrono::Utc::now() - chrono::Duration::days(2))
        .format("%Y-%m-%d")
        .to_string();

    let mut form = vec![
        ("product[name]", product.title.clone()),
        ("product[sku]", product.submitted_sku(sku_suffix)),
        ("product[slug]", product.slug.clone()),
        ("product[price]", product.list_price.to_string()),
        ("product[cost_price]", product.cost_price.to_string()),
        (
            "product[compare_at_price]",
            product.compare_at_price.to_string(),
        ),
        ("product[description]", product.description.clone()),
        ("product[available_on]", available_on),
        (
            "product[meta_keywords]",
            product.taxon_keywords.join(", "),
        ),
    ];
    if let Some(id) = shipping_category_id {
        form.push(("product[shipping_category_id]", id.to_string()));
    }
    form
}

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;
