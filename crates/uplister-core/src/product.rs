use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A feed record normalized for submission to the storefront back office.
///
/// Constructed exactly once per raw record and handed to the submission
/// driver unchanged; it has no identity beyond that single attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedProduct {
    pub title: String,
    /// Uniqueness key in the destination system (before any supplier suffix).
    pub sku: String,
    /// URL path segment derived from title and SKU.
    pub slug: String,
    /// The master/sale price shown to buyers.
    pub list_price: Decimal,
    /// Internal cost: the raw feed price converted to the reference currency.
    pub cost_price: Decimal,
    /// Struck-through reference price: list price plus a randomized markup.
    pub compare_at_price: Decimal,
    pub brand: Option<String>,
    pub source_url: Option<String>,
    /// Raw HTML fragment.
    pub description: String,
    /// Image URLs in feed order.
    pub images: Vec<String>,
    /// Exactly two entries after padding; matched against the taxonomy tree.
    pub taxon_keywords: Vec<String>,
    pub specifications: Vec<Specification>,
    pub stock_quantity: i64,
    /// Display rating in [1, 5].
    pub rating: u8,
}

impl NormalizedProduct {
    /// Returns the first taxon keyword, the primary category for submission.
    #[must_use]
    pub fn primary_taxon(&self) -> Option<&str> {
        self.taxon_keywords.first().map(String::as_str)
    }

    #[must_use]
    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }

    /// The SKU as submitted: the feed SKU plus an optional supplier marker.
    #[must_use]
    pub fn submitted_sku(&self, suffix: Option<&str>) -> String {
        match suffix {
            Some(s) => format!("{} {s}", self.sku),
            None => self.sku.clone(),
        }
    }
}

/// One `{name, value}` product property pair from the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specification {
    pub name: String,
    pub value: String,
}

/// Per-product outcome reported by the submission driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Created,
    Updated,
    Failed,
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Created => write!(f, "created"),
            SubmissionStatus::Updated => write!(f, "updated"),
            SubmissionStatus::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    pub status: SubmissionStatus,
    /// Admin URL of the created or updated listing, absent on failure.
    pub resource_url: Option<String>,
}

impl SubmissionOutcome {
    #[must_use]
    pub fn failed() -> Self {
        SubmissionOutcome {
            status: SubmissionStatus::Failed,
            resource_url: None,
        }
    }
}
