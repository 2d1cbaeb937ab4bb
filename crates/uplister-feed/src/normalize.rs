//! Feed reading and record normalization.
//!
//! `read_feed` surfaces every failure mode as a distinct [`FeedError`];
//! `normalize_or_fallback` is the forgiving entry point the run loop uses:
//! it substitutes exactly one synthetic product when the feed is unusable
//! and reports the substitution instead of hiding it.

use std::path::Path;

use rand::Rng;
use rust_decimal::Decimal;

use uplister_core::{product_slug, NormalizedProduct, Specification};

use crate::error::FeedError;
use crate::placeholder;
use crate::pricing;
use crate::types::{RawProductRecord, StringOrList};

/// Signals that the feed was unusable and one synthetic product was
/// substituted. Carries the cause so callers can report it.
#[derive(Debug)]
pub struct FeedFallback {
    pub reason: FeedError,
}

/// Reads and decodes a feed file into raw records.
///
/// # Errors
///
/// - [`FeedError::Unreadable`]: missing file or I/O failure.
/// - [`FeedError::Malformed`]: the file is not valid JSON.
/// - [`FeedError::NotAnArray`]: the top level is not an array.
/// - [`FeedError::MalformedRecord`]: an element does not decode to a record.
/// - [`FeedError::Empty`]: the array holds zero records.
pub fn read_feed(path: &Path) -> Result<Vec<RawProductRecord>, FeedError> {
    let raw = std::fs::read_to_string(path).map_err(|source| FeedError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|source| FeedError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        _ => {
            return Err(FeedError::NotAnArray {
                path: path.to_path_buf(),
            })
        }
    };

    if items.is_empty() {
        return Err(FeedError::Empty {
            path: path.to_path_buf(),
        });
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|source| FeedError::MalformedRecord {
                path: path.to_path_buf(),
                index,
                source,
            })
        })
        .collect()
}

/// Normalizes raw records in order: N records in, N products out.
///
/// # Errors
///
/// Returns [`FeedError::InvalidExchangeRate`] for a non-positive rate; no
/// per-record failure exists; uninterpretable fields fall back to
/// placeholders or a zero base with a warning.
pub fn normalize_records<R: Rng + ?Sized>(
    records: Vec<RawProductRecord>,
    rate: Decimal,
    rng: &mut R,
) -> Result<Vec<NormalizedProduct>, FeedError> {
    if rate <= Decimal::ZERO {
        return Err(FeedError::InvalidExchangeRate { rate });
    }
    Ok(records
        .into_iter()
        .map(|record| normalize_record(record, rate, rng))
        .collect())
}

/// Normalizes a feed, substituting one synthetic product when the feed
/// cannot be used at all.
///
/// # Errors
///
/// Only [`FeedError::InvalidExchangeRate`]; feed failures are returned as a
/// [`FeedFallback`] alongside the synthetic product, never as an error.
pub fn normalize_or_fallback<R: Rng + ?Sized>(
    path: Option<&Path>,
    rate: Decimal,
    rng: &mut R,
) -> Result<(Vec<NormalizedProduct>, Option<FeedFallback>), FeedError> {
    if rate <= Decimal::ZERO {
        return Err(FeedError::InvalidExchangeRate { rate });
    }

    let records = match path.ok_or(FeedError::NoSource).and_then(read_feed) {
        Ok(records) => records,
        Err(reason) => {
            let synthetic = normalize_record(RawProductRecord::default(), rate, rng);
            return Ok((vec![synthetic], Some(FeedFallback { reason })));
        }
    };

    let products = normalize_records(records, rate, rng)?;
    Ok((products, None))
}

/// Normalizes one raw record. Infallible: every absent or uninterpretable
/// field gets a placeholder, and a bad price degrades to a zero base.
///
/// `rate` must already be validated positive by the caller.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // rating is clamped to [1, 5] before the cast
pub fn normalize_record<R: Rng + ?Sized>(
    raw: RawProductRecord,
    rate: Decimal,
    rng: &mut R,
) -> NormalizedProduct {
    let n = placeholder::placeholder_id(rng);

    let title = raw
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| placeholder::placeholder_title(n));
    let sku = raw
        .product_id
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| placeholder::placeholder_sku(n));
    let slug = product_slug(&title, &sku);

    let base = match raw.price.as_ref().and_then(crate::types::RawPrice::as_decimal) {
        Some(price) => match pricing::base_price(price, rate) {
            Ok(base) => base,
            Err(e) => {
                tracing::warn!(sku = %sku, error = %e, "bad feed price, using zero base");
                Decimal::ZERO
            }
        },
        None => {
            tracing::debug!(sku = %sku, "no feed price, using zero base");
            Decimal::ZERO
        }
    };
    let prices = pricing::derive_prices(base, rng);

    let description = raw
        .description
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| placeholder::PLACEHOLDER_DESCRIPTION.to_string());

    let images = raw.images.map(StringOrList::into_vec).unwrap_or_default();

    let taxon_keywords = select_taxon_keywords(
        raw.categories.map(StringOrList::into_vec).unwrap_or_default(),
        rng,
    );

    let specifications = raw
        .specifications
        .unwrap_or_default()
        .into_iter()
        .map(|s| Specification {
            name: s.name,
            value: s.value,
        })
        .collect();

    let stock_quantity = raw
        .stock_quantity
        .filter(|q| *q >= 0)
        .unwrap_or(placeholder::DEFAULT_STOCK_QUANTITY);

    let rating = match raw.rating {
        Some(r) => r.clamp(1.0, 5.0).round() as u8,
        None => placeholder::placeholder_rating(rng),
    };

    NormalizedProduct {
        title,
        sku,
        slug,
        list_price: prices.list_price,
        cost_price: prices.cost_price,
        compare_at_price: prices.compare_at_price,
        brand: raw.brand,
        source_url: raw.source_url,
        description,
        images,
        taxon_keywords,
        specifications,
        stock_quantity,
        rating,
    }
}

/// Keeps at most the first two supplied keywords; a record with none draws
/// two from the placeholder vocabulary, and a record with one is padded with
/// the literal defaults in order.
fn select_taxon_keywords<R: Rng + ?Sized>(supplied: Vec<String>, rng: &mut R) -> Vec<String> {
    if supplied.is_empty() {
        return placeholder::placeholder_keywords(rng);
    }
    let mut keywords = supplied;
    keywords.truncate(2);
    for default in placeholder::DEFAULT_TAXON_KEYWORDS {
        if keywords.len() >= 2 {
            break;
        }
        keywords.push(default.to_string());
    }
    keywords
}
