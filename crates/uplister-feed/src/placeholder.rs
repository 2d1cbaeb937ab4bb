//! Placeholder values for absent feed fields.
//!
//! Every draw goes through the injected `Rng`, so a seeded run produces the
//! same placeholders every time.

use rand::Rng;

/// Fixed HTML snippet used when a record carries no description.
pub const PLACEHOLDER_DESCRIPTION: &str =
    "<p>Imported product. Description will be updated shortly.</p>";

/// Small vocabulary for placeholder taxon keywords.
pub const TAXON_VOCABULARY: &[&str] = &["Electronics", "Home", "Beauty", "Toys", "Sports"];

/// Literal padding used when a record supplies fewer than two keywords.
pub const DEFAULT_TAXON_KEYWORDS: [&str; 2] = ["General", "Product"];

pub const DEFAULT_STOCK_QUANTITY: i64 = 100;

/// Draws the shared placeholder id `n` in [0, 10000) used for both the
/// `"Test Product {n}"` title and the `"TEST{n}"` SKU, so the pair stays
/// self-consistent within a record.
pub fn placeholder_id<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.random_range(0..10_000)
}

#[must_use]
pub fn placeholder_title(n: u32) -> String {
    format!("Test Product {n}")
}

#[must_use]
pub fn placeholder_sku(n: u32) -> String {
    format!("TEST{n}")
}

pub fn placeholder_rating<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.random_range(1..=5)
}

/// Draws two distinct keywords from the fixed vocabulary.
pub fn placeholder_keywords<R: Rng + ?Sized>(rng: &mut R) -> Vec<String> {
    let first = rng.random_range(0..TAXON_VOCABULARY.len());
    let mut second = rng.random_range(0..TAXON_VOCABULARY.len() - 1);
    if second >= first {
        second += 1;
    }
    vec![
        TAXON_VOCABULARY[first].to_string(),
        TAXON_VOCABULARY[second].to_string(),
    ]
}
