//! URL slug derivation for product admin paths.
//!
//! The feed titles are Turkish-market strings; the destination system only
//! accepts `[a-z0-9-]` path segments, so slugs transliterate the Turkish
//! alphabet rather than dropping those characters outright.

/// Derives the admin path segment for a product from its title and SKU.
#[must_use]
pub fn product_slug(title: &str, sku: &str) -> String {
    slugify(&format!("{title} {sku}"))
}

/// Converts an arbitrary title into a URL-safe slug.
///
/// Rules, in order:
/// 1. The literal substring `"%100"` (Turkish for "100%") becomes `"100"`.
/// 2. Turkish letters transliterate to their closest Latin equivalent
///    (ğ→g, ü→u, ş→s, ı→i, ö→o, ç→c, uppercase forms included).
/// 3. Everything is lowercased.
/// 4. Any run of characters outside `[a-z0-9]` collapses to one hyphen.
/// 5. Leading and trailing hyphens are trimmed.
///
/// Pure and deterministic: the same input yields the same slug every call.
#[must_use]
pub fn slugify(input: &str) -> String {
    let input = input.replace("%100", "100");
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for c in input.chars() {
        // The dotted capital İ lowercases to "i\u{307}" in Unicode, so the
        // Turkish set is mapped before the generic lowercasing.
        let mapped = match c {
            'ğ' | 'Ğ' => Some('g'),
            'ü' | 'Ü' => Some('u'),
            'ş' | 'Ş' => Some('s'),
            'ı' | 'İ' => Some('i'),
            'ö' | 'Ö' => Some('o'),
            'ç' | 'Ç' => Some('c'),
            _ => None,
        };

        match mapped {
            Some(m) => push_slug_char(&mut slug, m, &mut pending_hyphen),
            None => {
                for lc in c.to_lowercase() {
                    push_slug_char(&mut slug, lc, &mut pending_hyphen);
                }
            }
        }
    }

    slug
}

fn push_slug_char(slug: &mut String, c: char, pending_hyphen: &mut bool) {
    if c.is_ascii_alphanumeric() {
        if *pending_hyphen && !slug.is_empty() {
            slug.push('-');
        }
        *pending_hyphen = false;
        slug.push(c);
    } else {
        *pending_hyphen = true;
    }
}
