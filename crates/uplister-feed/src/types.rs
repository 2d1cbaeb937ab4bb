//! Raw feed record shapes.
//!
//! Feed exports vary across supplier tooling revisions: prices arrive as JSON
//! numbers or localized strings, image and category lists as arrays or
//! delimited strings, and most fields are simply absent. Deserialization is
//! tolerant here; [`crate::normalize`] fills the gaps.

use rust_decimal::Decimal;
use serde::Deserialize;

/// One loosely-typed product record as exported by the source marketplace.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawProductRecord {
    pub title: Option<String>,
    #[serde(alias = "sku")]
    pub product_id: Option<String>,
    pub price: Option<RawPrice>,
    pub brand: Option<String>,
    #[serde(alias = "url")]
    pub source_url: Option<String>,
    /// HTML fragment.
    pub description: Option<String>,
    pub images: Option<StringOrList>,
    #[serde(alias = "keywords")]
    pub categories: Option<StringOrList>,
    pub specifications: Option<Vec<RawSpecification>>,
    #[serde(alias = "stock")]
    pub stock_quantity: Option<i64>,
    pub rating: Option<f64>,
}

/// A price that may arrive as a JSON number or a localized string
/// (`39.99`, `"39.99"`, `"39,99"`, `"1.299,99 TL"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Number(f64),
    Text(String),
}

impl RawPrice {
    /// Interprets the raw value as a decimal amount.
    ///
    /// String inputs are stripped to their numeric core; when both `.` and
    /// `,` appear the `.` is a thousands separator (Turkish convention), and
    /// a lone `,` is a decimal comma. Returns `None` for unparsable input.
    #[must_use]
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            RawPrice::Number(v) => Decimal::from_f64_retain(*v),
            RawPrice::Text(s) => {
                let numeric: String = s
                    .chars()
                    .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
                    .collect();
                let normalized = if numeric.contains('.') && numeric.contains(',') {
                    numeric.replace('.', "").replace(',', ".")
                } else {
                    numeric.replace(',', ".")
                };
                normalized.parse().ok()
            }
        }
    }
}

/// A list that may arrive as a JSON array or one delimited string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    List(Vec<String>),
    Delimited(String),
}

impl StringOrList {
    /// Flattens into individual trimmed entries, splitting delimited strings
    /// on `,` and `;`. Empty entries are dropped; order is preserved.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            StringOrList::List(items) => items
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            StringOrList::Delimited(s) => s
                .split([',', ';'])
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// One `{name, value}` specification pair as exported by the source.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSpecification {
    pub name: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_deserializes_from_minimal_object() {
        let record: RawProductRecord = serde_json::from_str("{}").unwrap();
        assert!(record.title.is_none());
        assert!(record.price.is_none());
    }

    #[test]
    fn record_accepts_sku_alias_for_product_id() {
        let record: RawProductRecord =
            serde_json::from_str(r#"{"sku": "TRY-1", "title": "Comb"}"#).unwrap();
        assert_eq!(record.product_id.as_deref(), Some("TRY-1"));
    }

    #[test]
    fn record_price_as_number() {
        let record: RawProductRecord = serde_json::from_str(r#"{"price": 39.99}"#).unwrap();
        let price = record.price.unwrap().as_decimal().unwrap();
        assert_eq!(price, Decimal::new(3999, 2));
    }

    #[test]
    fn record_price_as_plain_string() {
        let price = RawPrice::Text("39.99".to_string());
        assert_eq!(price.as_decimal(), Some(Decimal::new(3999, 2)));
    }

    #[test]
    fn record_price_with_decimal_comma() {
        let price = RawPrice::Text("39,99".to_string());
        assert_eq!(price.as_decimal(), Some(Decimal::new(3999, 2)));
    }

    #[test]
    fn record_price_with_thousands_separator_and_currency() {
        let price = RawPrice::Text("1.299,99 TL".to_string());
        assert_eq!(price.as_decimal(), Some(Decimal::new(129_999, 2)));
    }

    #[test]
    fn record_price_unparsable_returns_none() {
        let price = RawPrice::Text("call us".to_string());
        assert!(price.as_decimal().is_none());
    }

    #[test]
    fn images_as_array() {
        let list: StringOrList = serde_json::from_str(r#"["a.jpg", "b.jpg"]"#).unwrap();
        assert_eq!(list.into_vec(), vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn images_as_delimited_string() {
        let list: StringOrList = serde_json::from_str(r#""a.jpg; b.jpg ;; c.jpg""#).unwrap();
        assert_eq!(list.into_vec(), vec!["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn categories_accept_keywords_alias() {
        let record: RawProductRecord =
            serde_json::from_str(r#"{"keywords": "Cosmetics, Hair Care"}"#).unwrap();
        assert_eq!(
            record.categories.unwrap().into_vec(),
            vec!["Cosmetics", "Hair Care"]
        );
    }

    #[test]
    fn specifications_parse_name_value_pairs() {
        let record: RawProductRecord = serde_json::from_str(
            r#"{"specifications": [{"name": "Color", "value": "Black"}]}"#,
        )
        .unwrap();
        let specs = record.specifications.unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].name, "Color");
        assert_eq!(specs[0].value, "Black");
    }
}
