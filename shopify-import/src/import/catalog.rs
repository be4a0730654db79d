//! Storefront catalog products built from export rows
//!
//! One simplified product per handle for the `products` table. The category
//! and featured rules are plain substring checks whose keywords and fallbacks
//! come from [`CatalogDefaults`].

use serde::{Deserialize, Serialize};

use crate::import::{FieldKind, FieldWarning, RawRow, TypedRecord, Value};

/// Export columns read by the catalog builder
pub mod columns {
    pub const HANDLE: &str = "Handle";
    pub const TITLE: &str = "Title";
    pub const BODY_HTML: &str = "Body (HTML)";
    pub const VARIANT_PRICE: &str = "Variant Price";
    pub const IMAGE_SRC: &str = "Image Src";
    pub const TYPE: &str = "Type";
    pub const TAGS: &str = "Tags";
}

/// Fallback values and keyword rules for catalog products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogDefaults {
    /// Price used when the export row has none
    pub default_price: f64,
    /// Image used when the export row has none
    pub default_image_url: String,
    /// Tag (case-insensitive substring) that marks a product as featured
    pub featured_tag: String,
    /// Substring of `Type` (case-insensitive) selecting `matched_category`
    pub category_keyword: String,
    pub matched_category: String,
    pub fallback_category: String,
    /// Maximum description length in characters
    pub description_limit: usize,
}

impl Default for CatalogDefaults {
    fn default() -> Self {
        Self {
            default_price: 10.0,
            default_image_url: "https://images.unsplash.com/photo-1541599540903-216a46ca1dc0?auto=format&fit=crop&q=80&w=800".to_string(),
            featured_tag: "barkday".to_string(),
            category_keyword: "cake".to_string(),
            matched_category: "cake".to_string(),
            fallback_category: "treat".to_string(),
            description_limit: 500,
        }
    }
}

/// Non-empty trimmed column text
fn non_empty<'a>(row: &'a RawRow, column: &str) -> Option<&'a str> {
    row.text(column).map(str::trim).filter(|s| !s.is_empty())
}

/// Case-insensitive substring match; an empty needle matches nothing
fn mentions(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    !needle.is_empty() && haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Strip paragraph tags, turn line breaks into newlines, cut to `limit` chars
pub fn clean_description(html: &str, limit: usize) -> String {
    let text = html
        .replace("<p>", "")
        .replace("</p>", "")
        .replace("<br>", "\n");
    text.chars().take(limit).collect()
}

/// Build the catalog record for a row whose handle was already admitted
pub fn build_catalog_product(
    row: &RawRow,
    handle: &str,
    defaults: &CatalogDefaults,
) -> (TypedRecord, Vec<FieldWarning>) {
    let mut record = TypedRecord::new();
    let mut warnings = Vec::new();

    let name = non_empty(row, columns::TITLE).unwrap_or(handle);
    record.insert("name", Value::String(name.to_string()));

    let description = row
        .text(columns::BODY_HTML)
        .map(|html| clean_description(html, defaults.description_limit))
        .unwrap_or_default();
    record.insert("description", Value::String(description));

    let base_price = match non_empty(row, columns::VARIANT_PRICE) {
        None => defaults.default_price,
        Some(raw) => match raw.parse::<f64>() {
            Ok(price) if price.is_finite() => price,
            _ => {
                warnings.push(FieldWarning {
                    field: "base_price".to_string(),
                    raw: raw.to_string(),
                    kind: FieldKind::Numeric,
                });
                defaults.default_price
            }
        },
    };
    record.insert("base_price", Value::Float(base_price));

    let image_url = non_empty(row, columns::IMAGE_SRC)
        .unwrap_or(defaults.default_image_url.as_str());
    record.insert("image_url", Value::String(image_url.to_string()));

    let product_type = row.text(columns::TYPE).unwrap_or_default();
    let category = if mentions(product_type, &defaults.category_keyword) {
        &defaults.matched_category
    } else {
        &defaults.fallback_category
    };
    record.insert("category", Value::String(category.clone()));

    let tags = non_empty(row, columns::TAGS).unwrap_or_default();
    let featured = mentions(tags, &defaults.featured_tag);
    record.insert("is_featured", Value::Bool(featured));
    record.insert("tags", Value::String(tags.to_string()));

    (record, warnings)
}
