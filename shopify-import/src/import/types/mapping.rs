//! Field mapping definitions: source column -> destination column with a type tag

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Declared type of a destination field, driving value conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Trimmed text
    #[default]
    Text,
    /// "true" / "1" / "yes" (any case) -> true, anything else -> false
    Boolean,
    /// Integer, or float when the text contains a decimal point
    Numeric,
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::Boolean => write!(f, "boolean"),
            FieldKind::Numeric => write!(f, "numeric"),
        }
    }
}

/// A single source -> destination column pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Column header in the export file (e.g., "Variant Price")
    pub source: String,
    /// Column name in the destination table (e.g., "variant_price")
    pub target: String,
    /// Conversion applied to the raw cell
    #[serde(default)]
    pub kind: FieldKind,
}

impl FieldRule {
    pub fn new(source: impl Into<String>, target: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
        }
    }
}

/// Error when building a field mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// Mapping has no rules
    Empty,
    /// A source or target name is empty
    EmptyName,
    /// Source column mapped more than once
    DuplicateSource(String),
    /// Target column written by more than one rule
    DuplicateTarget(String),
}

impl std::fmt::Display for MappingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MappingError::Empty => write!(f, "field mapping contains no rules"),
            MappingError::EmptyName => write!(f, "field mapping contains an empty column name"),
            MappingError::DuplicateSource(name) => {
                write!(f, "source column '{}' is mapped more than once", name)
            }
            MappingError::DuplicateTarget(name) => {
                write!(f, "target column '{}' is mapped more than once", name)
            }
        }
    }
}

impl std::error::Error for MappingError {}

/// Validated mapping table, unique on both sides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    rules: Vec<FieldRule>,
}

/// On-disk form of a mapping file
///
/// ```toml
/// [[field]]
/// source = "Variant Price"
/// target = "variant_price"
/// kind = "numeric"
/// ```
#[derive(Debug, Deserialize, Serialize)]
struct MappingFile {
    #[serde(rename = "field", default)]
    fields: Vec<FieldRule>,
}

impl FieldMapping {
    /// Build a mapping, rejecting empty names and duplicates on either side
    pub fn new(rules: Vec<FieldRule>) -> Result<Self, MappingError> {
        if rules.is_empty() {
            return Err(MappingError::Empty);
        }

        let mut sources = HashSet::new();
        let mut targets = HashSet::new();
        for rule in &rules {
            if rule.source.trim().is_empty() || rule.target.trim().is_empty() {
                return Err(MappingError::EmptyName);
            }
            if !sources.insert(rule.source.as_str()) {
                return Err(MappingError::DuplicateSource(rule.source.clone()));
            }
            if !targets.insert(rule.target.as_str()) {
                return Err(MappingError::DuplicateTarget(rule.target.clone()));
            }
        }

        Ok(Self { rules })
    }

    /// Parse a mapping from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: MappingFile = toml::from_str(text).context("Failed to parse mapping file")?;
        Ok(Self::new(file.fields)?)
    }

    /// Load a mapping from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read mapping file: {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Invalid mapping file: {}", path.display()))
    }

    /// Serialize back to the TOML file format
    pub fn to_toml_string(&self) -> Result<String> {
        let file = MappingFile {
            fields: self.rules.clone(),
        };
        toml::to_string(&file).context("Failed to serialize mapping")
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[cfg(test)]
    /// Destination column names
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.target.as_str())
    }

    #[cfg(test)]
    /// Declared kind of a destination column
    pub fn kind_of(&self, target: &str) -> Option<FieldKind> {
        self.rules
            .iter()
            .find(|r| r.target == target)
            .map(|r| r.kind)
    }

    /// Mapping for the `shopify_products` table, one rule per export column
    pub fn shopify_products() -> Self {
        use FieldKind::{Boolean, Numeric, Text};

        const RULES: &[(&str, &str, FieldKind)] = &[
            ("Handle", "handle", Text),
            ("Title", "title", Text),
            ("Body (HTML)", "body_html", Text),
            ("Vendor", "vendor", Text),
            ("Product Category", "product_category", Text),
            ("Type", "type", Text),
            ("Tags", "tags", Text),
            ("Published", "published", Boolean),
            ("Option1 Name", "option1_name", Text),
            ("Option1 Value", "option1_value", Text),
            ("Option1 Linked To", "option1_linked_to", Text),
            ("Option2 Name", "option2_name", Text),
            ("Option2 Value", "option2_value", Text),
            ("Option2 Linked To", "option2_linked_to", Text),
            ("Option3 Name", "option3_name", Text),
            ("Option3 Value", "option3_value", Text),
            ("Option3 Linked To", "option3_linked_to", Text),
            ("Variant SKU", "variant_sku", Text),
            ("Variant Grams", "variant_grams", Numeric),
            ("Variant Inventory Tracker", "variant_inventory_tracker", Text),
            ("Variant Inventory Policy", "variant_inventory_policy", Text),
            ("Variant Fulfillment Service", "variant_fulfillment_service", Text),
            ("Variant Price", "variant_price", Numeric),
            ("Variant Compare At Price", "variant_compare_at_price", Numeric),
            ("Variant Requires Shipping", "variant_requires_shipping", Boolean),
            ("Variant Taxable", "variant_taxable", Boolean),
            ("Unit Price Total Measure", "unit_price_total_measure", Text),
            ("Unit Price Total Measure Unit", "unit_price_total_measure_unit", Text),
            ("Unit Price Base Measure", "unit_price_base_measure", Text),
            ("Unit Price Base Measure Unit", "unit_price_base_measure_unit", Text),
            ("Variant Barcode", "variant_barcode", Text),
            ("Image Src", "image_src", Text),
            ("Image Position", "image_position", Numeric),
            ("Image Alt Text", "image_alt_text", Text),
            ("Gift Card", "gift_card", Boolean),
            ("SEO Title", "seo_title", Text),
            ("SEO Description", "seo_description", Text),
            (
                "Dog age group (product.metafields.shopify.dog-age-group)",
                "dog_age_group",
                Text,
            ),
            (
                "Pet dietary requirements (product.metafields.shopify.pet-dietary-requirements)",
                "pet_dietary_requirements",
                Text,
            ),
            (
                "Pet food flavor (product.metafields.shopify.pet-food-flavor)",
                "pet_food_flavor",
                Text,
            ),
            (
                "Pet treat texture (product.metafields.shopify.pet-treat-texture)",
                "pet_treat_texture",
                Text,
            ),
            ("Variant Image", "variant_image", Text),
            ("Variant Weight Unit", "variant_weight_unit", Text),
            ("Variant Tax Code", "variant_tax_code", Text),
            ("Cost per item", "cost_per_item", Numeric),
            ("Status", "status", Text),
        ];

        Self {
            rules: RULES
                .iter()
                .map(|(source, target, kind)| FieldRule::new(*source, *target, *kind))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_mapping_is_valid() {
        let builtin = FieldMapping::shopify_products();
        let validated = FieldMapping::new(builtin.rules().to_vec()).unwrap();
        assert_eq!(validated.len(), 46);
    }

    #[test]
    fn test_builtin_kinds() {
        let mapping = FieldMapping::shopify_products();
        for target in ["published", "variant_requires_shipping", "variant_taxable", "gift_card"] {
            assert_eq!(mapping.kind_of(target), Some(FieldKind::Boolean), "{}", target);
        }
        for target in [
            "variant_grams",
            "variant_price",
            "variant_compare_at_price",
            "image_position",
            "cost_per_item",
        ] {
            assert_eq!(mapping.kind_of(target), Some(FieldKind::Numeric), "{}", target);
        }
        assert_eq!(mapping.kind_of("title"), Some(FieldKind::Text));
        assert_eq!(mapping.kind_of("unknown"), None);
    }

    #[test]
    fn test_rejects_duplicate_source() {
        let result = FieldMapping::new(vec![
            FieldRule::new("Title", "title", FieldKind::Text),
            FieldRule::new("Title", "name", FieldKind::Text),
        ]);
        assert_eq!(result, Err(MappingError::DuplicateSource("Title".into())));
    }

    #[test]
    fn test_rejects_duplicate_target() {
        let result = FieldMapping::new(vec![
            FieldRule::new("Title", "name", FieldKind::Text),
            FieldRule::new("Handle", "name", FieldKind::Text),
        ]);
        assert_eq!(result, Err(MappingError::DuplicateTarget("name".into())));
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(FieldMapping::new(vec![]), Err(MappingError::Empty));
        assert_eq!(
            FieldMapping::new(vec![FieldRule::new(" ", "name", FieldKind::Text)]),
            Err(MappingError::EmptyName)
        );
    }

    #[test]
    fn test_from_toml() {
        let text = r#"
            [[field]]
            source = "Handle"
            target = "handle"

            [[field]]
            source = "Variant Price"
            target = "price"
            kind = "numeric"
        "#;

        let mapping = FieldMapping::from_toml_str(text).unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.kind_of("handle"), Some(FieldKind::Text));
        assert_eq!(mapping.kind_of("price"), Some(FieldKind::Numeric));
    }

    #[test]
    fn test_from_toml_duplicate_is_error() {
        let text = r#"
            [[field]]
            source = "Handle"
            target = "handle"

            [[field]]
            source = "Title"
            target = "handle"
        "#;

        assert!(FieldMapping::from_toml_str(text).is_err());
    }

    #[test]
    fn test_toml_roundtrip_of_builtin() {
        let builtin = FieldMapping::shopify_products();
        let text = builtin.to_toml_string().unwrap();
        assert_eq!(FieldMapping::from_toml_str(&text).unwrap(), builtin);
    }
}
