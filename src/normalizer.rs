//! Attribute normalization: one [`RawListing`] in, one [`NormalizedListing`] out.
//!
//! Every field has a fallback, so `normalize` is total and never fails. Attribute
//! lookups are driven by [`FIELD_RULES`]; adding a synonym for a field means adding
//! a substring there.

use crate::model::{NormalizedListing, RawAttribute, RawListing};
use crate::utils::to_snake_key;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::debug;

/// Words of the description kept in the title.
pub const TITLE_WORD_LIMIT: usize = 6;

pub const UNTITLED: &str = "Untitled Product";
pub const UNCATEGORIZED: &str = "Uncategorized";
pub const DEFAULT_CONDITION: &str = "Good";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Price,
    Category,
    Brand,
    Condition,
}

/// Lower-case substrings that identify an attribute name as carrying a field.
pub const FIELD_RULES: &[(Field, &[&str])] = &[
    (Field::Price, &["price", "cost"]),
    (Field::Category, &["category", "style", "type", "department"]),
    (Field::Brand, &["brand"]),
    (Field::Condition, &["condition", "vintage"]),
];

// Thousands-grouped amounts first so "1,500" is not read as "1".
static ATTRIBUTE_PRICE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{1,3}(?:,\d{3})+(?:\.\d{1,2})?|\d+(?:\.\d{1,2})?")
        .expect("valid price regex")
});

static DESCRIPTION_PRICE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:[₦$€£]\s*)?(\d{1,3}(?:,\d{3})+(?:\.\d{1,2})?|\d+(?:\.\d{1,2})?)")
        .expect("valid description price regex")
});

pub fn normalize(raw: &RawListing) -> NormalizedListing {
    let displayable = displayable_attributes(&raw.attributes);

    let listing = NormalizedListing {
        title: extract_title(raw.description.as_deref()),
        price: extract_price(raw),
        category: find_attribute(&raw.attributes, Field::Category)
            .unwrap_or(UNCATEGORIZED)
            .to_string(),
        brand: find_attribute(&raw.attributes, Field::Brand).map(str::to_string),
        condition: find_attribute(&raw.attributes, Field::Condition)
            .unwrap_or(DEFAULT_CONDITION)
            .to_string(),
        tags: build_tags(&displayable),
        specifications: build_specifications(&displayable),
    };

    debug!(
        "Normalized '{}' | price={} | category={}",
        listing.title, listing.price, listing.category
    );
    listing
}

pub fn normalize_all(raws: &[RawListing]) -> Vec<NormalizedListing> {
    raws.iter().map(normalize).collect()
}

fn extract_title(description: Option<&str>) -> String {
    let words: Vec<&str> = description
        .map(|d| d.split_whitespace().collect())
        .unwrap_or_default();

    if words.is_empty() {
        return UNTITLED.to_string();
    }

    let mut title = words[..words.len().min(TITLE_WORD_LIMIT)].join(" ");
    if words.len() > TITLE_WORD_LIMIT {
        title.push_str("...");
    }
    title
}

fn extract_price(raw: &RawListing) -> f64 {
    let from_attribute = first_named(&raw.attributes, Field::Price)
        .and_then(|attr| attr.value.as_deref())
        .and_then(|value| ATTRIBUTE_PRICE.find(value))
        .and_then(|m| parse_amount(m.as_str()));

    let from_description = || {
        raw.description
            .as_deref()
            .and_then(|d| DESCRIPTION_PRICE.captures(d))
            .and_then(|c| c.get(1))
            .and_then(|m| parse_amount(m.as_str()))
    };

    from_attribute.or_else(from_description).unwrap_or(0.0)
}

fn parse_amount(text: &str) -> Option<f64> {
    text.replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
}

fn matches_field(attr: &RawAttribute, field: Field) -> bool {
    let name = attr.name().to_lowercase();
    FIELD_RULES
        .iter()
        .filter(|(f, _)| *f == field)
        .flat_map(|(_, needles)| needles.iter())
        .any(|needle| name.contains(needle))
}

/// First attribute whose name matches `field`, whatever its value.
fn first_named(attributes: &[RawAttribute], field: Field) -> Option<&RawAttribute> {
    attributes.iter().find(|attr| matches_field(attr, field))
}

/// Value of the first attribute whose name matches `field` and whose value is
/// not blank.
pub fn find_attribute(attributes: &[RawAttribute], field: Field) -> Option<&str> {
    attributes
        .iter()
        .filter(|attr| matches_field(attr, field))
        .find_map(RawAttribute::displayable_value)
}

/// Attributes that carry a non-blank value, in original order.
pub fn displayable_attributes(attributes: &[RawAttribute]) -> Vec<RawAttribute> {
    attributes
        .iter()
        .filter(|attr| attr.displayable_value().is_some())
        .cloned()
        .collect()
}

fn build_tags(displayable: &[RawAttribute]) -> Vec<String> {
    displayable
        .iter()
        .filter_map(|attr| attr.value.clone())
        .collect()
}

fn build_specifications(displayable: &[RawAttribute]) -> BTreeMap<String, String> {
    let mut specs = BTreeMap::new();
    for attr in displayable {
        if let Some(value) = &attr.value {
            specs.insert(to_snake_key(attr.name()), value.clone());
        }
    }
    specs
}
