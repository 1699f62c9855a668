// Core structs: RawListing, NormalizedListing and the shell error types
use crate::utils::{
    first_filled, first_non_empty, lenient_id, lenient_list, lenient_opt, lenient_string,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Listing record as handed over by the upstream API, after shape adaptation.
///
/// Every field is optional. Fields of the wrong JSON type deserialize as absent,
/// so a `RawListing` can be built from any JSON object. When the upstream sends
/// the same field under several spellings, the first non-empty one wins.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "ListingWire")]
pub struct RawListing {
    pub id: Option<String>,
    pub description: Option<String>,
    pub attributes: Vec<RawAttribute>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub media: Vec<RawMedia>,
    pub seller: Option<RawSeller>,
}

impl RawListing {
    /// Adapts an arbitrary JSON document. Non-objects yield an empty listing.
    pub fn from_json(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

// Each spelling the upstream uses gets its own slot; serde aliases would reject
// an object carrying two of them.
#[derive(Default, Deserialize)]
#[serde(default)]
struct ListingWire {
    #[serde(deserialize_with = "lenient_id")]
    id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    description: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    attributes: Vec<RawAttribute>,
    #[serde(deserialize_with = "lenient_list")]
    aspects: Vec<RawAttribute>,
    #[serde(deserialize_with = "lenient_list")]
    listing_aspects: Vec<RawAttribute>,
    #[serde(rename = "createdAt", deserialize_with = "lenient_string")]
    created_at_camel: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    created_at: Option<String>,
    #[serde(rename = "updatedAt", deserialize_with = "lenient_string")]
    updated_at_camel: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    updated_at: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    media: Vec<RawMedia>,
    #[serde(deserialize_with = "lenient_list")]
    listing_media: Vec<RawMedia>,
    #[serde(deserialize_with = "lenient_opt")]
    seller: Option<RawSeller>,
    #[serde(deserialize_with = "lenient_opt")]
    author: Option<RawSeller>,
}

impl From<ListingWire> for RawListing {
    fn from(w: ListingWire) -> Self {
        Self {
            id: w.id,
            description: w.description,
            attributes: first_non_empty([w.attributes, w.aspects, w.listing_aspects]),
            created_at: first_filled([w.created_at_camel, w.created_at]),
            updated_at: first_filled([w.updated_at_camel, w.updated_at]),
            media: first_non_empty([w.media, w.listing_media]),
            seller: w.seller.or(w.author),
        }
    }
}

/// One free-text name/value "aspect".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "AttributeWire")]
pub struct RawAttribute {
    pub name: Option<String>,
    pub value: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct AttributeWire {
    #[serde(deserialize_with = "lenient_string")]
    name: Option<String>,
    #[serde(rename = "aspectName", deserialize_with = "lenient_string")]
    aspect_name_camel: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    aspect_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    value: Option<String>,
    #[serde(rename = "aspectValue", deserialize_with = "lenient_string")]
    aspect_value_camel: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    aspect_value: Option<String>,
}

impl From<AttributeWire> for RawAttribute {
    fn from(w: AttributeWire) -> Self {
        Self {
            name: first_filled([w.name, w.aspect_name_camel, w.aspect_name]),
            value: first_filled([w.value, w.aspect_value_camel, w.aspect_value]),
        }
    }
}

impl RawAttribute {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            value: Some(value.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Value, if it holds anything besides whitespace.
    pub fn displayable_value(&self) -> Option<&str> {
        self.value
            .as_deref()
            .filter(|v| !v.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "MediaWire")]
pub struct RawMedia {
    pub url: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct MediaWire {
    #[serde(deserialize_with = "lenient_string")]
    url: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    path: Option<String>,
}

impl From<MediaWire> for RawMedia {
    fn from(w: MediaWire) -> Self {
        Self {
            url: first_filled([w.url, w.path]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "SellerWire")]
pub struct RawSeller {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_photo_path: Option<String>,
    pub business: Option<RawBusiness>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct SellerWire {
    #[serde(deserialize_with = "lenient_id")]
    id: Option<String>,
    #[serde(deserialize_with = "lenient_id")]
    user_id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    first_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    last_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    profile_photo_path: Option<String>,
    #[serde(rename = "profilePhotoPath", deserialize_with = "lenient_string")]
    profile_photo_path_camel: Option<String>,
    #[serde(deserialize_with = "lenient_opt")]
    business: Option<RawBusiness>,
}

impl From<SellerWire> for RawSeller {
    fn from(w: SellerWire) -> Self {
        Self {
            id: w.id,
            user_id: w.user_id,
            first_name: w.first_name,
            last_name: w.last_name,
            profile_photo_path: first_filled([w.profile_photo_path, w.profile_photo_path_camel]),
            business: w.business,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawBusiness {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_opt")]
    pub verified: Option<bool>,
}

/// Display-ready record derived from a [`RawListing`]. Recomputed on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedListing {
    pub title: String,
    pub price: f64,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub condition: String,
    pub tags: Vec<String>,
    pub specifications: BTreeMap<String, String>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Http(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn adapts_aspect_shapes() {
        let camel = RawListing::from_json(json!({
            "aspects": [{ "aspectName": "Brand", "aspectValue": "Nike" }]
        }));
        let snake = RawListing::from_json(json!({
            "listing_aspects": [{ "aspect_name": "Brand", "aspect_value": "Nike" }]
        }));

        assert_eq!(camel.attributes, vec![RawAttribute::new("Brand", "Nike")]);
        assert_eq!(camel.attributes, snake.attributes);
    }

    #[test]
    fn wrong_types_become_absent() {
        let raw = RawListing::from_json(json!({
            "id": 42,
            "description": ["not", "a", "string"],
            "attributes": [
                { "name": "Price", "value": 1500 },
                "garbage",
                { "name": "Brand", "value": "Nike" }
            ],
            "media": "nope",
            "seller": 7
        }));

        assert_eq!(raw.id.as_deref(), Some("42"));
        assert_eq!(raw.description, None);
        assert_eq!(raw.attributes.len(), 3);
        assert_eq!(raw.attributes[0].value, None);
        assert_eq!(raw.attributes[1], RawAttribute::default());
        assert_eq!(raw.attributes[2].displayable_value(), Some("Nike"));
        assert!(raw.media.is_empty());
        assert!(raw.seller.is_none());
    }

    #[test]
    fn both_spellings_in_one_object_are_merged() {
        let raw = RawListing::from_json(json!({
            "id": "p1",
            "description": "Clean used fridge for sale",
            "attributes": [],
            "aspects": [
                { "name": "Price", "aspectName": "Price", "aspectValue": "₦1500" },
                { "aspectName": "Brand", "aspect_name": "Maker", "value": "", "aspectValue": "LG" }
            ],
            "media": [{ "url": "https://x/a.jpg", "path": "listing_media/a.jpg" }],
            "listing_media": [{ "path": "listing_media/b.jpg" }],
            "seller": { "id": "s1" },
            "author": { "id": "s2" },
            "createdAt": "",
            "created_at": "2024-05-01T10:00:00Z"
        }));

        assert_eq!(raw.id.as_deref(), Some("p1"));
        assert_eq!(
            raw.attributes,
            vec![RawAttribute::new("Price", "₦1500"), RawAttribute::new("Brand", "LG")]
        );
        assert_eq!(raw.media, vec![RawMedia { url: Some("https://x/a.jpg".into()) }]);
        assert_eq!(raw.seller.unwrap().id.as_deref(), Some("s1"));
        assert_eq!(raw.created_at.as_deref(), Some("2024-05-01T10:00:00Z"));

        let n = crate::normalizer::normalize(&RawListing::from_json(json!({
            "description": "Clean used fridge for sale",
            "aspects": [{ "aspectName": "Price", "aspectValue": "₦1500" }],
            "media": [{ "url": "https://x/a.jpg" }],
            "listing_media": [{ "path": "listing_media/a.jpg" }]
        })));
        assert_eq!(n.title, "Clean used fridge for sale");
        assert_eq!(n.price, 1500.0);
    }

    #[test]
    fn non_object_document_is_empty_listing() {
        assert_eq!(RawListing::from_json(json!("hello")), RawListing::default());
        assert_eq!(RawListing::from_json(Value::Null), RawListing::default());
    }

    #[test]
    fn reads_media_paths_and_author() {
        let raw = RawListing::from_json(json!({
            "listing_media": [{ "path": "listing_media/a.jpg" }, { "url": "https://x/b.jpg" }],
            "author": { "id": "s1", "business": { "name": "Ade Stores", "verified": true } },
            "created_at": "2024-05-01T10:00:00Z"
        }));

        assert_eq!(raw.media[0].url.as_deref(), Some("listing_media/a.jpg"));
        assert_eq!(raw.media[1].url.as_deref(), Some("https://x/b.jpg"));
        let seller = raw.seller.unwrap();
        assert_eq!(seller.id.as_deref(), Some("s1"));
        assert_eq!(seller.business.unwrap().name.as_deref(), Some("Ade Stores"));
        assert_eq!(raw.created_at.as_deref(), Some("2024-05-01T10:00:00Z"));
    }
}
