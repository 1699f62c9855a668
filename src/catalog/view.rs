use crate::display::{resolve_media_url, PLACEHOLDER_AVATAR, PLACEHOLDER_IMAGE};
use crate::model::{NormalizedListing, RawListing, RawSeller};
use crate::normalizer::normalize;
use crate::utils::parse_datetime;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

pub const NO_DESCRIPTION: &str = "No description available";
pub const INDIVIDUAL_SELLER: &str = "Individual Seller";

/// Everything a grid card, detail panel or seller page shows for one listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingView {
    pub id: Option<String>,
    #[serde(flatten)]
    pub listing: NormalizedListing,
    #[serde(serialize_with = "description_or_placeholder")]
    pub description: Option<String>,
    pub images: Vec<String>,
    pub seller: Option<SellerSummary>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SellerSummary {
    pub id: Option<String>,
    pub display_name: String,
    pub business_description: Option<String>,
    pub verified: bool,
    pub avatar: String,
}

impl ListingView {
    pub fn from_raw(raw: &RawListing, storage_base_url: &str) -> Self {
        let mut images: Vec<String> = raw
            .media
            .iter()
            .filter_map(|m| m.url.as_deref())
            .filter_map(|path| resolve_media_url(path, storage_base_url))
            .collect();
        if images.is_empty() {
            images.push(PLACEHOLDER_IMAGE.to_string());
        }

        Self {
            id: raw.id.clone(),
            listing: normalize(raw),
            description: raw
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            images,
            seller: raw
                .seller
                .as_ref()
                .map(|s| SellerSummary::from_raw(s, storage_base_url)),
            created_at: raw.created_at.as_deref().and_then(parse_datetime),
        }
    }

    pub fn seller_id(&self) -> Option<&str> {
        self.seller.as_ref().and_then(|s| s.id.as_deref())
    }

    pub fn display_description(&self) -> &str {
        self.description.as_deref().unwrap_or(NO_DESCRIPTION)
    }
}

fn description_or_placeholder<S: Serializer>(
    description: &Option<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(description.as_deref().unwrap_or(NO_DESCRIPTION))
}

impl SellerSummary {
    pub fn from_raw(seller: &RawSeller, storage_base_url: &str) -> Self {
        let business = seller.business.as_ref();

        let business_name = business
            .and_then(|b| b.name.as_deref())
            .map(str::trim)
            .filter(|n| !n.is_empty());
        let personal_name = format!(
            "{} {}",
            seller.first_name.as_deref().unwrap_or(""),
            seller.last_name.as_deref().unwrap_or("")
        );
        let display_name = match business_name {
            Some(name) => name.to_string(),
            None if !personal_name.trim().is_empty() => personal_name.trim().to_string(),
            None => INDIVIDUAL_SELLER.to_string(),
        };

        Self {
            id: seller.id.clone().or_else(|| seller.user_id.clone()),
            display_name,
            business_description: business
                .and_then(|b| b.description.clone())
                .filter(|d| !d.trim().is_empty()),
            verified: business.and_then(|b| b.verified).unwrap_or(false),
            avatar: seller
                .profile_photo_path
                .as_deref()
                .and_then(|p| resolve_media_url(p, storage_base_url))
                .unwrap_or_else(|| PLACEHOLDER_AVATAR.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE: &str = "https://cdn.example.com/public";

    #[test]
    fn builds_view_with_resolved_media() {
        let raw = RawListing::from_json(json!({
            "id": "p1",
            "description": "Fairly used iPhone 12 Pro Max 256GB blue",
            "media": [
                { "url": "listing_media/p1.jpg" },
                { "url": "https://img.example.org/p1b.jpg" }
            ],
            "createdAt": "2024-06-01T08:00:00Z"
        }));

        let view = ListingView::from_raw(&raw, BASE);
        assert_eq!(view.id.as_deref(), Some("p1"));
        assert_eq!(view.listing.title, "Fairly used iPhone 12 Pro Max...");
        assert_eq!(
            view.images,
            vec![
                "https://cdn.example.com/public/listing_media/p1.jpg",
                "https://img.example.org/p1b.jpg"
            ]
        );
        assert!(view.created_at.is_some());
        assert!(view.seller.is_none());
    }

    #[test]
    fn missing_media_and_description_use_placeholders() {
        let view = ListingView::from_raw(&RawListing::default(), BASE);
        assert_eq!(view.images, vec![PLACEHOLDER_IMAGE]);
        assert_eq!(view.description, None);
        assert_eq!(view.display_description(), NO_DESCRIPTION);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["description"], NO_DESCRIPTION);
    }

    #[test]
    fn seller_name_prefers_business() {
        let raw: RawSeller = serde_json::from_value(json!({
            "user_id": "u9",
            "first_name": "Ada",
            "last_name": "Obi",
            "business": { "name": "Ada's Gadgets", "verified": true }
        }))
        .unwrap();

        let seller = SellerSummary::from_raw(&raw, BASE);
        assert_eq!(seller.id.as_deref(), Some("u9"));
        assert_eq!(seller.display_name, "Ada's Gadgets");
        assert!(seller.verified);
        assert_eq!(seller.avatar, PLACEHOLDER_AVATAR);
    }

    #[test]
    fn seller_name_falls_back_to_person_then_generic() {
        let person: RawSeller = serde_json::from_value(json!({
            "id": "s1",
            "first_name": "Ada",
            "profile_photo_path": "avatars/ada.png"
        }))
        .unwrap();
        let seller = SellerSummary::from_raw(&person, BASE);
        assert_eq!(seller.display_name, "Ada");
        assert_eq!(seller.avatar, "https://cdn.example.com/public/avatars/ada.png");

        let anonymous = SellerSummary::from_raw(&RawSeller::default(), BASE);
        assert_eq!(anonymous.display_name, INDIVIDUAL_SELLER);
        assert!(!anonymous.verified);
    }
}
