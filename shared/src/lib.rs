use serde::{Deserialize, Serialize};
use std::fmt;

/// Geographic position of an offer or a city center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A city offers can be listed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    pub name: String,
    pub location: Coordinates,
}

/// Kind of housing an offer advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HousingType {
    Apartment,
    House,
    Room,
    Hotel,
}

impl HousingType {
    /// Parse the lowercase wire spelling used by the TSV format and the API.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "apartment" => Some(Self::Apartment),
            "house" => Some(Self::House),
            "room" => Some(Self::Room),
            "hotel" => Some(Self::Hotel),
            _ => None,
        }
    }
}

impl fmt::Display for HousingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Apartment => "apartment",
            Self::House => "house",
            Self::Room => "room",
            Self::Hotel => "hotel",
        };
        write!(f, "{name}")
    }
}

/// Account tier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Regular,
    Pro,
}

/// A registered user (offer hosts and comment authors).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub user_type: UserType,
}

/// Host descriptor as it appears inside an imported offer row.
/// Resolved to a stored [`User`] when the row is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostRef {
    pub name: String,
    pub email: String,
    pub avatar_url: String,
}

/// A rental offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Publication timestamp (RFC 3339).
    pub published_at: chrono::DateTime<chrono::Utc>,
    pub city: String,
    pub preview_image: String,
    pub images: Vec<String>,
    pub premium: bool,
    pub favorite: bool,
    /// Average rating, 1.0..=5.0.
    pub rating: f64,
    pub housing_type: HousingType,
    pub rooms: u8,
    pub guests: u8,
    /// Price per night.
    pub price: u32,
    pub amenities: Vec<String>,
    /// ID of the hosting user.
    pub host_id: String,
    pub comment_count: u32,
    pub location: Coordinates,
}

/// Condensed offer shape returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferSummary {
    pub id: String,
    pub name: String,
    pub published_at: chrono::DateTime<chrono::Utc>,
    pub city: String,
    pub preview_image: String,
    pub premium: bool,
    pub favorite: bool,
    pub rating: f64,
    pub housing_type: HousingType,
    pub price: u32,
    pub comment_count: u32,
}

impl From<&Offer> for OfferSummary {
    fn from(offer: &Offer) -> Self {
        Self {
            id: offer.id.clone(),
            name: offer.name.clone(),
            published_at: offer.published_at,
            city: offer.city.clone(),
            preview_image: offer.preview_image.clone(),
            premium: offer.premium,
            favorite: offer.favorite,
            rating: offer.rating,
            housing_type: offer.housing_type,
            price: offer.price,
            comment_count: offer.comment_count,
        }
    }
}

/// A comment left on an offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub offer_id: String,
    pub text: String,
    /// Rating attached to the comment, 1..=5.
    pub rating: f64,
    pub author_id: String,
    pub posted_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOfferRequest {
    pub name: String,
    pub description: String,
    pub city: String,
    pub preview_image: String,
    pub images: Vec<String>,
    pub premium: bool,
    pub housing_type: HousingType,
    pub rooms: u8,
    pub guests: u8,
    pub price: u32,
    pub amenities: Vec<String>,
    pub host_id: String,
    pub location: Coordinates,
}

/// Partial offer update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateOfferRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub preview_image: Option<String>,
    pub images: Option<Vec<String>>,
    pub premium: Option<bool>,
    pub favorite: Option<bool>,
    pub housing_type: Option<HousingType>,
    pub rooms: Option<u8>,
    pub guests: Option<u8>,
    pub price: Option<u32>,
    pub amenities: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub user_type: UserType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCityRequest {
    pub name: String,
    pub location: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub text: String,
    pub rating: f64,
    pub author_id: String,
}
