use chrono::{DateTime, Utc};
use shared::{Coordinates, HostRef, HousingType};

/// One offer row as parsed from the import file.
///
/// Field-for-field the offer schema, except the host is still the inline
/// descriptor from the row; ids are assigned when the record is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferRecord {
    pub name: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
    pub city: String,
    pub preview_image: String,
    pub images: Vec<String>,
    pub premium: bool,
    pub favorite: bool,
    pub rating: f64,
    pub housing_type: HousingType,
    pub rooms: u8,
    pub guests: u8,
    pub price: u32,
    pub amenities: Vec<String>,
    pub host: HostRef,
    pub comment_count: u32,
    pub location: Coordinates,
}
