use std::str::FromStr;

use chrono::{DateTime, Utc};
use shared::{Coordinates, HostRef, HousingType};
use thiserror::Error;

use crate::domain::models::OfferRecord;

/// Column count of the tab-separated offer format.
pub const FIELD_COUNT: usize = 17;

/// Sub-list separator inside a single field (images, amenities, host,
/// coordinates).
const SUBLIST_SEPARATOR: char = ';';

/// Why a single row could not become an [`OfferRecord`]. A parse failure
/// is terminal for the row only, never for the stream.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("expected {expected} fields, found {found}")]
    Arity { expected: usize, found: usize },
    #[error("field `{field}`: {reason}")]
    Coercion { field: &'static str, reason: String },
}

impl ParseError {
    fn coercion(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Coercion { field, reason: reason.into() }
    }
}

/// Parse one line of the import file into a record.
///
/// Splits on tabs into the fixed 17-column schema and coerces every field;
/// the first field that fails coercion fails the whole row. Pure: no I/O,
/// never returns a partial record.
pub fn parse_offer_line(line: &str) -> Result<OfferRecord, ParseError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != FIELD_COUNT {
        return Err(ParseError::Arity { expected: FIELD_COUNT, found: fields.len() });
    }

    Ok(OfferRecord {
        name: fields[0].to_string(),
        description: fields[1].to_string(),
        published_at: parse_date("published_at", fields[2])?,
        city: fields[3].to_string(),
        preview_image: fields[4].to_string(),
        images: parse_list(fields[5]),
        premium: parse_bool("premium", fields[6])?,
        favorite: parse_bool("favorite", fields[7])?,
        rating: parse_number("rating", fields[8])?,
        housing_type: parse_housing_type(fields[9])?,
        rooms: parse_number("rooms", fields[10])?,
        guests: parse_number("guests", fields[11])?,
        price: parse_number("price", fields[12])?,
        amenities: parse_list(fields[13]),
        host: parse_host(fields[14])?,
        comment_count: parse_number("comment_count", fields[15])?,
        location: parse_coordinates(fields[16])?,
    })
}

fn parse_date(field: &'static str, value: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| ParseError::coercion(field, err.to_string()))
}

fn parse_bool(field: &'static str, value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(ParseError::coercion(field, format!("`{other}` is not a boolean"))),
    }
}

fn parse_number<T>(field: &'static str, value: &str) -> Result<T, ParseError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|err| ParseError::coercion(field, err.to_string()))
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(SUBLIST_SEPARATOR)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

fn parse_housing_type(value: &str) -> Result<HousingType, ParseError> {
    HousingType::parse(value)
        .ok_or_else(|| ParseError::coercion("housing_type", format!("`{value}` is not a housing type")))
}

fn parse_host(value: &str) -> Result<HostRef, ParseError> {
    let parts: Vec<&str> = value.split(SUBLIST_SEPARATOR).collect();
    match parts.as_slice() {
        [name, email, avatar_url] => Ok(HostRef {
            name: name.to_string(),
            email: email.to_string(),
            avatar_url: avatar_url.to_string(),
        }),
        _ => Err(ParseError::coercion(
            "host",
            format!("expected `name;email;avatar`, found {} parts", parts.len()),
        )),
    }
}

fn parse_coordinates(value: &str) -> Result<Coordinates, ParseError> {
    let parts: Vec<&str> = value.split(SUBLIST_SEPARATOR).collect();
    match parts.as_slice() {
        [latitude, longitude] => Ok(Coordinates {
            latitude: parse_number("location", latitude.trim())?,
            longitude: parse_number("location", longitude.trim())?,
        }),
        _ => Err(ParseError::coercion(
            "location",
            format!("expected `latitude;longitude`, found {} parts", parts.len()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_LINE: &str = "Canal View Apartment\tBright two-room apartment overlooking the canal, five minutes from the station.\t2024-03-11T10:15:00Z\tAmsterdam\tpreview.jpg\t1.jpg;2.jpg;3.jpg\ttrue\tfalse\t4.2\tapartment\t2\t4\t1200\tWasher;Fridge;Towels\tKeks;keks@example.com;avatar.jpg\t12\t52.37454;4.881976";

    #[test]
    fn parses_well_formed_row() {
        let record = parse_offer_line(VALID_LINE).unwrap();
        assert_eq!(record.name, "Canal View Apartment");
        assert_eq!(record.city, "Amsterdam");
        assert_eq!(record.images, vec!["1.jpg", "2.jpg", "3.jpg"]);
        assert!(record.premium);
        assert!(!record.favorite);
        assert_eq!(record.rating, 4.2);
        assert_eq!(record.housing_type, HousingType::Apartment);
        assert_eq!(record.rooms, 2);
        assert_eq!(record.guests, 4);
        assert_eq!(record.price, 1200);
        assert_eq!(record.amenities, vec!["Washer", "Fridge", "Towels"]);
        assert_eq!(record.host.email, "keks@example.com");
        assert_eq!(record.comment_count, 12);
        assert_eq!(record.location.latitude, 52.37454);
        assert_eq!(record.location.longitude, 4.881976);
        assert_eq!(record.published_at.to_rfc3339(), "2024-03-11T10:15:00+00:00");
    }

    #[test]
    fn wrong_field_count_is_an_arity_error() {
        let err = parse_offer_line("just\tthree\tfields").unwrap_err();
        match err {
            ParseError::Arity { expected, found } => {
                assert_eq!(expected, FIELD_COUNT);
                assert_eq!(found, 3);
            }
            other => panic!("expected arity error, got {other}"),
        }
    }

    #[test]
    fn arity_error_for_extra_fields() {
        let line = format!("{VALID_LINE}\textra");
        assert!(matches!(parse_offer_line(&line), Err(ParseError::Arity { found: 18, .. })));
    }

    #[test]
    fn bad_rating_names_the_field() {
        let line = VALID_LINE.replace("\t4.2\t", "\tfour\t");
        let err = parse_offer_line(&line).unwrap_err();
        match err {
            ParseError::Coercion { field, .. } => assert_eq!(field, "rating"),
            other => panic!("expected coercion error, got {other}"),
        }
    }

    #[test]
    fn bad_housing_type_is_rejected() {
        let line = VALID_LINE.replace("\tapartment\t", "\tcastle\t");
        let err = parse_offer_line(&line).unwrap_err();
        assert!(matches!(err, ParseError::Coercion { field: "housing_type", .. }));
    }

    #[test]
    fn bad_boolean_is_rejected() {
        let line = VALID_LINE.replace("\ttrue\t", "\tyes\t");
        let err = parse_offer_line(&line).unwrap_err();
        assert!(matches!(err, ParseError::Coercion { field: "premium", .. }));
    }

    #[test]
    fn host_needs_three_parts() {
        let line = VALID_LINE.replace("Keks;keks@example.com;avatar.jpg", "Keks;keks@example.com");
        let err = parse_offer_line(&line).unwrap_err();
        assert!(matches!(err, ParseError::Coercion { field: "host", .. }));
    }

    #[test]
    fn coordinates_need_two_numbers() {
        let line = VALID_LINE.replace("52.37454;4.881976", "52.37454");
        assert!(matches!(
            parse_offer_line(&line).unwrap_err(),
            ParseError::Coercion { field: "location", .. }
        ));

        let line = VALID_LINE.replace("52.37454;4.881976", "north;4.881976");
        assert!(matches!(
            parse_offer_line(&line).unwrap_err(),
            ParseError::Coercion { field: "location", .. }
        ));
    }

    #[test]
    fn empty_sublist_fields_become_empty_vecs() {
        let line = VALID_LINE.replace("Washer;Fridge;Towels", "");
        let record = parse_offer_line(&line).unwrap();
        assert!(record.amenities.is_empty());
    }
}
