use crate::filters::types::{FilterField, FilterSet};
use std::collections::HashSet;
use tracing::debug;
use url::form_urlencoded;

/// Result of reading filters out of an address-bar query string
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedQuery {
    pub filters: FilterSet,
    /// At least one recognized parameter carried a non-empty value.
    /// Decides whether the first search is scoped or lists everything.
    pub had_any_query: bool,
}

/// Decode a query string (with or without the leading `?`) into a [`FilterSet`].
///
/// Total over arbitrary input: unknown parameters are ignored, malformed
/// values leave their field absent, and repeated parameters keep the first
/// occurrence.
pub fn decode(query: &str) -> DecodedQuery {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut decoded = DecodedQuery::default();
    let mut seen = HashSet::new();

    for (name, value) in form_urlencoded::parse(query.as_bytes()) {
        let Ok(field) = name.parse::<FilterField>() else {
            continue;
        };
        if value.trim().is_empty() || !seen.insert(field) {
            continue;
        }
        decoded.had_any_query = true;
        if !decoded.filters.set_raw(field, &value) {
            debug!("Ignoring malformed query parameter {}={:?}", field, value);
        }
    }

    decoded
}

/// Encode the present fields of `filters` as a query string without the
/// leading `?`. Absent fields are omitted entirely.
pub fn encode(filters: &FilterSet) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(filters.query_pairs())
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ListingStatus, PropertyType};

    #[test]
    fn decodes_scoped_query_and_drops_malformed_numbers() {
        let decoded = decode("?type=apartment&bedrooms=3&priceMin=abc");
        assert!(decoded.had_any_query);
        assert_eq!(
            decoded.filters,
            FilterSet {
                property_type: Some(PropertyType::Apartment),
                bedrooms: Some(3),
                ..Default::default()
            }
        );
    }

    #[test]
    fn unrecognized_parameters_only() {
        for query in ["", "?", "?page=2&sort=price", "utm_source=mail&ref="] {
            let decoded = decode(query);
            assert!(decoded.filters.is_empty(), "{query}");
            assert!(!decoded.had_any_query, "{query}");
        }
    }

    #[test]
    fn empty_values_are_absent() {
        let decoded = decode("type=&location=");
        assert!(decoded.filters.is_empty());
        assert!(!decoded.had_any_query);
    }

    #[test]
    fn parameter_order_is_irrelevant() {
        let a = decode("status=for-rent&location=Lagos&sizeMax=120");
        let b = decode("sizeMax=120&location=Lagos&status=for-rent");
        assert_eq!(a, b);
        assert_eq!(a.filters.status, Some(ListingStatus::ForRent));
        assert_eq!(a.filters.size_max, Some(120.0));
    }

    #[test]
    fn first_occurrence_wins() {
        let decoded = decode("bedrooms=2&bedrooms=5");
        assert_eq!(decoded.filters.bedrooms, Some(2));
    }

    #[test]
    fn decodes_percent_and_plus_encoding() {
        let decoded = decode("location=San+Jos%C3%A9%2C%20CA");
        assert_eq!(decoded.filters.location.as_deref(), Some("San José, CA"));
    }

    #[test]
    fn encode_omits_absent_fields() {
        assert_eq!(encode(&FilterSet::default()), "");
        let filters = FilterSet {
            property_type: Some(PropertyType::House),
            bathrooms: Some(2),
            price_min: Some(100000.0),
            ..Default::default()
        };
        assert_eq!(encode(&filters), "type=house&bathrooms=2&priceMin=100000");
    }

    #[test]
    fn decode_inverts_encode() {
        let samples = [
            FilterSet::default(),
            FilterSet {
                location: Some("New York & Co".into()),
                property_type: Some(PropertyType::Office),
                status: Some(ListingStatus::ForRent),
                bedrooms: Some(0),
                bathrooms: Some(4),
                price_min: Some(1250.5),
                price_max: Some(9000.0),
                size_min: Some(0.0),
                size_max: Some(75.25),
            },
            FilterSet {
                property_type: Some(PropertyType::Land),
                size_min: Some(2000.0),
                ..Default::default()
            },
        ];
        for filters in samples {
            let decoded = decode(&encode(&filters));
            assert_eq!(decoded.filters, filters);
            assert_eq!(decoded.had_any_query, !filters.is_empty());
        }
    }

    #[test]
    fn encode_normalizes_hand_built_values() {
        let padded = FilterSet {
            location: Some("  Austin ".into()),
            ..Default::default()
        };
        assert_eq!(encode(&padded), "location=Austin");
        assert_eq!(decode(&encode(&padded)).filters, padded.normalized());
        assert_eq!(padded.normalized().location.as_deref(), Some("Austin"));

        let out_of_range = FilterSet {
            location: Some("   ".into()),
            price_min: Some(-5.0),
            price_max: Some(f64::NAN),
            size_max: Some(f64::INFINITY),
            bedrooms: Some(2),
            ..Default::default()
        };
        assert_eq!(encode(&out_of_range), "bedrooms=2");
        let decoded = decode(&encode(&out_of_range));
        assert_eq!(decoded.filters, out_of_range.normalized());
        assert_eq!(
            decoded.filters,
            FilterSet {
                bedrooms: Some(2),
                ..Default::default()
            }
        );

        let blank = FilterSet {
            location: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(encode(&blank), "");
        let decoded = decode(&encode(&blank));
        assert!(decoded.filters.is_empty());
        assert!(!decoded.had_any_query);
        assert!(blank.normalized().is_empty());
    }
}
