use crate::models::{ListingStatus, PropertyType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One search dimension of the listings view.
///
/// `query_name` is the name used both in the address bar and in the request
/// sent to the listings endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Type,
    Status,
    Location,
    Bedrooms,
    Bathrooms,
    PriceMin,
    PriceMax,
    SizeMin,
    SizeMax,
}

impl FilterField {
    /// Every recognized field, in the order they are written to a query string.
    pub const ALL: [FilterField; 9] = [
        FilterField::Type,
        FilterField::Status,
        FilterField::Location,
        FilterField::Bedrooms,
        FilterField::Bathrooms,
        FilterField::PriceMin,
        FilterField::PriceMax,
        FilterField::SizeMin,
        FilterField::SizeMax,
    ];

    pub fn query_name(&self) -> &'static str {
        match self {
            FilterField::Type => "type",
            FilterField::Status => "status",
            FilterField::Location => "location",
            FilterField::Bedrooms => "bedrooms",
            FilterField::Bathrooms => "bathrooms",
            FilterField::PriceMin => "priceMin",
            FilterField::PriceMax => "priceMax",
            FilterField::SizeMin => "sizeMin",
            FilterField::SizeMax => "sizeMax",
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(
            self,
            FilterField::Type | FilterField::Status | FilterField::Location
        )
    }
}

impl FromStr for FilterField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterField::ALL
            .into_iter()
            .find(|field| field.query_name() == s)
            .ok_or(())
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_name())
    }
}

/// Search constraints for the listings view.
///
/// Every field is independently optional; `None` means the dimension is
/// unconstrained. Numeric values are always finite and non-negative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ListingStatus>,
    /// Minimum number of bedrooms ("N+")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    /// Minimum number of bathrooms ("N+")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_max: Option<f64>,
}

impl FilterSet {
    pub fn is_empty(&self) -> bool {
        FilterField::ALL.iter().all(|field| !self.is_set(*field))
    }

    pub fn is_set(&self, field: FilterField) -> bool {
        match field {
            FilterField::Type => self.property_type.is_some(),
            FilterField::Status => self.status.is_some(),
            FilterField::Location => self.location.is_some(),
            FilterField::Bedrooms => self.bedrooms.is_some(),
            FilterField::Bathrooms => self.bathrooms.is_some(),
            FilterField::PriceMin => self.price_min.is_some(),
            FilterField::PriceMax => self.price_max.is_some(),
            FilterField::SizeMin => self.size_min.is_some(),
            FilterField::SizeMax => self.size_max.is_some(),
        }
    }

    /// Reset a single field to "no constraint".
    pub fn remove(&mut self, field: FilterField) {
        match field {
            FilterField::Type => self.property_type = None,
            FilterField::Status => self.status = None,
            FilterField::Location => self.location = None,
            FilterField::Bedrooms => self.bedrooms = None,
            FilterField::Bathrooms => self.bathrooms = None,
            FilterField::PriceMin => self.price_min = None,
            FilterField::PriceMax => self.price_max = None,
            FilterField::SizeMin => self.size_min = None,
            FilterField::SizeMax => self.size_max = None,
        }
    }

    /// Coerce `raw` into the field's type and store it.
    ///
    /// Values outside the field's domain (unknown enum names, non-numeric or
    /// negative numbers) leave the field absent. Returns whether a value was
    /// stored.
    pub fn set_raw(&mut self, field: FilterField, raw: &str) -> bool {
        let raw = raw.trim();
        if raw.is_empty() {
            self.remove(field);
            return false;
        }
        match field {
            FilterField::Type => self.property_type = raw.parse().ok(),
            FilterField::Status => self.status = raw.parse().ok(),
            FilterField::Location => self.location = Some(raw.to_string()),
            FilterField::Bedrooms => self.bedrooms = parse_count(raw),
            FilterField::Bathrooms => self.bathrooms = parse_count(raw),
            FilterField::PriceMin => self.price_min = parse_amount(raw),
            FilterField::PriceMax => self.price_max = parse_amount(raw),
            FilterField::SizeMin => self.size_min = parse_amount(raw),
            FilterField::SizeMax => self.size_max = parse_amount(raw),
        }
        self.is_set(field)
    }

    /// Query-string representation of a field, or `None` when absent.
    ///
    /// Values that `set_raw` would not accept (blank locations, negative or
    /// non-finite amounts) are reported as absent, and locations are trimmed.
    pub fn value_string(&self, field: FilterField) -> Option<String> {
        match field {
            FilterField::Type => self.property_type.map(|t| t.to_string()),
            FilterField::Status => self.status.map(|s| s.to_string()),
            FilterField::Location => self
                .location
                .as_deref()
                .map(str::trim)
                .filter(|location| !location.is_empty())
                .map(str::to_string),
            FilterField::Bedrooms => self.bedrooms.map(|n| n.to_string()),
            FilterField::Bathrooms => self.bathrooms.map(|n| n.to_string()),
            FilterField::PriceMin => amount_string(self.price_min),
            FilterField::PriceMax => amount_string(self.price_max),
            FilterField::SizeMin => amount_string(self.size_min),
            FilterField::SizeMax => amount_string(self.size_max),
        }
    }

    /// The set as it reads back from its own query string: blank locations
    /// and out-of-range amounts dropped, locations trimmed.
    pub fn normalized(&self) -> FilterSet {
        let mut normalized = FilterSet::default();
        for (name, value) in self.query_pairs() {
            if let Ok(field) = name.parse::<FilterField>() {
                normalized.set_raw(field, &value);
            }
        }
        normalized
    }

    /// Present fields as `(query name, value)` pairs in canonical order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        FilterField::ALL
            .iter()
            .filter_map(|field| {
                self.value_string(*field)
                    .map(|value| (field.query_name(), value))
            })
            .collect()
    }

    /// Whether a field means anything for the currently selected type.
    ///
    /// Land listings have no listing status or rooms. Those fields are hidden
    /// in that case but keep whatever value they hold.
    pub fn is_applicable(&self, field: FilterField) -> bool {
        match (self.property_type, field) {
            (
                Some(PropertyType::Land),
                FilterField::Status | FilterField::Bedrooms | FilterField::Bathrooms,
            ) => false,
            _ => true,
        }
    }
}

fn parse_count(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok()
}

fn amount_string(value: Option<f64>) -> Option<String> {
    value
        .filter(|value| value.is_finite() && *value >= 0.0)
        .map(|value| value.to_string())
}

fn parse_amount(raw: &str) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_raw_coerces_and_rejects() {
        let mut filters = FilterSet::default();
        assert!(filters.set_raw(FilterField::Bedrooms, "3"));
        assert_eq!(filters.bedrooms, Some(3));

        assert!(!filters.set_raw(FilterField::Bedrooms, "three"));
        assert_eq!(filters.bedrooms, None);

        assert!(!filters.set_raw(FilterField::PriceMin, "-10"));
        assert!(!filters.set_raw(FilterField::PriceMin, "NaN"));
        assert!(!filters.set_raw(FilterField::PriceMax, "inf"));
        assert!(filters.set_raw(FilterField::PriceMax, "1e6"));
        assert_eq!(filters.price_max, Some(1_000_000.0));

        assert!(!filters.set_raw(FilterField::Type, "castle"));
        assert!(filters.set_raw(FilterField::Status, "for-rent"));
        assert_eq!(filters.status, Some(ListingStatus::ForRent));
    }

    #[test]
    fn land_hides_rooms_and_status_without_clearing() {
        let mut filters = FilterSet {
            status: Some(ListingStatus::ForSale),
            bedrooms: Some(2),
            ..Default::default()
        };
        assert!(filters.is_applicable(FilterField::Bedrooms));

        filters.property_type = Some(PropertyType::Land);
        assert!(!filters.is_applicable(FilterField::Status));
        assert!(!filters.is_applicable(FilterField::Bedrooms));
        assert!(!filters.is_applicable(FilterField::Bathrooms));
        assert!(filters.is_applicable(FilterField::PriceMin));
        assert_eq!(filters.bedrooms, Some(2));
        assert_eq!(filters.status, Some(ListingStatus::ForSale));
    }

    #[test]
    fn query_pairs_skip_absent_fields() {
        let filters = FilterSet {
            location: Some("Austin".into()),
            price_max: Some(500000.0),
            ..Default::default()
        };
        assert_eq!(
            filters.query_pairs(),
            vec![
                ("location", "Austin".to_string()),
                ("priceMax", "500000".to_string())
            ]
        );
        assert!(FilterSet::default().query_pairs().is_empty());
        assert!(FilterSet::default().is_empty());
    }

    #[test]
    fn field_names_round_trip() {
        for field in FilterField::ALL {
            assert_eq!(field.query_name().parse::<FilterField>(), Ok(field));
        }
        assert!("sort".parse::<FilterField>().is_err());
    }
}
