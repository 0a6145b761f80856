use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of property being listed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    House,
    Apartment,
    Office,
    Land,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::House => "house",
            PropertyType::Apartment => "apartment",
            PropertyType::Office => "office",
            PropertyType::Land => "land",
        }
    }
}

impl FromStr for PropertyType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "house" => Ok(PropertyType::House),
            "apartment" => Ok(PropertyType::Apartment),
            "office" => Ok(PropertyType::Office),
            "land" => Ok(PropertyType::Land),
            _ => Err(()),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a listing is offered for sale or for rent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ListingStatus {
    #[serde(rename = "for-sale")]
    ForSale,
    #[serde(rename = "for-rent")]
    ForRent,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::ForSale => "for-sale",
            ListingStatus::ForRent => "for-rent",
        }
    }
}

impl FromStr for ListingStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "for-sale" => Ok(ListingStatus::ForSale),
            "for-rent" => Ok(ListingStatus::ForRent),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Moderation state assigned by the admin dashboard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Location information for a property
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PropertyLocation {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Property record as returned by the listings API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub location: PropertyLocation,
    pub price: f64,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub property_type: Option<PropertyType>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<ListingStatus>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub available: Option<bool>,
    #[serde(default)]
    pub available_units: Option<u32>,
    #[serde(default)]
    pub total_units: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub approval_status: Option<ApprovalStatus>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Property {
    /// Units still open for an apartment building listing.
    ///
    /// Returns `None` for other property types or when the backend did not
    /// report unit counts.
    pub fn units_left(&self) -> Option<u32> {
        if self.property_type != Some(PropertyType::Apartment) {
            return None;
        }
        match (self.available, self.available_units) {
            (Some(false), _) => Some(0),
            (_, Some(units)) => Some(units),
            _ => None,
        }
    }
}

/// Records may carry enum values this client does not know about; those read
/// as `None` instead of failing the whole response.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| serde_json::from_value(value).ok()))
}

/// Pagination metadata attached to the dashboard variant of the listing response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pages: u32,
}

/// The listings endpoint answers with either a bare array or a paginated envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListingResponse {
    List(Vec<Property>),
    Paged {
        properties: Vec<Property>,
        #[serde(default)]
        pagination: Option<Pagination>,
    },
}

impl ListingResponse {
    /// Paging metadata, present only on the dashboard envelope.
    pub fn pagination(&self) -> Option<&Pagination> {
        match self {
            ListingResponse::List(_) => None,
            ListingResponse::Paged { pagination, .. } => pagination.as_ref(),
        }
    }

    pub fn into_properties(self) -> Vec<Property> {
        match self {
            ListingResponse::List(properties) => properties,
            ListingResponse::Paged { properties, .. } => properties,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUSE: &str = r#"{
        "_id": "64f1a2",
        "title": "Family house",
        "location": {
            "address": "12 Elm St",
            "city": "Springfield",
            "state": "IL",
            "country": "US",
            "coordinates": { "lat": 39.78, "lng": -89.65 }
        },
        "price": 350000,
        "type": "house",
        "status": "for-sale",
        "bedrooms": 4,
        "bathrooms": 2,
        "size": 2100,
        "images": ["https://cdn.example.com/a.jpg"],
        "featured": true,
        "approvalStatus": "approved",
        "createdAt": "2024-03-01T10:00:00Z"
    }"#;

    #[test]
    fn decodes_property_record() {
        let property: Property = serde_json::from_str(HOUSE).unwrap();
        assert_eq!(property.id, "64f1a2");
        assert_eq!(property.property_type, Some(PropertyType::House));
        assert_eq!(property.status, Some(ListingStatus::ForSale));
        assert_eq!(property.bedrooms, Some(4));
        assert_eq!(property.location.coordinates.unwrap().lat, 39.78);
        assert_eq!(property.approval_status, Some(ApprovalStatus::Approved));
        assert!(property.created_at.is_some());
        assert_eq!(property.units_left(), None);
    }

    #[test]
    fn decodes_both_response_shapes() {
        let bare = format!("[{}]", HOUSE);
        let list: ListingResponse = serde_json::from_str(&bare).unwrap();
        assert!(list.pagination().is_none());
        assert_eq!(list.into_properties().len(), 1);

        let paged = format!(
            r#"{{"properties": [{}], "pagination": {{"page": 1, "limit": 10, "total": 1, "pages": 1}}}}"#,
            HOUSE
        );
        let paged: ListingResponse = serde_json::from_str(&paged).unwrap();
        assert_eq!(
            paged.pagination(),
            Some(&Pagination {
                page: 1,
                limit: 10,
                total: 1,
                pages: 1
            })
        );
        assert_eq!(paged.into_properties()[0].title, "Family house");
    }

    #[test]
    fn unknown_enum_values_do_not_fail_the_response() {
        let body = format!(
            r#"[{}, {{"_id": "x9", "title": "Sold loft", "price": 1, "type": "loft",
                "status": "sold", "approvalStatus": "archived"}}]"#,
            HOUSE
        );
        let properties = serde_json::from_str::<ListingResponse>(&body)
            .unwrap()
            .into_properties();

        assert_eq!(properties.len(), 2);
        assert_eq!(properties[0].status, Some(ListingStatus::ForSale));
        assert_eq!(properties[1].id, "x9");
        assert_eq!(properties[1].property_type, None);
        assert_eq!(properties[1].status, None);
        assert_eq!(properties[1].approval_status, None);
    }

    #[test]
    fn apartment_units_left() {
        let mut property: Property = serde_json::from_str(HOUSE).unwrap();
        property.property_type = Some(PropertyType::Apartment);
        property.available_units = Some(3);
        property.total_units = Some(10);
        assert_eq!(property.units_left(), Some(3));

        property.available = Some(false);
        assert_eq!(property.units_left(), Some(0));
    }

    #[test]
    fn enumerations_are_closed() {
        assert_eq!("land".parse::<PropertyType>(), Ok(PropertyType::Land));
        assert!("castle".parse::<PropertyType>().is_err());
        assert!("House".parse::<PropertyType>().is_err());
        assert_eq!("for-rent".parse::<ListingStatus>(), Ok(ListingStatus::ForRent));
        assert!("sold".parse::<ListingStatus>().is_err());
    }
}
