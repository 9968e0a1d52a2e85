//! Restaurant locations referenced by reviews.

use serde::{Deserialize, Serialize};

use super::{Coordinates, LocationId, RequiredField, ValidationError};

/// A restaurant location.
///
/// ## Invariants
/// - `restaurant_name` is non-empty once trimmed.
/// - `coordinates` are within geographic range.
///
/// Serialised flat as `{id, restaurant_name, address, latitude, longitude}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LocationRecord", into = "LocationRecord")]
pub struct Location {
    id: LocationId,
    restaurant_name: String,
    address: String,
    coordinates: Coordinates,
}

impl Location {
    /// Build a stored location from its assigned id and validated content.
    pub fn new(id: LocationId, content: NewLocation) -> Self {
        let NewLocation {
            restaurant_name,
            address,
            coordinates,
        } = content;
        Self {
            id,
            restaurant_name,
            address,
            coordinates,
        }
    }

    /// Store-assigned identifier.
    pub const fn id(&self) -> LocationId {
        self.id
    }

    /// Restaurant display name.
    pub fn restaurant_name(&self) -> &str {
        self.restaurant_name.as_str()
    }

    /// Postal address.
    pub fn address(&self) -> &str {
        self.address.as_str()
    }

    /// Geocoded position.
    pub const fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Whether this location is the same restaurant as `name` at `address`.
    ///
    /// Comparison ignores case and surrounding whitespace.
    pub fn matches(&self, name: &str, address: &str) -> bool {
        self.restaurant_name.trim().eq_ignore_ascii_case(name.trim())
            && self.address.trim().eq_ignore_ascii_case(address.trim())
    }
}

/// Content for a location that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    restaurant_name: String,
    address: String,
    coordinates: Coordinates,
}

impl NewLocation {
    /// Validate location content.
    pub fn new(
        restaurant_name: impl Into<String>,
        address: impl Into<String>,
        coordinates: Coordinates,
    ) -> Result<Self, ValidationError> {
        let restaurant_name = restaurant_name.into().trim().to_owned();
        if restaurant_name.is_empty() {
            return Err(ValidationError::MissingField {
                field: RequiredField::RestaurantName,
            });
        }
        Ok(Self {
            restaurant_name,
            address: address.into().trim().to_owned(),
            coordinates,
        })
    }

    /// Restaurant display name.
    pub fn restaurant_name(&self) -> &str {
        self.restaurant_name.as_str()
    }

    /// Postal address.
    pub fn address(&self) -> &str {
        self.address.as_str()
    }

    /// Geocoded position.
    pub const fn coordinates(&self) -> Coordinates {
        self.coordinates
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct LocationRecord {
    id: LocationId,
    restaurant_name: String,
    address: String,
    latitude: f64,
    longitude: f64,
}

impl From<Location> for LocationRecord {
    fn from(value: Location) -> Self {
        Self {
            id: value.id,
            latitude: value.coordinates.latitude(),
            longitude: value.coordinates.longitude(),
            restaurant_name: value.restaurant_name,
            address: value.address,
        }
    }
}

impl TryFrom<LocationRecord> for Location {
    type Error = ValidationError;

    fn try_from(value: LocationRecord) -> Result<Self, Self::Error> {
        let coordinates = Coordinates::new(value.latitude, value.longitude)?;
        let content = NewLocation::new(value.restaurant_name, value.address, coordinates)?;
        Ok(Self::new(value.id, content))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for location validation and wire shape.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn wing_shack() -> Location {
        let coordinates = Coordinates::new(40.0, -75.0).expect("valid coordinates");
        let content =
            NewLocation::new("Wing Shack", "123 Main St", coordinates).expect("valid location");
        Location::new(LocationId::new(3), content)
    }

    #[rstest]
    fn serialises_flat_record() {
        let value = serde_json::to_value(wing_shack()).expect("serialise");
        assert_eq!(
            value,
            json!({
                "id": 3,
                "restaurant_name": "Wing Shack",
                "address": "123 Main St",
                "latitude": 40.0,
                "longitude": -75.0
            })
        );
    }

    #[rstest]
    #[case::blank_name(json!({"id": 1, "restaurant_name": " ", "address": "x", "latitude": 0.0, "longitude": 0.0}))]
    #[case::bad_latitude(json!({"id": 1, "restaurant_name": "A", "address": "x", "latitude": 95.0, "longitude": 0.0}))]
    fn deserialisation_enforces_invariants(#[case] value: serde_json::Value) {
        assert!(serde_json::from_value::<Location>(value).is_err());
    }

    #[rstest]
    #[case::exact("Wing Shack", "123 Main St", true)]
    #[case::case_and_space(" wing shack ", "123 MAIN ST", true)]
    #[case::other_address("Wing Shack", "9 Elm St", false)]
    fn matches_same_restaurant(#[case] name: &str, #[case] address: &str, #[case] expected: bool) {
        assert_eq!(wing_shack().matches(name, address), expected);
    }
}
