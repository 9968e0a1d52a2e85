//! Geographic coordinates resolved by the geocoding collaborator.

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Mean Earth radius used for great-circle distances.
const EARTH_RADIUS_KM: f64 = 6_371.0088;

/// A validated latitude/longitude pair in decimal degrees.
///
/// ## Invariants
/// - `latitude` lies in `[-90, 90]` and `longitude` in `[-180, 180]`.
/// - Neither component is NaN.
///
/// # Examples
/// ```
/// use wingrate::domain::Coordinates;
///
/// let philly = Coordinates::new(39.9526, -75.1652).expect("valid pair");
/// assert!(Coordinates::new(91.0, 0.0).is_err());
/// assert_eq!(philly.distance_km(&philly), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CoordinatesDto", into = "CoordinatesDto")]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Validate and construct a coordinate pair.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        let in_range = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
        if !in_range {
            return Err(ValidationError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in decimal degrees.
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in kilometres (haversine).
    pub fn distance_km(&self, other: &Self) -> f64 {
        let lat_a = self.latitude.to_radians();
        let lat_b = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct CoordinatesDto {
    latitude: f64,
    longitude: f64,
}

impl From<Coordinates> for CoordinatesDto {
    fn from(value: Coordinates) -> Self {
        Self {
            latitude: value.latitude,
            longitude: value.longitude,
        }
    }
}

impl TryFrom<CoordinatesDto> for Coordinates {
    type Error = ValidationError;

    fn try_from(value: CoordinatesDto) -> Result<Self, Self::Error> {
        Self::new(value.latitude, value.longitude)
    }
}
