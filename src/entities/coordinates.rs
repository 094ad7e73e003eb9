use geo_types::Coord;
use serde::{Deserialize, Serialize};

/// A point as the map renders it, latitude first.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A point as the directions provider expects it: `[longitude, latitude]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position(pub [f64; 2]);

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinates {
            latitude,
            longitude,
        }
    }
}

// All axis swapping between the rendering and provider conventions goes
// through the conversions below.

impl From<Coordinates> for Position {
    fn from(c: Coordinates) -> Self {
        Position([c.longitude, c.latitude])
    }
}

impl From<Position> for Coordinates {
    fn from(Position([longitude, latitude]): Position) -> Self {
        Coordinates {
            latitude,
            longitude,
        }
    }
}

impl Position {
    /// Reads a GeoJSON position, ignoring any altitude component.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        match values {
            [longitude, latitude, ..] => Some(Position([*longitude, *latitude])),
            _ => None,
        }
    }
}

impl From<Coordinates> for Coord<f64> {
    fn from(c: Coordinates) -> Self {
        Coord {
            x: c.longitude,
            y: c.latitude,
        }
    }
}

impl From<Coord<f64>> for Coordinates {
    fn from(c: Coord<f64>) -> Self {
        Coordinates {
            latitude: c.y,
            longitude: c.x,
        }
    }
}

#[test]
fn position_is_longitude_first() {
    let position: Position = Coordinates::new(35.53, 35.78).into();

    assert_eq!(position, Position([35.78, 35.53]));
    assert_eq!(serde_json::to_string(&position).unwrap(), "[35.78,35.53]");
    assert_eq!(Coordinates::from(position), Coordinates::new(35.53, 35.78));
}

#[test]
fn position_from_geojson_drops_altitude() {
    assert_eq!(
        Position::from_slice(&[8.68, 49.41, 112.0]),
        Some(Position([8.68, 49.41]))
    );
    assert_eq!(Position::from_slice(&[8.68]), None);
}
