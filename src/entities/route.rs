use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    entities::{Coordinates, Position},
    error::{invalid_input_error, unknown_profile_error, Error},
    polyline,
};

/// Travel mode understood by the directions provider. Also the last segment
/// of the provider's directions URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Profile {
    DrivingCar,
    FootWalking,
    CyclingRegular,
}

impl Profile {
    pub const ALL: [Profile; 3] = [Self::DrivingCar, Self::FootWalking, Self::CyclingRegular];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DrivingCar => "driving-car",
            Self::FootWalking => "foot-walking",
            Self::CyclingRegular => "cycling-regular",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|profile| profile.as_str() == s)
            .ok_or_else(|| unknown_profile_error(s))
    }
}

impl TryFrom<String> for Profile {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Profile> for &'static str {
    fn from(profile: Profile) -> Self {
        profile.as_str()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preference {
    Fastest,
    Shortest,
    Recommended,
}

impl Preference {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fastest => "fastest",
            Self::Shortest => "shortest",
            Self::Recommended => "recommended",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Geojson,
    Json,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Geojson => "geojson",
            Self::Json => "json",
        }
    }
}

/// Body of `POST /route`, forwarded to the provider as is.
///
/// Only `profile` is read, since it picks the provider endpoint. Everything
/// else (`coordinates`, `preference`, `format` and whatever the caller adds)
/// stays opaque in `fields` and is left for the provider to judge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RouteRequest {
    pub fn between(origin: Coordinates, destination: Coordinates) -> Self {
        let coordinates = [Position::from(origin), Position::from(destination)]
            .iter()
            .map(|Position([longitude, latitude])| Value::from(vec![*longitude, *latitude]))
            .collect();

        let mut fields = Map::new();
        fields.insert("coordinates".into(), Value::Array(coordinates));

        RouteRequest {
            profile: None,
            fields,
        }
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn with_preference(mut self, preference: Preference) -> Self {
        self.fields
            .insert("preference".into(), preference.as_str().into());
        self
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.fields.insert("format".into(), format.as_str().into());
        self
    }

    pub fn coordinates(&self) -> Option<&Value> {
        self.fields.get("coordinates")
    }

    pub fn preference(&self) -> Option<&Value> {
        self.fields.get("preference")
    }

    pub fn format(&self) -> Option<&Value> {
        self.fields.get("format")
    }
}

/// The part of the provider's reply the client cares about. Plain directions
/// answers carry `routes`, GeoJSON answers carry `features`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RouteResponse {
    #[serde(default)]
    pub routes: Vec<RouteSummary>,
    #[serde(default)]
    pub features: Vec<RouteSummary>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RouteSummary {
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Geometry {
    Encoded(String),
    LineString(LineString),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LineString {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<Vec<f64>>,
}

/// Points ready for drawing, latitude first.
pub type DecodedPath = Vec<Coordinates>;

impl RouteResponse {
    /// Geometry of the first route, if the provider found one.
    pub fn first_geometry(&self) -> Option<&Geometry> {
        let first = if self.routes.is_empty() {
            self.features.first()
        } else {
            self.routes.first()
        };

        first.and_then(|route| route.geometry.as_ref())
    }
}

impl Geometry {
    pub fn decode(&self) -> Result<DecodedPath, Error> {
        match self {
            Self::Encoded(encoded) => {
                let line = polyline::decode(encoded)?;
                Ok(line.0.into_iter().map(Coordinates::from).collect())
            }
            Self::LineString(line) => {
                if line.kind != "LineString" {
                    return Err(invalid_input_error());
                }

                line.coordinates
                    .iter()
                    .map(|values| {
                        Position::from_slice(values)
                            .map(Coordinates::from)
                            .ok_or_else(invalid_input_error)
                    })
                    .collect()
            }
        }
    }
}

#[test]
fn request_body_is_opaque_apart_from_profile() {
    let body = serde_json::json!({
        "coordinates": [[35.78, 35.53, 12.0], [35.80, 35.54]],
        "profile": "driving-car",
        "preference": "recommended",
        "format": "geojson",
        "instructions": false,
    });

    let request: RouteRequest = serde_json::from_value(body.clone()).unwrap();

    assert_eq!(request.profile, Some(Profile::DrivingCar));
    assert_eq!(request.preference(), Some(&serde_json::json!("recommended")));
    assert_eq!(serde_json::to_value(&request).unwrap(), body);

    let odd: RouteRequest =
        serde_json::from_value(serde_json::json!({ "coordinates": "bad" })).unwrap();
    assert_eq!(odd.profile, None);
    assert_eq!(odd.coordinates(), Some(&serde_json::json!("bad")));
}

#[test]
fn request_between_omits_unset_options() {
    let request = RouteRequest::between(Coordinates::new(35.53, 35.78), Coordinates::new(35.54, 35.8));

    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        serde_json::json!({ "coordinates": [[35.78, 35.53], [35.8, 35.54]] })
    );

    let request = request
        .with_profile(Profile::CyclingRegular)
        .with_preference(Preference::Shortest)
        .with_format(Format::Json);

    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        serde_json::json!({
            "coordinates": [[35.78, 35.53], [35.8, 35.54]],
            "profile": "cycling-regular",
            "preference": "shortest",
            "format": "json",
        })
    );
}

#[test]
fn profile_spellings() {
    for profile in Profile::ALL {
        let json = serde_json::to_value(profile).unwrap();

        assert_eq!(json, serde_json::json!(profile.as_str()));
        assert_eq!(serde_json::from_value::<Profile>(json).unwrap(), profile);
        assert_eq!(profile.as_str().parse::<Profile>().unwrap(), profile);
    }
}

#[test]
fn unknown_profile_is_rejected() {
    let body = serde_json::json!({
        "coordinates": [[35.78, 35.53], [35.80, 35.54]],
        "profile": "../../admin",
    });

    assert!(serde_json::from_value::<RouteRequest>(body).is_err());
    assert_eq!("hovercraft".parse::<Profile>().unwrap_err().code, 102);
}

#[test]
fn geojson_geometry_is_swapped_to_latitude_first() {
    let response: RouteResponse = serde_json::from_value(serde_json::json!({
        "routes": [{
            "geometry": {
                "type": "LineString",
                "coordinates": [[35.78, 35.53], [35.79, 35.535, 12.0], [35.80, 35.54]]
            }
        }]
    }))
    .unwrap();

    let path = response.first_geometry().unwrap().decode().unwrap();

    assert_eq!(
        path,
        vec![
            Coordinates::new(35.53, 35.78),
            Coordinates::new(35.535, 35.79),
            Coordinates::new(35.54, 35.80),
        ]
    );
}

#[test]
fn feature_collection_geometry() {
    let response: RouteResponse = serde_json::from_value(serde_json::json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": [[8.68, 49.41], [8.69, 49.42]] },
            "properties": {}
        }]
    }))
    .unwrap();

    let path = response.first_geometry().unwrap().decode().unwrap();

    assert_eq!(path[1], Coordinates::new(49.42, 8.69));
}

#[test]
fn missing_geometry() {
    let empty: RouteResponse = serde_json::from_str(r#"{"routes": []}"#).unwrap();
    let bare: RouteResponse = serde_json::from_str(r#"{"routes": [{"summary": {}}]}"#).unwrap();

    assert!(empty.first_geometry().is_none());
    assert!(bare.first_geometry().is_none());
}
