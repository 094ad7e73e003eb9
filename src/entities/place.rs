use serde::{Deserialize, Serialize};

use crate::{
    entities::Coordinates,
    error::{invalid_input_error, Error},
};

/// One hit from the place search provider. Latitude and longitude arrive as
/// strings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub lat: String,
    pub lon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl TryFrom<&PlaceCandidate> for Coordinates {
    type Error = Error;

    fn try_from(place: &PlaceCandidate) -> Result<Self, Self::Error> {
        let latitude = place
            .lat
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid_input_error())?;
        let longitude = place
            .lon
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid_input_error())?;

        Ok(Coordinates::new(latitude, longitude))
    }
}

#[test]
fn candidate_coordinates() {
    let candidates: Vec<PlaceCandidate> = serde_json::from_str(
        r#"[{"place_id": 1, "lat": "35.5317", "lon": "35.7901", "display_name": "Latakia"}]"#,
    )
    .unwrap();

    let coordinates = Coordinates::try_from(&candidates[0]).unwrap();

    assert_eq!(coordinates, Coordinates::new(35.5317, 35.7901));
    assert_eq!(candidates[0].display_name.as_deref(), Some("Latakia"));
}

#[test]
fn candidate_with_garbage_coordinates() {
    let place = PlaceCandidate {
        lat: "north".into(),
        lon: "35.79".into(),
        display_name: None,
    };

    assert_eq!(Coordinates::try_from(&place).unwrap_err().code, 100);
}
