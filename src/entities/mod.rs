mod coordinates;
mod place;
mod route;

pub use coordinates::{Coordinates, Position};
pub use place::PlaceCandidate;
pub use route::{
    DecodedPath, Format, Geometry, LineString, Preference, Profile, RouteRequest, RouteResponse,
    RouteSummary,
};
