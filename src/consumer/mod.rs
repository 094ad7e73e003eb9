//! Client side of the relay: builds route requests from map coordinates,
//! calls the relay and turns the returned geometry into drawable points.
//!
//! The consumer owns the currently drawn path. A path is only replaced once a
//! new one has been fetched and fully decoded; every failure is reported as a
//! [`RouteNotice`] and leaves the drawn path as it was.

mod relay;

pub use relay::RelayClient;

use std::fmt;

use serde_json::Value;

use crate::{
    config::parse_base_url,
    entities::{Coordinates, DecodedPath, Format, Preference, Profile, RouteRequest, RouteResponse},
    error::{config_error, Error},
    external::nominatim,
};

pub use crate::external::nominatim::DEFAULT_SEARCH_BASE;

pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransportMode {
    Walking,
    #[default]
    Driving,
    Cycling,
}

impl TransportMode {
    pub fn profile(&self) -> Profile {
        match self {
            Self::Walking => Profile::FootWalking,
            Self::Driving => Profile::DrivingCar,
            Self::Cycling => Profile::CyclingRegular,
        }
    }
}

/// User-facing outcome of a route or search attempt that produced nothing to
/// draw. None of these end the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteNotice {
    NoRouteFound,
    PlaceNotFound,
    LocationUnavailable,
    FetchFailed,
    SearchFailed,
    MalformedGeometry,
}

impl fmt::Display for RouteNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::NoRouteFound => "No route found.",
            Self::PlaceNotFound => "Place not found",
            Self::LocationUnavailable => "Please enable location",
            Self::FetchFailed => "Error fetching route",
            Self::SearchFailed => "Error searching for place",
            Self::MalformedGeometry => "Route geometry could not be read",
        };

        f.write_str(message)
    }
}

impl std::error::Error for RouteNotice {}

pub struct RouteConsumer {
    relay: RelayClient,
    search: nominatim::Client,
    pub mode: TransportMode,
    pub preference: Option<Preference>,
    pub format: Option<Format>,
    user_location: Option<Coordinates>,
    destination: Option<Coordinates>,
    path: Option<DecodedPath>,
}

impl RouteConsumer {
    pub fn new(relay_base: &str, search_base: &str) -> Result<Self, Error> {
        let relay_base = parse_base_url(relay_base).ok_or_else(|| config_error("relay base url"))?;
        let search_base =
            parse_base_url(search_base).ok_or_else(|| config_error("search base url"))?;

        Ok(Self {
            relay: RelayClient::new(relay_base)?,
            search: nominatim::Client::new(search_base, DEFAULT_USER_AGENT)?,
            mode: TransportMode::default(),
            preference: None,
            format: None,
            user_location: None,
            destination: None,
            path: None,
        })
    }

    pub fn set_user_location(&mut self, location: Coordinates) {
        self.user_location = Some(location);
    }

    pub fn user_location(&self) -> Option<Coordinates> {
        self.user_location
    }

    pub fn destination(&self) -> Option<Coordinates> {
        self.destination
    }

    /// The path currently drawn on the map, latitude first.
    pub fn path(&self) -> Option<&[Coordinates]> {
        self.path.as_deref()
    }

    pub fn request(&self, from: Coordinates, to: Coordinates) -> RouteRequest {
        let mut request = RouteRequest::between(from, to).with_profile(self.mode.profile());

        if let Some(preference) = self.preference {
            request = request.with_preference(preference);
        }
        if let Some(format) = self.format {
            request = request.with_format(format);
        }

        request
    }

    #[tracing::instrument(skip(self))]
    pub async fn draw_route(
        &mut self,
        from: Coordinates,
        to: Coordinates,
    ) -> Result<&[Coordinates], RouteNotice> {
        let request = self.request(from, to);

        let body = self.relay.route(&request).await.map_err(|err| {
            tracing::warn!(error = %err, "routing error");
            RouteNotice::FetchFailed
        })?;

        let path = extract_path(body)?;

        Ok(self.path.insert(path).as_slice())
    }

    /// Resolves `query` to a place and routes there from the user's location.
    ///
    /// Returns `Ok(None)` for a blank query, which does nothing.
    #[tracing::instrument(skip(self))]
    pub async fn search_and_route(
        &mut self,
        query: &str,
    ) -> Result<Option<&[Coordinates]>, RouteNotice> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        let origin = self.user_location.ok_or(RouteNotice::LocationUnavailable)?;

        let places = self.search.search(query).await.map_err(|err| {
            tracing::warn!(error = %err, "place search error");
            RouteNotice::SearchFailed
        })?;

        let place = places.first().ok_or(RouteNotice::PlaceNotFound)?;
        let destination = Coordinates::try_from(place).map_err(|err| {
            tracing::warn!(error = %err, lat = %place.lat, lon = %place.lon, "place search returned unreadable coordinates");
            RouteNotice::SearchFailed
        })?;

        self.destination = Some(destination);

        self.draw_route(origin, destination).await.map(Some)
    }
}

/// Pulls the first route's geometry out of a relay reply.
pub fn extract_path(body: Value) -> Result<DecodedPath, RouteNotice> {
    let response: RouteResponse =
        serde_json::from_value(body).map_err(|_| RouteNotice::MalformedGeometry)?;

    let geometry = response.first_geometry().ok_or_else(|| {
        tracing::warn!("no route geometry found");
        RouteNotice::NoRouteFound
    })?;

    let path = geometry.decode().map_err(|err| {
        tracing::warn!(error = %err, "route geometry could not be decoded");
        RouteNotice::MalformedGeometry
    })?;

    if path.is_empty() {
        return Err(RouteNotice::NoRouteFound);
    }

    Ok(path)
}
