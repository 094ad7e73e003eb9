use reqwest::Url;

use crate::{
    entities::PlaceCandidate,
    error::{unexpected_error, upstream_error, Error},
};

pub const DEFAULT_SEARCH_BASE: &str = "https://nominatim.openstreetmap.org/";

/// Free-text place search against a Nominatim-compatible service.
#[derive(Clone, Debug)]
pub struct Client {
    inner: reqwest::Client,
    base: Url,
}

impl Client {
    pub fn new(base: Url, user_agent: &str) -> Result<Self, Error> {
        let inner = reqwest::Client::builder().user_agent(user_agent).build()?;

        Ok(Self { inner, base })
    }

    #[tracing::instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, Error> {
        let url = self.base.join("search").map_err(|_| unexpected_error())?;

        let res = self
            .inner
            .get(url)
            .query(&[("format", "json")])
            .query(&[("q", query)])
            .send()
            .await?;

        let status = res.status();

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "place search failed");
            return Err(upstream_error());
        }

        let places: Vec<PlaceCandidate> = res.json().await?;

        Ok(places)
    }
}
