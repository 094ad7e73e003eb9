use std::time::Duration;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::Url;
use serde_json::Value;

use crate::{
    entities::{Profile, RouteRequest},
    error::{config_error, reqwest_error, unexpected_error, upstream_error, Error},
};

/// OpenRouteService directions client. Holds the credential and a pooled
/// HTTP client for the lifetime of the relay.
#[derive(Clone, Debug)]
pub struct Client {
    inner: reqwest::Client,
    base: Url,
    api_key: HeaderValue,
}

impl Client {
    pub fn new(base: Url, api_key: &str, timeout: Option<Duration>) -> Result<Self, Error> {
        let mut api_key = HeaderValue::from_str(api_key).map_err(|_| config_error("ORS_API_KEY"))?;
        api_key.set_sensitive(true);

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            inner: builder.build()?,
            base,
            api_key,
        })
    }

    pub fn directions_url(&self, profile: Profile) -> Result<Url, Error> {
        self.base
            .join(&format!("v2/directions/{}", profile))
            .map_err(|_| unexpected_error())
    }

    #[tracing::instrument(skip(self, request))]
    pub async fn directions(&self, profile: Profile, request: &RouteRequest) -> Result<Value, Error> {
        let url = self.directions_url(profile)?;

        let res = self
            .inner
            .post(url)
            .header(AUTHORIZATION, self.api_key.clone())
            .json(request)
            .send()
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "directions provider unreachable");
                reqwest_error(err)
            })?;

        let status = res.status();

        if !status.is_success() {
            let detail = res.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), detail = %detail, "directions provider error");
            return Err(upstream_error());
        }

        let data: Value = res.json().await.map_err(|err| {
            tracing::error!(error = %err, "directions provider sent a malformed reply");
            reqwest_error(err)
        })?;

        Ok(data)
    }
}

#[test]
fn directions_url_per_profile() {
    let base = Url::parse("https://api.openrouteservice.org/").unwrap();
    let client = Client::new(base, "secret", None).unwrap();

    assert_eq!(
        client.directions_url(Profile::CyclingRegular).unwrap().as_str(),
        "https://api.openrouteservice.org/v2/directions/cycling-regular"
    );
}

#[test]
fn credential_must_be_a_header_value() {
    let base = Url::parse("https://api.openrouteservice.org/").unwrap();

    assert_eq!(Client::new(base, "line\nbreak", None).unwrap_err().code, 2);
}
