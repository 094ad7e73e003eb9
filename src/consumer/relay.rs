use reqwest::Url;
use serde_json::Value;

use crate::{
    entities::RouteRequest,
    error::{unexpected_error, upstream_error, Error},
};

/// HTTP client for the relay's `POST /route`.
#[derive(Clone, Debug)]
pub struct RelayClient {
    inner: reqwest::Client,
    base: Url,
}

impl RelayClient {
    pub fn new(base: Url) -> Result<Self, Error> {
        Ok(Self {
            inner: reqwest::Client::builder().build()?,
            base,
        })
    }

    #[tracing::instrument(skip_all)]
    pub async fn route(&self, request: &RouteRequest) -> Result<Value, Error> {
        let url = self.base.join("route").map_err(|_| unexpected_error())?;

        let res = self.inner.post(url).json(request).send().await?;
        let status = res.status();

        if !status.is_success() {
            let detail = res.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), detail = %detail, "relay refused route request");
            return Err(upstream_error());
        }

        Ok(res.json().await?)
    }
}
