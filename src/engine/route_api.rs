use super::Engine;

use async_trait::async_trait;
use serde_json::Value;

use crate::{api::RouteAPI, entities::RouteRequest, error::Error};

#[async_trait]
impl RouteAPI for Engine {
    #[tracing::instrument(skip_all)]
    async fn find_route(&self, request: RouteRequest) -> Result<Value, Error> {
        let profile = request.profile.unwrap_or(self.default_profile);

        self.directions.directions(profile, &request).await
    }
}
