use axum::extract::{rejection::JsonRejection, Extension, Json};
use serde_json::Value;

use crate::api::DynAPI;
use crate::entities::RouteRequest;
use crate::error::Error;

pub async fn create(
    Extension(api): Extension<DynAPI>,
    body: Result<Json<RouteRequest>, JsonRejection>,
) -> Result<Json<Value>, Error> {
    let Json(request) = body?;

    tracing::info!(
        coordinates = ?request.coordinates(),
        profile = ?request.profile,
        preference = ?request.preference(),
        format = ?request.format(),
        "route request received"
    );

    let route = api.find_route(request).await?;

    Ok(route.into())
}
