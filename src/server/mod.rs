mod handlers;

pub use handlers::health::HEALTH_MESSAGE;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::{DynAPI, API};
use crate::error::{unexpected_error, Error};
use crate::server::handlers::{health, routes};

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/route", post(routes::create))
        .layer(Extension(api))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;
    let app = router(api);

    let server = axum::Server::try_bind(&addr).map_err(|err| {
        tracing::error!(error = %err, %addr, "failed to bind");
        unexpected_error()
    })?;

    tracing::info!("listening on {}", addr);

    server.serve(app.into_make_service()).await.map_err(|err| {
        tracing::error!(error = %err, "server error");
        unexpected_error()
    })
}
