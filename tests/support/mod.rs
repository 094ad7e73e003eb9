#![allow(dead_code)]

use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Extension, Json, Path, Query},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use route_relay::api::DynAPI;
use route_relay::config::{parse_base_url, Config};
use route_relay::engine::Engine;
use route_relay::entities::Profile;
use serde_json::Value;

pub const API_KEY: &str = "test-ors-key";

/// Serves `app` on an ephemeral local port.
pub fn spawn(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = axum::Server::from_tcp(listener)
        .unwrap()
        .serve(app.into_make_service());

    tokio::spawn(async move {
        server.await.unwrap();
    });

    addr
}

/// An address nothing is listening on.
pub fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

pub fn base(addr: SocketAddr) -> String {
    format!("http://{}/", addr)
}

#[derive(Clone, Debug)]
pub struct Captured {
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

/// Requests seen by a fake upstream, plus the replies it gives.
#[derive(Clone)]
pub struct Upstream {
    pub captured: Arc<Mutex<Vec<Captured>>>,
    replies: Arc<Mutex<Vec<(StatusCode, Value)>>>,
}

impl Upstream {
    pub fn replying(status: StatusCode, body: Value) -> Self {
        Self::in_turn(vec![(status, body)])
    }

    /// Gives each reply once, in order, then repeats the last one.
    pub fn in_turn(replies: Vec<(StatusCode, Value)>) -> Self {
        assert!(!replies.is_empty());

        Upstream {
            captured: Arc::new(Mutex::new(Vec::new())),
            replies: Arc::new(Mutex::new(replies)),
        }
    }

    pub fn captured(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }

    fn record(&self, path: String, headers: &HeaderMap, body: Value) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(String::from)
        };

        self.captured.lock().unwrap().push(Captured {
            path,
            authorization: header("authorization"),
            content_type: header("content-type"),
            body,
        });
    }

    fn reply(&self) -> (StatusCode, Json<Value>) {
        let mut replies = self.replies.lock().unwrap();
        let (status, body) = if replies.len() > 1 {
            replies.remove(0)
        } else {
            replies[0].clone()
        };

        (status, Json(body))
    }
}

async fn directions(
    Path(profile): Path<String>,
    headers: HeaderMap,
    Extension(upstream): Extension<Upstream>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    upstream.record(format!("/v2/directions/{}", profile), &headers, body);
    upstream.reply()
}

async fn relay_route(
    headers: HeaderMap,
    Extension(upstream): Extension<Upstream>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    upstream.record("/route".into(), &headers, body);
    upstream.reply()
}

async fn search(
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    Extension(upstream): Extension<Upstream>,
) -> (StatusCode, Json<Value>) {
    let body = Value::Object(
        params
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect(),
    );
    upstream.record("/search".into(), &headers, body);
    upstream.reply()
}

/// A stand-in for the directions provider.
pub fn fake_provider(upstream: Upstream) -> SocketAddr {
    spawn(
        Router::new()
            .route("/v2/directions/:profile", post(directions))
            .layer(Extension(upstream)),
    )
}

/// A stand-in for the relay, as seen by the consumer.
pub fn fake_relay(upstream: Upstream) -> SocketAddr {
    spawn(
        Router::new()
            .route("/route", post(relay_route))
            .layer(Extension(upstream)),
    )
}

/// A stand-in for the place search service.
pub fn fake_search(upstream: Upstream) -> SocketAddr {
    spawn(
        Router::new()
            .route("/search", get(search))
            .layer(Extension(upstream)),
    )
}

pub fn config(provider: SocketAddr) -> Config {
    Config {
        api_key: API_KEY.into(),
        api_base: parse_base_url(&base(provider)).unwrap(),
        default_profile: Profile::FootWalking,
        timeout: None,
        addr: closed_addr(),
    }
}

/// Runs the real relay in front of `provider`.
pub fn relay(provider: SocketAddr) -> SocketAddr {
    relay_with(&config(provider))
}

pub fn relay_with(config: &Config) -> SocketAddr {
    let engine = Engine::new(config).unwrap();
    let api = Arc::new(engine) as DynAPI;

    spawn(route_relay::server::router(api))
}

/// A provider that answers every directions call with 200 and a text body.
pub fn plain_text_provider(body: &'static str) -> SocketAddr {
    spawn(Router::new().route(
        "/v2/directions/:profile",
        post(move || async move { (StatusCode::OK, body) }),
    ))
}

/// A provider that takes `delay` before answering with an empty route list.
pub fn slow_provider(delay: Duration) -> SocketAddr {
    spawn(Router::new().route(
        "/v2/directions/:profile",
        post(move || async move {
            tokio::time::sleep(delay).await;
            Json(serde_json::json!({ "routes": [] }))
        }),
    ))
}
