mod support;

use axum::http::StatusCode;
use route_relay::server::HEALTH_MESSAGE;
use serde_json::{json, Value};

use std::time::Duration;

use support::{
    base, closed_addr, config, fake_provider, plain_text_provider, relay, relay_with,
    slow_provider, Upstream, API_KEY,
};

const ORS_FAILURE: &str = "Failed to fetch route from ORS";

async fn post_route(relay: std::net::SocketAddr, body: &Value) -> (StatusCode, Value) {
    let res = reqwest::Client::new()
        .post(format!("{}route", base(relay)))
        .json(body)
        .send()
        .await
        .unwrap();

    let status = StatusCode::from_u16(res.status().as_u16()).unwrap();
    (status, res.json().await.unwrap())
}

async fn post_raw(relay: std::net::SocketAddr, body: &'static str) -> (StatusCode, Value) {
    let res = reqwest::Client::new()
        .post(format!("{}route", base(relay)))
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .unwrap();

    let status = StatusCode::from_u16(res.status().as_u16()).unwrap();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn health_check_answers() {
    let relay = relay(closed_addr());

    let res = reqwest::get(base(relay)).await.unwrap();

    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.text().await.unwrap(), HEALTH_MESSAGE);
}

#[tokio::test]
async fn forwards_request_unchanged_to_profile_endpoint() {
    let reply = json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": [[35.78, 35.53], [35.8, 35.54]] },
            "properties": { "summary": { "distance": 2456.1, "duration": 301.7 } }
        }],
        "metadata": { "attribution": "openrouteservice.org" }
    });
    let upstream = Upstream::replying(StatusCode::OK, reply.clone());
    let relay = relay(fake_provider(upstream.clone()));

    let request = json!({
        "coordinates": [[35.78, 35.53], [35.80, 35.54]],
        "profile": "driving-car",
        "preference": "shortest",
        "format": "geojson",
    });

    let (status, body) = post_route(relay, &request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, reply);

    let captured = upstream.captured();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].path, "/v2/directions/driving-car");
    assert_eq!(captured[0].authorization.as_deref(), Some(API_KEY));
    assert_eq!(captured[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(captured[0].body, request);
}

#[tokio::test]
async fn missing_profile_uses_default_and_keeps_extra_fields() {
    let upstream = Upstream::replying(StatusCode::OK, json!({ "routes": [] }));
    let relay = relay(fake_provider(upstream.clone()));

    let request = json!({
        "coordinates": [[8.681495, 49.41461], [8.687872, 49.420318]],
        "instructions": false,
        "units": "km",
    });

    let (status, _) = post_route(relay, &request).await;

    assert_eq!(status, StatusCode::OK);

    let captured = upstream.captured();
    assert_eq!(captured[0].path, "/v2/directions/foot-walking");
    assert_eq!(captured[0].body, request);
}

#[tokio::test]
async fn provider_error_becomes_generic_failure() {
    for reply in [
        json!({ "error": { "code": 2010, "message": "Could not find routable point" } }),
        json!("quota exceeded"),
        json!([]),
    ] {
        let upstream = Upstream::replying(StatusCode::NOT_FOUND, reply);
        let relay = relay(fake_provider(upstream.clone()));

        let (status, body) = post_route(relay, &json!({ "coordinates": [[1.0, 2.0], [3.0, 4.0]] })).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to fetch route from ORS" }));
        assert_eq!(upstream.captured().len(), 1);
    }
}

#[tokio::test]
async fn unreachable_provider_becomes_generic_failure() {
    let relay = relay(closed_addr());

    let (status, body) = post_route(relay, &json!({ "coordinates": [[1.0, 2.0], [3.0, 4.0]] })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch route from ORS" }));

    // the relay keeps serving after a failure
    let res = reqwest::get(base(relay)).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
}

#[tokio::test]
async fn options_and_positions_are_left_to_the_provider() {
    let upstream = Upstream::replying(StatusCode::OK, json!({ "routes": [] }));
    let relay = relay(fake_provider(upstream.clone()));

    let request = json!({
        "coordinates": [[35.78, 35.53, 12.0], [35.80, 35.54]],
        "profile": "cycling-regular",
        "preference": "recommended",
        "format": "encodedpolyline",
    });

    let (status, _) = post_route(relay, &request).await;

    assert_eq!(status, StatusCode::OK);

    let captured = upstream.captured();
    assert_eq!(captured[0].path, "/v2/directions/cycling-regular");
    assert_eq!(captured[0].body, request);
}

#[tokio::test]
async fn provider_judges_bad_coordinates() {
    let upstream = Upstream::replying(
        StatusCode::BAD_REQUEST,
        json!({ "error": { "code": 2003, "message": "Parameter 'coordinates' has incorrect value or format." } }),
    );
    let relay = relay(fake_provider(upstream.clone()));

    let (status, body) = post_route(relay, &json!({ "coordinates": "bad" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": ORS_FAILURE }));
    assert_eq!(upstream.captured()[0].body, json!({ "coordinates": "bad" }));
}

#[tokio::test]
async fn unknown_profile_is_a_json_error() {
    let upstream = Upstream::replying(StatusCode::OK, json!({ "routes": [] }));
    let relay = relay(fake_provider(upstream.clone()));

    let (status, body) = post_route(
        relay,
        &json!({ "coordinates": [[1.0, 2.0], [3.0, 4.0]], "profile": "hovercraft" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("unknown profile"));
    assert!(upstream.captured().is_empty());
}

#[tokio::test]
async fn unparsable_body_is_a_json_error() {
    let upstream = Upstream::replying(StatusCode::OK, json!({ "routes": [] }));
    let relay = relay(fake_provider(upstream.clone()));

    let (status, body) = post_raw(relay, "{\"coordinates\": [[1.0, 2.0]").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(upstream.captured().is_empty());
}

#[tokio::test]
async fn non_json_provider_reply_becomes_generic_failure() {
    let relay = relay(plain_text_provider("not json"));

    let (status, body) = post_route(relay, &json!({ "coordinates": [[1.0, 2.0], [3.0, 4.0]] })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": ORS_FAILURE }));
}

#[tokio::test]
async fn provider_timeout_becomes_generic_failure() {
    let mut config = config(slow_provider(Duration::from_secs(5)));
    config.timeout = Some(Duration::from_millis(200));
    let relay = relay_with(&config);

    let (status, body) = post_route(relay, &json!({ "coordinates": [[1.0, 2.0], [3.0, 4.0]] })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": ORS_FAILURE }));
}
