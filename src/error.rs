use axum::extract::rejection::JsonRejection;
use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Display};

pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to fetch route from ORS";

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    /// Failures talking to the directions provider, all reported to callers
    /// under one generic message.
    pub fn is_upstream(&self) -> bool {
        matches!(self.code, 3 | 4)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(error = %rejection, "rejected request body");
        invalid_body_error(rejection)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            _ if self.is_upstream() => (StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_FAILURE_MESSAGE),
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 100,
        message: "invalid input".into(),
    }
}

pub fn malformed_polyline_error(position: usize) -> Error {
    Error {
        code: 101,
        message: format!("malformed polyline at byte {}", position),
    }
}

pub fn unknown_profile_error(name: &str) -> Error {
    Error {
        code: 102,
        message: format!("unknown profile `{}`", name),
    }
}

pub fn invalid_body_error(rejection: JsonRejection) -> Error {
    Error {
        code: 103,
        message: rejection.to_string(),
    }
}

pub fn env_var_error(err: env::VarError) -> Error {
    Error {
        code: 1,
        message: format!("environment variable error: {}", err),
    }
}

pub fn config_error(name: &str) -> Error {
    Error {
        code: 2,
        message: format!("invalid configuration value for {}", name),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    Error {
        code: 3,
        message: format!("reqwest error: {}", err),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 4,
        message: "upstream error".into(),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: 5,
        message: "unexpected error".into(),
    }
}

#[test]
fn upstream_errors_share_one_body() {
    use tokio_test::block_on;

    for err in [upstream_error(), unexpected_error()] {
        let is_upstream = err.is_upstream();
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = block_on(hyper::body::to_bytes(response.into_body())).unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        if is_upstream {
            assert_eq!(body, json!({ "error": "Failed to fetch route from ORS" }));
        } else {
            assert_eq!(body, json!({ "error": "Internal Server Error" }));
        }
    }
}

#[test]
fn input_errors_are_bad_requests() {
    let response = malformed_polyline_error(3).into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
