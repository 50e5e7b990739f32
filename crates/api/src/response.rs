//! Shared response helpers for page handlers.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// `302 Found` redirect to `location`.
///
/// Used after every successful form POST so a browser refresh does not
/// resubmit the form.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
