//! HTTP response building module
//!
//! Fixed bodies and messages produced by the dispatcher, plus the standalone
//! responses used by the demo router.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Response, StatusCode};

use super::writer::ResponseWriter;

/// Plain-text body for clients that cannot read JSON
pub const NOT_JSON_CLIENT_BODY: &str = "this endpoint only responds to json-accepting clients";

/// Body sent whenever the real error must not reach the client
pub const INTERNAL_ERROR_BODY: &str = r#"{"error":"an internal server error occurred"}"#;

pub const DECODE_FAILED_MESSAGE: &str = "could not deserialize json request body";

pub const ENCODE_FAILED_MESSAGE: &str = "problem preparing response";

pub const BODY_TOO_LARGE_MESSAGE: &str = "request body too large";

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Message for a method that does not match the handler's payload shape
pub fn invalid_method_message(method: &hyper::Method) -> String {
    format!("invalid http method to this endpoint: {method}")
}

/// Write the 400 plain-text rejection for a non-JSON client
pub fn write_not_json_client(w: &mut ResponseWriter) {
    w.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    w.write_header(StatusCode::BAD_REQUEST);
    w.write_body(NOT_JSON_CLIENT_BODY.as_bytes());
}

/// Build 404 Not Found response
pub fn not_found() -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(r#"{"error":"not found"}"#)));
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    response
}
