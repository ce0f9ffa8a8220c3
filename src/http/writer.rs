//! Response writer module
//!
//! Buffers one response: the status is committed once, headers are frozen at
//! commit time, and body bytes accumulate until the response is built.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::HeaderMap;
use hyper::{Response, StatusCode};
use std::io;

/// Response under construction, handed to handlers alongside the request.
///
/// Handlers may set headers or a status before returning; the dispatcher
/// writes the JSON result into the same writer afterwards.
#[derive(Debug, Default)]
pub struct ResponseWriter {
    status: Option<StatusCode>,
    headers: HeaderMap,
    /// Headers as they were when the status was committed
    committed_headers: Option<HeaderMap>,
    body: Vec<u8>,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Header changes made after the status is committed are not sent.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Commit the response status.
    ///
    /// Returns `false` and leaves the response untouched if a status was
    /// already committed.
    pub fn write_header(&mut self, status: StatusCode) -> bool {
        if self.status.is_some() {
            return false;
        }
        self.status = Some(status);
        self.committed_headers = Some(self.headers.clone());
        true
    }

    /// Append body bytes, committing `200 OK` first if no status was written.
    pub fn write_body(&mut self, bytes: &[u8]) {
        if self.status.is_none() {
            self.write_header(StatusCode::OK);
        }
        self.body.extend_from_slice(bytes);
    }

    pub const fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub const fn is_committed(&self) -> bool {
        self.status.is_some()
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Build the final hyper response.
    pub fn into_response(self) -> Response<Full<Bytes>> {
        let mut response = Response::new(Full::new(Bytes::from(self.body)));
        *response.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *response.headers_mut() = self.committed_headers.unwrap_or(self.headers);
        response
    }
}

impl io::Write for ResponseWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_body(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::{HeaderValue, CONTENT_TYPE};
    use std::io::Write;

    #[test]
    fn test_first_status_wins() {
        let mut w = ResponseWriter::new();
        assert!(w.write_header(StatusCode::CREATED));
        assert!(!w.write_header(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(w.into_response().status(), StatusCode::CREATED);
    }

    #[test]
    fn test_body_commits_ok() {
        let mut w = ResponseWriter::new();
        write!(w, "hello").unwrap();
        assert!(w.is_committed());
        assert!(!w.write_header(StatusCode::BAD_REQUEST));
        assert_eq!(w.status(), Some(StatusCode::OK));
        assert_eq!(w.body(), b"hello");
    }

    #[test]
    fn test_headers_frozen_at_commit() {
        let mut w = ResponseWriter::new();
        w.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        w.write_header(StatusCode::OK);
        w.headers_mut().insert("x-late", HeaderValue::from_static("1"));

        let response = w.into_response();
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        assert!(response.headers().get("x-late").is_none());
    }

    #[test]
    fn test_uncommitted_defaults() {
        let mut w = ResponseWriter::new();
        w.headers_mut().insert("x-custom", HeaderValue::from_static("yes"));
        let response = w.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-custom"], "yes");
    }
}
