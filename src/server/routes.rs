// Route table module
// Exact-path lookup from request path to JSON handler

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use std::collections::HashMap;

use crate::dispatch::JsonHandler;
use crate::http::not_found;

/// Handlers keyed by exact request path
#[derive(Debug, Default)]
pub struct Routes {
    handlers: HashMap<String, JsonHandler>,
}

impl Routes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `path`, replacing any previous one
    #[must_use]
    pub fn route(mut self, path: &str, handler: JsonHandler) -> Self {
        self.handlers.insert(path.to_string(), handler);
        self
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Serve `req` with the handler registered for its path, or 404
    pub async fn handle<B>(&self, req: Request<B>) -> Response<Full<Bytes>>
    where
        B: Body,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        match self.handlers.get(req.uri().path()) {
            Some(handler) => handler.serve(req).await,
            None => not_found(),
        }
    }
}
