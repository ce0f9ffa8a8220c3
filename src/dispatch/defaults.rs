//! Handler defaults module
//!
//! Settings injected into every handler built from the same defaults. A
//! handler's own log sink, if set, takes precedence over the default one.

use hyper::http::request::Parts;
use std::io;

use super::JsonHandler;
use crate::config::Config;
use crate::error::HandlerError;
use crate::handler::{HandlerDescriptor, Payload, Reply};
use crate::http::ResponseWriter;
use crate::logger::LogSink;

/// 10 MiB
pub const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Shared configuration for a group of handlers
#[derive(Debug, Clone)]
pub struct HandlerDefaults {
    pub(crate) log: Option<LogSink>,
    pub(crate) max_body_size: usize,
}

impl Default for HandlerDefaults {
    fn default() -> Self {
        Self {
            log: None,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

impl HandlerDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default sink for errors hidden from clients
    #[must_use]
    pub fn log(mut self, sink: LogSink) -> Self {
        self.log = Some(sink);
        self
    }

    /// Largest request body, in bytes, a data handler will read
    #[must_use]
    pub const fn max_body_size(mut self, limit: usize) -> Self {
        self.max_body_size = limit;
        self
    }

    /// Build defaults from loaded configuration.
    ///
    /// Hidden errors go to `logging.error_log_file` when set, stderr otherwise.
    pub fn from_config(config: &Config) -> io::Result<Self> {
        let sink = match config.logging.error_log_file.as_deref() {
            Some(path) => LogSink::file(path)?,
            None => LogSink::stderr(),
        };
        Ok(Self {
            log: Some(sink),
            max_body_size: usize::try_from(config.http.max_body_size).unwrap_or(usize::MAX),
        })
    }

    /// GET/DELETE endpoint using these defaults
    pub fn plain<F, R, E>(&self, handler: F) -> JsonHandler
    where
        F: Fn(&mut ResponseWriter, &Parts) -> Result<R, E> + Send + Sync + 'static,
        R: Reply,
        E: Into<HandlerError>,
    {
        JsonHandler::with_defaults(HandlerDescriptor::plain(handler), self.clone())
    }

    /// Payload-taking endpoint using these defaults
    pub fn data<F, P, R, E>(&self, handler: F) -> JsonHandler
    where
        F: Fn(&mut ResponseWriter, &Parts, P) -> Result<R, E> + Send + Sync + 'static,
        P: Payload,
        R: Reply,
        E: Into<HandlerError>,
    {
        JsonHandler::with_defaults(HandlerDescriptor::data(handler), self.clone())
    }
}
