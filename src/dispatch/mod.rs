//! Request dispatch module
//!
//! Runs one request through a [`JsonHandler`]:
//! content negotiation, method check, body decoding, handler call, and
//! encoding of the result or error. Every request gets exactly one response
//! and no error escapes to the transport.

mod defaults;
mod negotiate;

pub use defaults::{HandlerDefaults, DEFAULT_MAX_BODY_SIZE};
pub use negotiate::{accepts_json, is_data_method};

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::http::request::Parts;
use hyper::{Request, Response, StatusCode};

use crate::error::{HandlerError, Reported};
use crate::handler::{Callable, HandlerDescriptor, Invocation, Payload, Reply};
use crate::http::response::{
    self, BODY_TOO_LARGE_MESSAGE, DECODE_FAILED_MESSAGE, ENCODE_FAILED_MESSAGE,
    INTERNAL_ERROR_BODY, JSON_CONTENT_TYPE,
};
use crate::http::ResponseWriter;
use crate::logger::{self, LogSink};

/// JSON REST endpoint wrapping one handler function.
///
/// ```
/// use json_handler::{HandlerError, JsonHandler, LogSink, Parts, ResponseWriter};
/// use serde_json::{json, Value};
///
/// fn status(_: &mut ResponseWriter, _: &Parts) -> Result<Value, HandlerError> {
///     Ok(json!({ "ok": true }))
/// }
///
/// let handler = JsonHandler::plain(status).log(LogSink::stderr());
/// assert!(!handler.descriptor().accepts_payload());
/// ```
#[derive(Debug)]
pub struct JsonHandler {
    descriptor: HandlerDescriptor,
    /// Overrides the default sink
    log: Option<LogSink>,
    defaults: HandlerDefaults,
}

impl JsonHandler {
    pub fn new(descriptor: HandlerDescriptor) -> Self {
        Self::with_defaults(descriptor, HandlerDefaults::default())
    }

    pub const fn with_defaults(descriptor: HandlerDescriptor, defaults: HandlerDefaults) -> Self {
        Self {
            descriptor,
            log: None,
            defaults,
        }
    }

    /// Endpoint for a GET/DELETE handler; see [`HandlerDescriptor::plain`].
    pub fn plain<F, R, E>(handler: F) -> Self
    where
        F: Fn(&mut ResponseWriter, &Parts) -> Result<R, E> + Send + Sync + 'static,
        R: Reply,
        E: Into<HandlerError>,
    {
        Self::new(HandlerDescriptor::plain(handler))
    }

    /// Endpoint for a payload-taking handler; see [`HandlerDescriptor::data`].
    pub fn data<F, P, R, E>(handler: F) -> Self
    where
        F: Fn(&mut ResponseWriter, &Parts, P) -> Result<R, E> + Send + Sync + 'static,
        P: Payload,
        R: Reply,
        E: Into<HandlerError>,
    {
        Self::new(HandlerDescriptor::data(handler))
    }

    /// Send this handler's hidden errors to `sink` instead of the default.
    #[must_use]
    pub fn log(mut self, sink: LogSink) -> Self {
        self.log = Some(sink);
        self
    }

    pub const fn descriptor(&self) -> &HandlerDescriptor {
        &self.descriptor
    }

    fn sink(&self) -> Option<&LogSink> {
        self.log.as_ref().or(self.defaults.log.as_ref())
    }

    /// Serve one request.
    pub async fn serve<B>(&self, req: Request<B>) -> Response<Full<Bytes>>
    where
        B: Body,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let mut w = ResponseWriter::new();
        self.dispatch(&mut w, req).await;
        w.into_response()
    }

    async fn dispatch<B>(&self, w: &mut ResponseWriter, req: Request<B>)
    where
        B: Body,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        if !accepts_json(req.headers()) {
            response::write_not_json_client(w);
            return;
        }
        w.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

        let (parts, body) = req.into_parts();

        if self.descriptor.accepts_payload() != is_data_method(&parts.method) {
            let err = Reported::new(response::invalid_method_message(&parts.method))
                .with_status(StatusCode::BAD_REQUEST);
            self.write_error(w, err.into());
            return;
        }

        let returned = match self.descriptor.callable() {
            Callable::Plain(call) => {
                drop(body);
                call(&mut *w, &parts)
            }
            Callable::Data(call) => {
                let bytes = match self.read_body(body).await {
                    Ok(bytes) => bytes,
                    Err(err) => {
                        self.write_error(w, err.into());
                        return;
                    }
                };
                match call(&mut *w, &parts, &bytes[..]) {
                    Invocation::Returned(returned) => returned,
                    Invocation::Undecodable(err) => {
                        logger::log_decode_error(self.sink(), &err);
                        self.write_error(w, decode_failed().into());
                        return;
                    }
                }
            }
        };

        match returned {
            Ok(reply) => self.write_reply(w, &*reply),
            Err(err) => self.write_error(w, err),
        }
    }

    /// Collect the request body; the body is dropped once this returns.
    async fn read_body<B>(&self, body: B) -> Result<Bytes, Reported>
    where
        B: Body,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        match Limited::new(body, self.defaults.max_body_size).collect().await {
            Ok(collected) => Ok(collected.to_bytes()),
            Err(err) if err.downcast_ref::<LengthLimitError>().is_some() => {
                Err(Reported::new(BODY_TOO_LARGE_MESSAGE).with_status(StatusCode::PAYLOAD_TOO_LARGE))
            }
            Err(err) => {
                logger::log_body_read_error(self.sink(), &err);
                Err(decode_failed())
            }
        }
    }

    fn write_reply(&self, w: &mut ResponseWriter, reply: &dyn Reply) {
        match reply.to_json() {
            // Handler produced the response itself
            None => {}
            Some(Ok(body)) => w.write_body(&body),
            Some(Err(err)) => {
                logger::log_encode_error(self.sink(), "response", &err);
                let err = Reported::new(ENCODE_FAILED_MESSAGE)
                    .with_status(StatusCode::INTERNAL_SERVER_ERROR);
                self.write_error(w, err.into());
            }
        }
    }

    fn write_error(&self, w: &mut ResponseWriter, err: HandlerError) {
        match err {
            HandlerError::Reported(reported) => match reported.encode_body() {
                Ok(body) => {
                    if let Some(status) = reported.status() {
                        self.commit_status(w, status);
                    }
                    w.write_body(&body);
                }
                Err(err) => {
                    logger::log_encode_error(self.sink(), "error response", &err);
                    self.write_internal_error(w);
                }
            },
            HandlerError::Opaque(err) => {
                logger::log_internal_error(self.sink(), &err);
                self.write_internal_error(w);
            }
        }
    }

    fn write_internal_error(&self, w: &mut ResponseWriter) {
        self.commit_status(w, StatusCode::INTERNAL_SERVER_ERROR);
        w.write_body(INTERNAL_ERROR_BODY.as_bytes());
    }

    fn commit_status(&self, w: &mut ResponseWriter, status: StatusCode) {
        if !w.write_header(status) {
            logger::log_superfluous_status(self.sink(), status);
        }
    }
}

fn decode_failed() -> Reported {
    Reported::new(DECODE_FAILED_MESSAGE).with_status(StatusCode::BAD_REQUEST)
}
