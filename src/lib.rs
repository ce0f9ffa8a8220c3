//! Typed JSON REST handlers for hyper.
//!
//! A handler is a plain function taking the response writer and the request
//! head, plus a decoded JSON payload for data methods (anything but GET and
//! DELETE):
//!
//! ```
//! use json_handler::{HandlerError, JsonHandler, Parts, Reported, ResponseWriter};
//! use hyper::StatusCode;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Deserialize, Serialize)]
//! struct Person {
//!     name: String,
//! }
//!
//! fn create(_: &mut ResponseWriter, _: &Parts, person: Box<Person>) -> Result<Box<Person>, HandlerError> {
//!     if person.name.is_empty() {
//!         return Err(Reported::new("name is required").with_status(StatusCode::BAD_REQUEST).into());
//!     }
//!     Ok(person)
//! }
//!
//! let endpoint = JsonHandler::data(create);
//! assert!(endpoint.descriptor().accepts_payload());
//! ```
//!
//! Handler shapes are checked at compile time. At request time the
//! [`JsonHandler`] negotiates content, checks the method, decodes the body,
//! calls the function, and encodes its result or error as JSON.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use dispatch::{HandlerDefaults, JsonHandler};
pub use error::{HandlerError, Reported};
pub use handler::{HandlerDescriptor, Payload, PayloadShape, Reply};
pub use http::ResponseWriter;
pub use hyper::http::request::Parts;
pub use logger::LogSink;
