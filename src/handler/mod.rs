//! Handler descriptor module
//!
//! Turns an ordinary function into a [`HandlerDescriptor`]. The handler shape
//! is checked by the compiler when the descriptor is built:
//!
//! ```text
//! HandlerDescriptor::plain, for GET/DELETE
//!     fn(&mut ResponseWriter, &Parts) -> Result<R, E>
//! HandlerDescriptor::data, for POST/PUT/PATCH and any other method
//!     fn(&mut ResponseWriter, &Parts, P) -> Result<R, E>
//! ```
//!
//! where `P: Payload` is `Box<T>`, `Vec<T>` or a `String`-keyed map, `R: Reply`
//! is `serde_json::Value` or one of the payload shapes (optionally wrapped in
//! `Option`), and `E: Into<HandlerError>`.

mod payload;
mod reply;

pub use payload::{Payload, PayloadShape};
pub use reply::Reply;

use hyper::http::request::Parts;
use std::fmt;

use crate::error::HandlerError;
use crate::http::ResponseWriter;

type PlainFn =
    dyn Fn(&mut ResponseWriter, &Parts) -> Result<Box<dyn Reply>, HandlerError> + Send + Sync;

type DataFn = dyn Fn(&mut ResponseWriter, &Parts, &[u8]) -> Invocation + Send + Sync;

/// Result of running a data handler against a request body
pub(crate) enum Invocation {
    /// The body did not decode; the handler was not called
    Undecodable(serde_json::Error),
    Returned(Result<Box<dyn Reply>, HandlerError>),
}

/// Type-erased handler
pub(crate) enum Callable {
    Plain(Box<PlainFn>),
    Data(Box<DataFn>),
}

/// Validated, immutable description of a handler.
///
/// ```
/// use json_handler::{HandlerDescriptor, HandlerError, Parts, PayloadShape, ResponseWriter};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Deserialize, Serialize)]
/// struct Person {
///     name: String,
/// }
///
/// fn create(
///     _: &mut ResponseWriter,
///     _: &Parts,
///     person: Box<Person>,
/// ) -> Result<Box<Person>, HandlerError> {
///     Ok(person)
/// }
///
/// let descriptor = HandlerDescriptor::data(create);
/// assert!(descriptor.accepts_payload());
/// assert_eq!(descriptor.payload_shape(), PayloadShape::SingleObject);
/// ```
pub struct HandlerDescriptor {
    callable: Callable,
    shape: PayloadShape,
}

impl HandlerDescriptor {
    /// Describe a GET/DELETE handler, which takes no payload.
    ///
    /// Each kind of bad handler is its own compile error:
    ///
    /// Not a function (`E0277`, expected an `Fn` closure):
    /// ```compile_fail,E0277
    /// json_handler::HandlerDescriptor::plain(5);
    /// ```
    ///
    /// Wrong number of arguments (`E0593`):
    /// ```compile_fail,E0593
    /// use json_handler::{HandlerDescriptor, HandlerError};
    /// fn none() -> Result<serde_json::Value, HandlerError> { Ok(serde_json::Value::Null) }
    /// HandlerDescriptor::plain(none);
    /// ```
    ///
    /// First argument is not the response writer (`E0631`):
    /// ```compile_fail,E0631
    /// use json_handler::{HandlerDescriptor, HandlerError, Parts};
    /// fn bad(_: i32, _: &Parts) -> Result<serde_json::Value, HandlerError> { Ok(serde_json::Value::Null) }
    /// HandlerDescriptor::plain(bad);
    /// ```
    ///
    /// Second argument is not the request (`E0631`):
    /// ```compile_fail,E0631
    /// use json_handler::{HandlerDescriptor, HandlerError, ResponseWriter};
    /// fn bad(_: &mut ResponseWriter, _: i32) -> Result<serde_json::Value, HandlerError> { Ok(serde_json::Value::Null) }
    /// HandlerDescriptor::plain(bad);
    /// ```
    ///
    /// Not returning a `Result` (`E0271`):
    /// ```compile_fail,E0271
    /// use json_handler::{HandlerDescriptor, Parts, ResponseWriter};
    /// fn bad(_: &mut ResponseWriter, _: &Parts) -> serde_json::Value { serde_json::Value::Null }
    /// HandlerDescriptor::plain(bad);
    /// ```
    ///
    /// Returning an object by value (`E0277`, "cannot be returned as a JSON response"):
    /// ```compile_fail,E0277
    /// use json_handler::{HandlerDescriptor, HandlerError, Parts, ResponseWriter};
    /// #[derive(serde::Serialize)]
    /// struct Person { name: String }
    /// fn bad(_: &mut ResponseWriter, _: &Parts) -> Result<Person, HandlerError> {
    ///     Ok(Person { name: String::new() })
    /// }
    /// HandlerDescriptor::plain(bad);
    /// ```
    ///
    /// Error half does not convert into `HandlerError` (`E0277`):
    /// ```compile_fail,E0277
    /// use json_handler::{HandlerDescriptor, Parts, ResponseWriter};
    /// fn bad(_: &mut ResponseWriter, _: &Parts) -> Result<serde_json::Value, i32> { Ok(serde_json::Value::Null) }
    /// HandlerDescriptor::plain(bad);
    /// ```
    pub fn plain<F, R, E>(handler: F) -> Self
    where
        F: Fn(&mut ResponseWriter, &Parts) -> Result<R, E> + Send + Sync + 'static,
        R: Reply,
        E: Into<HandlerError>,
    {
        let call = move |w: &mut ResponseWriter,
                         parts: &Parts|
              -> Result<Box<dyn Reply>, HandlerError> {
            match handler(w, parts) {
                Ok(reply) => Ok(Box::new(reply) as Box<dyn Reply>),
                Err(err) => Err(err.into()),
            }
        };
        Self {
            callable: Callable::Plain(Box::new(call)),
            shape: PayloadShape::None,
        }
    }

    /// Describe a handler for POST, PUT, PATCH or any other data method.
    ///
    /// Wrong number of arguments (`E0593`):
    /// ```compile_fail,E0593
    /// use json_handler::{HandlerDescriptor, HandlerError, Parts, ResponseWriter};
    /// fn four(
    ///     _: &mut ResponseWriter, _: &Parts, _: Vec<u8>, _: Vec<u8>,
    /// ) -> Result<serde_json::Value, HandlerError> { Ok(serde_json::Value::Null) }
    /// HandlerDescriptor::data(four);
    /// ```
    ///
    /// Payload passed by value instead of boxed (`E0277`, "cannot be used as a JSON request payload"):
    /// ```compile_fail,E0277
    /// use json_handler::{HandlerDescriptor, HandlerError, Parts, ResponseWriter};
    /// #[derive(serde::Deserialize)]
    /// struct Person { name: String }
    /// fn bad(_: &mut ResponseWriter, _: &Parts, _: Person) -> Result<serde_json::Value, HandlerError> {
    ///     Ok(serde_json::Value::Null)
    /// }
    /// HandlerDescriptor::data(bad);
    /// ```
    pub fn data<F, P, R, E>(handler: F) -> Self
    where
        F: Fn(&mut ResponseWriter, &Parts, P) -> Result<R, E> + Send + Sync + 'static,
        P: Payload,
        R: Reply,
        E: Into<HandlerError>,
    {
        let call = move |w: &mut ResponseWriter, parts: &Parts, body: &[u8]| -> Invocation {
            let payload = match payload::decode::<P>(body) {
                Ok(payload) => payload,
                Err(err) => return Invocation::Undecodable(err),
            };
            match handler(w, parts, payload) {
                Ok(reply) => Invocation::Returned(Ok(Box::new(reply) as Box<dyn Reply>)),
                Err(err) => Invocation::Returned(Err(err.into())),
            }
        };
        Self {
            callable: Callable::Data(Box::new(call)),
            shape: P::SHAPE,
        }
    }

    pub const fn payload_shape(&self) -> PayloadShape {
        self.shape
    }

    /// True when the handler takes a decoded request body
    pub const fn accepts_payload(&self) -> bool {
        !matches!(self.shape, PayloadShape::None)
    }

    pub(crate) const fn callable(&self) -> &Callable {
        &self.callable
    }
}

impl fmt::Debug for HandlerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerDescriptor")
            .field("accepts_payload", &self.accepts_payload())
            .field("payload_shape", &self.shape)
            .finish_non_exhaustive()
    }
}
