//! Request payload module
//!
//! A data handler's third argument is decoded from the request body. Only
//! three shapes are accepted: a boxed object, a list, or a map keyed by
//! strings.

use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Structural kind of a handler's request payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// The handler takes no payload
    None,
    /// `Box<T>`
    SingleObject,
    /// `Vec<T>`
    OrderedList,
    /// `HashMap<String, T>` or `BTreeMap<String, T>`
    KeyedMapping,
}

/// Type a data handler accepts as its decoded request body.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a JSON request payload",
    label = "third handler argument must be `Box<T>`, `Vec<T>` or a map keyed by `String`",
    note = "pass single objects by reference: use `Box<{Self}>` instead of `{Self}`"
)]
pub trait Payload: DeserializeOwned + Send + 'static {
    const SHAPE: PayloadShape;
}

impl<T> Payload for Box<T>
where
    T: DeserializeOwned + Send + 'static,
{
    const SHAPE: PayloadShape = PayloadShape::SingleObject;
}

impl<T> Payload for Vec<T>
where
    T: DeserializeOwned + Send + 'static,
{
    const SHAPE: PayloadShape = PayloadShape::OrderedList;
}

impl<T, S> Payload for HashMap<String, T, S>
where
    T: DeserializeOwned + Send + 'static,
    S: BuildHasher + Default + Send + 'static,
{
    const SHAPE: PayloadShape = PayloadShape::KeyedMapping;
}

impl<T> Payload for BTreeMap<String, T>
where
    T: DeserializeOwned + Send + 'static,
{
    const SHAPE: PayloadShape = PayloadShape::KeyedMapping;
}

/// Decode the first JSON value in `body`.
///
/// Anything after the first complete value is ignored; an empty body is an
/// error.
pub(crate) fn decode<P: Payload>(body: &[u8]) -> serde_json::Result<P> {
    let mut values = serde_json::Deserializer::from_slice(body).into_iter::<P>();
    match values.next() {
        Some(value) => value,
        None => Err(serde::de::Error::custom("empty request body")),
    }
}
