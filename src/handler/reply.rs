//! Handler result module
//!
//! The first half of a handler's result is encoded as the response body. A
//! null result means the handler already answered through the writer.

use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Value a handler may return as its response body.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be returned as a JSON response",
    label = "first return value must be `serde_json::Value`, `Box<T>`, `Vec<T>` or a map keyed by `String`",
    note = "return single objects by reference: use `Box<{Self}>` instead of `{Self}`"
)]
pub trait Reply: Send + 'static {
    /// Encode as JSON, or `None` for a null result.
    fn to_json(&self) -> Option<serde_json::Result<Vec<u8>>>;
}

/// JSON text followed by a newline
fn encode<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = serde_json::to_vec(value)?;
    buf.push(b'\n');
    Ok(buf)
}

impl Reply for Value {
    fn to_json(&self) -> Option<serde_json::Result<Vec<u8>>> {
        if self.is_null() {
            return None;
        }
        Some(encode(self))
    }
}

impl<T> Reply for Box<T>
where
    T: Serialize + Send + 'static,
{
    fn to_json(&self) -> Option<serde_json::Result<Vec<u8>>> {
        Some(encode(&**self))
    }
}

impl<T> Reply for Vec<T>
where
    T: Serialize + Send + 'static,
{
    fn to_json(&self) -> Option<serde_json::Result<Vec<u8>>> {
        Some(encode(self))
    }
}

impl<T, S> Reply for HashMap<String, T, S>
where
    T: Serialize + Send + 'static,
    S: Send + 'static,
{
    fn to_json(&self) -> Option<serde_json::Result<Vec<u8>>> {
        Some(encode(self))
    }
}

impl<T> Reply for BTreeMap<String, T>
where
    T: Serialize + Send + 'static,
{
    fn to_json(&self) -> Option<serde_json::Result<Vec<u8>>> {
        Some(encode(self))
    }
}

impl<R: Reply> Reply for Option<R> {
    fn to_json(&self) -> Option<serde_json::Result<Vec<u8>>> {
        self.as_ref().and_then(Reply::to_json)
    }
}
