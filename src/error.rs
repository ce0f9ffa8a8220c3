//! Handler error module
//!
//! A handler fails in one of two ways:
//! - `Reported`: a status, message and optional reason meant for the client
//! - `Opaque`: any other error, hidden from the client and sent to the log sink

use hyper::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Error whose message is relayed to the client.
///
/// Without an explicit status the response keeps whatever status is already
/// in effect, which is `200 OK` unless the handler committed one itself.
///
/// ```
/// use hyper::StatusCode;
/// use json_handler::Reported;
///
/// let err = Reported::new("ugly request")
///     .with_status(StatusCode::BAD_REQUEST)
///     .with_reason(&["name", "missing"]);
/// assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
/// assert_eq!(err.message(), "ugly request");
/// ```
#[derive(Debug)]
pub struct Reported {
    status: Option<StatusCode>,
    message: String,
    reason: Option<serde_json::Result<Value>>,
}

/// JSON body written for a reported error
#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a Value>,
}

impl Reported {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            reason: None,
        }
    }

    #[must_use]
    pub const fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach structured detail, sent to the client as `"reason"`.
    #[must_use]
    pub fn with_reason<T: Serialize + ?Sized>(mut self, reason: &T) -> Self {
        self.reason = Some(serde_json::to_value(reason));
        self
    }

    pub const fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn reason(&self) -> Option<&Value> {
        match &self.reason {
            Some(Ok(value)) => Some(value),
            _ => None,
        }
    }

    /// Encode `{"error": .., "reason": ..}` followed by a newline.
    pub(crate) fn encode_body(&self) -> serde_json::Result<Vec<u8>> {
        let reason = match &self.reason {
            None => None,
            Some(Ok(value)) => Some(value),
            Some(Err(e)) => return Err(serde::ser::Error::custom(e)),
        };
        let mut body = serde_json::to_vec(&ErrorBody {
            error: &self.message,
            reason,
        })?;
        body.push(b'\n');
        Ok(body)
    }
}

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Failure returned from a handler.
///
/// Any `std::error::Error` converts into `Opaque`, so `?` works inside
/// handlers; use [`Reported`] to show the client a message.
#[derive(Debug)]
pub enum HandlerError {
    Reported(Reported),
    Opaque(Box<dyn std::error::Error + Send + Sync>),
}

impl HandlerError {
    /// Opaque error from a plain message
    pub fn opaque(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self::Opaque(message.into())
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reported(reported) => fmt::Display::fmt(reported, f),
            Self::Opaque(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl From<Reported> for HandlerError {
    fn from(reported: Reported) -> Self {
        Self::Reported(reported)
    }
}

impl<E> From<E> for HandlerError
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(err: E) -> Self {
        Self::Opaque(Box::new(err))
    }
}
