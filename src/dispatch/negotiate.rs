//! Request filtering module
//!
//! Content negotiation and the method/payload pairing rule.

use hyper::header::{HeaderMap, ACCEPT};
use hyper::Method;

/// True if any `Accept` value admits JSON (`*/*` or `application/json`).
///
/// Values are searched as raw bytes, so non-ASCII tokens elsewhere in the
/// header do not hide a JSON media range.
pub fn accepts_json(headers: &HeaderMap) -> bool {
    headers.get_all(ACCEPT).iter().any(|value| {
        let value = value.as_bytes();
        contains(value, b"*/*") || contains(value, b"application/json")
    })
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// Methods expected to carry a request payload: everything but GET and DELETE
pub fn is_data_method(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::DELETE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::HeaderValue;

    fn headers(values: &[&'static str]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for value in values {
            map.append(ACCEPT, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_accepts_json() {
        assert!(accepts_json(&headers(&["*/*"])));
        assert!(accepts_json(&headers(&["application/json"])));
        assert!(accepts_json(&headers(&["text/html, application/json;q=0.9"])));
        assert!(accepts_json(&headers(&["application/xml", "*/*"])));
    }

    #[test]
    fn test_accepts_json_beside_non_ascii() {
        let mut map = HeaderMap::new();
        map.insert(
            ACCEPT,
            HeaderValue::from_bytes(b"text/caf\xe9, application/json").unwrap(),
        );
        assert!(map[ACCEPT].to_str().is_err());
        assert!(accepts_json(&map));
    }

    #[test]
    fn test_rejects_non_json() {
        assert!(!accepts_json(&headers(&[])));
        assert!(!accepts_json(&headers(&["application/xml"])));
        assert!(!accepts_json(&headers(&["text/*"])));
    }

    #[test]
    fn test_data_methods() {
        assert!(!is_data_method(&Method::GET));
        assert!(!is_data_method(&Method::DELETE));
        assert!(is_data_method(&Method::POST));
        assert!(is_data_method(&Method::PUT));
        assert!(is_data_method(&Method::PATCH));
        assert!(is_data_method(&Method::OPTIONS));
    }
}
