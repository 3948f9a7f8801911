//! Helpers to build the common response shapes.

use crate::constants::{CONTENT_TYPE_JSON, CONTENT_TYPE_TEXT};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{self, HeaderValue};
use hyper::{Response, StatusCode};
use serde::Serialize;

/// A `200 OK` plain text response. The body is terminated by a newline.
pub fn string<S: AsRef<str>>(body: S) -> Response<Full<Bytes>> {
    string_with_status(StatusCode::OK, body)
}

/// A plain text response with the given status. The body is terminated by a newline.
pub fn string_with_status<S: AsRef<str>>(status: StatusCode, body: S) -> Response<Full<Bytes>> {
    let mut text = String::with_capacity(body.as_ref().len() + 1);
    text.push_str(body.as_ref());
    text.push('\n');

    with_content_type(status, CONTENT_TYPE_TEXT, Bytes::from(text))
}

/// A `200 OK` JSON response. The body is terminated by a newline.
pub fn json<T: Serialize + ?Sized>(value: &T) -> crate::Result<Response<Full<Bytes>>> {
    json_with_status(StatusCode::OK, value)
}

/// A JSON response with the given status. The body is terminated by a newline.
pub fn json_with_status<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> crate::Result<Response<Full<Bytes>>> {
    let mut body = serde_json::to_vec(value)?;
    body.push(b'\n');

    Ok(with_content_type(status, CONTENT_TYPE_JSON, Bytes::from(body)))
}

fn with_content_type(status: StatusCode, content_type: &'static str, body: Bytes) -> Response<Full<Bytes>> {
    let mut res = Response::new(Full::new(body));
    *res.status_mut() = status;
    res.headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    res
}
