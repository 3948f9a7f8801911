use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::str::Utf8Error;

pub(crate) fn percent_decode_request_path(val: &str) -> Result<String, Utf8Error> {
    percent_decode_str(val).decode_utf8().map(Cow::into_owned)
}

/// Finds the first value for `key` in a `application/x-www-form-urlencoded` query string.
pub(crate) fn query_value(query: &str, key: &str) -> Option<String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(k, _)| decode_form_component(k) == key)
        .map(|(_, v)| decode_form_component(v).into_owned())
}

fn decode_form_component(val: &str) -> Cow<'_, str> {
    if !val.contains('+') {
        return percent_decode_str(val).decode_utf8_lossy();
    }

    let val = val.replace('+', " ");
    Cow::Owned(percent_decode_str(&val).decode_utf8_lossy().into_owned())
}
