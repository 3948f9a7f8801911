use hyper::Method;

/// Methods which get a pre-created bucket in every route table.
pub(crate) const STANDARD_METHODS: [Method; 9] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::OPTIONS,
    Method::HEAD,
    Method::CONNECT,
    Method::TRACE,
];

/// What a `:name` segment is replaced with in the compiled matcher.
pub(crate) const PARAM_CAPTURE: &str = "([0-9A-Za-z]+)";

pub(crate) const NOT_FOUND_BODY: &str = "Not Found";

pub(crate) const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

pub(crate) const CONTENT_TYPE_JSON: &str = "application/json";
