//! Extension traits and helpers for reading from a routed request.

use crate::helpers;
use crate::types::{RemoteAddr, RouteParams};
use crate::Error;
use http_body_util::BodyExt;
use hyper::body::Body;
use hyper::Request;
use serde::de::DeserializeOwned;
use std::net::SocketAddr;

/// A extension trait which extends the [`hyper::Request`](https://docs.rs/hyper/1/hyper/struct.Request.html) type with
/// accessors for the values the router attaches.
pub trait RequestExt {
    /// Returns the route params bound while resolving this request, if the matched route declared any.
    fn params(&self) -> Option<&RouteParams>;

    /// Returns the value of the route param called `param_name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use http_body_util::Full;
    /// use hyper::{body::Bytes, Request, Response};
    /// use routemux::prelude::*;
    /// use routemux::Router;
    /// use std::convert::Infallible;
    ///
    /// fn run() -> Router<(), Infallible> {
    ///     Router::builder()
    ///         .get("/users/:userName/books/:bookName", |req: Request<()>| async move {
    ///             let user_name = req.param("userName").unwrap();
    ///             let book_name = req.param("bookName").unwrap();
    ///
    ///             Ok(Response::new(Full::new(Bytes::from(format!("User: {} Book: {}", user_name, book_name)))))
    ///         })
    ///         .build()
    ///         .unwrap()
    /// }
    /// # run();
    /// ```
    fn param<P: AsRef<str>>(&self, param_name: P) -> Option<&str>;

    /// Returns the first value of the query parameter `key`, percent-decoded.
    fn query<K: AsRef<str>>(&self, key: K) -> Option<String>;

    /// Like [`query`](#tymethod.query), but falls back to `default` when the key is missing or empty.
    fn query_or<K: AsRef<str>>(&self, key: K, default: &str) -> String;

    /// Returns the peer address, when the request came through a [`RequestService`](../struct.RequestService.html).
    fn remote_addr(&self) -> Option<SocketAddr>;

    /// Returns the request-scoped value of type `T`.
    fn context<T: Send + Sync + 'static>(&self) -> Option<&T>;

    /// Returns the request with `value` attached to its scope, replacing any previous value of the same type.
    fn with_context<T: Clone + Send + Sync + 'static>(self, value: T) -> Self
    where
        Self: Sized;
}

impl<B> RequestExt for Request<B> {
    fn params(&self) -> Option<&RouteParams> {
        self.extensions().get::<RouteParams>()
    }

    fn param<P: AsRef<str>>(&self, param_name: P) -> Option<&str> {
        self.params()?.get(param_name)
    }

    fn query<K: AsRef<str>>(&self, key: K) -> Option<String> {
        helpers::query_value(self.uri().query()?, key.as_ref())
    }

    fn query_or<K: AsRef<str>>(&self, key: K, default: &str) -> String {
        self.query(key)
            .filter(|val| !val.is_empty())
            .unwrap_or_else(|| default.to_owned())
    }

    fn remote_addr(&self) -> Option<SocketAddr> {
        self.extensions().get::<RemoteAddr>().map(|addr| addr.0)
    }

    fn context<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.extensions().get::<T>()
    }

    fn with_context<T: Clone + Send + Sync + 'static>(mut self, value: T) -> Self {
        self.extensions_mut().insert(value);
        self
    }
}

/// Collects the request body and decodes it as JSON.
pub async fn json_body<T, B>(req: Request<B>) -> crate::Result<T>
where
    T: DeserializeOwned,
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let body = req
        .into_body()
        .collect()
        .await
        .map_err(|e| Error::Body(e.into()))?
        .to_bytes();

    Ok(serde_json::from_slice(&body)?)
}
