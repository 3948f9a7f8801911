use crate::handler::Handler;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response};
use std::fmt::{self, Debug, Formatter};
use std::future::Future;
use std::sync::Arc;

type Transform<B, E> = dyn Fn(Handler<B, E>) -> Handler<B, E> + Send + Sync + 'static;

/// A middleware wraps a [`Handler`](./struct.Handler.html) into a new handler with the same signature, adding
/// behaviour before and/or after the wrapped one runs.
///
/// Middlewares are composed with [`with_middlewares`](./fn.with_middlewares.html): the first declared middleware is the
/// outermost one, so its pre-handler logic runs first and its post-handler logic runs last.
///
/// This `Middleware<B, E>` type accepts two type parameters: `B` and `E`.
///
/// * The `B` represents the request body type seen by the handlers.
/// * The `E` represents the error type returned by the handlers.
///
/// # Examples
///
/// ```
/// use routemux::{Middleware, Router};
/// use std::convert::Infallible;
///
/// fn run() -> Router<(), Infallible> {
///     Router::builder()
///         .middleware(Middleware::around(|req, next| async move {
///             /* Do something before */
///             let res = next.call(req).await;
///             /* Do something after */
///             res
///         }))
///         .build()
///         .unwrap()
/// }
/// # run();
/// ```
pub struct Middleware<B, E> {
    inner: Arc<Transform<B, E>>,
}

impl<B: Send + 'static, E: Send + 'static> Middleware<B, E> {
    /// Creates a middleware from a raw handler transform.
    pub fn new<F>(transform: F) -> Middleware<B, E>
    where
        F: Fn(Handler<B, E>) -> Handler<B, E> + Send + Sync + 'static,
    {
        Middleware {
            inner: Arc::new(transform),
        }
    }

    /// Creates a middleware from a function receiving the request and the next handler in the chain.
    ///
    /// Returning without calling `next` short-circuits the chain.
    pub fn around<H, R>(handler: H) -> Middleware<B, E>
    where
        H: Fn(Request<B>, Handler<B, E>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        Middleware::new(move |next: Handler<B, E>| {
            let handler = Arc::clone(&handler);
            Handler::new(move |req: Request<B>| handler(req, next.clone()))
        })
    }

    /// Creates a middleware which transforms the request before handing it to the next handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use routemux::{Middleware, Router};
    /// use std::convert::Infallible;
    ///
    /// fn run() -> Router<(), Infallible> {
    ///     Router::builder()
    ///         .middleware(Middleware::pre(|req| async move {
    ///             /* Do some operations */
    ///             Ok(req)
    ///         }))
    ///         .build()
    ///         .unwrap()
    /// }
    /// # run();
    /// ```
    pub fn pre<H, R>(handler: H) -> Middleware<B, E>
    where
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Request<B>, E>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        Middleware::around(move |req: Request<B>, next: Handler<B, E>| {
            let handler = Arc::clone(&handler);
            async move {
                let req = handler(req).await?;
                next.call(req).await
            }
        })
    }

    /// Creates a middleware which transforms the response produced by the next handler.
    pub fn post<H, R>(handler: H) -> Middleware<B, E>
    where
        H: Fn(Response<Full<Bytes>>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        Middleware::around(move |req: Request<B>, next: Handler<B, E>| {
            let handler = Arc::clone(&handler);
            async move {
                let res = next.call(req).await?;
                handler(res).await
            }
        })
    }
}

impl<B, E> Middleware<B, E> {
    /// Wraps `handler` with this middleware.
    pub fn apply(&self, handler: Handler<B, E>) -> Handler<B, E> {
        (self.inner)(handler)
    }
}

impl<B, E> Clone for Middleware<B, E> {
    fn clone(&self) -> Self {
        Middleware {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B, E> Debug for Middleware<B, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Middleware({:p})", Arc::as_ptr(&self.inner) as *const ())
    }
}

/// Composes middlewares into a single handler transform.
///
/// * With no middlewares, the transform is the identity, `None` included.
/// * `None` entries are skipped.
/// * A `None` handler stays `None`, whatever the middlewares are.
/// * Otherwise the first middleware ends up outermost.
///
/// Nothing is executed while composing, only the call chain is built.
///
/// # Examples
///
/// ```
/// use http_body_util::Full;
/// use hyper::{body::Bytes, Request, Response};
/// use routemux::{with_middlewares, Handler, Middleware};
/// use std::convert::Infallible;
///
/// let handler: Handler<(), Infallible> =
///     Handler::new(|_: Request<()>| async { Ok(Response::new(Full::new(Bytes::from("ok")))) });
///
/// let wrap = with_middlewares(vec![Some(Middleware::<(), Infallible>::pre(|req| async move { Ok(req) })), None]);
/// assert!(wrap(Some(handler)).is_some());
/// assert!(wrap(None).is_none());
/// ```
pub fn with_middlewares<B, E, I>(middlewares: I) -> impl Fn(Option<Handler<B, E>>) -> Option<Handler<B, E>> + Send + Sync
where
    B: 'static,
    E: 'static,
    I: IntoIterator,
    I::Item: Into<Option<Middleware<B, E>>>,
{
    let chain: Vec<Middleware<B, E>> = middlewares.into_iter().filter_map(|m| m.into()).collect();
    move |handler: Option<Handler<B, E>>| handler.map(|handler| apply_all(&chain, handler))
}

pub(crate) fn apply_all<B, E>(chain: &[Middleware<B, E>], handler: Handler<B, E>) -> Handler<B, E> {
    chain.iter().rev().fold(handler, |next, middleware| middleware.apply(next))
}
