use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response};
use std::fmt::{self, Debug, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// The future returned by a [`Handler`](./struct.Handler.html).
pub type HandlerReturn<E> = Pin<Box<dyn Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static>>;

type BoxedHandler<B, E> = dyn Fn(Request<B>) -> HandlerReturn<E> + Send + Sync + 'static;

/// A shareable request handler, the unit of dispatch.
///
/// A handler takes the request (carrying any bound route params in its extensions) and either produces a
/// response or fails with an error of type `E`. Cloning a handler is cheap, clones share the same function.
///
/// # Examples
///
/// ```
/// use http_body_util::Full;
/// use hyper::{body::Bytes, Request, Response};
/// use routemux::Handler;
/// use std::convert::Infallible;
///
/// let handler: Handler<(), Infallible> =
///     Handler::new(|_: Request<()>| async { Ok(Response::new(Full::new(Bytes::from("home")))) });
/// ```
pub struct Handler<B, E> {
    inner: Arc<BoxedHandler<B, E>>,
}

impl<B: 'static, E: 'static> Handler<B, E> {
    /// Wraps an async function or closure into a handler.
    pub fn new<H, R>(handler: H) -> Handler<B, E>
    where
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        let inner: Arc<BoxedHandler<B, E>> = Arc::new(move |req: Request<B>| -> HandlerReturn<E> { Box::pin(handler(req)) });
        Handler { inner }
    }
}

impl<B, E> Handler<B, E> {
    /// Invokes the handler. Nothing runs until the returned future is polled.
    pub fn call(&self, req: Request<B>) -> HandlerReturn<E> {
        (self.inner)(req)
    }

    /// Returns `true` if both handlers share the same underlying function.
    pub fn ptr_eq(&self, other: &Handler<B, E>) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.inner) as *const (),
            Arc::as_ptr(&other.inner) as *const (),
        )
    }
}

impl<B, E> Clone for Handler<B, E> {
    fn clone(&self) -> Self {
        Handler {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B, E> Debug for Handler<B, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({:p})", Arc::as_ptr(&self.inner) as *const ())
    }
}
