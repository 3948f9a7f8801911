use crate::router::Router;
use crate::types::RemoteAddr;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{service::Service, Request, Response};
use std::fmt::{self, Debug, Formatter};
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;

/// A per-connection hyper [`Service`](https://docs.rs/hyper/1/hyper/service/trait.Service.html) which dispatches every
/// request through the shared router.
///
/// Each request gets the peer [`RemoteAddr`](./struct.RemoteAddr.html) in its extensions and is handed to
/// [`Router::dispatch`](./struct.Router.html#method.dispatch), whose resolve step percent-decodes the path.
///
/// The service error is the handlers' own error type: whatever a handler fails with is handed to hyper unchanged.
pub struct RequestService<B, E> {
    pub(crate) router: Arc<Router<B, E>>,
    pub(crate) remote_addr: SocketAddr,
}

impl<B, E> Service<Request<B>> for RequestService<B, E>
where
    B: Send + 'static,
    E: Send + 'static,
{
    type Response = Response<Full<Bytes>>;
    type Error = E;
    #[allow(clippy::type_complexity)]
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn call(&self, mut req: Request<B>) -> Self::Future {
        let router = self.router.clone();
        req.extensions_mut().insert(RemoteAddr(self.remote_addr));

        Box::pin(async move { router.dispatch(req).await })
    }
}

impl<B, E> Debug for RequestService<B, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{ router: {:?}, remote_addr: {} }}", self.router, self.remote_addr)
    }
}

/// Creates [`RequestService`](./struct.RequestService.html)s sharing one router.
pub struct RequestServiceBuilder<B, E> {
    router: Arc<Router<B, E>>,
}

impl<B, E> RequestServiceBuilder<B, E> {
    pub fn new(router: Router<B, E>) -> Self {
        Self {
            router: Arc::from(router),
        }
    }

    pub fn build(&self, remote_addr: SocketAddr) -> RequestService<B, E> {
        RequestService {
            router: self.router.clone(),
            remote_addr,
        }
    }
}

impl<B, E> Debug for RequestServiceBuilder<B, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{ router: {:?} }}", self.router)
    }
}
