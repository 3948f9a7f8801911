use crate::config::Config;
use crate::handler::Handler;
use crate::helpers;
use crate::middleware::{apply_all, Middleware};
use crate::route::Route;
use crate::types::RouteParams;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::fmt::{self, Debug, Formatter};

pub use self::builder::RouterBuilder;
pub use self::table::RouteMatch;
pub(crate) use self::table::RouteTable;

mod builder;
mod table;

/// Represents a lightweight method + path router.
///
/// A router owns a route table keyed by method and its [`Config`](./struct.Config.html). Routes are registered
/// up front with [`register`](#method.register) (or through a [`RouterBuilder`](./struct.RouterBuilder.html)), after
/// which the router is only read and can be shared between any number of concurrent requests.
///
/// This `Router<B, E>` type accepts two type parameters: `B` and `E`.
///
/// * The `B` represents the request body type seen by the route handlers and the middlewares.
/// * The `E` represents the error type which will be used by route handlers and the middlewares. The router never
///   inspects it, a handler error is handed back to the caller of [`dispatch`](#method.dispatch) as is.
///
/// # Examples
///
/// ```
/// use http_body_util::Full;
/// use hyper::{body::Bytes, Request, Response};
/// use routemux::{Handler, Router};
/// use std::convert::Infallible;
///
/// async fn home_handler(_: Request<()>) -> Result<Response<Full<Bytes>>, Infallible> {
///     Ok(Response::new(Full::new(Bytes::from("home"))))
/// }
///
/// let mut router: Router<(), Infallible> = Router::default();
/// router
///     .register(hyper::Method::GET, "/", Handler::new(home_handler), [])
///     .unwrap();
/// ```
pub struct Router<B, E> {
    pub(crate) table: RouteTable<B, E>,
    pub(crate) config: Config<B, E>,
}

impl<B: Send + 'static, E: Send + 'static> Router<B, E> {
    /// Creates an empty router with the given configuration.
    pub fn new(config: Config<B, E>) -> Router<B, E> {
        Router {
            table: RouteTable::new(),
            config,
        }
    }

    /// Return a [RouterBuilder](./struct.RouterBuilder.html) instance to build a `Router`.
    pub fn builder() -> RouterBuilder<B, E> {
        RouterBuilder::new()
    }

    /// Registers `handler` for `method` and `path`, wrapped with `middlewares` (the first one outermost).
    ///
    /// A path without any `:` is matched exactly. A path with `:name` segments is compiled into an anchored pattern
    /// whose params are bound at request time. Registering the same key twice replaces the earlier route.
    ///
    /// Fails when the path can't be compiled, which should be treated as fatal at startup.
    pub fn register<P, I>(&mut self, method: Method, path: P, handler: Handler<B, E>, middlewares: I) -> crate::Result<()>
    where
        P: Into<String>,
        I: IntoIterator<Item = Middleware<B, E>>,
    {
        let middlewares: Vec<Middleware<B, E>> = middlewares.into_iter().collect();
        let handler = apply_all(&middlewares, handler);

        let route = Route::new(path, handler)?;
        tracing::debug!(
            method = %method,
            path = %route.path(),
            pattern = ?route.pattern(),
            "registered route"
        );

        if let Some(replaced) = self.table.insert(method.clone(), route) {
            tracing::debug!(method = %method, path = %replaced.path(), "replaced previously registered route");
        }

        Ok(())
    }
}

impl<B, E> Router<B, E> {
    /// Looks up the route for `method` and `target_path` as given, without any path normalization.
    ///
    /// An exact route always wins over a parameterized one. Parameterized routes are tried in the order they were
    /// registered and the first one matching the whole path wins.
    pub fn find(&self, method: &Method, target_path: &str) -> Option<RouteMatch<'_, B, E>> {
        self.table.find(method, target_path)
    }

    /// Resolves the request to the handler which should serve it.
    ///
    /// The path is percent-decoded and, if configured, stripped of one trailing slash before the lookup. When a
    /// parameterized route matches, the returned request carries the bound [`RouteParams`](./struct.RouteParams.html)
    /// in its extensions. When nothing matches, the not-found handler is returned and the request is left as is.
    pub fn resolve(&self, mut req: Request<B>) -> (Handler<B, E>, Request<B>) {
        let raw_path = req.uri().path();
        let decoded = helpers::percent_decode_request_path(raw_path).unwrap_or_else(|err| {
            tracing::trace!(path = %raw_path, error = %err, "could not percent decode the request path");
            raw_path.to_owned()
        });
        let target_path = self.normalize_path(&decoded);

        let (handler, params) = match self.table.find(req.method(), target_path) {
            Some(RouteMatch { route, params }) => {
                tracing::trace!(method = %req.method(), path = %target_path, route = %route.path(), "route matched");
                (route.handler.clone(), params)
            }
            None => {
                tracing::trace!(method = %req.method(), path = %target_path, "no route matched");
                (self.config.not_found_handler.clone(), RouteParams::new())
            }
        };

        if !params.is_empty() {
            req.extensions_mut().insert(params);
        }

        (handler, req)
    }

    /// Resolves the request and invokes the resolved handler exactly once, returning whatever it returns.
    pub async fn dispatch(&self, req: Request<B>) -> Result<Response<Full<Bytes>>, E> {
        let (handler, req) = self.resolve(req);
        handler.call(req).await
    }

    /// Iterates over the routes registered for `method`.
    pub fn routes(&self, method: &Method) -> impl Iterator<Item = &Route<B, E>> {
        self.table.routes(method)
    }

    /// The number of registered routes, all methods included.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if no route has been registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The configuration the router was created with.
    pub fn config(&self) -> &Config<B, E> {
        &self.config
    }

    fn normalize_path<'a>(&self, path: &'a str) -> &'a str {
        if self.config.remove_trailing_slash && path != "/" {
            path.strip_suffix('/').unwrap_or(path)
        } else {
            path
        }
    }
}

impl<B: Send + 'static, E: Send + 'static> Default for Router<B, E> {
    fn default() -> Self {
        Router::new(Config::default())
    }
}

impl<B, E> Debug for Router<B, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{ routes: {}, config: {:?} }}", self.table.len(), self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use http_body_util::BodyExt;
    use std::convert::Infallible;

    fn text(body: &'static str) -> Handler<(), Infallible> {
        Handler::new(move |_: Request<()>| async move { Ok(Response::new(Full::new(Bytes::from(body)))) })
    }

    fn echo_params() -> Handler<(), Infallible> {
        Handler::new(|req: Request<()>| async move {
            let params = req.params().map(ToString::to_string).unwrap_or_default();
            Ok(Response::new(Full::new(Bytes::from(params))))
        })
    }

    fn request(method: Method, uri: &str) -> Request<()> {
        Request::builder().method(method).uri(uri).body(()).unwrap()
    }

    async fn body_of(router: &Router<(), Infallible>, method: Method, uri: &str) -> String {
        let res = router.dispatch(request(method, uri)).await.unwrap();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn resolves_static_and_parameterized_routes() {
        let mut router = Router::new(Config::default().not_found_handler(text("not found")));
        router.register(Method::GET, "/", text("A"), []).unwrap();
        router.register(Method::GET, "/items/:id", echo_params(), []).unwrap();
        router.register(Method::POST, "/items", text("C"), []).unwrap();

        assert_eq!(body_of(&router, Method::GET, "/").await, "A");
        assert_eq!(body_of(&router, Method::GET, "/items/7").await, "[id=7]");
        assert_eq!(body_of(&router, Method::POST, "/items").await, "C");
        assert_eq!(body_of(&router, Method::DELETE, "/items/7").await, "not found");
        assert_eq!(body_of(&router, Method::GET, "/items/7/extra").await, "not found");
    }

    #[test]
    fn resolve_attaches_params_only_for_pattern_matches() {
        let mut router = Router::default();
        router.register(Method::GET, "/static", text("s"), []).unwrap();
        router.register(Method::GET, "/a/:x/b/:y", text("p"), []).unwrap();

        let (_, req) = router.resolve(request(Method::GET, "/a/1/b/2"));
        let params = req.params().unwrap();
        assert_eq!(params.iter().collect::<Vec<_>>(), vec![("x", "1"), ("y", "2")]);

        let (_, req) = router.resolve(request(Method::GET, "/static"));
        assert!(req.params().is_none());

        let (handler, req) = router.resolve(request(Method::GET, "/nothing"));
        assert!(handler.ptr_eq(&router.config().not_found_handler));
        assert!(req.params().is_none());
    }

    #[tokio::test]
    async fn trailing_slash_removal() {
        let mut router = Router::new(Config::default().remove_trailing_slash(true));
        router.register(Method::GET, "/", text("root"), []).unwrap();
        router.register(Method::GET, "/foo", text("foo"), []).unwrap();
        router.register(Method::GET, "/users/:id", echo_params(), []).unwrap();

        assert_eq!(body_of(&router, Method::GET, "/foo/").await, "foo");
        assert_eq!(body_of(&router, Method::GET, "/foo").await, "foo");
        assert_eq!(body_of(&router, Method::GET, "/").await, "root");
        assert_eq!(body_of(&router, Method::GET, "/users/3/").await, "[id=3]");

        let mut strict = Router::new(Config::default().not_found_handler(text("nf")));
        strict.register(Method::GET, "/foo", text("foo"), []).unwrap();
        assert_eq!(body_of(&strict, Method::GET, "/foo/").await, "nf");
    }

    #[tokio::test]
    async fn percent_encoded_paths_are_decoded() {
        let mut router = Router::new(Config::default().not_found_handler(text("nf")));
        router.register(Method::GET, "/hello world", text("spaced"), []).unwrap();

        assert_eq!(body_of(&router, Method::GET, "/hello%20world").await, "spaced");
    }

    #[tokio::test]
    async fn default_not_found_handler_responds_404() {
        let router: Router<(), Infallible> = Router::default();
        let res = router.dispatch(request(Method::GET, "/missing")).await.unwrap();
        assert_eq!(res.status(), hyper::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn handler_errors_are_returned_untouched() {
        #[derive(Debug, PartialEq)]
        struct Boom(u8);

        let mut router: Router<(), Boom> = Router::default();
        let failing = Handler::new(|_: Request<()>| async { Err(Boom(7)) });
        router.register(Method::GET, "/fail", failing, []).unwrap();

        let err = router.dispatch(request(Method::GET, "/fail")).await.unwrap_err();
        assert_eq!(err, Boom(7));
    }

    #[test]
    fn lists_registered_routes() {
        let mut router = Router::default();
        router.register(Method::GET, "/", text("A"), []).unwrap();
        router.register(Method::GET, "/users/:id", text("B"), []).unwrap();
        router.register(Method::PUT, "/users/:id", text("C"), []).unwrap();

        assert_eq!(router.len(), 3);
        assert_eq!(router.routes(&Method::GET).count(), 2);
        assert_eq!(router.routes(&Method::PATCH).count(), 0);
        assert!(router.routes(&Method::GET).any(|r| r.pattern() == Some("^/users/([0-9A-Za-z]+)$")));
    }
}
