use crate::config::Config;
use crate::handler::Handler;
use crate::middleware::{apply_all, Middleware};
use crate::router::Router;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::fmt::{self, Debug, Formatter};
use std::future::Future;

/// Builder for the [Router](./struct.Router.html) type.
///
/// This `RouterBuilder<B, E>` type accepts two type parameters: `B` and `E`.
///
/// * The `B` represents the request body type seen by the route handlers and the middlewares.
/// * The `E` represents any error type which will be used by route handlers and the middlewares.
///
/// Registration errors don't stop the chain, the first one is returned by [`build`](#method.build).
///
/// # Examples
///
/// ```
/// use http_body_util::Full;
/// use hyper::{body::Bytes, Request, Response};
/// use routemux::{Router, RouterBuilder};
/// use std::convert::Infallible;
///
/// async fn home_handler(req: Request<()>) -> Result<Response<Full<Bytes>>, Infallible> {
///     Ok(Response::new(Full::new(Bytes::from("home"))))
/// }
///
/// // Use Router::builder() method to create a new RouterBuilder instance.
/// // We will use this builder to create a new router.
/// let builder: RouterBuilder<(), Infallible> = Router::builder()
///     .get("/", home_handler);
///
/// // Create a Router from the builder.
/// let router = builder.build().unwrap();
/// ```
pub struct RouterBuilder<B, E> {
    inner: crate::Result<BuilderInner<B, E>>,
}

struct BuilderInner<B, E> {
    router: Router<B, E>,
    middlewares: Vec<Middleware<B, E>>,
}

impl<B: Send + 'static, E: Send + 'static> RouterBuilder<B, E> {
    /// Creates a new RouterBuilder instance with default options.
    pub fn new() -> RouterBuilder<B, E> {
        RouterBuilder::with_config(Config::default())
    }

    /// Creates a new RouterBuilder instance starting from `config`.
    pub fn with_config(config: Config<B, E>) -> RouterBuilder<B, E> {
        RouterBuilder {
            inner: Ok(BuilderInner {
                router: Router::new(config),
                middlewares: Vec::new(),
            }),
        }
    }

    /// Creates a new [Router](./struct.Router.html) instance from the added configuration.
    ///
    /// Global middlewares are applied here: they wrap every route handler and the not-found handler, outside the
    /// middlewares a route was registered with.
    pub fn build(self) -> crate::Result<Router<B, E>> {
        let BuilderInner {
            mut router,
            middlewares,
        } = self.inner?;

        if !middlewares.is_empty() {
            router.table.wrap_handlers(|handler| apply_all(&middlewares, handler));
            router.config.not_found_handler = apply_all(&middlewares, router.config.not_found_handler.clone());
        }

        tracing::debug!(routes = router.len(), middlewares = middlewares.len(), "router built");
        Ok(router)
    }

    fn and_then<F>(self, func: F) -> Self
    where
        F: FnOnce(BuilderInner<B, E>) -> crate::Result<BuilderInner<B, E>>,
    {
        RouterBuilder {
            inner: self.inner.and_then(func),
        }
    }

    /// Adds a route for `method` and `path` with a prebuilt handler, wrapped with `middlewares`.
    ///
    /// # Examples
    ///
    /// ```
    /// use http_body_util::Full;
    /// use hyper::{body::Bytes, Method, Request, Response};
    /// use routemux::{Handler, Middleware, Router};
    /// use std::convert::Infallible;
    ///
    /// fn run() -> Router<(), Infallible> {
    ///     let handler = Handler::new(|_: Request<()>| async { Ok(Response::new(Full::new(Bytes::from("ok")))) });
    ///     let auth = Middleware::pre(|req| async move {
    ///         /* Check the credentials */
    ///         Ok(req)
    ///     });
    ///
    ///     Router::builder()
    ///         .add(Method::GET, "/admin", handler, [auth])
    ///         .build()
    ///         .unwrap()
    /// }
    /// # run();
    /// ```
    pub fn add<P, I>(self, method: Method, path: P, handler: Handler<B, E>, middlewares: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = Middleware<B, E>>,
    {
        self.and_then(move |mut inner| {
            inner.router.register(method, path, handler, middlewares)?;
            Ok(inner)
        })
    }

    fn add_fn<P, H, R>(self, method: Method, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.add(method, path, Handler::new(handler), [])
    }

    /// Adds a new route with `GET` method and the handler at the specified path.
    ///
    /// # Examples
    ///
    /// ```
    /// use http_body_util::Full;
    /// use hyper::{body::Bytes, Request, Response};
    /// use routemux::Router;
    /// use std::convert::Infallible;
    ///
    /// async fn home_handler(_: Request<()>) -> Result<Response<Full<Bytes>>, Infallible> {
    ///     Ok(Response::new(Full::new(Bytes::from("home"))))
    /// }
    ///
    /// # fn run() -> Router<(), Infallible> {
    /// let router = Router::builder()
    ///     .get("/", home_handler)
    ///     .build()
    ///     .unwrap();
    /// # router
    /// # }
    /// # run();
    /// ```
    pub fn get<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.add_fn(Method::GET, path, handler)
    }

    /// Adds a new route with `POST` method and the handler at the specified path.
    pub fn post<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.add_fn(Method::POST, path, handler)
    }

    /// Adds a new route with `PUT` method and the handler at the specified path.
    pub fn put<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.add_fn(Method::PUT, path, handler)
    }

    /// Adds a new route with `PATCH` method and the handler at the specified path.
    pub fn patch<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.add_fn(Method::PATCH, path, handler)
    }

    /// Adds a new route with `DELETE` method and the handler at the specified path.
    pub fn delete<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.add_fn(Method::DELETE, path, handler)
    }

    /// Adds a new route with `OPTIONS` method and the handler at the specified path.
    pub fn options<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.add_fn(Method::OPTIONS, path, handler)
    }

    /// Adds a new route with `HEAD` method and the handler at the specified path.
    pub fn head<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.add_fn(Method::HEAD, path, handler)
    }

    pub fn connect<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.add_fn(Method::CONNECT, path, handler)
    }

    pub fn trace<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.add_fn(Method::TRACE, path, handler)
    }

    /// Adds a global middleware. Global middlewares run in the order they were added, before any route middleware.
    ///
    /// # Examples
    ///
    /// ```
    /// use routemux::{Middleware, Router};
    /// use std::convert::Infallible;
    ///
    /// # fn run() -> Router<(), Infallible> {
    /// let router = Router::builder()
    ///     .middleware(Middleware::pre(|req| async move {
    ///         /* Do some operations */
    ///         Ok(req)
    ///     }))
    ///     .build()
    ///     .unwrap();
    /// # router
    /// # }
    /// # run();
    /// ```
    pub fn middleware(self, m: Middleware<B, E>) -> Self {
        self.and_then(move |mut inner| {
            inner.middlewares.push(m);
            Ok(inner)
        })
    }

    /// Resolve `/foo/` as `/foo`. The root path is never altered.
    pub fn remove_trailing_slash(self, remove: bool) -> Self {
        self.and_then(move |mut inner| {
            inner.router.config.remove_trailing_slash = remove;
            Ok(inner)
        })
    }

    /// Sets the handler invoked when no route matches.
    pub fn not_found_handler<H, R>(self, handler: H) -> Self
    where
        H: Fn(Request<B>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        let handler = Handler::new(handler);
        self.and_then(move |mut inner| {
            inner.router.config.not_found_handler = handler;
            Ok(inner)
        })
    }
}

impl<B: Send + 'static, E: Send + 'static> Default for RouterBuilder<B, E> {
    fn default() -> Self {
        RouterBuilder::new()
    }
}

impl<B, E> Debug for RouterBuilder<B, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.inner {
            Ok(ref inner) => write!(f, "{{ router: {:?}, middlewares: {} }}", inner.router, inner.middlewares.len()),
            Err(ref err) => write!(f, "{{ error: {} }}", err),
        }
    }
}
