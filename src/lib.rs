//! `routemux` is a small request multiplexer for the Rust HTTP library [hyper](https://hyper.rs/): it picks a handler
//! by method and path, binds `:name` route params and runs the handler through its middlewares.
//!
//! Core features:
//!
//! - Exact paths are found with a single hash lookup, paths with params fall back to anchored regex matching.
//!
//! - Matching is deterministic: an exact route always wins, then parameterized routes are tried in registration order.
//!
//! - Middlewares are plain `Handler -> Handler` transforms, composed in declaration order.
//!
//! - Handler errors are never swallowed: they come back out of [`Router::dispatch`](./struct.Router.html#method.dispatch)
//!   and the hyper service as they were returned.
//!
//! ## Basic Example
//!
//! ```no_run
//! use http_body_util::Full;
//! use hyper::body::{Bytes, Incoming};
//! use hyper::service::Service;
//! use hyper::{Request, Response};
//! use hyper_util::rt::{TokioExecutor, TokioIo};
//! use hyper_util::server::conn::auto::Builder;
//! // Import the prelude traits.
//! use routemux::prelude::*;
//! use routemux::{Middleware, Router, RouterService};
//! use std::sync::Arc;
//! use std::{convert::Infallible, net::SocketAddr};
//! use tokio::net::TcpListener;
//!
//! // A handler for "/" page.
//! async fn home_handler(_: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
//!     Ok(Response::new(Full::new(Bytes::from("Home page"))))
//! }
//!
//! // A handler for "/users/:userId" page.
//! async fn user_handler(req: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
//!     let user_id = req.param("userId").unwrap();
//!     Ok(Response::new(Full::new(Bytes::from(format!("Hello {}", user_id)))))
//! }
//!
//! // A middleware which logs an http request.
//! async fn logger(req: Request<Incoming>) -> Result<Request<Incoming>, Infallible> {
//!     println!("{:?} {} {}", req.remote_addr(), req.method(), req.uri().path());
//!     Ok(req)
//! }
//!
//! fn router() -> Router<Incoming, Infallible> {
//!     Router::builder()
//!         .middleware(Middleware::pre(logger))
//!         .get("/", home_handler)
//!         .get("/users/:userId", user_handler)
//!         .build()
//!         .unwrap()
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let router_service = Arc::new(RouterService::new(router()));
//!
//!     // The address on which the server will be listening.
//!     let addr = SocketAddr::from(([127, 0, 0, 1], 3001));
//!     let listener = TcpListener::bind(addr).await?;
//!     println!("App is running on: {}", addr);
//!
//!     loop {
//!         let (stream, _) = listener.accept().await?;
//!         let router_service = router_service.clone();
//!
//!         tokio::spawn(async move {
//!             // Get the request service for this connection
//!             let request_service = router_service.call(&stream).await.unwrap();
//!
//!             // Wrap the stream in TokioIo for hyper
//!             let io = TokioIo::new(stream);
//!             let builder = Builder::new(TokioExecutor::new());
//!
//!             // Serve the connection
//!             if let Err(err) = builder.serve_connection(io, request_service).await {
//!                 eprintln!("Error serving connection: {:?}", err);
//!             }
//!         });
//!     }
//! }
//! ```
//!
//! ## Routing
//!
//! ### Route Paths
//!
//! Route paths are `/`-separated segments, matched case-sensitively. A path without any `:` is a static route and
//! only matches that exact string.
//!
//! A segment starting with `:` declares a route param. Each param matches one or more ASCII letters or digits, so
//! slashes, dots and other punctuation never end up inside a param. The whole path has to match, a prefix is not
//! enough:
//!
//! | Route path           | Request path     | Params                   |
//! |----------------------|------------------|--------------------------|
//! | `/users/:id`         | `/users/42`      | `id = 42`                |
//! | `/users/:id`         | `/users/42/more` | no match                 |
//! | `/a/:x/b/:y`         | `/a/1/b/2`       | `x = 1`, `y = 2`         |
//! | `/files/:name.json`  | `/files/cv.json` | `name = cv`              |
//!
//! ### Match Priority
//!
//! For a given method, the router first looks the path up among the static routes. Only when that fails, the
//! parameterized routes are tried in the order they were registered, and the first match wins. Registering the same
//! static path, or two param paths compiling to the same pattern, replaces the earlier route.
//!
//! When no route matches, the not-found handler runs. The default one responds with `404 Not Found`.
//!
//! ### Route Parameters
//!
//! ```
//! use http_body_util::Full;
//! use hyper::{body::Bytes, Request, Response};
//! use routemux::prelude::*;
//! use routemux::Router;
//! use std::convert::Infallible;
//!
//! # fn run() -> Router<(), Infallible> {
//! let router = Router::builder()
//!     .get("/users/:userName/books/:bookName", |req: Request<()>| async move {
//!         let user_name = req.param("userName").unwrap();
//!         let book_name = req.param("bookName").unwrap();
//!
//!         Ok(Response::new(Full::new(Bytes::from(format!(
//!             "Username: {}, Book Name: {}",
//!             user_name, book_name
//!         )))))
//!     })
//!     .build()
//!     .unwrap();
//! # router
//! # }
//! # run();
//! ```
//!
//! ## Middleware
//!
//! A [`Middleware`](./struct.Middleware.html) turns a handler into another handler. Middlewares can be attached to a
//! single route with [`RouterBuilder::add`](./struct.RouterBuilder.html#method.add) or to every route (the not-found
//! handler included) with [`RouterBuilder::middleware`](./struct.RouterBuilder.html#method.middleware). Global ones wrap
//! route ones, and within each list the first declared middleware runs first on the way in and last on the way out.
//!
//! ```
//! use http_body_util::Full;
//! use hyper::{body::Bytes, header::HeaderValue, Request, Response};
//! use routemux::{Middleware, Router};
//! use std::convert::Infallible;
//!
//! # fn run() -> Router<(), Infallible> {
//! let router = Router::builder()
//!     .middleware(Middleware::post(|mut res: Response<Full<Bytes>>| async move {
//!         res.headers_mut().insert("x-powered-by", HeaderValue::from_static("routemux"));
//!         Ok(res)
//!     }))
//!     .get("/", |_: Request<()>| async { Ok(Response::new(Full::new(Bytes::from("home")))) })
//!     .build()
//!     .unwrap();
//! # router
//! # }
//! # run();
//! ```
//!
//! ## Error Handling
//!
//! Route paths are compiled when they are registered. A path which can't be compiled makes
//! [`RouterBuilder::build`](./struct.RouterBuilder.html#method.build) fail with [`Error::InvalidPattern`](./enum.Error.html),
//! naming the offending path.
//!
//! Handler errors are left to the application: turn them into responses with an outermost middleware, or let them
//! reach hyper.

pub use self::config::Config;
pub use self::error::Error;
pub use self::handler::{Handler, HandlerReturn};
pub use self::middleware::{with_middlewares, Middleware};
pub use self::route::Route;
pub use self::router::{RouteMatch, Router, RouterBuilder};
pub use self::service::{RequestService, RequestServiceBuilder, RouterService};
pub use self::types::{RemoteAddr, RouteParams};

mod config;
mod constants;
mod error;
pub mod ext;
mod handler;
mod helpers;
mod middleware;
pub mod prelude;
mod regex_generator;
pub mod response;
mod route;
mod router;
mod service;
mod types;

/// A Result type often returned from methods that can have routemux errors.
pub type Result<T> = std::result::Result<T, Error>;
