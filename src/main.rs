use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::service::Service;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use routemux::prelude::*;
use routemux::{ext, response, Handler, Middleware, Router, RouterService};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

const ADDR_ENV: &str = "ROUTEMUX_ADDR";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Deserialize, Serialize)]
struct Book {
    title: String,
    author: String,
}

async fn home_handler(_: Request<Incoming>) -> routemux::Result<Response<Full<Bytes>>> {
    Ok(response::string("Home page"))
}

async fn user_handler(req: Request<Incoming>) -> routemux::Result<Response<Full<Bytes>>> {
    let user_id = req.param("userId").unwrap_or_default();
    Ok(response::string(format!("Hello {}", user_id)))
}

async fn user_book_handler(req: Request<Incoming>) -> routemux::Result<Response<Full<Bytes>>> {
    let user_name = req.param("userName").unwrap_or_default();
    let book_name = req.param("bookName").unwrap_or_default();
    let format = req.query_or("format", "text");

    if format == "json" {
        return response::json(&serde_json::json!({ "user": user_name, "book": book_name }));
    }
    Ok(response::string(format!("User: {}, Book: {}", user_name, book_name)))
}

async fn create_book_handler(req: Request<Incoming>) -> routemux::Result<Response<Full<Bytes>>> {
    let book: Book = ext::json_body(req).await?;
    response::json_with_status(StatusCode::CREATED, &book)
}

async fn not_found_handler(req: Request<Incoming>) -> routemux::Result<Response<Full<Bytes>>> {
    Ok(response::string_with_status(
        StatusCode::NOT_FOUND,
        format!("Nothing at {}", req.uri().path()),
    ))
}

// Logs every request together with the status it got.
fn logger() -> Middleware<Incoming, routemux::Error> {
    Middleware::around(|req: Request<Incoming>, next: Handler<Incoming, routemux::Error>| async move {
        let method = req.method().clone();
        let path = req.uri().path().to_owned();
        let remote_addr = req.remote_addr();

        let res = next.call(req).await;
        match res {
            Ok(ref res) => tracing::info!(?remote_addr, %method, %path, status = res.status().as_u16(), "request served"),
            Err(ref err) => tracing::warn!(?remote_addr, %method, %path, error = %err, "request failed"),
        }
        res
    })
}

// Turns handler errors into responses, so clients get a body instead of a dropped connection.
fn error_responder() -> Middleware<Incoming, routemux::Error> {
    Middleware::around(|req: Request<Incoming>, next: Handler<Incoming, routemux::Error>| async move {
        match next.call(req).await {
            Ok(res) => Ok(res),
            Err(err @ routemux::Error::Json(_)) | Err(err @ routemux::Error::Body(_)) => Ok(
                response::string_with_status(StatusCode::BAD_REQUEST, format!("Bad request: {}", err)),
            ),
            Err(err) => Ok(response::string_with_status(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Something went wrong: {}", err),
            )),
        }
    })
}

fn router() -> routemux::Result<Router<Incoming, routemux::Error>> {
    Router::builder()
        .middleware(logger())
        .middleware(error_responder())
        .remove_trailing_slash(true)
        .not_found_handler(not_found_handler)
        .get("/", home_handler)
        .get("/users/:userId", user_handler)
        .get("/users/:userName/books/:bookName", user_book_handler)
        .post("/books", create_book_handler)
        .build()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // A route that can't be compiled is a programming error, refuse to start.
    let router = router()?;
    let router_service = Arc::new(RouterService::new(router));

    let addr: SocketAddr = std::env::var(ADDR_ENV)
        .unwrap_or_else(|_| DEFAULT_ADDR.to_owned())
        .parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    loop {
        let (stream, _) = match listener.accept().await {
            Ok(conn) => conn,
            Err(err) => {
                tracing::warn!(error = %err, "could not accept connection");
                continue;
            }
        };

        let router_service = router_service.clone();
        tokio::spawn(async move {
            let request_service = match router_service.call(&stream).await {
                Ok(service) => service,
                Err(never) => match never {},
            };

            let io = TokioIo::new(stream);
            let builder = Builder::new(TokioExecutor::new());
            if let Err(err) = builder.serve_connection(io, request_service).await {
                tracing::debug!(error = %err, "error serving connection");
            }
        });
    }
}
