use self::support::{into_text, serve};
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::header::HeaderValue;
use hyper::{Method, Request, Response, StatusCode};
use routemux::{response, with_middlewares, Handler, Middleware, Router};
use std::fmt;
use std::sync::{Arc, Mutex};

mod support;

#[derive(Debug)]
struct AppError(&'static str);

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "app error: {}", self.0)
    }
}

impl std::error::Error for AppError {}

type Log = Arc<Mutex<Vec<String>>>;

fn tagging(log: Log, tag: &'static str) -> Middleware<(), AppError> {
    Middleware::around(move |req: Request<()>, next: Handler<(), AppError>| {
        let log = log.clone();
        async move {
            log.lock().unwrap().push(format!("{} in", tag));
            let res = next.call(req).await;
            log.lock().unwrap().push(format!("{} out", tag));
            res
        }
    })
}

fn logging_handler(log: Log) -> Handler<(), AppError> {
    Handler::new(move |_: Request<()>| {
        let log = log.clone();
        async move {
            log.lock().unwrap().push("handler".to_string());
            Ok(response::string("ok"))
        }
    })
}

#[tokio::test]
async fn composed_chain_runs_as_an_onion() {
    let log = Log::default();
    let handler = with_middlewares(vec![
        Some(tagging(log.clone(), "m1")),
        None,
        Some(tagging(log.clone(), "m2")),
    ])(Some(logging_handler(log.clone())))
    .unwrap();

    handler.call(Request::new(())).await.unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["m1 in", "m2 in", "handler", "m2 out", "m1 out"]);
}

#[tokio::test]
async fn composing_nothing_leaves_the_handler_alone() {
    let log = Log::default();
    let handler = logging_handler(log);

    let same = with_middlewares(Vec::<Option<Middleware<(), AppError>>>::new())(Some(handler.clone())).unwrap();
    assert!(same.ptr_eq(&handler));

    let nothing = with_middlewares(vec![tagging(Log::default(), "m1")])(None);
    assert!(nothing.is_none());
}

#[tokio::test]
async fn route_middlewares_only_wrap_their_route() {
    let log = Log::default();
    let router: Router<(), AppError> = Router::builder()
        .middleware(tagging(log.clone(), "global"))
        .add(Method::GET, "/guarded", logging_handler(log.clone()), [tagging(log.clone(), "guard")])
        .add(Method::GET, "/open", logging_handler(log.clone()), [])
        .build()
        .unwrap();

    router.dispatch(Request::builder().uri("/guarded").body(()).unwrap()).await.unwrap();
    assert_eq!(
        *log.lock().unwrap(),
        vec!["global in", "guard in", "handler", "guard out", "global out"]
    );

    log.lock().unwrap().clear();
    router.dispatch(Request::builder().uri("/open").body(()).unwrap()).await.unwrap();
    assert_eq!(*log.lock().unwrap(), vec!["global in", "handler", "global out"]);
}

#[tokio::test]
async fn errors_pass_through_middlewares_unless_they_handle_them() {
    let failing = Handler::new(|_: Request<()>| async { Err(AppError("boom")) });

    let log = Log::default();
    let router: Router<(), AppError> = Router::builder()
        .add(Method::GET, "/raw", failing.clone(), [tagging(log.clone(), "m1")])
        .add(
            Method::GET,
            "/handled",
            failing,
            [Middleware::around(|req: Request<()>, next: Handler<(), AppError>| async move {
                match next.call(req).await {
                    Ok(res) => Ok(res),
                    Err(err) => Ok(response::string_with_status(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())),
                }
            })],
        )
        .build()
        .unwrap();

    let err = router
        .dispatch(Request::builder().uri("/raw").body(()).unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.0, "boom");
    assert_eq!(*log.lock().unwrap(), vec!["m1 in", "m1 out"]);

    let res = router
        .dispatch(Request::builder().uri("/handled").body(()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(into_text(res.into_body()).await, "app error: boom\n");
}

#[tokio::test]
async fn pre_and_post_middlewares_over_http() {
    let router: Router<Incoming, AppError> = Router::builder()
        .middleware(Middleware::pre(|mut req: Request<Incoming>| async move {
            req.headers_mut().insert("x-request-tag", HeaderValue::from_static("tagged"));
            Ok(req)
        }))
        .middleware(Middleware::post(|mut res: Response<Full<Bytes>>| async move {
            res.headers_mut().insert("x-powered-by", HeaderValue::from_static("routemux"));
            Ok(res)
        }))
        .get("/tag", |req: Request<Incoming>| async move {
            let tag = req
                .headers()
                .get("x-request-tag")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("missing")
                .to_owned();
            Ok(Response::new(Full::new(Bytes::from(tag))))
        })
        .build()
        .unwrap();

    let serve = serve(router).await;

    let client = hyper_util::client::legacy::Client::builder(hyper_util::rt::TokioExecutor::new())
        .build_http::<Full<Bytes>>();
    let res = client
        .request(serve.new_request(Method::GET, "/tag").body(Full::new(Bytes::new())).unwrap())
        .await
        .unwrap();

    assert_eq!(res.headers()["x-powered-by"], "routemux");
    assert_eq!(into_text(res.into_body()).await, "tagged");

    // The not-found handler is wrapped too.
    let res = client
        .request(serve.new_request(Method::GET, "/missing").body(Full::new(Bytes::new())).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.headers()["x-powered-by"], "routemux");

    serve.shutdown();
}
