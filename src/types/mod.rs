pub use self::route_params::RouteParams;
use std::net::SocketAddr;

mod route_params;

/// The peer address of the connection a request came in on, stored in the request extensions by the
/// [`RequestService`](./struct.RequestService.html).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteAddr(pub SocketAddr);
