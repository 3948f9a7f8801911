use crate::constants::NOT_FOUND_BODY;
use crate::handler::Handler;
use crate::response;
use hyper::{Request, StatusCode};
use std::fmt::{self, Debug, Formatter};

/// Router-wide settings.
///
/// # Examples
///
/// ```
/// use routemux::{Config, Router};
/// use std::convert::Infallible;
///
/// let router: Router<(), Infallible> = Router::new(Config::default().remove_trailing_slash(true));
/// assert!(router.config().remove_trailing_slash);
/// ```
pub struct Config<B, E> {
    /// Resolve `/foo/` as `/foo`. The root path `/` is never altered.
    pub remove_trailing_slash: bool,
    /// Invoked when no route matches the request.
    pub not_found_handler: Handler<B, E>,
}

impl<B: 'static, E: 'static> Config<B, E> {
    pub fn remove_trailing_slash(mut self, remove: bool) -> Self {
        self.remove_trailing_slash = remove;
        self
    }

    pub fn not_found_handler(mut self, handler: Handler<B, E>) -> Self {
        self.not_found_handler = handler;
        self
    }
}

impl<B: 'static, E: 'static> Default for Config<B, E> {
    fn default() -> Self {
        Config {
            remove_trailing_slash: false,
            not_found_handler: default_not_found_handler(),
        }
    }
}

impl<B, E> Clone for Config<B, E> {
    fn clone(&self) -> Self {
        Config {
            remove_trailing_slash: self.remove_trailing_slash,
            not_found_handler: self.not_found_handler.clone(),
        }
    }
}

impl<B, E> Debug for Config<B, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("remove_trailing_slash", &self.remove_trailing_slash)
            .field("not_found_handler", &self.not_found_handler)
            .finish()
    }
}

fn default_not_found_handler<B: 'static, E: 'static>() -> Handler<B, E> {
    Handler::new(|_: Request<B>| async { Ok(response::string_with_status(StatusCode::NOT_FOUND, NOT_FOUND_BODY)) })
}
