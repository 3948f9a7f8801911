use crate::handler::Handler;
use crate::regex_generator::{compile_route_path, CompiledPath};
use crate::types::RouteParams;
use regex::Regex;
use std::fmt::{self, Debug, Formatter};

/// How a route is matched against a request path.
pub(crate) enum RouteKind {
    /// Matched by string equality with the registration path.
    Static,
    /// Matched by an anchored regex; `param_names` has one entry per capturing group, in order.
    Pattern { regex: Regex, param_names: Vec<String> },
}

/// Represents a single registered route.
///
/// A route consists of the path it was registered with and its handler, already wrapped with the middlewares it
/// was registered with. It shouldn't be created directly, use [`Router::register`](./struct.Router.html#method.register)
/// or the [`RouterBuilder`](./struct.RouterBuilder.html) methods to create a route.
///
/// Routes whose path contains a `:` are compiled into an anchored pattern where every `:name` segment captures
/// one or more ASCII alphanumeric characters. All other routes only match their exact path.
pub struct Route<B, E> {
    pub(crate) path: String,
    pub(crate) kind: RouteKind,
    pub(crate) handler: Handler<B, E>,
}

impl<B, E> Route<B, E> {
    pub(crate) fn new<P: Into<String>>(path: P, handler: Handler<B, E>) -> crate::Result<Route<B, E>> {
        let path = path.into();
        let kind = match compile_route_path(&path)? {
            CompiledPath::Static => RouteKind::Static,
            CompiledPath::Pattern { regex, param_names } => RouteKind::Pattern { regex, param_names },
        };

        Ok(Route { path, kind, handler })
    }

    /// The path this route was registered with.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The compiled pattern, `None` for a static route.
    pub fn pattern(&self) -> Option<&str> {
        match self.kind {
            RouteKind::Static => None,
            RouteKind::Pattern { ref regex, .. } => Some(regex.as_str()),
        }
    }

    /// The param names in declaration order, empty for a static route.
    pub fn param_names(&self) -> &[String] {
        match self.kind {
            RouteKind::Static => &[],
            RouteKind::Pattern { ref param_names, .. } => param_names,
        }
    }

    /// Whether the path has no `:` and is matched by plain string equality.
    pub fn is_static(&self) -> bool {
        matches!(self.kind, RouteKind::Static)
    }

    /// The middleware-wrapped handler.
    pub fn handler(&self) -> &Handler<B, E> {
        &self.handler
    }

    /// The key under which the route table stores this route.
    pub(crate) fn table_key(&self) -> &str {
        self.pattern().unwrap_or(&self.path)
    }

    /// Matches the whole `target_path` and binds the captured values to a fresh copy of the param names.
    pub(crate) fn match_path(&self, target_path: &str) -> Option<RouteParams> {
        match self.kind {
            RouteKind::Static => (self.path == target_path).then(RouteParams::new),
            RouteKind::Pattern {
                ref regex,
                ref param_names,
            } => {
                let caps = regex.captures(target_path)?;

                let mut route_params = RouteParams::with_capacity(param_names.len());
                // Skip the first match because it's the whole path.
                for (name, value) in param_names.iter().zip(caps.iter().skip(1)) {
                    if let Some(value) = value {
                        route_params.set(name.as_str(), value.as_str());
                    }
                }

                Some(route_params)
            }
        }
    }
}

impl<B, E> Debug for Route<B, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ path: {:?}, pattern: {:?}, param_names: {:?} }}",
            self.path,
            self.pattern(),
            self.param_names()
        )
    }
}
