use crate::constants::STANDARD_METHODS;
use crate::handler::Handler;
use crate::route::Route;
use crate::types::RouteParams;
use hyper::Method;
use std::collections::HashMap;

/// A route resolved for a concrete request path, with the params it bound.
#[derive(Debug)]
pub struct RouteMatch<'a, B, E> {
    pub route: &'a Route<B, E>,
    pub params: RouteParams,
}

/// The routes registered for one method.
pub(crate) struct MethodRoutes<B, E> {
    exact: HashMap<String, Route<B, E>>,
    // Kept in registration order, which is also match priority.
    parameterized: Vec<Route<B, E>>,
}

impl<B, E> Default for MethodRoutes<B, E> {
    fn default() -> Self {
        MethodRoutes {
            exact: HashMap::new(),
            parameterized: Vec::new(),
        }
    }
}

impl<B, E> MethodRoutes<B, E> {
    fn insert(&mut self, route: Route<B, E>) -> Option<Route<B, E>> {
        if route.is_static() {
            return self.exact.insert(route.path.clone(), route);
        }

        let key = route.table_key();
        match self.parameterized.iter().position(|r| r.table_key() == key) {
            Some(idx) => Some(std::mem::replace(&mut self.parameterized[idx], route)),
            None => {
                self.parameterized.push(route);
                None
            }
        }
    }

    fn find(&self, target_path: &str) -> Option<RouteMatch<'_, B, E>> {
        if let Some(route) = self.exact.get(target_path) {
            return Some(RouteMatch {
                route,
                params: RouteParams::new(),
            });
        }

        self.parameterized
            .iter()
            .find_map(|route| route.match_path(target_path).map(|params| RouteMatch { route, params }))
    }

    fn len(&self) -> usize {
        self.exact.len() + self.parameterized.len()
    }
}

/// Method → routes lookup. Every standard method has a bucket from the start.
pub(crate) struct RouteTable<B, E> {
    methods: HashMap<Method, MethodRoutes<B, E>>,
}

impl<B, E> RouteTable<B, E> {
    pub(crate) fn new() -> RouteTable<B, E> {
        let methods = STANDARD_METHODS
            .iter()
            .map(|method| (method.clone(), MethodRoutes::default()))
            .collect();

        RouteTable { methods }
    }

    /// Stores `route`, returning the route previously stored under the same key.
    pub(crate) fn insert(&mut self, method: Method, route: Route<B, E>) -> Option<Route<B, E>> {
        self.methods.entry(method).or_default().insert(route)
    }

    /// Exact routes win over parameterized ones; among parameterized routes the first registered wins.
    pub(crate) fn find(&self, method: &Method, target_path: &str) -> Option<RouteMatch<'_, B, E>> {
        self.methods.get(method)?.find(target_path)
    }

    pub(crate) fn routes(&self, method: &Method) -> impl Iterator<Item = &Route<B, E>> {
        self.methods
            .get(method)
            .into_iter()
            .flat_map(|bucket| bucket.exact.values().chain(bucket.parameterized.iter()))
    }

    pub(crate) fn len(&self) -> usize {
        self.methods.values().map(MethodRoutes::len).sum()
    }

    pub(crate) fn wrap_handlers<F>(&mut self, wrap: F)
    where
        F: Fn(Handler<B, E>) -> Handler<B, E>,
    {
        for bucket in self.methods.values_mut() {
            for route in bucket.exact.values_mut().chain(bucket.parameterized.iter_mut()) {
                route.handler = wrap(route.handler.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;
    use hyper::body::Bytes;
    use hyper::{Request, Response};
    use std::convert::Infallible;

    fn route(path: &str) -> Route<(), Infallible> {
        let handler = Handler::new(|_: Request<()>| async { Ok(Response::new(Full::new(Bytes::new()))) });
        Route::new(path, handler).unwrap()
    }

    #[test]
    fn standard_methods_are_precreated() {
        let table = RouteTable::<(), Infallible>::new();
        for method in STANDARD_METHODS.iter() {
            assert!(table.methods.contains_key(method), "{}", method);
        }
        assert_eq!(table.len(), 0);
        assert!(table.find(&Method::GET, "/").is_none());
    }

    #[test]
    fn static_and_pattern_routes_go_to_disjoint_maps() {
        let mut table = RouteTable::new();
        table.insert(Method::GET, route("/users"));
        table.insert(Method::GET, route("/users/:id"));

        let bucket = &table.methods[&Method::GET];
        assert_eq!(bucket.exact.len(), 1);
        assert_eq!(bucket.parameterized.len(), 1);
        assert!(bucket.exact.contains_key("/users"));
    }

    #[test]
    fn last_registration_wins() {
        let mut table = RouteTable::new();
        assert!(table.insert(Method::GET, route("/users")).is_none());
        assert!(table.insert(Method::GET, route("/users")).is_some());

        assert!(table.insert(Method::GET, route("/users/:id")).is_none());
        let replaced = table.insert(Method::GET, route("/users/:name")).unwrap();
        assert_eq!(replaced.path(), "/users/:id");

        let found = table.find(&Method::GET, "/users/7").unwrap();
        assert_eq!(found.route.path(), "/users/:name");
        assert_eq!(found.params.get("name"), Some("7"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn exact_match_beats_pattern_regardless_of_order() {
        let mut table = RouteTable::new();
        table.insert(Method::GET, route("/users/:id"));
        table.insert(Method::GET, route("/users/me"));

        let found = table.find(&Method::GET, "/users/me").unwrap();
        assert_eq!(found.route.path(), "/users/me");
        assert!(found.params.is_empty());
    }

    #[test]
    fn overlapping_patterns_resolve_in_registration_order() {
        let mut table = RouteTable::new();
        table.insert(Method::GET, route("/:kind/:id"));
        table.insert(Method::GET, route("/posts/:id"));

        let found = table.find(&Method::GET, "/posts/9").unwrap();
        assert_eq!(found.route.path(), "/:kind/:id");
        assert_eq!(found.params.get("kind"), Some("posts"));
    }

    #[test]
    fn extension_methods_get_a_bucket_on_demand() {
        let purge = Method::from_bytes(b"PURGE").unwrap();
        let mut table = RouteTable::new();
        assert!(table.find(&purge, "/cache").is_none());

        table.insert(purge.clone(), route("/cache"));
        assert!(table.find(&purge, "/cache").is_some());
        assert_eq!(table.routes(&purge).count(), 1);
    }
}
