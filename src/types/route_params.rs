use std::fmt::{self, Display, Formatter};

/// The params bound by a matched route, as `(name, value)` pairs in the order the route path declares them.
///
/// A request carries them in its extensions after being resolved to a route with at least one `:name` segment.
/// Use [`RequestExt::param`](./ext/trait.RequestExt.html#tymethod.param) to read them from a handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(Vec<(String, String)>);

impl RouteParams {
    /// Creates an empty set of params.
    pub fn new() -> RouteParams {
        RouteParams(Vec::new())
    }

    /// Creates an empty set of params with room for `capacity` pairs.
    pub fn with_capacity(capacity: usize) -> RouteParams {
        RouteParams(Vec::with_capacity(capacity))
    }

    /// Appends a param. Earlier pairs with the same name shadow later ones on lookup.
    pub fn set<N: Into<String>, V: Into<String>>(&mut self, param_name: N, param_val: V) {
        self.0.push((param_name.into(), param_val.into()));
    }

    /// Returns the value of the first param called `param_name`.
    pub fn get<N: AsRef<str>>(&self, param_name: N) -> Option<&str> {
        let param_name = param_name.as_ref();
        self.0
            .iter()
            .find(|(name, _)| name == param_name)
            .map(|(_, val)| val.as_str())
    }

    pub fn has<N: AsRef<str>>(&self, param_name: N) -> bool {
        self.get(param_name).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the param names in declaration order.
    pub fn params_names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    /// Iterates over the `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, val)| (name.as_str(), val.as_str()))
    }
}

impl Display for RouteParams {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (name, val)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, val)?;
        }
        write!(f, "]")
    }
}
