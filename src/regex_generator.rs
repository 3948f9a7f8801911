use crate::constants::PARAM_CAPTURE;
use crate::Error;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PARAM_TOKEN_RE: Regex = Regex::new(r":([0-9A-Za-z_]+)").expect("route param token regex is valid");
}

/// The outcome of compiling a registration path.
#[derive(Debug)]
pub(crate) enum CompiledPath {
    /// No `:` anywhere in the path, it is used verbatim as an exact-match key.
    Static,
    /// An anchored matcher with one capturing group per entry in `param_names`, in declaration order.
    Pattern { regex: Regex, param_names: Vec<String> },
}

pub(crate) fn compile_route_path(path: &str) -> crate::Result<CompiledPath> {
    if !path.contains(':') {
        return Ok(CompiledPath::Static);
    }

    let (regex, param_names) = generate_exact_match_regex(path)?;
    Ok(CompiledPath::Pattern { regex, param_names })
}

fn generate_exact_match_regex(path: &str) -> crate::Result<(Regex, Vec<String>)> {
    let mut param_names = Vec::new();
    let mut pattern = String::with_capacity(path.len() + 2);
    pattern.push('^');

    let mut last_end = 0;
    for caps in PARAM_TOKEN_RE.captures_iter(path) {
        let Some(token) = caps.get(0) else {
            continue;
        };

        pattern.push_str(&regex::escape(&path[last_end..token.start()]));
        pattern.push_str(PARAM_CAPTURE);
        param_names.push(caps[1].to_owned());

        last_end = token.end();
    }

    pattern.push_str(&regex::escape(&path[last_end..]));
    pattern.push('$');

    let re = Regex::new(&pattern).map_err(|e| Error::invalid_pattern(path, e))?;
    Ok((re, param_names))
}
