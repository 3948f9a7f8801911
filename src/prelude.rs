//! Re-exports of the traits needed inside route handlers and middlewares.

pub use crate::ext::RequestExt;
