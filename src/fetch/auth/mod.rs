//! Request decorators that attach the upstream credential.

mod url_param;

pub use url_param::UrlParam;
