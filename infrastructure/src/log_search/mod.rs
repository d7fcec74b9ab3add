//! Log store adapters

mod http;

pub use http::HttpLogSearch;
