//! Application-level configuration.
//!
//! - [`RetrievalParams`]: what the log retrieval agent searches for and how
//!   much of the result it keeps

pub mod retrieval_params;

pub use retrieval_params::RetrievalParams;
