//! Progress reporting while agents work

pub mod reporter;
