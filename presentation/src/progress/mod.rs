//! Progress display during exam generation

pub mod reporter;
