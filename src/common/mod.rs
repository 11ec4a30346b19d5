//! Shared errors, vocabularies and the gateway seam

pub mod errors;
pub mod traits;
pub mod types;
