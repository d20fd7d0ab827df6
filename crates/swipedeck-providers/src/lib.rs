// Error types
pub mod error;

// Trait-based architecture (public API)
pub mod traits;

// Source implementations
pub mod catalog;

pub use catalog::CatalogSource;
pub use error::{Error, Result};
pub use traits::{CandidateSource, PageRequest};
