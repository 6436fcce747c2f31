// Public modules
pub mod error;
pub mod export;
pub mod index;
pub mod matcher;
pub mod names;
pub mod rename;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
