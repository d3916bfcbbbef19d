//! # Pinshot Core
//!
//! Core types, errors, and traits for the pinshot upload pipeline.
//!
//! This crate provides the foundational building blocks used by the other
//! pinshot crates:
//!
//! - **Types**: Upload requests, results, and picked-file handles
//! - **Errors**: The deliberately small error surface of the pipeline
//! - **Constants**: Service endpoint and naming defaults
//! - **Traits**: Capability seams for byte acquisition and file selection
//!
//! ## Example
//!
//! ```rust
//! use pinshot_core::UploadResult;
//!
//! let result = UploadResult::new("Qm123", "gateway.example.com");
//! assert_eq!(result.display_url, "https://gateway.example.com/Qm123");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{PinshotError, Result};
pub use traits::*;
pub use types::*;
