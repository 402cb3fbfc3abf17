//! # lineopen-core - Core Types
//!
//! Foundation crate for Line Opener. Provides the shared error type and the
//! logging subsystem used by the binary and the application crate.
//!
//! ## Public API
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Infrastructure error enum (IO, configuration, logging)
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ### Logging (`logging`)
//! - [`logging::init()`] - Install the file-backed tracing subscriber
//! - [`logging::log_directory()`] - Directory holding the append-mode log file
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use lineopen_core::prelude::*;
//! ```

pub mod error;
pub mod logging;

/// Prelude for common imports used throughout all Line Opener crates
pub mod prelude {
    pub use super::error::{Error, Result};
    pub use tracing::{debug, error, info, trace, warn};
}

pub use error::{Error, Result};
