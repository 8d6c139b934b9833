//! Stock request pre-processors.
//!
//! A [`Preprocessor`](crate::Preprocessor) is installed on the
//! [`ExecutionContext`](crate::ExecutionContext). It can reject an object
//! before anything is resolved and adjust every request once it is built.
//!
//! # Available Pre-processors
//!
//! - [`BearerAuth`] - Adds `Authorization: Bearer <token>` header
//! - [`StaticHeaders`] - Adds a fixed set of headers
//! - [`PreprocessorChain`] - Runs several pre-processors in order
//!
//! # Example
//!
//! ```
//! use carapace::ExecutionContext;
//! use carapace::preprocessor::{BearerAuth, PreprocessorChain, StaticHeaders};
//!
//! let context = ExecutionContext::builder()
//!     .uri_prefix("https://api.example.com")
//!     .preprocessor(
//!         PreprocessorChain::new()
//!             .with(BearerAuth::new("my-token"))
//!             .with(StaticHeaders::new().with_header("X-Api-Version", "2")),
//!     )
//!     .build();
//! # let _ = context;
//! ```

mod bearer_auth;
mod chain;
mod static_headers;

pub use bearer_auth::BearerAuth;
pub use chain::PreprocessorChain;
pub use static_headers::StaticHeaders;
