//! # Chapter 1: Fragments & Queries
//!
//! Put field values into the URI and the query string.
//!
//! ## URI Templates
//!
//! Placeholders are positional: `%1$s` is the field marked `#[fragment(1)]`.
//! A template may reuse a position, or use sequential `%s` placeholders.
//! `%%` is a literal percent sign.
//!
//! | Template | Fragments | Result |
//! |----------|-----------|--------|
//! | `/users/%1$s/posts/%2$s` | `42`, `7` | `/users/42/posts/7` |
//! | `/%2$s/%1$s` | `a`, `b` | `/b/a` |
//! | `/files/%s` | `a b` | `/files/a%20b` |
//!
//! Positions must run from 1 without gaps: the derive rejects anything else.
//! String fragments are percent-encoded, numbers and booleans are written as is.
//!
//! ## Prefix Joining
//!
//! Relative templates are joined to the context prefix with exactly one `/`.
//! Templates starting with `http://` or `https://` ignore the prefix.
//!
//! ```
//! use carapace::prelude::*;
//!
//! #[derive(Serialize, RpcObject)]
//! #[rpc(get = "/files/%1$s/%2$s")]
//! struct ReadFile {
//!     #[fragment(1)]
//!     bucket: String,
//!     #[fragment(2)]
//!     name: String,
//! }
//!
//! let context = ExecutionContext::builder()
//!     .uri_prefix("https://storage.example.com/")
//!     .build();
//! let read = ReadFile {
//!     bucket: "photos".to_string(),
//!     name: "summer 2024.jpg".to_string(),
//! };
//!
//! let request = context.create_request(&read)?;
//! assert_eq!(
//!     request.uri(),
//!     "https://storage.example.com/files/photos/summer%202024.jpg"
//! );
//! # Ok::<(), carapace::Error>(())
//! ```
//!
//! ## Query Fields
//!
//! `#[query]` sends a field as a query parameter:
//!
//! - `None` values are skipped
//! - the name is the field name through the remote naming strategy
//! - `#[query("name")]` sets an explicit name
//! - when two fields share a name, the last declared one wins
//! - values that are not scalars (vectors, structs) are skipped and reported
//!   to the diagnostics
//!
//! ```
//! use carapace::prelude::*;
//!
//! #[derive(Serialize, RpcObject)]
//! #[rpc(get = "/search", remote_name = "camelCase")]
//! struct Search {
//!     #[query("q")]
//!     text: String,
//!     #[query]
//!     page_size: Option<u32>,
//!     #[query]
//!     include_archived: bool,
//! }
//!
//! let context = ExecutionContext::builder().uri_prefix("http://api").build();
//! let search = Search {
//!     text: "rust".to_string(),
//!     page_size: None,
//!     include_archived: true,
//! };
//!
//! let request = context.create_request(&search)?;
//! assert_eq!(
//!     request.url()?.as_str(),
//!     "http://api/search?q=rust&includeArchived=true"
//! );
//! # Ok::<(), carapace::Error>(())
//! ```
//!
//! ## Naming Strategies
//!
//! `local_name` and `remote_name` take a case name (`snake_case`,
//! `camelCase`, `kebab-case`, ...) or a path to a type implementing
//! [`NamingStrategy`](crate::NamingStrategy) and `Default`. Declaration
//! strategies win over the context ones, identity applies otherwise.
//!
//! ## Next Steps
//!
//! - [Chapter 2: Bodies][super::chapter_2] - Serialize request bodies
