//! Procedural macros for carapace declarative request construction.
//!
//! This crate provides `#[derive(RpcObject)]`, which turns a plain struct
//! into an RPC object:
//! - `#[rpc(...)]` on the struct declares the method, URI template, body
//!   serializer, naming strategies and expected response content type
//! - `#[fragment(N)]` on a field substitutes it at position `N` of the URI
//! - `#[query]` on a field sends it as a query parameter
//!
//! # Example
//!
//! ```ignore
//! use carapace::prelude::*;
//!
//! #[derive(Serialize, RpcObject)]
//! #[rpc(get = "/ping/%1$s")]
//! struct Ping {
//!     #[fragment(1)]
//!     id: u32,
//!     #[query]
//!     verbose: bool,
//! }
//! ```

mod attrs;
mod codegen;
mod expand;

use proc_macro::TokenStream;

/// Derive the `RpcObject` trait for a struct with named fields.
///
/// The struct must also implement `serde::Serialize`: its serialized form is
/// the request body.
///
/// # Struct Attributes
///
/// `#[rpc(...)]` declares the request. Without it the type still gets a field
/// table, but building a request from it fails with `NotAnRpcObject`.
///
/// - `uri = "/path/%1$s"` - URI template, absolute or relative to the context prefix
/// - `method = "POST"` - HTTP method (default: `GET`)
/// - `get = "..."`, `post = "..."`, `put`, `delete`, `patch`, `head`, `options` -
///   method and URI in one key
/// - `serializer = "json"`, `serializer = "form"` or `serializer = path::To::Type` -
///   body serializer (a custom type is built with `Default`)
/// - `local_name = "snake_case"`, `remote_name = "camelCase"` - naming strategies,
///   as a case name or a path to a `NamingStrategy + Default` type
/// - `expected_content_type = "application/json"` - sent as the `Accept` header
///
/// Supported case names:
/// - `lowercase`, `UPPERCASE`
/// - `camelCase`, `PascalCase`
/// - `snake_case`, `SCREAMING_SNAKE_CASE`
/// - `kebab-case`, `SCREAMING-KEBAB-CASE`
///
/// # Field Attributes
///
/// - `#[fragment(N)]` - URI fragment at 1-based position `N`; positions must be `1..=count`
/// - `#[query]` - query parameter named after the translated field name
/// - `#[query("name")]` or `#[query(name = "name")]` - query parameter with an explicit name
///
/// # Example
///
/// ```ignore
/// use carapace::prelude::*;
///
/// #[derive(Serialize, RpcObject)]
/// #[rpc(post = "/users/%1$s/posts", serializer = "json", remote_name = "camelCase")]
/// struct CreatePost {
///     #[fragment(1)]
///     #[serde(skip)]
///     user_id: u64,
///     #[query("notify")]
///     #[serde(skip)]
///     notify_followers: bool,
///     post_title: String,          // body: {"postTitle": ...}
/// }
/// ```
#[proc_macro_derive(RpcObject, attributes(rpc, fragment, query))]
pub fn derive_rpc_object(input: TokenStream) -> TokenStream {
    expand::expand_rpc_object_derive(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
