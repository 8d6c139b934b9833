//! Declarative RPC request construction for Rust.
//!
//! Describe a request once, on the type that carries its data, and let
//! carapace turn every instance into an outbound HTTP request: method, URI
//! with positional fragments, query parameters, headers and serialized body.
//! Sending the request is left to the HTTP client of your choice.
//!
//! # Example
//!
//! ```
//! use carapace::prelude::*;
//!
//! #[derive(Serialize, RpcObject)]
//! #[rpc(post = "/users/%1$s/posts", serializer = "json", remote_name = "camelCase")]
//! struct CreatePost {
//!     #[fragment(1)]
//!     #[serde(skip)]
//!     user_id: u64,
//!     #[query("notify")]
//!     #[serde(skip)]
//!     notify_followers: bool,
//!     post_title: String,
//! }
//!
//! let context = ExecutionContext::builder()
//!     .uri_prefix("https://api.example.com")
//!     .build();
//!
//! let post = CreatePost {
//!     user_id: 42,
//!     notify_followers: true,
//!     post_title: "Hello".to_string(),
//! };
//! let request = context.create_request(&post)?;
//!
//! assert_eq!(request.uri(), "https://api.example.com/users/42/posts");
//! assert_eq!(request.content_type(), Some("application/json"));
//! assert_eq!(request.body().map(|b| b.as_ref()), Some(&br#"{"postTitle":"Hello"}"#[..]));
//! assert_eq!(
//!     request.url()?.as_str(),
//!     "https://api.example.com/users/42/posts?notify=true"
//! );
//! # Ok::<(), carapace::Error>(())
//! ```
//!
//! See the [tutorial][_tutorial] for a complete guide.

extern crate self as carapace;

pub mod _tutorial;
mod context;
mod factory;
pub mod preprocessor;
pub mod prelude;

pub use context::{ExecutionContext, ExecutionContextBuilder};
pub use factory::create_request;

// Re-export core types
pub use carapace_core::{
    ACCEPT, BodySerializer, CONTENT_TYPE, Case, CollectingDiagnostics, ContentType, Diagnostic,
    DiagnosticLevel, Diagnostics, Error, FieldDescriptor, FieldRole, FieldValue, FormSerializer,
    Identity, JsonSerializer, Method, NameTranslator, NamingStrategy, NoopDiagnostics,
    NoopPreprocessor, OutboundRequest, OutboundRequestBuilder, Preprocessor, QueryParameters,
    QueryValue, Result, RpcDeclaration, RpcObject, SerializationError, ToFieldValue,
    TracingDiagnostics, UriError, UriTemplate, ValidationError, build_base_uri,
    collect_query_parameters, encode_fragment, fragment_fields, insert_header, query_fields,
    resolve_fragments, to_form, to_json,
};

// Re-export http types for headers
pub use carapace_core::header;

// Re-export crates for macro-generated code
pub use serde_json;

// Re-export macros
pub use carapace_macro::RpcObject;
