//! Core types and algorithms for carapace declarative request construction.
//!
//! This crate provides the foundational pieces used by carapace:
//! - [`RpcObject`] and [`RpcDeclaration`] - what a request type declares
//! - [`FieldDescriptor`] and [`FieldValue`] - per-field metadata and values
//! - [`NamingStrategy`], [`Case`] and [`NameTranslator`] - wire name mapping
//! - [`UriTemplate`], [`build_base_uri`] and [`resolve_fragments`] - URI construction
//! - [`collect_query_parameters`] - query assembly
//! - [`BodySerializer`], [`JsonSerializer`] and [`FormSerializer`] - body encoding
//! - [`Preprocessor`] and [`Diagnostics`] - hooks around construction
//! - [`OutboundRequest`] - the produced request
//! - [`Error`] and [`Result`] - Error handling

mod body;
mod descriptor;
mod diagnostics;
mod error;
mod method;
mod naming;
mod object;
pub mod prelude;
mod preprocessor;
mod query;
mod request;
mod uri;
mod value;

pub use body::{BodySerializer, ContentType, FormSerializer, JsonSerializer, to_form, to_json};
pub use descriptor::{FieldDescriptor, FieldRole, fragment_fields, query_fields};
pub use diagnostics::{
    CollectingDiagnostics, Diagnostic, DiagnosticLevel, Diagnostics, NoopDiagnostics,
    TracingDiagnostics,
};
pub use error::{Error, Result, SerializationError, UriError, ValidationError};
pub use method::Method;
pub use naming::{Case, Identity, NameTranslator, NamingStrategy};
pub use object::{RpcDeclaration, RpcObject};
pub use preprocessor::{NoopPreprocessor, Preprocessor};
pub use query::{QueryParameters, collect_query_parameters};
pub use request::{ACCEPT, CONTENT_TYPE, OutboundRequest, OutboundRequestBuilder, insert_header};
pub use uri::{UriTemplate, build_base_uri, encode_fragment, is_absolute, resolve_fragments};
pub use value::{FieldValue, QueryValue, ToFieldValue};

// Re-export http crate types for headers
pub use http::header;
