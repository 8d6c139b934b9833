//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types, functions, and macros
//! for easy glob importing:
//!
//! ```ignore
//! use carapace::prelude::*;
//! ```

pub use crate::{
    BodySerializer, Case, ContentType, Diagnostics, Error, ExecutionContext, FormSerializer,
    JsonSerializer, Method, NameTranslator, NamingStrategy, OutboundRequest, Preprocessor,
    QueryValue, Result, RpcDeclaration, RpcObject, ToFieldValue, ValidationError, create_request,
};
pub use serde::{Deserialize, Serialize};
