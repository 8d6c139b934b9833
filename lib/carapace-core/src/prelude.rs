//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use carapace_core::prelude::*;
//! ```

pub use crate::{
    BodySerializer, Case, ContentType, Diagnostics, Error, FormSerializer, JsonSerializer, Method,
    NameTranslator, NamingStrategy, OutboundRequest, Preprocessor, QueryValue, Result,
    RpcDeclaration, RpcObject, ToFieldValue, ValidationError,
};
