//! Error types for carapace.
//!
//! Structural problems (a rejected context, a missing declaration, a malformed
//! URI declaration) abort request construction and surface as [`Error`].
//! Per-field soft issues never reach this type: they go through the
//! [`Diagnostics`](crate::Diagnostics) channel instead.

use std::sync::Arc;

use derive_more::{Display, Error, From};

// ============================================================================
// Validation Error
// ============================================================================

/// Error reported by a [`Preprocessor`](crate::Preprocessor) when it rejects
/// an object before any resolution happens.
///
/// The underlying cause, if any, is kept as the error source.
#[derive(Debug, Clone, Display)]
#[display("{message}")]
pub struct ValidationError {
    message: String,
    source: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

impl ValidationError {
    /// Create a validation error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Attach the error that caused the rejection.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// The rejection message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn std::error::Error + 'static))
    }
}

// ============================================================================
// URI Error
// ============================================================================

/// Reason why the URI of a request could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum UriError {
    /// The template is relative and the context has no URI prefix.
    #[display("no URI prefix given for relative template '{template}'")]
    MissingUriPrefix {
        /// The declared template.
        template: String,
    },

    /// A fragment position in `1..=N` has no field.
    #[display("positional argument {position} not found in {type_name}")]
    MissingPositionalArgument {
        /// The missing 1-based position.
        position: usize,
        /// The declaring type.
        type_name: &'static str,
    },

    /// Two fields claim the same fragment position.
    #[display("positional argument {position} declared more than once in {type_name}")]
    DuplicatePosition {
        /// The duplicated 1-based position.
        position: usize,
        /// The declaring type.
        type_name: &'static str,
    },

    /// A fragment field holds a value that cannot be written into a URI.
    #[display("type '{type_name}' of field '{field}' could not be built into URI")]
    UnsupportedFragmentType {
        /// The failing field.
        field: &'static str,
        /// The runtime type of the value.
        type_name: &'static str,
    },

    /// The template contains an invalid `%` sequence.
    #[display("malformed URI template '{template}': {reason}")]
    MalformedTemplate {
        /// The declared template.
        template: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The template references a position beyond the declared fragments.
    #[display("placeholder %{position}$s in '{template}' has no matching fragment field")]
    UnresolvedPlaceholder {
        /// The referenced 1-based position.
        position: usize,
        /// The declared template.
        template: String,
    },
}

impl UriError {
    /// The field that caused the failure, if the failure is tied to one.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::UnsupportedFragmentType { field, .. } => Some(*field),
            _ => None,
        }
    }
}

// ============================================================================
// Serialization Error
// ============================================================================

/// Failure of a [`BodySerializer`](crate::BodySerializer).
#[derive(Debug, Display, Error, From)]
pub enum SerializationError {
    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    Json(serde_json::Error),

    /// Form URL-encoded serialization error.
    #[display("form serialization error: {_0}")]
    #[from]
    Form(serde_html_form::ser::Error),

    /// The object shape is not supported by the serializer.
    #[display("unsupported body: {_0}")]
    #[from(skip)]
    Unsupported(#[error(not(source))] String),
}

impl SerializationError {
    /// Create an unsupported-shape error.
    #[must_use]
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for request construction.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The pre-processor rejected the object.
    #[display("context validation failed: {_0}")]
    #[from]
    ContextValidation(ValidationError),

    /// The object type carries no RPC declaration.
    #[display("attempted to create a request from non-RPC object {type_name}")]
    #[from(skip)]
    NotAnRpcObject {
        /// The offending type.
        type_name: &'static str,
    },

    /// The URI could not be assembled.
    #[display("URI construction failed: {_0}")]
    #[from]
    UriConstruction(UriError),

    /// The body serializer failed and strict serialization is enabled.
    #[display("body serialization failed: {_0}")]
    #[from]
    Serialization(SerializationError),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// Conversion into an `http::Request` failed.
    #[display("invalid HTTP request: {_0}")]
    #[from]
    Http(http::Error),

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a not-an-RPC-object error.
    #[must_use]
    pub const fn not_an_rpc_object(type_name: &'static str) -> Self {
        Self::NotAnRpcObject { type_name }
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Returns `true` if the pre-processor rejected the object.
    #[must_use]
    pub const fn is_context_validation(&self) -> bool {
        matches!(self, Self::ContextValidation(_))
    }

    /// Returns `true` if the object had no declaration.
    #[must_use]
    pub const fn is_not_an_rpc_object(&self) -> bool {
        matches!(self, Self::NotAnRpcObject { .. })
    }

    /// Returns the URI failure, if this is one.
    #[must_use]
    pub const fn uri_error(&self) -> Option<&UriError> {
        match self {
            Self::UriConstruction(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::not_an_rpc_object("Ping");
        assert_eq!(
            err.to_string(),
            "attempted to create a request from non-RPC object Ping"
        );

        let err = Error::from(ValidationError::new("session expired"));
        assert_eq!(
            err.to_string(),
            "context validation failed: session expired"
        );

        let err = Error::from(UriError::MissingPositionalArgument {
            position: 2,
            type_name: "Comment",
        });
        assert_eq!(
            err.to_string(),
            "URI construction failed: positional argument 2 not found in Comment"
        );
    }

    #[test]
    fn uri_error_display() {
        let err = UriError::UnresolvedPlaceholder {
            position: 3,
            template: "/a/%3$s".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "placeholder %3$s in '/a/%3$s' has no matching fragment field"
        );
    }

    #[test]
    fn uri_error_field() {
        let err = UriError::UnsupportedFragmentType {
            field: "tags",
            type_name: "Vec<String>",
        };
        assert_eq!(err.field(), Some("tags"));

        let err = UriError::MissingUriPrefix {
            template: "/ping".to_string(),
        };
        assert_eq!(err.field(), None);
    }

    #[test]
    fn error_predicates() {
        assert!(Error::from(ValidationError::new("nope")).is_context_validation());
        assert!(Error::not_an_rpc_object("Ping").is_not_an_rpc_object());
        assert!(Error::invalid_request("bad").uri_error().is_none());

        let err = Error::from(UriError::MissingUriPrefix {
            template: "/ping".to_string(),
        });
        assert!(matches!(
            err.uri_error(),
            Some(UriError::MissingUriPrefix { .. })
        ));
    }

    #[test]
    fn context_validation_keeps_cause() {
        use std::error::Error as _;

        let err = Error::from(ValidationError::new("session expired"));
        let source = err.source().expect("has source");
        assert_eq!(source.to_string(), "session expired");
    }

    #[test]
    fn validation_error_chains_its_cause() {
        use std::error::Error as _;

        let cause = Error::invalid_request("token expired at 12:00");
        let err = Error::from(ValidationError::new("session expired").with_source(cause));

        let validation = err.source().expect("validation error");
        assert_eq!(validation.to_string(), "session expired");
        let cause = validation.source().expect("cause");
        assert_eq!(cause.to_string(), "invalid request: token expired at 12:00");
        assert!(ValidationError::new("plain").source().is_none());
    }
}
