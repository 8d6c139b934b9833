//! Soft-failure reporting.
//!
//! Problems that do not abort request construction (an unsupported query
//! field, a missing serializer, a failed body serialization) are reported
//! through a [`Diagnostics`] sink and the request is built anyway.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use derive_more::Display;

/// A soft failure met while building a request.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Diagnostic {
    /// A query field holds a value that cannot go into a query string.
    #[display("type '{field_type}' of field '{field}' in {type_name} could not be used as a query parameter")]
    UnsupportedQueryType {
        /// The declaring type.
        type_name: &'static str,
        /// The skipped field.
        field: &'static str,
        /// The runtime type of the value.
        field_type: &'static str,
    },

    /// A body-bearing request has no serializer to produce its body.
    #[display("no body serializer for {method} request of {type_name}, sending it without body")]
    MissingSerializer {
        /// The declaring type.
        type_name: &'static str,
        /// The request method.
        method: crate::Method,
    },

    /// The serializer failed; the request was built without body.
    #[display("could not serialize {type_name} as {content_type}: {reason}")]
    SerializationFailed {
        /// The declaring type.
        type_name: &'static str,
        /// Content type of the failing serializer.
        content_type: String,
        /// The serializer error message.
        reason: String,
    },
}

/// Severity of a reported [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DiagnosticLevel {
    /// Something was skipped.
    #[display("warn")]
    Warn,
    /// Something failed.
    #[display("error")]
    Error,
}

/// Receives soft failures.
pub trait Diagnostics: fmt::Debug + Send + Sync {
    /// Something was skipped.
    fn warn(&self, diagnostic: &Diagnostic);

    /// Something failed.
    fn error(&self, diagnostic: &Diagnostic);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn warn(&self, _diagnostic: &Diagnostic) {}

    fn error(&self, _diagnostic: &Diagnostic) {}
}

/// Forwards diagnostics to `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, diagnostic: &Diagnostic) {
        tracing::warn!(%diagnostic, "request construction");
    }

    fn error(&self, diagnostic: &Diagnostic) {
        tracing::error!(%diagnostic, "request construction");
    }
}

/// Keeps every diagnostic in memory.
///
/// ```
/// use carapace_core::{CollectingDiagnostics, Diagnostic, Diagnostics, Method};
///
/// let diagnostics = CollectingDiagnostics::new();
/// diagnostics.warn(&Diagnostic::MissingSerializer {
///     type_name: "CreateUser",
///     method: Method::Post,
/// });
/// assert_eq!(diagnostics.warnings().len(), 1);
/// assert!(diagnostics.errors().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    entries: Mutex<Vec<(DiagnosticLevel, Diagnostic)>>,
}

impl CollectingDiagnostics {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything reported so far, in order.
    #[must_use]
    pub fn entries(&self) -> Vec<(DiagnosticLevel, Diagnostic)> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Reported warnings, in order.
    #[must_use]
    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.with_level(DiagnosticLevel::Warn)
    }

    /// Reported errors, in order.
    #[must_use]
    pub fn errors(&self) -> Vec<Diagnostic> {
        self.with_level(DiagnosticLevel::Error)
    }

    /// Returns `true` if nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    fn with_level(&self, level: DiagnosticLevel) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(entry_level, _)| *entry_level == level)
            .map(|(_, diagnostic)| diagnostic.clone())
            .collect()
    }

    fn push(&self, level: DiagnosticLevel, diagnostic: &Diagnostic) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, diagnostic.clone()));
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn warn(&self, diagnostic: &Diagnostic) {
        self.push(DiagnosticLevel::Warn, diagnostic);
    }

    fn error(&self, diagnostic: &Diagnostic) {
        self.push(DiagnosticLevel::Error, diagnostic);
    }
}
