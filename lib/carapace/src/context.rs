//! Execution context configuration.

use std::collections::HashMap;
use std::sync::Arc;

use carapace_core::{
    BodySerializer, Diagnostics, NamingStrategy, NoopPreprocessor, OutboundRequest, Preprocessor,
    RpcObject, TracingDiagnostics, insert_header,
};

/// Shared defaults for request construction.
///
/// An RPC declaration overrides the naming strategies and the serializer
/// declared here. The context is immutable once built and cheap to clone.
///
/// # Example
///
/// ```
/// use carapace::{Case, ExecutionContext, JsonSerializer};
///
/// let context = ExecutionContext::builder()
///     .uri_prefix("https://api.example.com")
///     .remote_naming(Case::Camel)
///     .serializer(JsonSerializer)
///     .default_header("User-Agent", "carapace")
///     .build();
///
/// assert_eq!(context.uri_prefix(), Some("https://api.example.com"));
/// ```
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    uri_prefix: Option<String>,
    local_naming: Option<Arc<dyn NamingStrategy>>,
    remote_naming: Option<Arc<dyn NamingStrategy>>,
    serializer: Option<Arc<dyn BodySerializer>>,
    preprocessor: Arc<dyn Preprocessor>,
    diagnostics: Arc<dyn Diagnostics>,
    strict_serialization: bool,
    default_headers: HashMap<String, String>,
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self {
            uri_prefix: None,
            local_naming: None,
            remote_naming: None,
            serializer: None,
            preprocessor: Arc::new(NoopPreprocessor),
            diagnostics: Arc::new(TracingDiagnostics),
            strict_serialization: false,
            default_headers: HashMap::new(),
        }
    }
}

impl ExecutionContext {
    /// Create a new context builder.
    #[must_use]
    pub fn builder() -> ExecutionContextBuilder {
        ExecutionContextBuilder::default()
    }

    /// Build the request for `object`.
    ///
    /// See [`create_request`](crate::create_request).
    ///
    /// # Errors
    ///
    /// See [`create_request`](crate::create_request).
    pub fn create_request<'o>(
        &self,
        object: &'o dyn RpcObject,
    ) -> crate::Result<OutboundRequest<'o>> {
        crate::create_request(self, object)
    }

    /// Prefix joined to relative URI templates.
    #[must_use]
    pub fn uri_prefix(&self) -> Option<&str> {
        self.uri_prefix.as_deref()
    }

    /// Default local naming strategy.
    #[must_use]
    pub fn local_naming(&self) -> Option<&Arc<dyn NamingStrategy>> {
        self.local_naming.as_ref()
    }

    /// Default remote naming strategy.
    #[must_use]
    pub fn remote_naming(&self) -> Option<&Arc<dyn NamingStrategy>> {
        self.remote_naming.as_ref()
    }

    /// Default body serializer.
    #[must_use]
    pub fn serializer(&self) -> Option<&Arc<dyn BodySerializer>> {
        self.serializer.as_ref()
    }

    /// The request pre-processor.
    #[must_use]
    pub fn preprocessor(&self) -> &dyn Preprocessor {
        self.preprocessor.as_ref()
    }

    /// The soft-failure sink.
    #[must_use]
    pub fn diagnostics(&self) -> &dyn Diagnostics {
        self.diagnostics.as_ref()
    }

    /// Whether a body serialization failure aborts request construction.
    #[must_use]
    pub const fn strict_serialization(&self) -> bool {
        self.strict_serialization
    }

    /// Headers added to every request.
    #[must_use]
    pub fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }
}

/// Builder for [`ExecutionContext`].
#[derive(Debug, Clone, Default)]
pub struct ExecutionContextBuilder {
    uri_prefix: Option<String>,
    local_naming: Option<Arc<dyn NamingStrategy>>,
    remote_naming: Option<Arc<dyn NamingStrategy>>,
    serializer: Option<Arc<dyn BodySerializer>>,
    preprocessor: Option<Arc<dyn Preprocessor>>,
    diagnostics: Option<Arc<dyn Diagnostics>>,
    strict_serialization: Option<bool>,
    default_headers: HashMap<String, String>,
}

impl ExecutionContextBuilder {
    /// Set the prefix joined to relative URI templates.
    #[must_use]
    pub fn uri_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.uri_prefix = Some(prefix.into());
        self
    }

    /// Set the default local naming strategy (default: identity).
    #[must_use]
    pub fn local_naming(mut self, strategy: impl NamingStrategy + 'static) -> Self {
        self.local_naming = Some(Arc::new(strategy));
        self
    }

    /// Set the default remote naming strategy (default: identity).
    #[must_use]
    pub fn remote_naming(mut self, strategy: impl NamingStrategy + 'static) -> Self {
        self.remote_naming = Some(Arc::new(strategy));
        self
    }

    /// Set the default body serializer (default: none).
    #[must_use]
    pub fn serializer(mut self, serializer: impl BodySerializer + 'static) -> Self {
        self.serializer = Some(Arc::new(serializer));
        self
    }

    /// Set the request pre-processor (default: accepts everything).
    #[must_use]
    pub fn preprocessor(mut self, preprocessor: impl Preprocessor + 'static) -> Self {
        self.preprocessor = Some(Arc::new(preprocessor));
        self
    }

    /// Set the soft-failure sink (default: [`TracingDiagnostics`]).
    ///
    /// Takes an `Arc` so the caller can keep a handle, e.g. on a
    /// [`CollectingDiagnostics`](carapace_core::CollectingDiagnostics).
    #[must_use]
    pub fn diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Fail request construction when the body cannot be serialized
    /// (default: `false`, the request is built without body).
    #[must_use]
    pub const fn strict_serialization(mut self, strict: bool) -> Self {
        self.strict_serialization = Some(strict);
        self
    }

    /// Add a header to every request, replacing a previous one with the same
    /// name in any case.
    #[must_use]
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        insert_header(&mut self.default_headers, name, value);
        self
    }

    /// Build the context.
    #[must_use]
    pub fn build(self) -> ExecutionContext {
        let defaults = ExecutionContext::default();
        ExecutionContext {
            uri_prefix: self.uri_prefix,
            local_naming: self.local_naming,
            remote_naming: self.remote_naming,
            serializer: self.serializer,
            preprocessor: self.preprocessor.unwrap_or(defaults.preprocessor),
            diagnostics: self.diagnostics.unwrap_or(defaults.diagnostics),
            strict_serialization: self
                .strict_serialization
                .unwrap_or(defaults.strict_serialization),
            default_headers: self.default_headers,
        }
    }
}
