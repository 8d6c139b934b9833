//! RPC object declarations.

use std::borrow::Cow;
use std::sync::Arc;

use crate::{BodySerializer, FieldDescriptor, FieldValue, Method, NamingStrategy};

/// A data type that can be turned into an outbound HTTP request.
///
/// This is normally implemented with `#[derive(RpcObject)]`, which generates
/// the descriptor table and the accessors from field attributes. A manual
/// implementation is plain data:
///
/// ```
/// use carapace_core::{FieldDescriptor, FieldValue, Method, RpcDeclaration, RpcObject, ToFieldValue};
///
/// #[derive(serde::Serialize)]
/// struct Ping {
///     id: u32,
///     verbose: bool,
/// }
///
/// impl RpcObject for Ping {
///     fn type_name(&self) -> &'static str {
///         "Ping"
///     }
///
///     fn declaration(&self) -> Option<RpcDeclaration> {
///         Some(RpcDeclaration::new(Method::Get, "/ping/%1$s"))
///     }
///
///     fn fields(&self) -> &'static [FieldDescriptor] {
///         const FIELDS: &[FieldDescriptor] = &[
///             FieldDescriptor::fragment("id", "u32", 1),
///             FieldDescriptor::query("verbose", "bool", None),
///         ];
///         FIELDS
///     }
///
///     fn field_value(&self, name: &str) -> Option<FieldValue<'_>> {
///         match name {
///             "id" => Some(self.id.to_field_value()),
///             "verbose" => Some(self.verbose.to_field_value()),
///             _ => None,
///         }
///     }
///
///     fn to_body_value(&self) -> serde_json::Result<serde_json::Value> {
///         serde_json::to_value(self)
///     }
/// }
/// ```
pub trait RpcObject {
    /// Name of the type, for error messages.
    fn type_name(&self) -> &'static str;

    /// The request declaration of this type, or `None` if the type is not
    /// declared as an RPC object.
    fn declaration(&self) -> Option<RpcDeclaration>;

    /// The field descriptor table.
    fn fields(&self) -> &'static [FieldDescriptor];

    /// Current value of a role-bearing field.
    ///
    /// Returns `None` for unknown names.
    fn field_value(&self, name: &str) -> Option<FieldValue<'_>>;

    /// The object as a serde data tree, handed to body serializers.
    fn to_body_value(&self) -> serde_json::Result<serde_json::Value>;
}

/// Type-level request declaration.
///
/// Optional collaborators left unset inherit the execution context defaults.
#[derive(Debug, Clone)]
pub struct RpcDeclaration {
    method: Method,
    uri: Cow<'static, str>,
    serializer: Option<Arc<dyn BodySerializer>>,
    local_naming: Option<Arc<dyn NamingStrategy>>,
    remote_naming: Option<Arc<dyn NamingStrategy>>,
    expected_content_type: Option<Cow<'static, str>>,
}

impl RpcDeclaration {
    /// Declare the method and URI template.
    #[must_use]
    pub fn new(method: Method, uri: impl Into<Cow<'static, str>>) -> Self {
        Self {
            method,
            uri: uri.into(),
            serializer: None,
            local_naming: None,
            remote_naming: None,
            expected_content_type: None,
        }
    }

    /// Use this body serializer instead of the context default.
    #[must_use]
    pub fn with_serializer(mut self, serializer: impl BodySerializer + 'static) -> Self {
        self.serializer = Some(Arc::new(serializer));
        self
    }

    /// Use this local naming strategy instead of the context default.
    #[must_use]
    pub fn with_local_naming(mut self, strategy: impl NamingStrategy + 'static) -> Self {
        self.local_naming = Some(Arc::new(strategy));
        self
    }

    /// Use this remote naming strategy instead of the context default.
    #[must_use]
    pub fn with_remote_naming(mut self, strategy: impl NamingStrategy + 'static) -> Self {
        self.remote_naming = Some(Arc::new(strategy));
        self
    }

    /// Declare the content type expected in the response.
    #[must_use]
    pub fn with_expected_content_type(mut self, content_type: impl Into<Cow<'static, str>>) -> Self {
        self.expected_content_type = Some(content_type.into());
        self
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// URI template, absolute or relative to the context prefix.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Declared body serializer.
    #[must_use]
    pub fn serializer(&self) -> Option<&Arc<dyn BodySerializer>> {
        self.serializer.as_ref()
    }

    /// Declared local naming strategy.
    #[must_use]
    pub fn local_naming(&self) -> Option<&Arc<dyn NamingStrategy>> {
        self.local_naming.as_ref()
    }

    /// Declared remote naming strategy.
    #[must_use]
    pub fn remote_naming(&self) -> Option<&Arc<dyn NamingStrategy>> {
        self.remote_naming.as_ref()
    }

    /// Declared response content type.
    #[must_use]
    pub fn expected_content_type(&self) -> Option<&str> {
        self.expected_content_type.as_deref()
    }
}
