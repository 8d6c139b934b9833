//! Outbound request description.
//!
//! An [`OutboundRequest`] is what the request factory produces from an RPC
//! object: the method, the resolved URI, the query map, the headers and the
//! serialized body. It is not bound to any HTTP stack; use
//! [`OutboundRequest::into_http`] to hand it to one.
//!
//! # Example
//!
//! ```
//! use carapace_core::{Method, OutboundRequest, QueryValue, RpcObject};
//! # use carapace_core::{FieldDescriptor, FieldValue, RpcDeclaration};
//! # struct Health;
//! # impl RpcObject for Health {
//! #     fn type_name(&self) -> &'static str { "Health" }
//! #     fn declaration(&self) -> Option<RpcDeclaration> { None }
//! #     fn fields(&self) -> &'static [FieldDescriptor] { &[] }
//! #     fn field_value(&self, _: &str) -> Option<FieldValue<'_>> { None }
//! #     fn to_body_value(&self) -> serde_json::Result<serde_json::Value> { Ok(serde_json::Value::Null) }
//! # }
//!
//! let request = OutboundRequest::builder(Method::Get, "https://api.example.com/health", &Health)
//!     .header("Accept", "application/json")
//!     .query("verbose", true)
//!     .build();
//!
//! assert_eq!(request.url().unwrap().as_str(), "https://api.example.com/health?verbose=true");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;

use crate::{Method, NameTranslator, QueryParameters, QueryValue, RpcObject, SerializationError};

/// Name of the header set alongside a serialized body.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Name of the header derived from the expected response content type.
pub const ACCEPT: &str = "Accept";

/// Insert a header, replacing every existing entry whose name matches
/// ignoring ASCII case.
pub fn insert_header(
    headers: &mut HashMap<String, String>,
    name: impl Into<String>,
    value: impl Into<String>,
) {
    let name = name.into();
    headers.retain(|key, _| !key.eq_ignore_ascii_case(&name));
    headers.insert(name, value.into());
}

/// A fully resolved request, ready for a transport.
///
/// Holds a reference to the object it was built from, for the pre-processor
/// and for response decoding.
#[derive(Clone)]
pub struct OutboundRequest<'o> {
    method: Method,
    uri: String,
    headers: HashMap<String, String>,
    query: QueryParameters,
    body: Option<Bytes>,
    body_error: Option<Arc<SerializationError>>,
    expected_content_type: Option<String>,
    translator: NameTranslator,
    object: &'o dyn RpcObject,
}

impl fmt::Debug for OutboundRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutboundRequest")
            .field("method", &self.method)
            .field("uri", &self.uri)
            .field("headers", &self.headers)
            .field("query", &self.query)
            .field("body", &self.body)
            .field("body_error", &self.body_error)
            .field("expected_content_type", &self.expected_content_type)
            .field("translator", &self.translator)
            .field("object", &self.object.type_name())
            .finish()
    }
}

impl<'o> OutboundRequest<'o> {
    /// Creates a new [`OutboundRequestBuilder`].
    #[must_use]
    pub fn builder(
        method: Method,
        uri: impl Into<String>,
        object: &'o dyn RpcObject,
    ) -> OutboundRequestBuilder<'o> {
        OutboundRequestBuilder::new(method, uri, object)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Resolved URI, without query string.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Set a header, replacing any value stored under the same name in
    /// another case.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        insert_header(&mut self.headers, name, value);
    }

    /// Mutable access to headers.
    ///
    /// Inserting through the map keeps names as given; prefer
    /// [`set_header`](Self::set_header).
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.headers
    }

    /// Single header value by name, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Query parameters, in insertion order.
    #[must_use]
    pub fn query(&self) -> &QueryParameters {
        &self.query
    }

    /// Mutable access to the query parameters.
    #[must_use]
    pub fn query_mut(&mut self) -> &mut QueryParameters {
        &mut self.query
    }

    /// Serialized body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Content type of the body, if one was attached.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE)
    }

    /// The serializer failure, if the body could not be produced.
    #[must_use]
    pub fn body_error(&self) -> Option<&SerializationError> {
        self.body_error.as_deref()
    }

    /// Content type expected in the response.
    #[must_use]
    pub fn expected_content_type(&self) -> Option<&str> {
        self.expected_content_type.as_deref()
    }

    /// The name mapping used for this request.
    #[must_use]
    pub const fn translator(&self) -> &NameTranslator {
        &self.translator
    }

    /// The object the request was built from.
    #[must_use]
    pub const fn object(&self) -> &'o dyn RpcObject {
        self.object
    }

    /// Attach a serialized body and set the `Content-Type` header.
    pub fn attach_body(&mut self, content_type: impl Into<String>, body: Bytes) {
        insert_header(&mut self.headers, CONTENT_TYPE, content_type);
        self.body = Some(body);
        self.body_error = None;
    }

    /// Record a serializer failure. The request stays bodyless.
    pub fn set_body_error(&mut self, error: SerializationError) {
        self.body = None;
        self.body_error = Some(Arc::new(error));
    }

    /// The URI with the query parameters appended.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolved URI is not a valid absolute URL.
    pub fn url(&self) -> crate::Result<url::Url> {
        let mut url = url::Url::parse(&self.uri)?;
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &self.query {
                pairs.append_pair(name, &value.to_string());
            }
        }
        Ok(url)
    }

    /// Convert into an [`http::Request`].
    ///
    /// # Errors
    ///
    /// Returns an error if the URL or a header is invalid.
    pub fn into_http(self) -> crate::Result<http::Request<Bytes>> {
        let url = self.url()?;
        let mut builder = http::Request::builder()
            .method(http::Method::from(self.method))
            .uri(url.as_str());
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
            .body(self.body.unwrap_or_default())
            .map_err(Into::into)
    }
}

/// Builder for constructing [`OutboundRequest`] instances.
#[derive(Clone)]
pub struct OutboundRequestBuilder<'o> {
    request: OutboundRequest<'o>,
}

impl fmt::Debug for OutboundRequestBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OutboundRequestBuilder")
            .field(&self.request)
            .finish()
    }
}

impl<'o> OutboundRequestBuilder<'o> {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, uri: impl Into<String>, object: &'o dyn RpcObject) -> Self {
        Self {
            request: OutboundRequest {
                method,
                uri: uri.into(),
                headers: HashMap::new(),
                query: QueryParameters::new(),
                body: None,
                body_error: None,
                expected_content_type: None,
                translator: NameTranslator::identity(),
                object,
            },
        }
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        insert_header(&mut self.request.headers, name, value);
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        for (name, value) in headers {
            insert_header(&mut self.request.headers, name, value);
        }
        self
    }

    /// Sets a query parameter, replacing any previous value for `name`.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.request.query.insert(name.into(), value.into());
        self
    }

    /// Sets all query parameters.
    #[must_use]
    pub fn query_parameters(mut self, query: QueryParameters) -> Self {
        self.request.query = query;
        self
    }

    /// Sets the name translator.
    #[must_use]
    pub fn translator(mut self, translator: NameTranslator) -> Self {
        self.request.translator = translator;
        self
    }

    /// Sets the expected response content type.
    #[must_use]
    pub fn expected_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.request.expected_content_type = Some(content_type.into());
        self
    }

    /// Sets the body and its content type.
    #[must_use]
    pub fn body(mut self, content_type: impl Into<String>, body: Bytes) -> Self {
        self.request.attach_body(content_type, body);
        self
    }

    /// Builds the [`OutboundRequest`].
    #[must_use]
    pub fn build(self) -> OutboundRequest<'o> {
        self.request
    }
}
