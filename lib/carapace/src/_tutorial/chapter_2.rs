//! # Chapter 2: Bodies
//!
//! Serialize objects into request bodies.
//!
//! ## Which Requests Get a Body
//!
//! Only `POST`, `PUT` and `PATCH` requests go through serializer dispatch.
//! The serializer comes from the declaration, then from the context.
//!
//! | Serializer | Content-Type | Declared as |
//! |------------|--------------|-------------|
//! | [`JsonSerializer`](crate::JsonSerializer) | `application/json` | `serializer = "json"` |
//! | [`FormSerializer`](crate::FormSerializer) | `application/x-www-form-urlencoded` | `serializer = "form"` |
//! | custom | yours | `serializer = path::To::Type` |
//!
//! The body is the serde view of the object, with keys passed through the
//! remote naming strategy. Use `#[serde(skip)]` to keep fragment and query
//! fields out of it.
//!
//! ```
//! use carapace::prelude::*;
//!
//! #[derive(Serialize, RpcObject)]
//! #[rpc(put = "/users/%1$s", serializer = "json", remote_name = "camelCase")]
//! struct UpdateUser {
//!     #[fragment(1)]
//!     #[serde(skip)]
//!     user_id: u64,
//!     display_name: String,
//! }
//!
//! let context = ExecutionContext::builder().uri_prefix("http://api").build();
//! let update = UpdateUser {
//!     user_id: 42,
//!     display_name: "Ada".to_string(),
//! };
//!
//! let request = context.create_request(&update)?;
//! assert_eq!(request.content_type(), Some("application/json"));
//! assert_eq!(
//!     request.body().map(|body| body.as_ref()),
//!     Some(&br#"{"displayName":"Ada"}"#[..])
//! );
//! # Ok::<(), carapace::Error>(())
//! ```
//!
//! ## Custom Serializers
//!
//! ```ignore
//! #[derive(Debug, Default)]
//! struct PlainText;
//!
//! impl BodySerializer for PlainText {
//!     fn content_type(&self) -> &str {
//!         "text/plain"
//!     }
//!
//!     fn serialize_object(
//!         &self,
//!         object: &dyn RpcObject,
//!         _translator: &NameTranslator,
//!     ) -> std::result::Result<bytes::Bytes, carapace::SerializationError> {
//!         Ok(object.to_body_value()?.to_string().into())
//!     }
//! }
//!
//! #[derive(Serialize, RpcObject)]
//! #[rpc(post = "/echo", serializer = PlainText)]
//! struct Echo {
//!     message: String,
//! }
//! ```
//!
//! ## When Serialization Fails
//!
//! | Situation | Default | `strict_serialization(true)` |
//! |-----------|---------|------------------------------|
//! | No serializer | warning, no body | warning, no body |
//! | Serializer error | error diagnostic, no body, [`body_error`](crate::OutboundRequest::body_error) set | [`Error::Serialization`](crate::Error::Serialization) |
//!
//! The form serializer only accepts flat objects: a nested struct is a
//! serializer error.
//!
//! ## Next Steps
//!
//! - [Chapter 3: Preprocessors & Diagnostics][super::chapter_3] - Hooks around construction
