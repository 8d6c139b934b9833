//! Body serialization.
//!
//! A [`BodySerializer`] turns the whole object into request body bytes, using
//! the request's [`NameTranslator`] for the wire names of its fields.

use std::fmt;

use bytes::Bytes;
use serde_json::{Map, Value};

use crate::{NameTranslator, RpcObject, SerializationError};

/// Content type for request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// Form URL-encoded content type (`application/x-www-form-urlencoded`).
    FormUrlEncoded,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Turns an RPC object into request body bytes.
pub trait BodySerializer: fmt::Debug + Send + Sync {
    /// MIME type of the produced bytes, sent as the `Content-Type` header.
    fn content_type(&self) -> &str;

    /// Serialize the whole object.
    ///
    /// # Errors
    ///
    /// Returns a [`SerializationError`] if the object cannot be represented.
    fn serialize_object(
        &self,
        object: &dyn RpcObject,
        translator: &NameTranslator,
    ) -> Result<Bytes, SerializationError>;
}

// ============================================================================
// JSON
// ============================================================================

/// JSON body serializer.
///
/// Object keys are translated at every nesting level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonSerializer;

impl BodySerializer for JsonSerializer {
    fn content_type(&self) -> &str {
        ContentType::Json.as_str()
    }

    fn serialize_object(
        &self,
        object: &dyn RpcObject,
        translator: &NameTranslator,
    ) -> Result<Bytes, SerializationError> {
        let value = translate_keys(object.to_body_value()?, translator);
        to_json(&value)
    }
}

fn translate_keys(value: Value, translator: &NameTranslator) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| {
                    (
                        translator.local_to_remote(&key),
                        translate_keys(value, translator),
                    )
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| translate_keys(item, translator))
                .collect(),
        ),
        other => other,
    }
}

// ============================================================================
// Form
// ============================================================================

/// Form URL-encoded body serializer.
///
/// Only flat objects are supported: top-level keys are translated, `null`
/// fields are left out and arrays become repeated keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormSerializer;

impl BodySerializer for FormSerializer {
    fn content_type(&self) -> &str {
        ContentType::FormUrlEncoded.as_str()
    }

    fn serialize_object(
        &self,
        object: &dyn RpcObject,
        translator: &NameTranslator,
    ) -> Result<Bytes, SerializationError> {
        let Value::Object(map) = object.to_body_value()? else {
            return Err(SerializationError::unsupported(format!(
                "{} is not a struct with named fields",
                object.type_name()
            )));
        };

        let mut form = Map::new();
        for (key, value) in map {
            match value {
                Value::Null => {}
                Value::Object(_) => {
                    return Err(SerializationError::unsupported(format!(
                        "nested object in field '{key}' of {}",
                        object.type_name()
                    )));
                }
                value => {
                    form.insert(translator.local_to_remote(&key), value);
                }
            }
        }
        to_form(&form)
    }
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use carapace_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User { name: String }
///
/// let user = User { name: "Alice".to_string() };
/// let bytes = to_json(&user).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"name":"Alice"}"#);
/// ```
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes, SerializationError> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Serialize a value to form URL-encoded bytes.
///
/// Uses `serde_html_form` which supports `Vec<T>` for repeated form fields
/// (e.g., `tags=a&tags=b&tags=c`).
///
/// # Errors
///
/// Returns an error if form serialization fails.
///
/// # Example
///
/// ```
/// use carapace_core::to_form;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Login { username: String, password: String }
///
/// let login = Login { username: "alice".to_string(), password: "secret".to_string() };
/// let bytes = to_form(&login).expect("serialize");
/// assert_eq!(bytes.as_ref(), b"username=alice&password=secret");
/// ```
pub fn to_form<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes, SerializationError> {
    serde_html_form::to_string(value)
        .map(|s| Bytes::from(s.into_bytes()))
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::{Case, FieldDescriptor, FieldValue, RpcDeclaration};

    /// Object whose body is a fixed JSON value.
    struct Raw(Value);

    impl RpcObject for Raw {
        fn type_name(&self) -> &'static str {
            "Raw"
        }

        fn declaration(&self) -> Option<RpcDeclaration> {
            None
        }

        fn fields(&self) -> &'static [FieldDescriptor] {
            &[]
        }

        fn field_value(&self, _name: &str) -> Option<FieldValue<'_>> {
            None
        }

        fn to_body_value(&self) -> serde_json::Result<Value> {
            Ok(self.0.clone())
        }
    }

    fn snake_to_camel() -> NameTranslator {
        NameTranslator::new(Arc::new(Case::Snake), Arc::new(Case::Camel))
    }

    #[test]
    fn content_type_as_str() {
        assert_eq!(ContentType::Json.as_str(), "application/json");
        assert_eq!(
            ContentType::FormUrlEncoded.as_str(),
            "application/x-www-form-urlencoded"
        );
        assert_eq!(ContentType::Json.to_string(), "application/json");
    }

    #[test]
    fn json_identity() {
        let object = Raw(json!({"user_id": 7, "display_name": "Ada"}));
        let bytes = JsonSerializer
            .serialize_object(&object, &NameTranslator::identity())
            .expect("serialize");
        assert_eq!(bytes.as_ref(), br#"{"user_id":7,"display_name":"Ada"}"#);
    }

    #[test]
    fn json_translates_nested_keys() {
        let object = Raw(json!({
            "user_id": 7,
            "home_address": {"zip_code": "75001"},
            "past_orders": [{"order_id": 1}],
        }));
        let bytes = JsonSerializer
            .serialize_object(&object, &snake_to_camel())
            .expect("serialize");
        assert_eq!(
            bytes.as_ref(),
            br#"{"userId":7,"homeAddress":{"zipCode":"75001"},"pastOrders":[{"orderId":1}]}"#
        );
    }

    #[test]
    fn form_flat_object() {
        let object = Raw(json!({
            "user_name": "ada lovelace",
            "remember_me": true,
            "nickname": null,
            "tags": ["a", "b"],
        }));
        let bytes = FormSerializer
            .serialize_object(&object, &snake_to_camel())
            .expect("serialize");
        assert_eq!(
            bytes.as_ref(),
            b"userName=ada+lovelace&rememberMe=true&tags=a&tags=b"
        );
    }

    #[test]
    fn form_rejects_nested_object() {
        let object = Raw(json!({"address": {"city": "Paris"}}));
        let err = FormSerializer
            .serialize_object(&object, &NameTranslator::identity())
            .expect_err("nested");
        assert!(matches!(err, SerializationError::Unsupported(_)));
        assert!(err.to_string().contains("address"));
    }

    #[test]
    fn form_rejects_non_struct() {
        let object = Raw(json!([1, 2, 3]));
        let err = FormSerializer
            .serialize_object(&object, &NameTranslator::identity())
            .expect_err("array");
        assert!(matches!(err, SerializationError::Unsupported(_)));
    }

    #[test]
    fn to_form_with_vec() {
        #[derive(serde::Serialize)]
        struct TaggedItem {
            name: String,
            tags: Vec<String>,
        }

        let item = TaggedItem {
            name: "test".to_string(),
            tags: vec!["rust".to_string(), "http".to_string()],
        };

        let bytes = to_form(&item).expect("serialize");
        assert_eq!(bytes.as_ref(), b"name=test&tags=rust&tags=http");
    }
}
