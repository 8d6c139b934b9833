//! Runtime field values.
//!
//! [`FieldValue`] is the read side of the field-descriptor table: it tells the
//! URI builder and the query assembler what a field currently holds without
//! any runtime type inspection. [`QueryValue`] is the type-preserving value
//! stored in the query map of an [`OutboundRequest`](crate::OutboundRequest).

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// The value of a role-bearing field, as seen by the request pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// No value (e.g. `Option::None`).
    Null,
    /// A boolean.
    Bool(bool),
    /// A single character.
    Char(char),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    UInt(u64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(Cow<'a, str>),
    /// Any value that cannot be written into a URI or a query string.
    Other {
        /// Name of the value type.
        type_name: &'static str,
    },
}

impl FieldValue<'_> {
    /// Name of the runtime type, used in error and diagnostic messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Char(_) => "char",
            Self::Int(_) => "i64",
            Self::UInt(_) => "u64",
            Self::Float(_) => "f64",
            Self::Str(_) => "string",
            Self::Other { type_name } => *type_name,
        }
    }

    /// Canonical textual form for scalar values.
    ///
    /// Numbers use their `Display` form, so a whole float has no fractional
    /// part: `1.0` is written `1`.
    ///
    /// Returns `None` for [`FieldValue::Null`] and [`FieldValue::Other`].
    #[must_use]
    pub fn canonical(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Null | Self::Other { .. } => None,
            Self::Bool(value) => Some(Cow::Owned(value.to_string())),
            Self::Char(value) => Some(Cow::Owned(value.to_string())),
            Self::Int(value) => Some(Cow::Owned(value.to_string())),
            Self::UInt(value) => Some(Cow::Owned(value.to_string())),
            Self::Float(value) => Some(Cow::Owned(value.to_string())),
            Self::Str(value) => Some(Cow::Borrowed(value.as_ref())),
        }
    }

    /// Convert into a query value.
    ///
    /// Only strings, booleans, integers and floats are query-eligible.
    #[must_use]
    pub fn to_query_value(&self) -> Option<QueryValue> {
        match self {
            Self::Str(value) => Some(QueryValue::Str(value.to_string())),
            Self::Bool(value) => Some(QueryValue::Bool(*value)),
            Self::Int(value) => Some(QueryValue::Int(*value)),
            Self::UInt(value) => Some(QueryValue::UInt(*value)),
            Self::Float(value) => Some(QueryValue::Float(*value)),
            Self::Null | Self::Char(_) | Self::Other { .. } => None,
        }
    }
}

// ============================================================================
// ToFieldValue
// ============================================================================

/// Conversion of a field into a [`FieldValue`].
///
/// Implemented for primitives, strings and the usual wrappers. The
/// `#[derive(RpcObject)]` macro calls it for every `#[fragment]` and
/// `#[query]` field.
pub trait ToFieldValue {
    /// Borrow the current value of the field.
    fn to_field_value(&self) -> FieldValue<'_>;
}

macro_rules! impl_signed {
    ($($ty:ty),*) => {
        $(
            impl ToFieldValue for $ty {
                fn to_field_value(&self) -> FieldValue<'_> {
                    FieldValue::Int(i64::from(*self))
                }
            }
        )*
    };
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {
        $(
            impl ToFieldValue for $ty {
                fn to_field_value(&self) -> FieldValue<'_> {
                    FieldValue::UInt(u64::from(*self))
                }
            }
        )*
    };
}

macro_rules! impl_wide {
    ($($ty:ty => $variant:ident($target:ty)),*) => {
        $(
            impl ToFieldValue for $ty {
                fn to_field_value(&self) -> FieldValue<'_> {
                    <$target>::try_from(*self).map_or(
                        FieldValue::Other {
                            type_name: stringify!($ty),
                        },
                        FieldValue::$variant,
                    )
                }
            }
        )*
    };
}

impl_signed!(i8, i16, i32, i64);
impl_unsigned!(u8, u16, u32, u64);
impl_wide!(isize => Int(i64), i128 => Int(i64), usize => UInt(u64), u128 => UInt(u64));

impl ToFieldValue for f32 {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Float(f64::from(*self))
    }
}

impl ToFieldValue for f64 {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Float(*self)
    }
}

impl ToFieldValue for bool {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Bool(*self)
    }
}

impl ToFieldValue for char {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Char(*self)
    }
}

impl ToFieldValue for str {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(Cow::Borrowed(self))
    }
}

impl ToFieldValue for String {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(Cow::Borrowed(self.as_str()))
    }
}

impl ToFieldValue for Cow<'_, str> {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(Cow::Borrowed(self.as_ref()))
    }
}

impl<T: ToFieldValue + ?Sized> ToFieldValue for &T {
    fn to_field_value(&self) -> FieldValue<'_> {
        (**self).to_field_value()
    }
}

impl<T: ToFieldValue + ?Sized> ToFieldValue for Box<T> {
    fn to_field_value(&self) -> FieldValue<'_> {
        self.as_ref().to_field_value()
    }
}

impl<T: ToFieldValue> ToFieldValue for Option<T> {
    fn to_field_value(&self) -> FieldValue<'_> {
        self.as_ref().map_or(FieldValue::Null, ToFieldValue::to_field_value)
    }
}

impl<T> ToFieldValue for Vec<T> {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Other {
            type_name: std::any::type_name::<Self>(),
        }
    }
}

impl ToFieldValue for serde_json::Value {
    fn to_field_value(&self) -> FieldValue<'_> {
        match self {
            Self::Null => FieldValue::Null,
            Self::Bool(value) => FieldValue::Bool(*value),
            Self::Number(number) => number
                .as_i64()
                .map(FieldValue::Int)
                .or_else(|| number.as_u64().map(FieldValue::UInt))
                .or_else(|| number.as_f64().map(FieldValue::Float))
                .unwrap_or(FieldValue::Other {
                    type_name: "serde_json::Number",
                }),
            Self::String(value) => FieldValue::Str(Cow::Borrowed(value.as_str())),
            Self::Array(_) | Self::Object(_) => FieldValue::Other {
                type_name: "serde_json::Value",
            },
        }
    }
}

// ============================================================================
// QueryValue
// ============================================================================

/// A query parameter value, kept in its original type.
///
/// Encoding into wire form is deferred to [`OutboundRequest::url`](crate::OutboundRequest::url)
/// or to the transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    /// A string.
    Str(String),
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    UInt(u64),
    /// A floating point number.
    Float(f64),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::UInt(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}
