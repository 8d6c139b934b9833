//! Field metadata for RPC objects.
//!
//! Every RPC object exposes a static table of [`FieldDescriptor`]s describing
//! how each of its fields participates in the request. The table is plain data,
//! usually generated by `#[derive(RpcObject)]`, and the functions in this
//! module resolve it into ordered fragment and query field lists.

use std::collections::BTreeMap;
use std::fmt;

use crate::UriError;

/// Role of a field in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    /// Positional URI fragment, substituted into the template at the given
    /// 1-based position.
    UriFragment(usize),
    /// Query parameter, with an optional explicit remote name.
    QueryString(Option<&'static str>),
    /// Not part of the URI (may still end up in the body).
    Plain,
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UriFragment(position) => write!(f, "fragment({position})"),
            Self::QueryString(Some(name)) => write!(f, "query({name})"),
            Self::QueryString(None) => write!(f, "query"),
            Self::Plain => write!(f, "plain"),
        }
    }
}

/// Metadata about a single field of an RPC object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// The field identifier as declared in the type.
    pub name: &'static str,
    /// The declared Rust type (e.g. `"u64"`, `"Option<String>"`).
    pub type_name: &'static str,
    /// How the field participates in the request.
    pub role: FieldRole,
}

impl FieldDescriptor {
    /// Create a descriptor.
    #[must_use]
    pub const fn new(name: &'static str, type_name: &'static str, role: FieldRole) -> Self {
        Self {
            name,
            type_name,
            role,
        }
    }

    /// Create a URI fragment descriptor.
    #[must_use]
    pub const fn fragment(name: &'static str, type_name: &'static str, position: usize) -> Self {
        Self::new(name, type_name, FieldRole::UriFragment(position))
    }

    /// Create a query string descriptor.
    #[must_use]
    pub const fn query(
        name: &'static str,
        type_name: &'static str,
        remote_name: Option<&'static str>,
    ) -> Self {
        Self::new(name, type_name, FieldRole::QueryString(remote_name))
    }

    /// Create a descriptor for a field with no URI role.
    #[must_use]
    pub const fn plain(name: &'static str, type_name: &'static str) -> Self {
        Self::new(name, type_name, FieldRole::Plain)
    }

    /// The explicit query parameter name, if one was declared and is non-empty.
    #[must_use]
    pub fn explicit_query_name(&self) -> Option<&'static str> {
        match self.role {
            FieldRole::QueryString(Some(name)) if !name.is_empty() => Some(name),
            _ => None,
        }
    }
}

/// Resolve the URI fragment fields of a type, ordered by position.
///
/// Positions must form the contiguous sequence `1..=N` where `N` is the number
/// of fragment fields.
///
/// # Errors
///
/// - [`UriError::DuplicatePosition`] if two fields share a position
/// - [`UriError::MissingPositionalArgument`] for the first gap in the sequence
pub fn fragment_fields<'f>(
    fields: &'f [FieldDescriptor],
    type_name: &'static str,
) -> Result<Vec<&'f FieldDescriptor>, UriError> {
    let mut by_position = BTreeMap::new();
    for field in fields {
        if let FieldRole::UriFragment(position) = field.role
            && by_position.insert(position, field).is_some()
        {
            return Err(UriError::DuplicatePosition {
                position,
                type_name,
            });
        }
    }

    (1..=by_position.len())
        .map(|position| {
            by_position
                .get(&position)
                .copied()
                .ok_or(UriError::MissingPositionalArgument {
                    position,
                    type_name,
                })
        })
        .collect()
}

/// Iterate over query string fields in declaration order.
pub fn query_fields(fields: &[FieldDescriptor]) -> impl Iterator<Item = &FieldDescriptor> {
    fields
        .iter()
        .filter(|field| matches!(field.role, FieldRole::QueryString(_)))
}
