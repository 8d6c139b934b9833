//! Query parameter assembly.

use indexmap::IndexMap;

use crate::{Diagnostic, Diagnostics, FieldValue, NameTranslator, QueryValue, RpcObject};

/// Query parameters of a request, in insertion order.
pub type QueryParameters = IndexMap<String, QueryValue>;

/// Collect the query string fields of `object`.
///
/// Each parameter is named after the explicit name of the field, or the field
/// name translated to its wire form. Null values are left out. Values that
/// cannot go into a query string are left out and reported as a warning.
/// When two fields resolve to the same name, the later one wins.
pub fn collect_query_parameters(
    object: &dyn RpcObject,
    translator: &NameTranslator,
    diagnostics: &dyn Diagnostics,
) -> QueryParameters {
    let mut parameters = QueryParameters::new();

    for field in crate::query_fields(object.fields()) {
        let value = match object.field_value(field.name) {
            None | Some(FieldValue::Null) => continue,
            Some(value) => value,
        };

        let Some(value) = value.to_query_value() else {
            diagnostics.warn(&Diagnostic::UnsupportedQueryType {
                type_name: object.type_name(),
                field: field.name,
                field_type: value.type_name(),
            });
            continue;
        };

        let name = field
            .explicit_query_name()
            .map_or_else(|| translator.local_to_remote(field.name), str::to_string);
        tracing::trace!(field = field.name, %name, %value, "query parameter");
        parameters.insert(name, value);
    }

    parameters
}
