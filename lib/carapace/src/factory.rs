//! The request factory.

use std::sync::Arc;

use carapace_core::{
    ACCEPT, Diagnostic, Error, Identity, NameTranslator, NamingStrategy, OutboundRequest, Result,
    RpcDeclaration, RpcObject, UriError, build_base_uri, collect_query_parameters, is_absolute,
    resolve_fragments,
};
use tracing::{debug, debug_span, trace};

use crate::ExecutionContext;

/// Build the outbound request for `object`.
///
/// Steps, in order:
/// 1. the context pre-processor validates the object
/// 2. the declaration is read
/// 3. the name translator is resolved, declaration strategies first
/// 4. the URI is built from the prefix, the template and the fragment fields
/// 5. query fields are collected
/// 6. default headers and the `Accept` header are set
/// 7. for POST, PUT and PATCH, the body is serialized
/// 8. the pre-processor adjusts the request
///
/// Unsupported query values, a missing serializer and (unless strict
/// serialization is enabled) serializer failures are reported to the context
/// diagnostics and do not fail the build.
///
/// # Errors
///
/// - [`Error::ContextValidation`] if the pre-processor rejects the object
/// - [`Error::NotAnRpcObject`] if the type has no declaration
/// - [`Error::UriConstruction`] if the URI cannot be built
/// - [`Error::Serialization`] if the body cannot be serialized and strict
///   serialization is enabled
///
/// # Example
///
/// ```
/// use carapace::prelude::*;
///
/// #[derive(Serialize, RpcObject)]
/// #[rpc(get = "/ping/%1$s")]
/// struct Ping {
///     #[fragment(1)]
///     id: u32,
///     #[query]
///     verbose: bool,
/// }
///
/// let context = ExecutionContext::builder().uri_prefix("http://api").build();
/// let ping = Ping { id: 7, verbose: true };
///
/// let request = carapace::create_request(&context, &ping)?;
/// assert_eq!(request.uri(), "http://api/ping/7");
/// assert_eq!(request.query().get("verbose"), Some(&QueryValue::Bool(true)));
/// assert!(request.body().is_none());
/// # Ok::<(), carapace::Error>(())
/// ```
pub fn create_request<'o>(
    context: &ExecutionContext,
    object: &'o dyn RpcObject,
) -> Result<OutboundRequest<'o>> {
    let type_name = object.type_name();
    let span = debug_span!("create_request", rpc_object = type_name);
    let _enter = span.enter();

    context.preprocessor().validate_context(object)?;

    let declaration = object
        .declaration()
        .ok_or_else(|| Error::not_an_rpc_object(type_name))?;
    let method = declaration.method();
    let translator = resolve_translator(context, &declaration);

    let uri = resolve_uri(context, object, declaration.uri())?;
    debug!(%method, %uri, "resolved URI");

    let query = collect_query_parameters(object, &translator, context.diagnostics());
    trace!(count = query.len(), "collected query parameters");

    let mut builder = OutboundRequest::builder(method, uri, object)
        .translator(translator)
        .query_parameters(query)
        .headers(context.default_headers().clone());
    if let Some(content_type) = declaration.expected_content_type() {
        builder = builder
            .expected_content_type(content_type)
            .header(ACCEPT, content_type);
    }
    let mut request = builder.build();

    if method.has_body() {
        dispatch_body(context, &declaration, &mut request)?;
    } else {
        trace!(%method, "no body for method");
    }

    context.preprocessor().process_request(&mut request);
    debug!(%method, uri = request.uri(), has_body = request.body().is_some(), "request built");

    Ok(request)
}

/// Declaration strategies take precedence over context defaults, identity
/// applies when neither is set.
fn resolve_translator(context: &ExecutionContext, declaration: &RpcDeclaration) -> NameTranslator {
    let identity = || Arc::new(Identity) as Arc<dyn NamingStrategy>;
    let local = declaration
        .local_naming()
        .or_else(|| context.local_naming())
        .cloned()
        .unwrap_or_else(identity);
    let remote = declaration
        .remote_naming()
        .or_else(|| context.remote_naming())
        .cloned()
        .unwrap_or_else(identity);
    NameTranslator::new(local, remote)
}

/// Fragments are substituted into the template before it is joined to the
/// prefix. A missing prefix is reported before any fragment error.
fn resolve_uri(
    context: &ExecutionContext,
    object: &dyn RpcObject,
    template: &str,
) -> std::result::Result<String, UriError> {
    if context.uri_prefix().is_none() && !is_absolute(template) {
        return Err(UriError::MissingUriPrefix {
            template: template.to_string(),
        });
    }

    let path = resolve_fragments(object, template)?;
    build_base_uri(context.uri_prefix(), &path)
}

fn dispatch_body(
    context: &ExecutionContext,
    declaration: &RpcDeclaration,
    request: &mut OutboundRequest<'_>,
) -> Result<()> {
    let object = request.object();
    let Some(serializer) = declaration.serializer().or_else(|| context.serializer()) else {
        context.diagnostics().warn(&Diagnostic::MissingSerializer {
            type_name: object.type_name(),
            method: request.method(),
        });
        return Ok(());
    };

    match serializer.serialize_object(object, request.translator()) {
        Ok(body) => {
            debug!(
                content_type = serializer.content_type(),
                bytes = body.len(),
                "serialized body"
            );
            request.attach_body(serializer.content_type(), body);
        }
        Err(err) => {
            context.diagnostics().error(&Diagnostic::SerializationFailed {
                type_name: object.type_name(),
                content_type: serializer.content_type().to_string(),
                reason: err.to_string(),
            });
            if context.strict_serialization() {
                return Err(err.into());
            }
            request.set_body_error(err);
        }
    }

    Ok(())
}
