//! Request pre-processing hook.

use std::fmt;

use crate::{OutboundRequest, RpcObject, ValidationError};

/// Hook around request construction.
///
/// [`validate_context`](Preprocessor::validate_context) runs first and may
/// reject the object before anything is resolved.
/// [`process_request`](Preprocessor::process_request) runs last, on the
/// fully built request, and may adjust it (add headers, sign, ...).
///
/// Both methods default to doing nothing.
pub trait Preprocessor: fmt::Debug + Send + Sync {
    /// Check that `object` may be turned into a request.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] to abort request construction.
    fn validate_context(&self, object: &dyn RpcObject) -> Result<(), ValidationError> {
        let _ = object;
        Ok(())
    }

    /// Adjust the built request.
    fn process_request(&self, request: &mut OutboundRequest<'_>) {
        let _ = request;
    }
}

/// Pre-processor that accepts everything and changes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPreprocessor;

impl Preprocessor for NoopPreprocessor {}
