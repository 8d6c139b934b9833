//! Pre-processor composition.

use std::sync::Arc;

use crate::{OutboundRequest, Preprocessor, RpcObject, ValidationError};

/// Runs several pre-processors in order.
///
/// Validation stops at the first rejection. Request processing runs every
/// pre-processor, so a later one sees the changes of the earlier ones.
#[derive(Debug, Clone, Default)]
pub struct PreprocessorChain {
    preprocessors: Vec<Arc<dyn Preprocessor>>,
}

impl PreprocessorChain {
    /// Create an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pre-processor.
    #[must_use]
    pub fn with(mut self, preprocessor: impl Preprocessor + 'static) -> Self {
        self.preprocessors.push(Arc::new(preprocessor));
        self
    }

    /// Number of pre-processors in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.preprocessors.len()
    }

    /// Returns `true` if the chain is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.preprocessors.is_empty()
    }
}

impl Preprocessor for PreprocessorChain {
    fn validate_context(&self, object: &dyn RpcObject) -> Result<(), ValidationError> {
        self.preprocessors
            .iter()
            .try_for_each(|preprocessor| preprocessor.validate_context(object))
    }

    fn process_request(&self, request: &mut OutboundRequest<'_>) {
        for preprocessor in &self.preprocessors {
            preprocessor.process_request(request);
        }
    }
}
