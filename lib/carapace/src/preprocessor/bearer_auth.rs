//! Bearer token authentication pre-processor.
//!
//! Adds an `Authorization: Bearer <token>` header to every request.

use std::sync::Arc;

use crate::{OutboundRequest, Preprocessor};

/// Pre-processor that adds bearer token authentication to requests.
///
/// # Example
///
/// ```
/// use carapace::ExecutionContext;
/// use carapace::preprocessor::BearerAuth;
///
/// let context = ExecutionContext::builder()
///     .preprocessor(BearerAuth::new("my-secret-token"))
///     .build();
/// # let _ = context;
/// ```
#[derive(Clone)]
pub struct BearerAuth {
    token: Arc<str>,
}

impl std::fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAuth")
            .field("token", &"<redacted>")
            .finish()
    }
}

impl BearerAuth {
    /// Create a new bearer auth pre-processor with the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Arc::from(token.into()),
        }
    }
}

impl Preprocessor for BearerAuth {
    fn process_request(&self, request: &mut OutboundRequest<'_>) {
        request.set_header("Authorization", format!("Bearer {}", self.token));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Method, RpcObject};

    #[derive(serde::Serialize, RpcObject)]
    struct Me {}

    #[test]
    fn bearer_auth_sets_header() {
        let me = Me {};
        let mut request =
            OutboundRequest::builder(Method::Get, "https://api.example.com/me", &me).build();

        BearerAuth::new("test-token").process_request(&mut request);

        assert_eq!(request.header("Authorization"), Some("Bearer test-token"));
    }

    #[test]
    fn bearer_auth_debug_hides_token() {
        let debug = format!("{:?}", BearerAuth::new("test-token"));
        assert!(!debug.contains("test-token"));
    }
}
