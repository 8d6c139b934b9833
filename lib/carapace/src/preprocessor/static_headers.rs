//! Fixed headers pre-processor.

use crate::{OutboundRequest, Preprocessor};

/// Pre-processor that adds a fixed set of headers to every request.
///
/// Existing headers with the same name are replaced.
#[derive(Debug, Clone, Default)]
pub struct StaticHeaders {
    headers: Vec<(String, String)>,
}

impl StaticHeaders {
    /// Create an empty set of headers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// The configured headers, in insertion order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

impl<K, V> FromIterator<(K, V)> for StaticHeaders
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            headers: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl Preprocessor for StaticHeaders {
    fn process_request(&self, request: &mut OutboundRequest<'_>) {
        for (name, value) in &self.headers {
            request.set_header(name.as_str(), value.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Method, RpcObject};

    #[derive(serde::Serialize, RpcObject)]
    struct Health {}

    #[test]
    fn static_headers_are_added() {
        let health = Health {};
        let mut request =
            OutboundRequest::builder(Method::Get, "https://api.example.com/health", &health)
                .header("X-Api-Version", "1")
                .build();

        let headers: StaticHeaders = [("X-Api-Version", "2"), ("X-Client", "tests")]
            .into_iter()
            .collect();
        headers.process_request(&mut request);

        assert_eq!(request.header("X-Api-Version"), Some("2"));
        assert_eq!(request.header("X-Client"), Some("tests"));
    }
}
