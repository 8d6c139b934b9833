//! HTTP verbs an RPC object can declare.

use std::str::FromStr;

use derive_more::Display;

/// Verb of an [`RpcDeclaration`](crate::RpcDeclaration).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Method {
    /// `GET`, the default of `#[rpc(uri = "...")]`.
    #[display("GET")]
    Get,
    /// `POST`, goes through body dispatch.
    #[display("POST")]
    Post,
    /// `PUT`, goes through body dispatch.
    #[display("PUT")]
    Put,
    /// `DELETE`, sent without body.
    #[display("DELETE")]
    Delete,
    /// `PATCH`, goes through body dispatch.
    #[display("PATCH")]
    Patch,
    /// `HEAD`
    #[display("HEAD")]
    Head,
    /// `OPTIONS`
    #[display("OPTIONS")]
    Options,
}

impl Method {
    /// Returns `true` for the verbs whose requests get a serialized body.
    #[must_use]
    pub const fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl FromStr for Method {
    type Err = crate::Error;

    /// Parse a verb name, ignoring ASCII case.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        [
            Self::Get,
            Self::Post,
            Self::Put,
            Self::Delete,
            Self::Patch,
            Self::Head,
            Self::Options,
        ]
        .into_iter()
        .find(|method| method.to_string().eq_ignore_ascii_case(name))
        .ok_or_else(|| crate::Error::invalid_request(format!("unsupported HTTP method: {name}")))
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
            Method::Patch => Self::PATCH,
            Method::Head => Self::HEAD,
            Method::Options => Self::OPTIONS,
        }
    }
}
