//! # Chapter 0: Getting Started
//!
//! Your first RPC object in 5 minutes.
//!
//! ## What You'll Learn
//!
//! - Declare a request with `#[derive(RpcObject)]` and `#[rpc]`
//! - Build an [`ExecutionContext`](crate::ExecutionContext)
//! - Turn an object into an [`OutboundRequest`](crate::OutboundRequest)
//!
//! ## Prerequisites
//!
//! Add to `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! carapace = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ## Your First Request
//!
//! ```
//! use carapace::prelude::*;
//!
//! // Declare the request on the type that carries its data
//! #[derive(Serialize, RpcObject)]
//! #[rpc(get = "/ping/%1$s")]
//! struct Ping {
//!     #[fragment(1)]
//!     id: u32,
//!     #[query]
//!     verbose: bool,
//! }
//!
//! // Shared defaults, built once
//! let context = ExecutionContext::builder()
//!     .uri_prefix("http://api")
//!     .build();
//!
//! // One request per object
//! let request = context.create_request(&Ping { id: 7, verbose: true })?;
//!
//! assert_eq!(request.method(), Method::Get);
//! assert_eq!(request.uri(), "http://api/ping/7");
//! assert_eq!(request.url()?.as_str(), "http://api/ping/7?verbose=true");
//! # Ok::<(), carapace::Error>(())
//! ```
//!
//! ## What Gets Generated
//!
//! The derive implements [`RpcObject`](crate::RpcObject):
//!
//! ```text
//! #[rpc(get = "...")]         type_name()      "Ping"
//! struct Ping { ... }    →    declaration()    method + URI template
//!                             fields()         static field table
//!                             field_value()    fragment and query values
//!                             to_body_value()  serde view of the object
//! ```
//!
//! The request is plain data. Send it with any client, or convert it with
//! [`OutboundRequest::into_http`](crate::OutboundRequest::into_http).
//!
//! ## Next Steps
//!
//! - [Chapter 1: Fragments & Queries][super::chapter_1] - URI templates and query fields
