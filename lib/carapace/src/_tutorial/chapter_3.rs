//! # Chapter 3: Preprocessors & Diagnostics
//!
//! Validate objects, decorate requests, and observe soft failures.
//!
//! ## Preprocessors
//!
//! A [`Preprocessor`](crate::Preprocessor) runs twice per request:
//!
//! 1. `validate_context` before anything is resolved; an error aborts with
//!    [`Error::ContextValidation`](crate::Error::ContextValidation)
//! 2. `process_request` on the finished request
//!
//! Built-in helpers live in [`preprocessor`](crate::preprocessor):
//!
//! | Type | Description |
//! |------|-------------|
//! | [`BearerAuth`](crate::preprocessor::BearerAuth) | Add `Authorization: Bearer <token>` |
//! | [`StaticHeaders`](crate::preprocessor::StaticHeaders) | Set fixed headers |
//! | [`PreprocessorChain`](crate::preprocessor::PreprocessorChain) | Run several in order |
//!
//! ```
//! use carapace::prelude::*;
//! use carapace::preprocessor::{BearerAuth, PreprocessorChain, StaticHeaders};
//!
//! #[derive(Serialize, RpcObject)]
//! #[rpc(get = "/me")]
//! struct Me {}
//!
//! let context = ExecutionContext::builder()
//!     .uri_prefix("https://api.example.com")
//!     .preprocessor(
//!         PreprocessorChain::new()
//!             .with(BearerAuth::new("secret"))
//!             .with(StaticHeaders::new().with_header("User-Agent", "my-app/1.0")),
//!     )
//!     .build();
//!
//! let request = context.create_request(&Me {})?;
//! assert_eq!(request.header("authorization"), Some("Bearer secret"));
//! assert_eq!(request.header("user-agent"), Some("my-app/1.0"));
//! # Ok::<(), carapace::Error>(())
//! ```
//!
//! ## Writing a Preprocessor
//!
//! ```ignore
//! #[derive(Debug)]
//! struct RequireSession(Option<String>);
//!
//! impl Preprocessor for RequireSession {
//!     fn validate_context(&self, _object: &dyn RpcObject) -> std::result::Result<(), ValidationError> {
//!         match &self.0 {
//!             Some(_) => Ok(()),
//!             None => Err(ValidationError::new("no session")),
//!         }
//!     }
//!
//!     fn process_request(&self, request: &mut OutboundRequest<'_>) {
//!         if let Some(session) = &self.0 {
//!             request.set_header("X-Session", session.as_str());
//!         }
//!     }
//! }
//! ```
//!
//! ## Diagnostics
//!
//! Soft failures never abort a build. They go to the context
//! [`Diagnostics`](crate::Diagnostics):
//!
//! - [`TracingDiagnostics`](crate::TracingDiagnostics) (default) logs them with `tracing`
//! - [`CollectingDiagnostics`](crate::CollectingDiagnostics) keeps them for inspection
//! - [`NoopDiagnostics`](crate::NoopDiagnostics) drops them
//!
//! ```
//! use std::sync::Arc;
//!
//! use carapace::prelude::*;
//! use carapace::{CollectingDiagnostics, Diagnostic};
//!
//! #[derive(Serialize, RpcObject)]
//! #[rpc(post = "/notes")]
//! struct CreateNote {
//!     text: String,
//! }
//!
//! let diagnostics = Arc::new(CollectingDiagnostics::new());
//! let context = ExecutionContext::builder()
//!     .uri_prefix("http://api")
//!     .diagnostics(diagnostics.clone())
//!     .build();
//!
//! let note = CreateNote { text: "hi".to_string() };
//! let request = context.create_request(&note)?;
//! assert!(request.body().is_none());
//! assert_eq!(
//!     diagnostics.warnings(),
//!     [Diagnostic::MissingSerializer {
//!         type_name: "CreateNote",
//!         method: Method::Post,
//!     }]
//! );
//! # Ok::<(), carapace::Error>(())
//! ```
//!
//! ## Logging
//!
//! Request construction runs in a `create_request` debug span. Install a
//! subscriber to see it:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
//!     .init();
//! ```
