//! Ping API Demo
//!
//! Declares a few RPC objects and prints the requests carapace builds for them.

// Demo-specific lint allowances
#![allow(missing_docs)]
#![allow(clippy::print_stdout)]

use std::sync::Arc;

use carapace::CollectingDiagnostics;
use carapace::preprocessor::{BearerAuth, PreprocessorChain, StaticHeaders};
use carapace::prelude::*;

// ============================================================================
// RPC objects
// ============================================================================

/// Ping a node, optionally asking for a verbose answer.
#[derive(Debug, Serialize, RpcObject)]
#[rpc(get = "/ping/%1$s", expected_content_type = "application/json")]
pub struct Ping {
    #[fragment(1)]
    pub id: u32,
    #[query]
    pub verbose: bool,
}

/// Rename a node of a cluster.
#[derive(Debug, Serialize, RpcObject)]
#[rpc(
    put = "/clusters/%1$s/nodes/%2$s",
    serializer = "json",
    remote_name = "camelCase"
)]
pub struct RenameNode {
    #[fragment(1)]
    #[serde(skip)]
    pub cluster: String,
    #[fragment(2)]
    #[serde(skip)]
    pub node_id: u32,
    pub display_name: String,
    pub keep_history: bool,
}

/// Sign in with a form.
#[derive(Debug, Serialize, RpcObject)]
#[rpc(post = "/session", serializer = "form", remote_name = "kebab-case")]
pub struct SignIn {
    pub user_name: String,
    pub remember_me: bool,
}

/// A `DELETE` through an absolute URI, ignoring the context prefix.
#[derive(Debug, Serialize, RpcObject)]
#[rpc(delete = "https://status.example.com/incidents/%1$s")]
pub struct CloseIncident {
    #[fragment(1)]
    pub incident: String,
    #[query("reason")]
    pub close_reason: Option<String>,
}

// ============================================================================
// Main
// ============================================================================

fn main() -> carapace::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .init();

    let diagnostics = Arc::new(CollectingDiagnostics::new());
    let context = ExecutionContext::builder()
        .uri_prefix("https://api.example.com/v1/")
        .preprocessor(
            PreprocessorChain::new()
                .with(BearerAuth::new("demo-token"))
                .with(StaticHeaders::new().with_header("User-Agent", "ping-api-demo/0.1.0")),
        )
        .diagnostics(diagnostics.clone())
        .build();

    let ping = Ping {
        id: 7,
        verbose: true,
    };
    print_request(&context.create_request(&ping)?)?;

    let rename = RenameNode {
        cluster: "eu west".to_string(),
        node_id: 3,
        display_name: "Primary".to_string(),
        keep_history: true,
    };
    print_request(&context.create_request(&rename)?)?;

    let sign_in = SignIn {
        user_name: "ada".to_string(),
        remember_me: true,
    };
    print_request(&context.create_request(&sign_in)?)?;

    let close = CloseIncident {
        incident: "INC-42".to_string(),
        close_reason: None,
    };
    print_request(&context.create_request(&close)?)?;

    for (level, diagnostic) in diagnostics.entries() {
        println!("{level:?}: {diagnostic}");
    }

    Ok(())
}

fn print_request(request: &OutboundRequest<'_>) -> carapace::Result<()> {
    println!("{} {}", request.method(), request.url()?);
    let mut headers = request.headers().iter().collect::<Vec<_>>();
    headers.sort();
    for (name, value) in headers {
        println!("  {name}: {value}");
    }
    if let Some(body) = request.body() {
        println!("  {}", String::from_utf8_lossy(body));
    }
    println!();
    Ok(())
}
