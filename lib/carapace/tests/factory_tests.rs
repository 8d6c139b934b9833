//! Integration tests for request construction.

#![allow(missing_docs)]

use std::sync::Arc;

use assert2::{check, let_assert};
use carapace::prelude::*;
use carapace::{
    CollectingDiagnostics, Diagnostic, FieldDescriptor, FieldValue, SerializationError, UriError,
};

// ============================================================================
// Fixtures
// ============================================================================

#[derive(Serialize, RpcObject)]
#[rpc(get = "/ping/%1$s")]
struct Ping {
    #[fragment(1)]
    id: u32,
    #[query]
    verbose: bool,
}

#[derive(Serialize, RpcObject)]
#[rpc(get = "/files/%1$s/%2$s", expected_content_type = "application/json")]
struct ReadFile {
    #[fragment(1)]
    bucket: String,
    #[fragment(2)]
    name: String,
}

#[derive(Serialize, RpcObject)]
#[rpc(get = "/search")]
struct Search {
    #[query("q")]
    text: String,
    #[query("q")]
    fallback: String,
    #[query]
    page_size: Option<u32>,
    #[query]
    tags: Vec<String>,
}

#[derive(Serialize, RpcObject)]
#[rpc(post = "/notes")]
struct CreateNote {
    text: String,
}

#[derive(Serialize, RpcObject)]
#[rpc(put = "/users/%1$s", serializer = "json", remote_name = "camelCase")]
struct UpdateUser {
    #[fragment(1)]
    #[serde(skip)]
    user_id: u64,
    display_name: String,
    home_address: Address,
}

#[derive(Serialize)]
struct Address {
    street_name: String,
}

#[derive(Serialize, RpcObject)]
#[rpc(post = "/session", serializer = "form", remote_name = "kebab-case")]
struct SignIn {
    user_name: String,
    remember_me: bool,
}

#[derive(Serialize, RpcObject)]
#[rpc(patch = "/profile", serializer = "form")]
struct NestedForm {
    address: Address,
}

#[derive(Serialize, RpcObject)]
#[rpc(delete = "https://status.example.com/incidents/%1$s")]
struct CloseIncident {
    #[fragment(1)]
    incident: String,
}

#[derive(Serialize, RpcObject)]
#[rpc(get = "/orders/%1$s")]
struct OrderById {
    #[fragment(1)]
    id: Option<u32>,
}

#[derive(Serialize, RpcObject)]
struct NotDeclared {
    #[query]
    page: u32,
}

/// Hand-written object whose fragments skip position 2.
#[derive(Serialize)]
struct Gappy {
    a: u32,
    c: u32,
}

impl RpcObject for Gappy {
    fn type_name(&self) -> &'static str {
        "Gappy"
    }

    fn declaration(&self) -> Option<RpcDeclaration> {
        Some(RpcDeclaration::new(Method::Get, "/x/%1$s/%3$s"))
    }

    fn fields(&self) -> &'static [FieldDescriptor] {
        const FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::fragment("a", "u32", 1),
            FieldDescriptor::fragment("c", "u32", 3),
        ];
        FIELDS
    }

    fn field_value(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "a" => Some(self.a.to_field_value()),
            "c" => Some(self.c.to_field_value()),
            _ => None,
        }
    }

    fn to_body_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

#[derive(Debug)]
struct RejectAll;

impl Preprocessor for RejectAll {
    fn validate_context(&self, _object: &dyn RpcObject) -> std::result::Result<(), ValidationError> {
        Err(ValidationError::new("session expired"))
    }
}

fn context() -> ExecutionContext {
    ExecutionContext::builder().uri_prefix("http://api").build()
}

fn collecting_context(diagnostics: &Arc<CollectingDiagnostics>) -> ExecutionContext {
    ExecutionContext::builder()
        .uri_prefix("http://api")
        .diagnostics(Arc::clone(diagnostics) as Arc<dyn Diagnostics>)
        .build()
}

// ============================================================================
// URI
// ============================================================================

#[test]
fn test_ping_request() {
    let ping = Ping { id: 7, verbose: true };

    let request = context().create_request(&ping).expect("request");

    check!(request.method() == Method::Get);
    check!(request.uri() == "http://api/ping/7");
    check!(request.query().len() == 1);
    check!(request.query().get("verbose") == Some(&QueryValue::Bool(true)));
    check!(request.body().is_none());
    check!(request.content_type().is_none());
}

#[test]
fn test_slash_normalisation() {
    let ping = Ping { id: 1, verbose: false };
    for prefix in ["http://api", "http://api/"] {
        let context = ExecutionContext::builder().uri_prefix(prefix).build();
        let request = context.create_request(&ping).expect("request");
        check!(request.uri() == "http://api/ping/1");
    }
}

#[test]
fn test_fragments_are_percent_encoded() {
    let read = ReadFile {
        bucket: "a b".to_string(),
        name: "x/y.txt".to_string(),
    };

    let request = context().create_request(&read).expect("request");

    check!(request.uri() == "http://api/files/a%20b/x%2Fy.txt");
}

#[test]
fn test_missing_positional_argument() {
    let gappy = Gappy { a: 1, c: 3 };

    let_assert!(Err(Error::UriConstruction(err)) = context().create_request(&gappy));
    check!(
        err == UriError::MissingPositionalArgument {
            position: 2,
            type_name: "Gappy",
        }
    );
}

#[test]
fn test_unsupported_fragment_value() {
    let_assert!(
        Err(Error::UriConstruction(err)) = context().create_request(&OrderById { id: None })
    );
    check!(
        err == UriError::UnsupportedFragmentType {
            field: "id",
            type_name: "Option<u32>",
        }
    );

    let request = context()
        .create_request(&OrderById { id: Some(12) })
        .expect("request");
    check!(request.uri() == "http://api/orders/12");
}

#[test]
fn test_missing_prefix_for_relative_template() {
    let ping = Ping { id: 7, verbose: true };

    let_assert!(
        Err(Error::UriConstruction(UriError::MissingUriPrefix { template })) =
            ExecutionContext::default().create_request(&ping)
    );
    check!(template == "/ping/%1$s");
}

#[test]
fn test_absolute_template_ignores_prefix() {
    let close = CloseIncident {
        incident: "INC-42".to_string(),
    };

    let without_prefix = ExecutionContext::default()
        .create_request(&close)
        .expect("request");
    let with_prefix = context().create_request(&close).expect("request");

    check!(without_prefix.uri() == "https://status.example.com/incidents/INC-42");
    check!(with_prefix.uri() == without_prefix.uri());
    check!(with_prefix.method() == Method::Delete);
}

// ============================================================================
// Query
// ============================================================================

#[test]
fn test_query_last_declared_wins() {
    let diagnostics = Arc::new(CollectingDiagnostics::new());
    let search = Search {
        text: "rust".to_string(),
        fallback: "crab".to_string(),
        page_size: None,
        tags: vec!["a".to_string()],
    };

    let request = collecting_context(&diagnostics)
        .create_request(&search)
        .expect("request");

    check!(request.query().len() == 1);
    check!(request.query().get("q") == Some(&QueryValue::from("crab")));
    check!(request.url().expect("url").as_str() == "http://api/search?q=crab");

    let warnings = diagnostics.warnings();
    check!(warnings.len() == 1);
    let_assert!(Some(Diagnostic::UnsupportedQueryType { field, .. }) = warnings.first());
    check!(*field == "tags");
}

#[test]
fn test_query_names_follow_remote_naming() {
    let search = Search {
        text: "rust".to_string(),
        fallback: "crab".to_string(),
        page_size: Some(20),
        tags: Vec::new(),
    };
    let context = ExecutionContext::builder()
        .uri_prefix("http://api")
        .remote_naming(Case::Kebab)
        .diagnostics(Arc::new(carapace::NoopDiagnostics))
        .build();

    let request = context.create_request(&search).expect("request");

    let names = request.query().keys().map(String::as_str).collect::<Vec<_>>();
    check!(names == ["q", "page-size"]);
    check!(request.query().get("page-size") == Some(&QueryValue::UInt(20)));
}

// ============================================================================
// Body
// ============================================================================

#[test]
fn test_get_has_no_body() {
    let diagnostics = Arc::new(CollectingDiagnostics::new());
    let context = ExecutionContext::builder()
        .uri_prefix("http://api")
        .serializer(JsonSerializer)
        .diagnostics(Arc::clone(&diagnostics) as Arc<dyn Diagnostics>)
        .build();
    let ping = Ping { id: 7, verbose: true };

    let request = context.create_request(&ping).expect("request");

    check!(request.body().is_none());
    check!(request.header("Content-Type").is_none());
    check!(diagnostics.is_empty());
}

#[test]
fn test_post_without_serializer() {
    let diagnostics = Arc::new(CollectingDiagnostics::new());
    let note = CreateNote {
        text: "hello".to_string(),
    };

    let request = collecting_context(&diagnostics)
        .create_request(&note)
        .expect("request");

    check!(request.method() == Method::Post);
    check!(request.body().is_none());
    check!(request.header("Content-Type").is_none());
    check!(
        diagnostics.warnings()
            == [Diagnostic::MissingSerializer {
                type_name: "CreateNote",
                method: Method::Post,
            }]
    );
}

#[test]
fn test_context_serializer_applies() {
    let context = ExecutionContext::builder()
        .uri_prefix("http://api")
        .serializer(JsonSerializer)
        .build();
    let note = CreateNote {
        text: "hello".to_string(),
    };

    let request = context.create_request(&note).expect("request");

    check!(request.content_type() == Some("application/json"));
    check!(request.body().map(|b| b.as_ref()) == Some(&br#"{"text":"hello"}"#[..]));
}

#[test]
fn test_json_body_with_remote_naming() {
    let update = UpdateUser {
        user_id: 42,
        display_name: "Ada".to_string(),
        home_address: Address {
            street_name: "Main".to_string(),
        },
    };

    let request = context().create_request(&update).expect("request");

    check!(request.uri() == "http://api/users/42");
    check!(request.content_type() == Some("application/json"));
    let body: serde_json::Value =
        serde_json::from_slice(request.body().expect("body")).expect("json");
    check!(
        body == serde_json::json!({
            "displayName": "Ada",
            "homeAddress": { "streetName": "Main" },
        })
    );
}

#[test]
fn test_declaration_naming_overrides_context() {
    let context = ExecutionContext::builder()
        .uri_prefix("http://api")
        .remote_naming(Case::ScreamingSnake)
        .build();
    let sign_in = SignIn {
        user_name: "ada lovelace".to_string(),
        remember_me: true,
    };

    let request = context.create_request(&sign_in).expect("request");

    check!(request.content_type() == Some("application/x-www-form-urlencoded"));
    check!(
        request.body().map(|b| b.as_ref())
            == Some(&b"user-name=ada+lovelace&remember-me=true"[..])
    );
}

#[test]
fn test_serialization_failure_is_soft() {
    let diagnostics = Arc::new(CollectingDiagnostics::new());
    let nested = NestedForm {
        address: Address {
            street_name: "Main".to_string(),
        },
    };

    let request = collecting_context(&diagnostics)
        .create_request(&nested)
        .expect("request");

    check!(request.body().is_none());
    check!(request.content_type().is_none());
    check!(matches!(
        request.body_error(),
        Some(SerializationError::Unsupported(_))
    ));
    let errors = diagnostics.errors();
    check!(errors.len() == 1);
    check!(matches!(
        errors.first(),
        Some(Diagnostic::SerializationFailed {
            type_name: "NestedForm",
            ..
        })
    ));
}

#[test]
fn test_strict_serialization_fails() {
    let context = ExecutionContext::builder()
        .uri_prefix("http://api")
        .strict_serialization(true)
        .diagnostics(Arc::new(carapace::NoopDiagnostics))
        .build();
    let nested = NestedForm {
        address: Address {
            street_name: "Main".to_string(),
        },
    };

    let_assert!(Err(Error::Serialization(err)) = context.create_request(&nested));
    check!(err.to_string().contains("address"));
}

// ============================================================================
// Structural failures
// ============================================================================

#[test]
fn test_not_an_rpc_object() {
    let plain = NotDeclared { page: 1 };

    let_assert!(Err(Error::NotAnRpcObject { type_name }) = context().create_request(&plain));
    check!(type_name == "NotDeclared");
}

#[test]
fn test_context_validation_runs_first() {
    let context = ExecutionContext::builder().preprocessor(RejectAll).build();
    let plain = NotDeclared { page: 1 };

    let_assert!(Err(Error::ContextValidation(err)) = context.create_request(&plain));
    check!(err.message() == "session expired");
}

// ============================================================================
// Headers
// ============================================================================

#[test]
fn test_accept_header_from_expected_content_type() {
    let read = ReadFile {
        bucket: "b".to_string(),
        name: "n".to_string(),
    };

    let request = context().create_request(&read).expect("request");

    check!(request.header("accept") == Some("application/json"));
    check!(request.expected_content_type() == Some("application/json"));
}

#[test]
fn test_default_headers() {
    let context = ExecutionContext::builder()
        .uri_prefix("http://api")
        .default_header("User-Agent", "carapace-tests")
        .build();
    let ping = Ping { id: 7, verbose: true };

    let request = context.create_request(&ping).expect("request");

    check!(request.header("user-agent") == Some("carapace-tests"));
}

#[test]
fn test_default_headers_do_not_shadow_body_headers() {
    let context = ExecutionContext::builder()
        .uri_prefix("http://api")
        .default_header("content-type", "text/plain")
        .default_header("accept", "text/html")
        .build();
    let update = UpdateUser {
        user_id: 42,
        display_name: "Ada".to_string(),
        home_address: Address {
            street_name: "Main".to_string(),
        },
    };

    let request = context.create_request(&update).expect("request");
    check!(request.content_type() == Some("application/json"));
    check!(request.headers().len() == 2);

    let http_request = request.into_http().expect("http request");
    let content_types = http_request
        .headers()
        .get_all(http::header::CONTENT_TYPE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect::<Vec<_>>();
    check!(content_types == ["application/json"]);
    check!(
        http_request
            .headers()
            .get(http::header::ACCEPT)
            .and_then(|value| value.to_str().ok())
            == Some("text/html")
    );
}

#[test]
fn test_expected_content_type_replaces_default_accept() {
    let context = ExecutionContext::builder()
        .uri_prefix("http://api")
        .default_header("accept", "text/html")
        .build();
    let read = ReadFile {
        bucket: "b".to_string(),
        name: "n".to_string(),
    };

    let request = context.create_request(&read).expect("request");

    check!(request.headers().len() == 1);
    check!(request.header("Accept") == Some("application/json"));
}

// ============================================================================
// Conversion
// ============================================================================

#[test]
fn test_into_http_request() {
    let update = UpdateUser {
        user_id: 42,
        display_name: "Ada".to_string(),
        home_address: Address {
            street_name: "Main".to_string(),
        },
    };
    let request = context().create_request(&update).expect("request");

    let http_request = request.into_http().expect("http request");

    check!(http_request.method() == http::Method::PUT);
    check!(http_request.uri() == "http://api/users/42");
    check!(
        http_request
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            == Some("application/json")
    );
    check!(!http_request.body().is_empty());
}

#[test]
fn test_request_snapshot() {
    let context = ExecutionContext::builder()
        .uri_prefix("https://api.example.com/v1/")
        .default_header("X-Client", "tests")
        .build();
    let sign_in = SignIn {
        user_name: "ada".to_string(),
        remember_me: false,
    };

    let request = context.create_request(&sign_in).expect("request");

    let mut headers = request
        .headers()
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>();
    headers.sort();
    let body = request
        .body()
        .map(|body| String::from_utf8_lossy(body).into_owned())
        .unwrap_or_default();
    let rendered = format!(
        "{} {}\n{}\n\n{body}",
        request.method(),
        request.url().expect("url"),
        headers.join("\n")
    );

    insta::assert_snapshot!(rendered, @r"
    POST https://api.example.com/v1/session
    Content-Type: application/x-www-form-urlencoded
    X-Client: tests

    user-name=ada&remember-me=false
    ");
}
