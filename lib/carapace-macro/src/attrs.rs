//! Attribute parsing for `#[derive(RpcObject)]`.

use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Attribute, LitInt, LitStr};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    /// Shorthand keys accepted in `#[rpc(...)]`, e.g. `get = "/users"`.
    pub(crate) const SHORTHANDS: [(&'static str, Self); 7] = [
        ("get", Self::Get),
        ("post", Self::Post),
        ("put", Self::Put),
        ("delete", Self::Delete),
        ("patch", Self::Patch),
        ("head", Self::Head),
        ("options", Self::Options),
    ];

    /// Get the method name as a token for code generation.
    #[must_use]
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "Get",
            Self::Post => "Post",
            Self::Put => "Put",
            Self::Delete => "Delete",
            Self::Patch => "Patch",
            Self::Head => "Head",
            Self::Options => "Options",
        }
    }

    /// Parse an HTTP method from a string (case-insensitive).
    /// Returns `None` for unsupported methods.
    #[must_use]
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "DELETE" => Some(Self::Delete),
            "PATCH" => Some(Self::Patch),
            "HEAD" => Some(Self::Head),
            "OPTIONS" => Some(Self::Options),
            _ => None,
        }
    }
}

/// Case rules, by declared name and `carapace::Case` variant.
pub(crate) const CASE_RULES: [(&str, &str); 8] = [
    ("lowercase", "Lower"),
    ("UPPERCASE", "Upper"),
    ("camelCase", "Camel"),
    ("PascalCase", "Pascal"),
    ("snake_case", "Snake"),
    ("SCREAMING_SNAKE_CASE", "ScreamingSnake"),
    ("kebab-case", "Kebab"),
    ("SCREAMING-KEBAB-CASE", "ScreamingKebab"),
];

/// Body serializer declared with `serializer = ...`.
#[derive(Debug, Clone)]
pub(crate) enum SerializerSpec {
    /// `serializer = "json"`
    Json,
    /// `serializer = "form"`
    Form,
    /// `serializer = path::To::Type`, built with `Default`.
    Custom(syn::Path),
}

/// Naming strategy declared with `local_name = ...` / `remote_name = ...`.
#[derive(Debug, Clone)]
pub(crate) enum NamingSpec {
    /// A case rule, holding the `Case` variant name.
    Case(&'static str),
    /// `remote_name = path::To::Type`, built with `Default`.
    Custom(syn::Path),
}

/// Options parsed from the struct-level `#[rpc(...)]` attribute.
#[derive(Debug, Clone)]
pub(crate) struct RpcAttrs {
    pub(crate) method: HttpMethod,
    pub(crate) uri: String,
    pub(crate) serializer: Option<SerializerSpec>,
    pub(crate) local_naming: Option<NamingSpec>,
    pub(crate) remote_naming: Option<NamingSpec>,
    pub(crate) expected_content_type: Option<String>,
}

/// Role of a field, parsed from `#[fragment(N)]` / `#[query(...)]`.
#[derive(Debug, Clone)]
pub(crate) enum FieldAttr {
    /// `#[fragment(N)]`
    Fragment(usize, Span),
    /// `#[query]`, `#[query("name")]` or `#[query(name = "name")]`
    Query(Option<String>),
    /// No role attribute.
    Plain,
}

/// Parse the `#[rpc(...)]` attribute, if present.
pub(crate) fn parse_rpc_attrs(attrs: &[Attribute]) -> syn::Result<Option<RpcAttrs>> {
    let mut found = None;

    for attr in attrs {
        if !attr.path().is_ident("rpc") {
            continue;
        }
        if found.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                "duplicate #[rpc(...)] attribute",
            ));
        }
        found = Some(parse_rpc_attr(attr)?);
    }

    Ok(found)
}

fn parse_rpc_attr(attr: &Attribute) -> syn::Result<RpcAttrs> {
    let mut method: Option<HttpMethod> = None;
    let mut uri: Option<String> = None;
    let mut serializer = None;
    let mut local_naming = None;
    let mut remote_naming = None;
    let mut expected_content_type = None;

    let mut set_method = |value: HttpMethod, span: Span| {
        if let Some(previous) = method
            && previous != value
        {
            return Err(syn::Error::new(
                span,
                format!(
                    "conflicting HTTP methods: {} and {}",
                    previous.as_str().to_uppercase(),
                    value.as_str().to_uppercase()
                ),
            ));
        }
        method = Some(value);
        Ok(())
    };

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("method") {
            let value: LitStr = meta.value()?.parse()?;
            let parsed = HttpMethod::parse(&value.value()).ok_or_else(|| {
                syn::Error::new_spanned(
                    &value,
                    format!("unsupported HTTP method: \"{}\"", value.value()),
                )
            })?;
            set_method(parsed, value.span())?;
        } else if meta.path.is_ident("uri") {
            let value: LitStr = meta.value()?.parse()?;
            set_uri(&mut uri, value)?;
        } else if let Some((_, shorthand)) = HttpMethod::SHORTHANDS
            .iter()
            .find(|(key, _)| meta.path.is_ident(key))
        {
            let value: LitStr = meta.value()?.parse()?;
            set_method(*shorthand, meta.path.span())?;
            set_uri(&mut uri, value)?;
        } else if meta.path.is_ident("serializer") {
            let value = meta.value()?;
            serializer = Some(if value.peek(LitStr) {
                let lit: LitStr = value.parse()?;
                match lit.value().to_lowercase().as_str() {
                    "json" => SerializerSpec::Json,
                    "form" => SerializerSpec::Form,
                    other => {
                        return Err(syn::Error::new_spanned(
                            &lit,
                            format!(
                                "unknown serializer: \"{other}\". Expected \"json\", \"form\" \
                                 or a path to a BodySerializer type"
                            ),
                        ));
                    }
                }
            } else {
                SerializerSpec::Custom(value.parse()?)
            });
        } else if meta.path.is_ident("local_name") {
            local_naming = Some(parse_naming(&meta)?);
        } else if meta.path.is_ident("remote_name") {
            remote_naming = Some(parse_naming(&meta)?);
        } else if meta.path.is_ident("expected_content_type") {
            let value: LitStr = meta.value()?.parse()?;
            expected_content_type = Some(value.value());
        } else {
            return Err(meta.error(
                "unknown rpc attribute. Expected one of: method, uri, get, post, put, delete, \
                 patch, head, options, serializer, local_name, remote_name, expected_content_type",
            ));
        }
        Ok(())
    })?;

    let uri = uri.ok_or_else(|| {
        syn::Error::new_spanned(
            attr,
            "missing URI: use #[rpc(uri = \"...\")] or a method shorthand like #[rpc(get = \"...\")]",
        )
    })?;

    Ok(RpcAttrs {
        method: method.unwrap_or_default(),
        uri,
        serializer,
        local_naming,
        remote_naming,
        expected_content_type,
    })
}

fn set_uri(uri: &mut Option<String>, value: LitStr) -> syn::Result<()> {
    if uri.is_some() {
        return Err(syn::Error::new_spanned(&value, "URI declared more than once"));
    }
    *uri = Some(value.value());
    Ok(())
}

fn parse_naming(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<NamingSpec> {
    let value = meta.value()?;
    if !value.peek(LitStr) {
        return Ok(NamingSpec::Custom(value.parse()?));
    }

    let lit: LitStr = value.parse()?;
    parse_case(&lit.value())
        .map(NamingSpec::Case)
        .ok_or_else(|| {
            syn::Error::new_spanned(
                &lit,
                format!(
                    "unknown case: \"{}\". Expected one of: lowercase, UPPERCASE, camelCase, \
                     PascalCase, snake_case, SCREAMING_SNAKE_CASE, kebab-case, SCREAMING-KEBAB-CASE",
                    lit.value()
                ),
            )
        })
}

/// Map a declared case name to its `Case` variant.
pub(crate) fn parse_case(name: &str) -> Option<&'static str> {
    CASE_RULES
        .iter()
        .find(|(declared, _)| *declared == name)
        .map(|(_, variant)| *variant)
}

/// Parse the role attribute of a field.
pub(crate) fn parse_field_attr(field: &syn::Field) -> syn::Result<FieldAttr> {
    let mut role = FieldAttr::Plain;

    for attr in &field.attrs {
        let parsed = if attr.path().is_ident("fragment") {
            let position: LitInt = attr.parse_args()?;
            FieldAttr::Fragment(position.base10_parse()?, position.span())
        } else if attr.path().is_ident("query") {
            FieldAttr::Query(parse_query_name(attr)?)
        } else {
            continue;
        };

        if !matches!(role, FieldAttr::Plain) {
            return Err(syn::Error::new_spanned(
                attr,
                "a field can be either a #[fragment] or a #[query], once",
            ));
        }
        role = parsed;
    }

    Ok(role)
}

/// Parse the query name from `#[query]`, `#[query("name")]` or `#[query(name = "name")]`.
fn parse_query_name(attr: &Attribute) -> syn::Result<Option<String>> {
    let syn::Meta::List(meta_list) = &attr.meta else {
        return Ok(None);
    };

    if let Ok(str_lit) = syn::parse2::<LitStr>(meta_list.tokens.clone()) {
        return Ok(Some(str_lit.value()));
    }

    let mut name = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("name") {
            let value: LitStr = meta.value()?.parse()?;
            name = Some(value.value());
            Ok(())
        } else {
            Err(meta.error("expected `name = \"...\"`"))
        }
    })?;
    Ok(name)
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use syn::parse_quote;

    use super::*;

    fn rpc(attr: Attribute) -> syn::Result<Option<RpcAttrs>> {
        parse_rpc_attrs(&[attr])
    }

    #[test]
    fn http_method_parse() {
        assert_eq!(HttpMethod::parse("get"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::parse("PATCH"), Some(HttpMethod::Patch));
        assert_eq!(HttpMethod::parse("TRACE"), None);
        assert_eq!(HttpMethod::Delete.as_str(), "Delete");
    }

    #[test]
    fn rpc_method_and_uri() {
        let attrs = rpc(parse_quote!(#[rpc(method = "POST", uri = "/users")]))
            .expect("parse")
            .expect("present");
        assert_eq!(attrs.method, HttpMethod::Post);
        assert_eq!(attrs.uri, "/users");
        assert!(attrs.serializer.is_none());
    }

    #[test]
    fn rpc_shorthand() {
        let attrs = rpc(parse_quote!(#[rpc(delete = "/users/%1$s")]))
            .expect("parse")
            .expect("present");
        assert_eq!(attrs.method, HttpMethod::Delete);
        assert_eq!(attrs.uri, "/users/%1$s");
    }

    #[test]
    fn rpc_method_defaults_to_get() {
        let attrs = rpc(parse_quote!(#[rpc(uri = "/ping")]))
            .expect("parse")
            .expect("present");
        assert_eq!(attrs.method, HttpMethod::Get);
    }

    #[test]
    fn rpc_absent() {
        let attrs: Attribute = parse_quote!(#[derive(Debug)]);
        assert!(rpc(attrs).expect("parse").is_none());
    }

    #[test]
    fn rpc_conflicting_methods() {
        let err = rpc(parse_quote!(#[rpc(method = "GET", post = "/users")])).expect_err("conflict");
        assert!(err.to_string().contains("conflicting HTTP methods"));
    }

    #[test]
    fn rpc_missing_uri() {
        let err = rpc(parse_quote!(#[rpc(method = "GET")])).expect_err("missing uri");
        assert!(err.to_string().contains("missing URI"));
    }

    #[test]
    fn rpc_unknown_key() {
        let err = rpc(parse_quote!(#[rpc(get = "/x", timeout = "1s")])).expect_err("unknown");
        assert!(err.to_string().contains("unknown rpc attribute"));
    }

    #[test]
    fn rpc_serializer() {
        let attrs = rpc(parse_quote!(#[rpc(post = "/x", serializer = "json")]))
            .expect("parse")
            .expect("present");
        assert!(matches!(attrs.serializer, Some(SerializerSpec::Json)));

        let attrs = rpc(parse_quote!(#[rpc(post = "/x", serializer = crate::Xml)]))
            .expect("parse")
            .expect("present");
        let_assert!(Some(SerializerSpec::Custom(path)) = attrs.serializer);
        check!(!path.is_ident("Xml"));
        check!(path.segments.len() == 2);

        let err = rpc(parse_quote!(#[rpc(post = "/x", serializer = "yaml")])).expect_err("yaml");
        assert!(err.to_string().contains("unknown serializer"));
    }

    #[test]
    fn rpc_naming() {
        let attrs = rpc(parse_quote!(
            #[rpc(get = "/x", local_name = "snake_case", remote_name = my::Naming)]
        ))
        .expect("parse")
        .expect("present");
        assert!(matches!(attrs.local_naming, Some(NamingSpec::Case("Snake"))));
        assert!(matches!(attrs.remote_naming, Some(NamingSpec::Custom(_))));

        let err = rpc(parse_quote!(#[rpc(get = "/x", remote_name = "Title Case")]))
            .expect_err("unknown case");
        assert!(err.to_string().contains("unknown case"));
    }

    #[test]
    fn case_rules_cover_every_variant() {
        for (declared, variant) in CASE_RULES {
            assert_eq!(parse_case(declared), Some(variant));
        }
        assert_eq!(parse_case("camelcase"), None);
    }

    #[test]
    fn field_roles() {
        let field: syn::Field = parse_quote!(#[fragment(2)] id: u64);
        assert!(matches!(
            parse_field_attr(&field).expect("parse"),
            FieldAttr::Fragment(2, _)
        ));

        let field: syn::Field = parse_quote!(#[query] page: u32);
        assert!(matches!(
            parse_field_attr(&field).expect("parse"),
            FieldAttr::Query(None)
        ));

        let field: syn::Field = parse_quote!(#[query("q")] term: String);
        assert!(matches!(
            parse_field_attr(&field).expect("parse"),
            FieldAttr::Query(Some(name)) if name == "q"
        ));

        let field: syn::Field = parse_quote!(#[query(name = "limit")] page_size: u32);
        assert!(matches!(
            parse_field_attr(&field).expect("parse"),
            FieldAttr::Query(Some(name)) if name == "limit"
        ));

        let field: syn::Field = parse_quote!(#[serde(skip)] cache: u32);
        assert!(matches!(
            parse_field_attr(&field).expect("parse"),
            FieldAttr::Plain
        ));
    }

    #[test]
    fn field_with_two_roles() {
        let field: syn::Field = parse_quote!(#[fragment(1)] #[query] id: u64);
        assert!(parse_field_attr(&field).is_err());
    }
}
