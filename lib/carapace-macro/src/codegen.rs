//! Code generation for `#[derive(RpcObject)]`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{DeriveInput, Ident, Type};

use crate::attrs::{FieldAttr, NamingSpec, RpcAttrs, SerializerSpec};

/// A named field with its parsed role.
pub(crate) struct RpcField<'a> {
    pub(crate) ident: &'a Ident,
    pub(crate) ty: &'a Type,
    pub(crate) role: FieldAttr,
}

impl RpcField<'_> {
    /// The field name as written in descriptors (raw identifiers unprefixed).
    pub(crate) fn name(&self) -> String {
        self.ident.unraw().to_string()
    }
}

/// Generate the `RpcObject` implementation.
pub(crate) fn generate_rpc_object_impl(
    input: &DeriveInput,
    rpc: Option<&RpcAttrs>,
    fields: &[RpcField<'_>],
) -> TokenStream {
    let name = &input.ident;
    let type_name = name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let declaration = match rpc {
        Some(rpc) => {
            let declaration = generate_declaration(rpc);
            quote! { ::core::option::Option::Some(#declaration) }
        }
        None => quote! { ::core::option::Option::None },
    };
    let descriptors = fields.iter().map(generate_descriptor);
    let value_arms = fields
        .iter()
        .filter(|field| !matches!(field.role, FieldAttr::Plain))
        .map(generate_value_arm);

    quote! {
        impl #impl_generics ::carapace::RpcObject for #name #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn declaration(&self) -> ::core::option::Option<::carapace::RpcDeclaration> {
                #declaration
            }

            fn fields(&self) -> &'static [::carapace::FieldDescriptor] {
                const FIELDS: &[::carapace::FieldDescriptor] = &[#(#descriptors),*];
                FIELDS
            }

            fn field_value(
                &self,
                name: &str,
            ) -> ::core::option::Option<::carapace::FieldValue<'_>> {
                match name {
                    #(#value_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn to_body_value(
                &self,
            ) -> ::carapace::serde_json::Result<::carapace::serde_json::Value> {
                ::carapace::serde_json::to_value(self)
            }
        }
    }
}

/// Generate the `RpcDeclaration` expression.
pub(crate) fn generate_declaration(rpc: &RpcAttrs) -> TokenStream {
    let method = format_ident!("{}", rpc.method.as_str());
    let uri = &rpc.uri;
    let mut declaration = quote! {
        ::carapace::RpcDeclaration::new(::carapace::Method::#method, #uri)
    };

    if let Some(serializer) = &rpc.serializer {
        let serializer = match serializer {
            SerializerSpec::Json => quote! { ::carapace::JsonSerializer },
            SerializerSpec::Form => quote! { ::carapace::FormSerializer },
            SerializerSpec::Custom(path) => {
                quote! { <#path as ::core::default::Default>::default() }
            }
        };
        declaration = quote! { #declaration.with_serializer(#serializer) };
    }

    if let Some(naming) = &rpc.local_naming {
        let naming = generate_naming(naming);
        declaration = quote! { #declaration.with_local_naming(#naming) };
    }

    if let Some(naming) = &rpc.remote_naming {
        let naming = generate_naming(naming);
        declaration = quote! { #declaration.with_remote_naming(#naming) };
    }

    if let Some(content_type) = &rpc.expected_content_type {
        declaration = quote! { #declaration.with_expected_content_type(#content_type) };
    }

    declaration
}

fn generate_naming(naming: &NamingSpec) -> TokenStream {
    match naming {
        NamingSpec::Case(variant) => {
            let variant = format_ident!("{}", variant);
            quote! { ::carapace::Case::#variant }
        }
        NamingSpec::Custom(path) => quote! { <#path as ::core::default::Default>::default() },
    }
}

/// Generate one `FieldDescriptor` constructor call.
fn generate_descriptor(field: &RpcField<'_>) -> TokenStream {
    let name = field.name();
    let type_name = type_name(field.ty);

    match &field.role {
        FieldAttr::Fragment(position, _) => quote! {
            ::carapace::FieldDescriptor::fragment(#name, #type_name, #position)
        },
        FieldAttr::Query(Some(remote)) => quote! {
            ::carapace::FieldDescriptor::query(#name, #type_name, ::core::option::Option::Some(#remote))
        },
        FieldAttr::Query(None) => quote! {
            ::carapace::FieldDescriptor::query(#name, #type_name, ::core::option::Option::None)
        },
        FieldAttr::Plain => quote! {
            ::carapace::FieldDescriptor::plain(#name, #type_name)
        },
    }
}

fn generate_value_arm(field: &RpcField<'_>) -> TokenStream {
    let name = field.name();
    let ident = field.ident;
    quote! {
        #name => ::core::option::Option::Some(
            ::carapace::ToFieldValue::to_field_value(&self.#ident)
        ),
    }
}

/// The declared type as compact text, e.g. `Option<String>`.
pub(crate) fn type_name(ty: &Type) -> String {
    quote!(#ty).to_string().replace(' ', "")
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;
    use crate::attrs::HttpMethod;

    fn attrs() -> RpcAttrs {
        RpcAttrs {
            method: HttpMethod::Post,
            uri: "/users".to_string(),
            serializer: None,
            local_naming: None,
            remote_naming: None,
            expected_content_type: None,
        }
    }

    #[test]
    fn test_type_name() {
        let ty: Type = parse_quote!(Option<String>);
        assert_eq!(type_name(&ty), "Option<String>");

        let ty: Type = parse_quote!(std::collections::HashMap<String, u32>);
        assert_eq!(type_name(&ty), "std::collections::HashMap<String,u32>");
    }

    #[test]
    fn test_declaration_minimal() {
        let tokens = generate_declaration(&attrs()).to_string();
        assert!(tokens.contains("Method :: Post"));
        assert!(tokens.contains("\"/users\""));
        assert!(!tokens.contains("with_serializer"));
    }

    #[test]
    fn test_declaration_full() {
        let rpc = RpcAttrs {
            serializer: Some(SerializerSpec::Form),
            local_naming: Some(NamingSpec::Case("Snake")),
            remote_naming: Some(NamingSpec::Custom(parse_quote!(my::Naming))),
            expected_content_type: Some("application/json".to_string()),
            ..attrs()
        };
        let tokens = generate_declaration(&rpc).to_string();
        assert!(tokens.contains("with_serializer (:: carapace :: FormSerializer)"));
        assert!(tokens.contains("with_local_naming (:: carapace :: Case :: Snake)"));
        assert!(tokens.contains("< my :: Naming as :: core :: default :: Default > :: default ()"));
        assert!(tokens.contains("with_expected_content_type (\"application/json\")"));
    }

    #[test]
    fn test_raw_identifier_name() {
        let ident: Ident = parse_quote!(r#type);
        let ty: Type = parse_quote!(String);
        let field = RpcField {
            ident: &ident,
            ty: &ty,
            role: FieldAttr::Query(None),
        };
        assert_eq!(field.name(), "type");
    }
}
