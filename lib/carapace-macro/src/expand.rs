//! `#[derive(RpcObject)]` expansion.

use std::collections::BTreeMap;

use proc_macro2::TokenStream;
use syn::{Data, DeriveInput, Fields, parse2};

use crate::attrs::{FieldAttr, parse_field_attr, parse_rpc_attrs};
use crate::codegen::{RpcField, generate_rpc_object_impl};

/// Expand the `#[derive(RpcObject)]` macro.
pub fn expand_rpc_object_derive(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;

    // Only support structs with named fields
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "RpcObject derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "RpcObject derive only supports structs",
            ));
        }
    };

    let rpc = parse_rpc_attrs(&input.attrs)?;

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        fields.push(RpcField {
            ident,
            ty: &field.ty,
            role: parse_field_attr(field)?,
        });
    }

    check_fragment_positions(&fields)?;

    Ok(generate_rpc_object_impl(&input, rpc.as_ref(), &fields))
}

/// Fragment positions must be exactly `1..=N`.
fn check_fragment_positions(fields: &[RpcField<'_>]) -> syn::Result<()> {
    let mut positions = BTreeMap::new();
    for field in fields {
        if let FieldAttr::Fragment(position, span) = field.role
            && positions.insert(position, span).is_some()
        {
            return Err(syn::Error::new(
                span,
                format!("fragment position {position} declared more than once"),
            ));
        }
    }

    for (expected, (&position, &span)) in (1..).zip(&positions) {
        if position != expected {
            return Err(syn::Error::new(
                span,
                format!(
                    "fragment positions must be contiguous from 1: position {expected} is missing"
                ),
            ));
        }
    }

    Ok(())
}
