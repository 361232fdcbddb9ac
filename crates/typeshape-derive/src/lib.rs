// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse_macro_input, parse_quote, Attribute, Data, DeriveInput, Fields, LitStr, Visibility,
};

/// Container-level `#[shape(...)]` options.
#[derive(Default)]
struct ContainerAttrs {
    type_marshaler: bool,
    struct_name: bool,
    anonymous: bool,
}

/// Field-level `#[shape(...)]` options.
#[derive(Default)]
struct FieldAttrs {
    tag: Option<LitStr>,
    embed: bool,
}

/// `#[derive(Shape)]` macro: generates a `typeshape::Shape` impl
///
/// Supports structs with named fields and unit structs. Every field type must
/// itself implement `Shape`; generic parameters get a `Shape` bound.
///
/// Field attributes:
/// - `#[shape(tag = "name,omitempty,set")]`: tag string, parsed at inference time
/// - `#[shape(embed)]`: embedded struct, flattened unless the tag renames it
///
/// Container attributes:
/// - `#[shape(type_marshaler)]`: delegate to `<Self as TypeMarshaler>::marshal_type`
/// - `#[shape(struct_name)]`: name the struct with `<Self as StructNamer>::struct_name`
/// - `#[shape(anonymous)]`: declared name is empty
///
/// Only `pub` fields are visible.
///
/// Example:
/// ```ignore
/// use typeshape::Shape;
///
/// #[derive(Shape)]
/// pub struct Photo {
///     #[shape(tag = ",set")]
///     pub faces: Vec<Face>,
///     #[shape(embed)]
///     pub meta: Meta,
///     #[shape(tag = "-")]
///     pub thumbnail: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(Shape, attributes(shape))]
pub fn derive_shape(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let container = parse_container_attrs(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(f) => f.named.iter().collect::<Vec<_>>(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Only named fields are supported",
                ))
            }
        },
        _ => return Err(syn::Error::new_spanned(input, "Only structs are supported")),
    };

    let mut native_fields = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "Field must have a name"));
        };
        let attrs = parse_field_attrs(&field.attrs)?;
        let field_name = ident.to_string();
        let field_name = field_name.strip_prefix("r#").unwrap_or(&field_name);
        let ty = &field.ty;

        let mut tokens = quote! {
            ::typeshape::NativeField::new(#field_name, ::typeshape::TypeHandle::of::<#ty>())
        };
        if !matches!(field.vis, Visibility::Public(_)) {
            tokens.extend(quote! { .hidden() });
        }
        if attrs.embed {
            tokens.extend(quote! { .embedded() });
        }
        if let Some(tag) = &attrs.tag {
            tokens.extend(quote! { .tag(#tag) });
        }
        native_fields.push(tokens);
    }

    let declared_name = if container.anonymous {
        String::new()
    } else {
        name.to_string()
    };

    let mut hooks = proc_macro2::TokenStream::new();
    if container.type_marshaler {
        hooks.extend(quote! {
            .with_type_marshaler(<Self as ::typeshape::TypeMarshaler>::marshal_type)
        });
    }
    if container.struct_name {
        hooks.extend(quote! {
            .with_struct_namer(<Self as ::typeshape::StructNamer>::struct_name)
        });
    }

    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::typeshape::Shape));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::typeshape::Shape for #name #ty_generics #where_clause {
            fn native_type() -> ::typeshape::NativeType {
                ::typeshape::NativeType::structure(
                    #declared_name,
                    ::std::vec![#(#native_fields),*],
                )
                #hooks
            }
        }
    })
}

fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut parsed = ContainerAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("shape")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("type_marshaler") {
                parsed.type_marshaler = true;
            } else if meta.path.is_ident("struct_name") {
                parsed.struct_name = true;
            } else if meta.path.is_ident("anonymous") {
                parsed.anonymous = true;
            } else {
                return Err(meta.error("unsupported shape container attribute"));
            }
            Ok(())
        })?;
    }
    Ok(parsed)
}

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut parsed = FieldAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("shape")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("tag") {
                parsed.tag = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("embed") {
                parsed.embed = true;
            } else {
                return Err(meta.error("unsupported shape field attribute"));
            }
            Ok(())
        })?;
    }
    Ok(parsed)
}
