// Copyright 2022 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, Field, Fields, GenericArgument, Ident, PathArguments, Result, Type,
    TypePath,
};

/// Helper function to derive the trait that designates an empty enum as a singly linked list.
pub(crate) fn derive_list_enum_trait(input: DeriveInput, list_type_name: &str) -> Result<TokenStream> {
    if let Data::Enum(e) = &input.data {
        if e.variants.is_empty() {
            let ident = &input.ident;

            return Ok(quote! {
                impl ::slist::IsSlist for #ident {}
            });
        }
    }

    Err(Error::new_spanned(
        input,
        format!("{} can only be derived for an empty enum", list_type_name),
    ))
}

/// Helper function to derive SlistElement.
pub(crate) fn derive_list_struct_trait(input: DeriveInput) -> Result<TokenStream> {
    let s = match &input.data {
        Data::Struct(s) => s,
        _ => {
            return Err(Error::new_spanned(
                input,
                "SlistElement can only be derived for structs",
            ))
        }
    };

    let f = match &s.fields {
        Fields::Named(f) => f,
        _ => {
            return Err(Error::new_spanned(
                input,
                "SlistElement can only be derived for structs with named fields",
            ))
        }
    };

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let tokens = f.named.iter().filter_map(|field| {
        parse_element_field(field).map(|info| {
            let field_ident = info.ident;
            let list_ty = info.list_ty;

            quote! {
                impl #impl_generics ::slist::HasSlistLink<#list_ty> for #ident #ty_generics #where_clause {
                    const OFFSET: usize = ::core::mem::offset_of!(Self, #field_ident);
                }

                const _: () = {
                    // Only type-checks if the field really is the link of this list.
                    #[allow(dead_code)]
                    fn assert_link_field #impl_generics (
                        element: &#ident #ty_generics,
                    ) -> &::slist::typed::SlistLink<#ident #ty_generics, #list_ty> #where_clause {
                        &element.#field_ident
                    }
                };
            }
        })
    });
    let output = quote! {
        #(#tokens)*
    };

    if output.is_empty() {
        return Err(Error::new_spanned(input, "Found no SlistLink fields"));
    }

    Ok(output)
}

pub(crate) struct ElementFieldInfo<'a> {
    /// The "link" in `link: slist::typed::SlistLink<Self, mylists::MyList>`
    pub(crate) ident: &'a Ident,
    /// The "mylists::MyList" in `link: slist::typed::SlistLink<Self, mylists::MyList>`
    pub(crate) list_ty: &'a TypePath,
}

/// Checks if the given field is a link field of an element structure and returns some
/// information about it.
///
/// `field` can be the syntax tree of e.g.
/// * `link: SlistLink<Self, MyList>`
/// * `link: slist::typed::SlistLink<Self, mylists::MyList>`
pub(crate) fn parse_element_field(field: &Field) -> Option<ElementFieldInfo<'_>> {
    let ident = field.ident.as_ref()?;

    // Get the last segment of the type path and check it against the type name.
    // A similarly named foreign type slips through here, but is then rejected by the
    // `assert_link_field` check emitted for it.
    let ty_path = match &field.ty {
        Type::Path(ty_path) => ty_path,
        _ => return None,
    };

    let segment = ty_path.path.segments.last()?;
    if segment.ident != "SlistLink" {
        return None;
    }

    let ab_args = match &segment.arguments {
        PathArguments::AngleBracketed(ab_args) => ab_args,
        _ => return None,
    };
    if ab_args.args.len() != 2 {
        return None;
    }

    // The second type parameter identifies the list.
    let arg = ab_args.args.last()?;
    let ty = match &arg {
        GenericArgument::Type(ty) => ty,
        _ => return None,
    };
    let list_ty = match &ty {
        Type::Path(list_ty) => list_ty,
        _ => return None,
    };

    Some(ElementFieldInfo { ident, list_ty })
}
