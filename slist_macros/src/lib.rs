// Copyright 2022 Colin Finck <colin@reactos.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

mod helpers;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

#[proc_macro_derive(Slist)]
pub fn derive_slist(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    helpers::derive_list_enum_trait(input, "Slist")
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

#[proc_macro_derive(SlistElement)]
pub fn derive_slist_element(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    helpers::derive_list_struct_trait(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
