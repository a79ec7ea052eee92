//! Derive macro implementation for envbind

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Fields};

mod attrs;

use attrs::FieldAttrs;

/// `EnvConf` derive macro
///
/// Implements `envbind::EnvConf` and `envbind::EnvField` for a struct with
/// named fields, so it can be loaded directly or nested inside another
/// record.
///
/// # Supported Attributes
///
/// **Field-level**:
/// - `#[env(name = "NAME")]`: Exact environment variable name
/// - `#[env(alias = "NAME")]`: Name segment replacing the derived one
/// - `#[env(flatten)]`: Bind a nested record without adding a name segment
/// - `#[env(skip)]`: Do not bind this field
///
/// # Example
///
/// See the `envbind` crate documentation for usage examples.
#[proc_macro_derive(EnvConf, attributes(env))]
pub fn derive_envconf(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "EnvConf only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "EnvConf only supports structs",
            ));
        }
    };

    let mut generics = input.generics.clone();
    let is_generic = !generics.params.is_empty();
    let mut field_binds = Vec::new();

    for field in fields {
        let attrs = FieldAttrs::from_field(field)?;
        if attrs.skip {
            continue;
        }

        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let field_type = &field.ty;
        let ident = field_name.unraw().to_string();

        let name = option_tokens(attrs.name.as_deref());
        let alias = option_tokens(attrs.alias.as_deref());
        let flatten = attrs.flatten;

        if is_generic {
            generics
                .make_where_clause()
                .predicates
                .push(parse_quote!(#field_type: ::envbind::EnvField));
        }

        field_binds.push(quote! {
            {
                const SPEC: ::envbind::FieldSpec = ::envbind::FieldSpec {
                    ident: #ident,
                    name: #name,
                    alias: #alias,
                    flatten: #flatten,
                };
                found |= loader.bind_field(&mut self.#field_name, &SPEC, segments)?;
            }
        });
    }

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::envbind::EnvConf for #struct_name #ty_generics #where_clause {
            #[allow(unused_mut, unused_variables)]
            fn bind_fields(
                &mut self,
                loader: &::envbind::Loader,
                segments: &[::std::string::String],
            ) -> ::core::result::Result<bool, ::envbind::EnvError> {
                let mut found = false;
                #(#field_binds)*
                ::core::result::Result::Ok(found)
            }
        }

        impl #impl_generics ::envbind::EnvField for #struct_name #ty_generics #where_clause {
            fn assign(
                &mut self,
                _text: &str,
                _loader: &::envbind::Loader,
            ) -> ::core::result::Result<bool, ::envbind::EnvError> {
                ::core::result::Result::Ok(false)
            }

            fn descend(
                &mut self,
                loader: &::envbind::Loader,
                segments: &[::std::string::String],
            ) -> ::core::result::Result<bool, ::envbind::EnvError> {
                loader.bind_record(self, segments)
            }
        }
    })
}

fn option_tokens(value: Option<&str>) -> TokenStream2 {
    match value {
        Some(value) => quote!(::core::option::Option::Some(#value)),
        None => quote!(::core::option::Option::None),
    }
}
