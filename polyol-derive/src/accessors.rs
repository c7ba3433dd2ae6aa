use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Ident};

use crate::attrs::BeanField;
use crate::types::{is_bool, option_inner};

/// Generates `get_x`/`set_x` methods (`is_x` for bool fields) named after
/// each attribute, so `accessor!(Type::get_x)` decodes back to `x`.
pub(crate) fn generate_accessors(
    input: &DeriveInput,
    fields: &[BeanField<'_>],
) -> syn::Result<TokenStream> {
    let self_type = &input.ident;
    let vis = &input.vis;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut methods = Vec::new();
    for field in fields {
        if field.readable {
            methods.push(getter(field, vis)?);
        }
        if field.writable {
            methods.push(setter(field, vis)?);
        }
    }

    Ok(quote! {
        #[allow(non_snake_case, dead_code)]
        impl #impl_generics #self_type #ty_generics #where_clause {
            #(#methods)*
        }
    })
}

fn getter(field: &BeanField<'_>, vis: &syn::Visibility) -> syn::Result<TokenStream> {
    let BeanField { ident, ty, .. } = field;

    if is_bool(ty) {
        let method = method_ident("is", field)?;
        return Ok(quote! {
            #vis fn #method(&self) -> bool {
                self.#ident
            }
        });
    }

    let method = method_ident("get", field)?;
    Ok(match option_inner(ty) {
        Some(inner) => quote! {
            #vis fn #method(&self) -> ::std::option::Option<&#inner> {
                self.#ident.as_ref()
            }
        },
        None => quote! {
            #vis fn #method(&self) -> &#ty {
                &self.#ident
            }
        },
    })
}

fn setter(field: &BeanField<'_>, vis: &syn::Visibility) -> syn::Result<TokenStream> {
    let BeanField { ident, ty, .. } = field;
    let method = method_ident("set", field)?;
    Ok(quote! {
        #vis fn #method(&mut self, value: #ty) {
            self.#ident = value;
        }
    })
}

fn method_ident(prefix: &str, field: &BeanField<'_>) -> syn::Result<Ident> {
    if !decodes_to_itself(&field.name) {
        return Err(syn::Error::new_spanned(
            field.ident,
            format!(
                "attribute name `{}` must start with a lowercase character to get accessors; \
                 `{prefix}_{}` would decode to a different name",
                field.name, field.name
            ),
        ));
    }

    let raw = format!("{prefix}_{}", field.name);
    syn::parse_str::<Ident>(&raw).map_err(|_| {
        syn::Error::new_spanned(
            field.ident,
            format!(
                "attribute name `{}` does not form a valid method name `{raw}`",
                field.name
            ),
        )
    })
}

/// Accessor names are decoded by lower-casing the first character after the
/// prefix, so the attribute name must already start lowercase.
fn decodes_to_itself(name: &str) -> bool {
    let Some(first) = name.chars().next() else {
        return false;
    };
    let mut lower = first.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => single == first,
        _ => true,
    }
}
