use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::attrs::{BeanField, ContainerAttrs};

/// Generates the `Bean` impl with its `describe()` method.
pub(crate) fn generate_describe(
    input: &DeriveInput,
    container: &ContainerAttrs,
    fields: &[BeanField<'_>],
) -> syn::Result<TokenStream> {
    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "Bean cannot be derived for types with lifetime parameters",
        ));
    }

    let krate = container.crate_path();
    let self_type = &input.ident;
    let where_clause = build_where_clause(input, container, fields, &krate);
    let (impl_generics, ty_generics, _) = input.generics.split_for_impl();

    let registrations = fields.iter().map(|field| register_field(field, &krate));
    let constructor = container.default.then(|| {
        quote! { .constructor(<Self as ::std::default::Default>::default) }
    });

    Ok(quote! {
        impl #impl_generics #krate::Bean for #self_type #ty_generics #where_clause {
            fn describe() -> #krate::DescriptorBuilder<Self> {
                #krate::DescriptorBuilder::new()
                    #(#registrations)*
                    #constructor
            }
        }
    })
}

fn register_field(field: &BeanField<'_>, krate: &TokenStream) -> TokenStream {
    let BeanField { ident, ty, name, .. } = field;
    let kind = quote! { <#ty as #krate::PropertyValue>::kind() };
    let read = quote! {
        |bean: &Self| ::std::result::Result::Ok(#krate::PropertyValue::to_value(&bean.#ident))
    };
    let write = quote! {
        |bean: &mut Self, value: #krate::Value| {
            bean.#ident = <#ty as #krate::PropertyValue>::from_value(value)?;
            ::std::result::Result::Ok(())
        }
    };

    match (field.readable, field.writable) {
        (true, true) => quote! { .property(#name, #kind, #read, #write) },
        (true, false) => quote! { .readable(#name, #kind, #read) },
        (false, true) => quote! { .writable(#name, #kind, #write) },
        (false, false) => quote! {},
    }
}

/// Type parameters must be shareable across threads, and every field type
/// must convert to and from `Value`.
fn build_where_clause(
    input: &DeriveInput,
    container: &ContainerAttrs,
    fields: &[BeanField<'_>],
    krate: &TokenStream,
) -> TokenStream {
    let existing = input
        .generics
        .where_clause
        .as_ref()
        .map(|w| w.predicates.iter().collect::<Vec<_>>())
        .unwrap_or_default();

    let type_params: Vec<_> = input.generics.type_params().map(|p| &p.ident).collect();
    if type_params.is_empty() {
        if existing.is_empty() {
            return quote! {};
        }
        return quote! { where #(#existing),* };
    }

    let param_bounds = type_params.iter().map(|ident| {
        quote! { #ident: ::std::marker::Send + ::std::marker::Sync + 'static }
    });
    let field_bounds = fields.iter().map(|field| {
        let ty = field.ty;
        quote! { #ty: #krate::PropertyValue }
    });
    let self_type = &input.ident;
    let (_, ty_generics, _) = input.generics.split_for_impl();
    let default_bound = container
        .default
        .then(|| quote! { #self_type #ty_generics: ::std::default::Default, });

    quote! {
        where
            #(#existing,)*
            #(#param_bounds,)*
            #(#field_bounds,)*
            #default_bound
    }
}
