use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Ident, Type};

#[derive(Default)]
pub(crate) struct ContainerAttrs {
    pub default: bool,
    pub accessors: bool,
    pub crate_path: Option<syn::Path>,
}

impl ContainerAttrs {
    /// Path the generated code uses to reach `polyol_core`.
    pub fn crate_path(&self) -> TokenStream {
        match &self.crate_path {
            Some(path) => quote! { #path },
            None => quote! { ::polyol_core },
        }
    }
}

#[derive(Default)]
pub(crate) struct FieldAttrs {
    pub skip: bool,
    pub rename: Option<String>,
    pub read_only: bool,
    pub write_only: bool,
}

/// A named field that takes part in the attribute table.
pub(crate) struct BeanField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    /// Attribute name (field name unless renamed).
    pub name: String,
    pub readable: bool,
    pub writable: bool,
}

pub(crate) fn parse_container_attrs(attrs: &[syn::Attribute]) -> syn::Result<ContainerAttrs> {
    let mut result = ContainerAttrs::default();

    for attr in attrs {
        if !attr.path().is_ident("bean") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                result.default = true;
            } else if meta.path.is_ident("accessors") {
                result.accessors = true;
            } else if meta.path.is_ident("crate") {
                let value: syn::LitStr = meta.value()?.parse()?;
                result.crate_path = Some(value.parse()?);
            } else {
                return Err(meta.error("expected `default`, `accessors` or `crate = \"...\"`"));
            }
            Ok(())
        })?;
    }

    Ok(result)
}

pub(crate) fn parse_field_attrs(attrs: &[syn::Attribute]) -> syn::Result<FieldAttrs> {
    let mut result = FieldAttrs::default();

    for attr in attrs {
        if !attr.path().is_ident("bean") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                result.skip = true;
            } else if meta.path.is_ident("rename") {
                let value: syn::LitStr = meta.value()?.parse()?;
                if value.value().is_empty() {
                    return Err(syn::Error::new_spanned(value, "attribute name cannot be empty"));
                }
                result.rename = Some(value.value());
            } else if meta.path.is_ident("read_only") {
                result.read_only = true;
            } else if meta.path.is_ident("write_only") {
                result.write_only = true;
            } else {
                return Err(meta.error(
                    "expected `skip`, `rename = \"...\"`, `read_only` or `write_only`",
                ));
            }
            Ok(())
        })?;
    }

    Ok(result)
}

/// Collects the fields of a struct with named fields, rejecting anything else.
pub(crate) fn collect_fields(input: &DeriveInput) -> syn::Result<Vec<BeanField<'_>>> {
    let named = match &input.data {
        syn::Data::Struct(syn::DataStruct {
            fields: syn::Fields::Named(named),
            ..
        }) => named,
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Bean can only be derived for structs with named fields",
            ));
        }
    };

    let mut fields = Vec::new();
    let mut seen = HashSet::new();

    for field in &named.named {
        let attrs = parse_field_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        if attrs.read_only && attrs.write_only {
            return Err(syn::Error::new_spanned(
                field,
                "a field cannot be both `read_only` and `write_only`",
            ));
        }

        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let name = attrs.rename.unwrap_or_else(|| unraw(ident));
        if !seen.insert(name.clone()) {
            return Err(syn::Error::new_spanned(
                field,
                format!("duplicate bean attribute `{name}`"),
            ));
        }

        fields.push(BeanField {
            ident,
            ty: &field.ty,
            name,
            readable: !attrs.write_only,
            writable: !attrs.read_only,
        });
    }

    Ok(fields)
}

/// Field name without a raw identifier prefix (`r#type` -> `type`).
fn unraw(ident: &Ident) -> String {
    let name = ident.to_string();
    match name.strip_prefix("r#") {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}
