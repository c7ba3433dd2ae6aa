use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

mod accessors;
mod attrs;
mod describe;
mod types;

/// Attribute macro that turns a plain struct into a bean model.
///
/// This is syntax sugar that expands to:
/// ```ignore
/// #[derive(Debug, Clone, Default, Bean)]
/// #[bean(default, accessors)]
/// ```
///
/// # Example
///
/// ```ignore
/// use polyol_core::model;
///
/// #[model]
/// struct User {
///     name: String,
///     active: bool,
/// }
///
/// let mut user = User::default();
/// user.set_name("Ada".to_string());
/// assert!(!user.is_active());
/// ```
#[proc_macro_attribute]
pub fn model(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        let attr = proc_macro2::TokenStream::from(attr);
        return syn::Error::new_spanned(attr, "#[model] takes no arguments; use #[bean(...)]")
            .to_compile_error()
            .into();
    }

    let input = parse_macro_input!(item as DeriveInput);

    let output = quote! {
        #[derive(
            ::std::fmt::Debug,
            ::std::clone::Clone,
            ::std::default::Default,
            ::polyol_core::Bean
        )]
        #[bean(default, accessors)]
        #input
    };

    output.into()
}

/// Derive macro for the Bean trait.
///
/// Generates `describe()`, registering one attribute per named field with
/// read and write accessors that go through `PropertyValue`.
///
/// # Example
///
/// ```ignore
/// use polyol_core::Bean;
///
/// #[derive(Default, Bean)]
/// #[bean(default)]
/// struct User {
///     name: String,
///     #[bean(read_only)]
///     id: u64,
/// }
/// ```
///
/// # Attributes
///
/// On the struct:
/// - `#[bean(default)]` - Register `Default::default` as the zero-argument constructor
/// - `#[bean(accessors)]` - Generate `get_x`/`set_x` (`is_x` for bool) methods
/// - `#[bean(crate = "path")]` - Path to `polyol_core` if it was renamed
///
/// On fields:
/// - `#[bean(skip)]` - Leave the field out of the attribute table
/// - `#[bean(rename = "name")]` - Use a custom attribute name
/// - `#[bean(read_only)]` / `#[bean(write_only)]` - Register one direction only
#[proc_macro_derive(Bean, attributes(bean))]
pub fn derive_bean(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_bean_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_bean_impl(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let container = attrs::parse_container_attrs(&input.attrs)?;
    let fields = attrs::collect_fields(input)?;

    let describe_impl = describe::generate_describe(input, &container, &fields)?;
    let accessors_impl = if container.accessors {
        accessors::generate_accessors(input, &fields)?
    } else {
        quote! {}
    };

    Ok(quote! {
        #describe_impl
        #accessors_impl
    })
}
