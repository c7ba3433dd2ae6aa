use syn::Type;

/// True for a plain `bool` (or `std::primitive::bool`) field type.
pub(crate) fn is_bool(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "bool" && segment.arguments.is_none()),
        Type::Group(group) => is_bool(&group.elem),
        _ => false,
    }
}

/// The `T` of an `Option<T>` field type, if the field is optional.
pub(crate) fn option_inner(ty: &Type) -> Option<&Type> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => {
            let segment = type_path.path.segments.last()?;
            if segment.ident != "Option" {
                return None;
            }
            extract_single_generic_arg(&segment.arguments)
        }
        Type::Group(group) => option_inner(&group.elem),
        _ => None,
    }
}

/// Extract the single generic argument from angle brackets, e.g., T from Vec<T>.
fn extract_single_generic_arg(args: &syn::PathArguments) -> Option<&Type> {
    match args {
        syn::PathArguments::AngleBracketed(angle) if angle.args.len() == 1 => {
            match angle.args.first() {
                Some(syn::GenericArgument::Type(ty)) => Some(ty),
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(source: &str) -> Type {
        syn::parse_str(source).unwrap()
    }

    #[test]
    fn detects_bool() {
        assert!(is_bool(&ty("bool")));
        assert!(is_bool(&ty("std::primitive::bool")));
        assert!(!is_bool(&ty("Option<bool>")));
        assert!(!is_bool(&ty("String")));
    }

    #[test]
    fn unwraps_option() {
        let optional = ty("Option<Vec<u8>>");
        let inner = option_inner(&optional).unwrap();
        assert_eq!(inner, &ty("Vec<u8>"));

        assert!(option_inner(&ty("std::option::Option<u32>")).is_some());
        assert!(option_inner(&ty("Vec<u32>")).is_none());
        assert!(option_inner(&ty("Option")).is_none());
    }
}
