use std::fmt;
use std::marker::PhantomData;

use crate::error::{BeanError, Result};

/// Accessor prefixes, longest first so `get_` wins over `get`.
const PREFIXES: [&str; 6] = ["get_", "set_", "get", "set", "is_", "is"];

/// Derives the property name from a getter, setter or `is` accessor name.
///
/// `get`/`set` (3 chars) are tried before `is` (2 chars). A snake_case
/// separator directly after the prefix belongs to it, so `get_Foo` decodes
/// to `foo` rather than `_Foo`. The first character of the remainder is
/// lower-cased, nothing else is touched.
///
/// ```
/// use polyol_core::decode_accessor_name;
///
/// assert_eq!(decode_accessor_name("getName").unwrap(), "name");
/// assert_eq!(decode_accessor_name("isActive").unwrap(), "active");
/// assert_eq!(decode_accessor_name("set_first_name").unwrap(), "first_name");
/// assert!(decode_accessor_name("name").is_err());
/// ```
pub fn decode_accessor_name(raw: &str) -> Result<String> {
    let rest = PREFIXES
        .iter()
        .find_map(|prefix| raw.strip_prefix(prefix))
        .ok_or_else(|| BeanError::InvalidAccessorName(raw.to_string()))?;

    let mut chars = rest.chars();
    let first = chars
        .next()
        .ok_or_else(|| BeanError::InvalidAccessorName(raw.to_string()))?;

    let mut name = String::with_capacity(rest.len());
    name.push(lower_first(first));
    name.push_str(chars.as_str());
    Ok(name)
}

/// Lower-cases one character, keeping it as is when its lowercase form is
/// more than one character (`'İ'`).
fn lower_first(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

/// A compile-time checked reference to an accessor method of bean type `B`.
///
/// Built with [`accessor!`](crate::accessor), which refuses to compile if the
/// method does not exist. The property name is decoded from the method name.
pub struct Accessor<B> {
    method: &'static str,
    bean: PhantomData<fn(&B)>,
}

impl<B> Accessor<B> {
    /// Wraps a raw method name. Prefer the `accessor!` macro, which checks
    /// that the method exists.
    pub const fn new(method: &'static str) -> Self {
        Accessor {
            method,
            bean: PhantomData,
        }
    }

    pub fn method(&self) -> &'static str {
        self.method
    }

    /// Decodes the property this accessor reads or writes.
    pub fn property_name(&self) -> Result<String> {
        decode_accessor_name(self.method)
    }
}

impl<B> Clone for Accessor<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B> Copy for Accessor<B> {}

impl<B> fmt::Debug for Accessor<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", std::any::type_name::<B>(), self.method)
    }
}

/// Builds an [`Accessor`] from a method path, checked by the compiler.
///
/// ```
/// use polyol_core::accessor;
///
/// struct User {
///     name: String,
/// }
///
/// impl User {
///     fn get_name(&self) -> &str {
///         &self.name
///     }
/// }
///
/// let name = accessor!(User::get_name);
/// assert_eq!(name.property_name().unwrap(), "name");
/// ```
///
/// Generic or qualified types use the two-argument form:
/// `accessor!(Pair<u8>, get_left)`.
#[macro_export]
macro_rules! accessor {
    ($bean:ident :: $method:ident) => {
        $crate::accessor!($bean, $method)
    };
    ($bean:ty, $method:ident) => {{
        let _ = <$bean>::$method;
        $crate::Accessor::<$bean>::new(::core::stringify!($method))
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_get_and_set() {
        for raw in ["getName", "setName"] {
            assert_eq!(decode_accessor_name(raw).unwrap(), "name");
        }
        assert_eq!(decode_accessor_name("getURLPath").unwrap(), "uRLPath");
        assert_eq!(decode_accessor_name("getx").unwrap(), "x");
    }

    #[test]
    fn strips_is() {
        assert_eq!(decode_accessor_name("isActive").unwrap(), "active");
        assert_eq!(decode_accessor_name("is_active").unwrap(), "active");
    }

    #[test]
    fn get_wins_over_is() {
        // "isGetter" has no get prefix; "getIs" keeps the "Is".
        assert_eq!(decode_accessor_name("isGetter").unwrap(), "getter");
        assert_eq!(decode_accessor_name("getIsOpen").unwrap(), "isOpen");
    }

    #[test]
    fn snake_case_names() {
        assert_eq!(decode_accessor_name("get_first_name").unwrap(), "first_name");
        assert_eq!(decode_accessor_name("set_age").unwrap(), "age");
    }

    #[test]
    fn separator_belongs_to_prefix() {
        assert_eq!(decode_accessor_name("get_Foo").unwrap(), "foo");
        assert_eq!(decode_accessor_name("set_Foo").unwrap(), "foo");
        assert_eq!(decode_accessor_name("is_Foo").unwrap(), "foo");
        assert_eq!(decode_accessor_name("get__foo").unwrap(), "_foo");
    }

    #[test]
    fn lowers_exactly_one_character() {
        assert_eq!(decode_accessor_name("getÉtat").unwrap(), "état");
        // 'İ' lower-cases to two chars and is kept.
        assert_eq!(decode_accessor_name("getİndex").unwrap(), "İndex");
        assert_eq!(decode_accessor_name("getİ").unwrap().chars().count(), 1);
    }

    #[test]
    fn rejects_unprefixed_names() {
        for raw in ["name", "URLPath", "fetchName", "", "Getname"] {
            assert!(matches!(
                decode_accessor_name(raw),
                Err(BeanError::InvalidAccessorName(_))
            ));
        }
    }

    #[test]
    fn rejects_bare_prefix() {
        for raw in ["get", "set", "is", "get_"] {
            assert!(matches!(
                decode_accessor_name(raw),
                Err(BeanError::InvalidAccessorName(name)) if name == raw
            ));
        }
    }

    struct Probe {
        ready: bool,
    }

    impl Probe {
        fn is_ready(&self) -> bool {
            self.ready
        }
    }

    #[test]
    fn macro_builds_typed_accessor() {
        let probe = Probe { ready: true };
        assert!(probe.is_ready());

        let acc = accessor!(Probe::is_ready);
        assert_eq!(acc.method(), "is_ready");
        assert_eq!(acc.property_name().unwrap(), "ready");
        assert!(format!("{acc:?}").ends_with("Probe::is_ready"));
    }
}
