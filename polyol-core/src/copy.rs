use std::collections::HashSet;

use crate::accessor::Accessor;
use crate::descriptor::Bean;
use crate::error::Result;
use crate::property::{read_attribute, write_attribute};
use crate::resolver::resolve_type;

/// Options for [`copy_properties`] and [`copy_bean`].
///
/// ```
/// use polyol_core::CopyOptions;
///
/// let options = CopyOptions::new().skip_null_source(true).exclude("id");
/// assert!(options.is_excluded("id"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CopyOptions {
    skip_null_source: bool,
    excluded: HashSet<String>,
}

impl CopyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leaves target attributes untouched where the source value is null.
    ///
    /// Only true absence counts; empty text or collections are copied.
    pub fn skip_null_source(mut self, skip: bool) -> Self {
        self.skip_null_source = skip;
        self
    }

    /// Never copies the attribute `name`.
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.excluded.insert(name.into());
        self
    }

    pub fn exclude_all<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(names.into_iter().map(Into::into));
        self
    }

    /// Excludes the attribute behind an accessor reference of the source type.
    pub fn exclude_accessor<S>(self, accessor: &Accessor<S>) -> Result<Self> {
        Ok(self.exclude(accessor.property_name()?))
    }

    pub fn skips_null_source(&self) -> bool {
        self.skip_null_source
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(name)
    }

    pub fn excluded(&self) -> impl Iterator<Item = &str> {
        self.excluded.iter().map(String::as_str)
    }
}

/// Copies every attribute of `source` to the same-named attribute of
/// `target`.
///
/// An attribute is copied when it is readable on the source, writable on the
/// target, and not excluded by `options`. Values are moved as they are: an
/// incompatible target attribute fails with `TypeMismatch` and aborts the
/// copy. Attributes written before the failure stay written.
pub fn copy_properties<S: Bean, T: Bean>(
    source: &S,
    target: &mut T,
    options: &CopyOptions,
) -> Result<()> {
    let source_type = resolve_type::<S>()?;
    let target_type = resolve_type::<T>()?;

    let mut excluded: HashSet<&str> = options.excluded().collect();
    if options.skip_null_source {
        for attribute in source_type.attributes().filter(|a| a.can_read()) {
            if read_attribute(source_type.type_name(), attribute, source)?.is_null() {
                excluded.insert(attribute.name());
            }
        }
    }

    let mut copied = 0usize;
    for attribute in source_type.attributes() {
        let name = attribute.name();
        if excluded.contains(name) {
            log::trace!("skip '{name}': excluded");
            continue;
        }
        if !attribute.can_read() {
            log::trace!("skip '{name}': not readable on {}", source_type.type_name());
            continue;
        }
        let Some(destination) = target_type.attribute(name).filter(|a| a.can_write()) else {
            log::trace!("skip '{name}': no writable match on {}", target_type.type_name());
            continue;
        };

        let value = read_attribute(source_type.type_name(), attribute, source)?;
        write_attribute(target_type.type_name(), destination, target, value)?;
        copied += 1;
    }

    log::debug!(
        "copied {copied} of {} attributes from {} to {}",
        source_type.len(),
        source_type.type_name(),
        target_type.type_name()
    );
    Ok(())
}

/// Same as [`copy_properties`], returning the target for chaining.
pub fn copy_bean<S: Bean, T: Bean>(source: &S, mut target: T, options: &CopyOptions) -> Result<T> {
    copy_properties(source, &mut target, options)?;
    Ok(target)
}

/// Copies every matching attribute with default options.
pub fn copy_all<S: Bean, T: Bean>(source: &S, target: &mut T) -> Result<()> {
    copy_properties(source, target, &CopyOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::DescriptorBuilder;
    use crate::error::BeanError;
    use crate::value::PropertyValue;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Person {
        name: String,
        age: Option<u32>,
    }

    impl Bean for Person {
        fn describe() -> DescriptorBuilder<Self> {
            DescriptorBuilder::new()
                .property(
                    "name",
                    String::kind(),
                    |p: &Self| Ok(p.name.to_value()),
                    |p: &mut Self, v| {
                        p.name = String::from_value(v)?;
                        Ok(())
                    },
                )
                .property(
                    "age",
                    Option::<u32>::kind(),
                    |p: &Self| Ok(p.age.to_value()),
                    |p: &mut Self, v| {
                        p.age = Option::from_value(v)?;
                        Ok(())
                    },
                )
        }
    }

    /// Shares `name` with `Person`, declares `age` as text.
    #[derive(Debug, Default)]
    struct Badge {
        name: String,
        age: String,
        printed: bool,
    }

    impl Bean for Badge {
        fn describe() -> DescriptorBuilder<Self> {
            DescriptorBuilder::new()
                .property(
                    "name",
                    String::kind(),
                    |b: &Self| Ok(b.name.to_value()),
                    |b: &mut Self, v| {
                        b.name = String::from_value(v)?;
                        Ok(())
                    },
                )
                .property(
                    "age",
                    String::kind(),
                    |b: &Self| Ok(b.age.to_value()),
                    |b: &mut Self, v| {
                        b.age = String::from_value(v)?;
                        Ok(())
                    },
                )
                .readable("printed", bool::kind(), |b: &Self| Ok(b.printed.to_value()))
        }
    }

    fn person(name: &str, age: Option<u32>) -> Person {
        Person {
            name: name.to_string(),
            age,
        }
    }

    #[test]
    fn copies_all_matching_attributes() {
        let source = person("A", Some(30));
        let mut target = person("B", Some(0));
        copy_all(&source, &mut target).unwrap();
        assert_eq!(target, person("A", Some(30)));
    }

    #[test]
    fn null_is_copied_by_default() {
        let source = person("A", None);
        let mut target = person("B", Some(5));
        copy_all(&source, &mut target).unwrap();
        assert_eq!(target, person("A", None));
    }

    #[test]
    fn skip_null_source_keeps_target_value() {
        let source = person("A", None);
        let options = CopyOptions::new().skip_null_source(true);
        let target = copy_bean(&source, person("B", Some(5)), &options).unwrap();
        assert_eq!(target, person("A", Some(5)));
    }

    #[test]
    fn skip_null_source_still_copies_empty_text() {
        let source = person("", Some(1));
        let options = CopyOptions::new().skip_null_source(true);
        let target = copy_bean(&source, person("B", None), &options).unwrap();
        assert_eq!(target, person("", Some(1)));
    }

    #[test]
    fn excluded_names_are_untouched() {
        let source = person("A", Some(99));
        let options = CopyOptions::new().exclude("age");
        let target = copy_bean(&source, person("B", Some(1)), &options).unwrap();
        assert_eq!(target, person("A", Some(1)));

        let options = CopyOptions::new().exclude_all(["age", "name"]);
        let target = copy_bean(&source, person("B", Some(1)), &options).unwrap();
        assert_eq!(target, person("B", Some(1)));
    }

    #[test]
    fn read_only_target_attributes_are_skipped() {
        let source = Badge {
            name: "A".into(),
            age: "x".into(),
            printed: true,
        };
        let mut target = Badge::default();
        copy_properties(&source, &mut target, &CopyOptions::new()).unwrap();
        assert_eq!(target.name, "A");
        assert_eq!(target.age, "x");
        assert!(!target.printed);
    }

    #[test]
    fn incompatible_attribute_aborts_without_rollback() {
        let source = person("A", Some(30));
        let mut target = Badge::default();
        let err = copy_properties(&source, &mut target, &CopyOptions::new()).unwrap_err();

        assert!(matches!(err, BeanError::TypeMismatch { .. }));
        assert_eq!(err.property(), Some("age"));
        // `name` is declared first and was already written.
        assert_eq!(target.name, "A");
    }

    #[test]
    fn excluding_the_mismatch_lets_heterogeneous_copy_succeed() {
        let source = person("A", Some(30));
        let options = CopyOptions::new().exclude("age");
        let target = copy_bean(&source, Badge::default(), &options).unwrap();
        assert_eq!(target.name, "A");
        assert_eq!(target.age, "");
    }

    #[test]
    fn options_report_exclusions() {
        let options = CopyOptions::new().exclude("a").exclude_all(vec!["b".to_string()]);
        let mut names: Vec<_> = options.excluded().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["a", "b"]);
        assert!(!options.skips_null_source());
    }
}
