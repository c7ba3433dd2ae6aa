use crate::descriptor::{Bean, TypeDescriptor};
use crate::error::Result;
use crate::property::{read_attribute, write_attribute};
use crate::resolver::resolve_type;
use crate::value::{PropertyMap, Value};

/// Collects every readable attribute of `bean` into a map.
///
/// Keys are inserted in lexicographic order, independent of declaration
/// order. Write-only attributes are left out.
pub fn to_mapping<B: Bean>(bean: &B) -> Result<PropertyMap> {
    let descriptor = resolve_type::<B>()?;

    let mut readable: Vec<_> = descriptor.attributes().filter(|a| a.can_read()).collect();
    readable.sort_unstable_by(|a, b| a.name().cmp(b.name()));

    let mut mapping = PropertyMap::with_capacity(readable.len());
    for attribute in readable {
        let value = read_attribute(descriptor.type_name(), attribute, bean)?;
        mapping.insert(attribute.name().to_string(), value);
    }
    Ok(mapping)
}

/// Builds a new `B` with its zero-argument constructor and populates it from
/// `mapping`.
///
/// Keys that do not name a writable attribute are ignored, so partial or
/// loose payloads are accepted. Fails with `ConstructionFailure` if `B` has
/// no registered constructor.
pub fn from_mapping<B, I, K>(mapping: I) -> Result<B>
where
    B: Bean,
    I: IntoIterator<Item = (K, Value)>,
    K: AsRef<str>,
{
    let descriptor = resolve_type::<B>()?;
    let mut bean = descriptor.construct()?;
    populate(&descriptor, &mut bean, mapping)?;
    Ok(bean)
}

/// Writes the entries of `mapping` into an existing bean, with the same
/// rules as [`from_mapping`].
pub fn apply_mapping<B, I, K>(bean: &mut B, mapping: I) -> Result<()>
where
    B: Bean,
    I: IntoIterator<Item = (K, Value)>,
    K: AsRef<str>,
{
    let descriptor = resolve_type::<B>()?;
    populate(&descriptor, bean, mapping)
}

fn populate<B, I, K>(descriptor: &TypeDescriptor<B>, bean: &mut B, mapping: I) -> Result<()>
where
    I: IntoIterator<Item = (K, Value)>,
    K: AsRef<str>,
{
    for (key, value) in mapping {
        let key = key.as_ref();
        match descriptor.attribute(key).filter(|a| a.can_write()) {
            Some(attribute) => write_attribute(descriptor.type_name(), attribute, bean, value)?,
            None => log::trace!("ignore '{key}': no writable attribute on {}", descriptor.type_name()),
        }
    }
    Ok(())
}
