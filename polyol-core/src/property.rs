use crate::accessor::Accessor;
use crate::descriptor::{AttributeDescriptor, Bean};
use crate::error::{AccessError, BeanError, Result, ValueError};
use crate::resolver::resolve_type;
use crate::value::{PropertyValue, Value};

/// Reads the attribute `name` of `bean`.
///
/// Fails with `PropertyNotFound`, `PropertyNotReadable`, or
/// `InvocationFailure` if the read accessor itself fails.
pub fn get_property<B: Bean>(bean: &B, name: &str) -> Result<Value> {
    let descriptor = resolve_type::<B>()?;
    read_attribute(descriptor.type_name(), descriptor.require(name)?, bean)
}

/// Reads the attribute `name` and converts it to `T`.
///
/// A value that does not convert is a `TypeMismatch`.
pub fn get_property_as<B: Bean, T: PropertyValue>(bean: &B, name: &str) -> Result<T> {
    let value = get_property(bean, name)?;
    T::from_value(value).map_err(|source| BeanError::TypeMismatch {
        bean: std::any::type_name::<B>(),
        property: name.to_string(),
        source: Box::new(source),
    })
}

/// Writes `value` to the attribute `name` of `bean`.
///
/// Fails with `PropertyNotFound`, `PropertyNotWritable`, or `TypeMismatch`
/// when the value does not fit the attribute. No coercion is attempted.
pub fn set_property<B: Bean>(bean: &mut B, name: &str, value: impl Into<Value>) -> Result<()> {
    let descriptor = resolve_type::<B>()?;
    write_attribute(
        descriptor.type_name(),
        descriptor.require(name)?,
        bean,
        value.into(),
    )
}

/// Reads the attribute behind an accessor reference.
pub fn get_property_by<B: Bean>(bean: &B, accessor: &Accessor<B>) -> Result<Value> {
    get_property(bean, &accessor.property_name()?)
}

/// Writes the attribute behind an accessor reference.
pub fn set_property_by<B: Bean>(
    bean: &mut B,
    accessor: &Accessor<B>,
    value: impl Into<Value>,
) -> Result<()> {
    set_property(bean, &accessor.property_name()?, value)
}

/// Returns true if `B` has an attribute called `name`.
pub fn has_property<B: Bean>(name: &str) -> Result<bool> {
    Ok(resolve_type::<B>()?.contains(name))
}

pub fn is_readable<B: Bean>(name: &str) -> Result<bool> {
    Ok(resolve_type::<B>()?.require(name)?.can_read())
}

pub fn is_writable<B: Bean>(name: &str) -> Result<bool> {
    Ok(resolve_type::<B>()?.require(name)?.can_write())
}

pub(crate) fn read_attribute<B>(
    bean_name: &'static str,
    attribute: &AttributeDescriptor<B>,
    bean: &B,
) -> Result<Value> {
    match attribute.read(bean) {
        Some(Ok(value)) => Ok(value),
        Some(Err(source)) => Err(BeanError::InvocationFailure {
            bean: bean_name,
            property: attribute.name().to_string(),
            source,
        }),
        None => Err(BeanError::PropertyNotReadable {
            bean: bean_name,
            property: attribute.name().to_string(),
        }),
    }
}

pub(crate) fn write_attribute<B>(
    bean_name: &'static str,
    attribute: &AttributeDescriptor<B>,
    bean: &mut B,
    value: Value,
) -> Result<()> {
    match attribute.write(bean, value) {
        Some(Ok(())) => Ok(()),
        Some(Err(source)) => Err(classify_write_fault(bean_name, attribute.name(), source)),
        None => Err(BeanError::PropertyNotWritable {
            bean: bean_name,
            property: attribute.name().to_string(),
        }),
    }
}

/// Conversion faults are type mismatches; anything else the setter raised
/// is an invocation failure.
fn classify_write_fault(bean: &'static str, property: &str, source: AccessError) -> BeanError {
    let property = property.to_string();
    if source.is::<ValueError>() {
        BeanError::TypeMismatch {
            bean,
            property,
            source,
        }
    } else {
        BeanError::InvocationFailure {
            bean,
            property,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor;
    use crate::descriptor::DescriptorBuilder;

    #[derive(Debug, Default)]
    struct Account {
        owner: String,
        balance: i64,
        pin: u16,
    }

    impl Account {
        fn get_owner(&self) -> &str {
            &self.owner
        }

        fn set_balance(&mut self, balance: i64) {
            self.balance = balance;
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("balance cannot go negative")]
    struct Overdrawn;

    impl Bean for Account {
        fn describe() -> DescriptorBuilder<Self> {
            DescriptorBuilder::new()
                .property(
                    "owner",
                    String::kind(),
                    |a: &Self| Ok(a.owner.to_value()),
                    |a: &mut Self, v| {
                        a.owner = String::from_value(v)?;
                        Ok(())
                    },
                )
                .property(
                    "balance",
                    i64::kind(),
                    |a: &Self| Ok(a.balance.to_value()),
                    |a: &mut Self, v| {
                        let balance = i64::from_value(v)?;
                        if balance < 0 {
                            return Err(Overdrawn.into());
                        }
                        a.balance = balance;
                        Ok(())
                    },
                )
                .writable("pin", u16::kind(), |a: &mut Self, v| {
                    a.pin = u16::from_value(v)?;
                    Ok(())
                })
                .readable("audit", String::kind(), |_: &Self| {
                    Err("audit log unavailable".into())
                })
                .readable("summary", String::kind(), |a: &Self| {
                    Ok(format!("{}: {}", a.owner, a.balance).to_value())
                })
        }
    }

    #[test]
    fn set_then_get_returns_value() {
        let mut account = Account::default();
        set_property(&mut account, "owner", "Grace").unwrap();
        set_property(&mut account, "balance", 120).unwrap();

        assert_eq!(get_property(&account, "owner").unwrap(), Value::from("Grace"));
        assert_eq!(get_property_as::<_, i64>(&account, "balance").unwrap(), 120);
        assert_eq!(account.balance, 120);
    }

    #[test]
    fn unknown_name_is_not_found() {
        let mut account = Account::default();
        assert!(matches!(
            get_property(&account, "iban"),
            Err(BeanError::PropertyNotFound { .. })
        ));
        assert!(matches!(
            set_property(&mut account, "iban", "x"),
            Err(BeanError::PropertyNotFound { .. })
        ));
    }

    #[test]
    fn direction_flags_are_enforced() {
        let mut account = Account::default();
        assert!(matches!(
            set_property(&mut account, "summary", "x"),
            Err(BeanError::PropertyNotWritable { .. })
        ));
        assert!(matches!(
            get_property(&account, "pin"),
            Err(BeanError::PropertyNotReadable { .. })
        ));
        set_property(&mut account, "pin", 1234u16).unwrap();
        assert_eq!(account.pin, 1234);
    }

    #[test]
    fn incompatible_value_is_type_mismatch() {
        let mut account = Account::default();
        let err = set_property(&mut account, "balance", "lots").unwrap_err();
        assert!(matches!(err, BeanError::TypeMismatch { .. }));
        assert_eq!(err.property(), Some("balance"));

        let err = get_property_as::<_, bool>(&account, "owner").unwrap_err();
        assert!(matches!(err, BeanError::TypeMismatch { .. }));
    }

    #[test]
    fn accessor_faults_are_invocation_failures() {
        let mut account = Account::default();
        let err = get_property(&account, "audit").unwrap_err();
        assert!(matches!(err, BeanError::InvocationFailure { .. }));

        let err = set_property(&mut account, "balance", -5).unwrap_err();
        match err {
            BeanError::InvocationFailure { source, .. } => {
                assert_eq!(source.to_string(), "balance cannot go negative");
            }
            other => panic!("expected invocation failure, got {other:?}"),
        }
    }

    #[test]
    fn accessor_references_decode_to_names() {
        let mut account = Account {
            owner: "Ada".to_string(),
            ..Account::default()
        };
        assert_eq!(account.get_owner(), "Ada");
        account.set_balance(1);

        let owner = accessor!(Account::get_owner);
        assert_eq!(get_property_by(&account, &owner).unwrap(), Value::from("Ada"));

        let balance = accessor!(Account::set_balance);
        set_property_by(&mut account, &balance, 99).unwrap();
        assert_eq!(account.balance, 99);
    }

    #[test]
    fn queries_without_instance() {
        assert!(has_property::<Account>("owner").unwrap());
        assert!(!has_property::<Account>("iban").unwrap());
        assert!(is_readable::<Account>("summary").unwrap());
        assert!(!is_writable::<Account>("summary").unwrap());
        assert!(!is_readable::<Account>("pin").unwrap());
        assert!(is_readable::<Account>("iban").is_err());
    }
}
