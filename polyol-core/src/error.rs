/// Fault raised by an accessor body, kept as the source of a [`BeanError`].
pub type AccessError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias for bean operations.
pub type Result<T, E = BeanError> = std::result::Result<T, E>;

/// Error type for property resolution, access, copy and conversion.
///
/// Every error is returned to the caller as soon as it happens; nothing is
/// retried or rolled back.
#[derive(Debug, thiserror::Error)]
pub enum BeanError {
    #[error("invalid getter, setter or `is` accessor name: {0:?}")]
    InvalidAccessorName(String),

    #[error("property '{property}' not found on {bean}")]
    PropertyNotFound {
        bean: &'static str,
        property: String,
    },

    #[error("property '{property}' of {bean} is not readable")]
    PropertyNotReadable {
        bean: &'static str,
        property: String,
    },

    #[error("property '{property}' of {bean} is not writable")]
    PropertyNotWritable {
        bean: &'static str,
        property: String,
    },

    #[error("failed to introspect {bean}: {reason}")]
    IntrospectionFailure { bean: &'static str, reason: String },

    #[error("accessor for '{property}' of {bean} failed: {source}")]
    InvocationFailure {
        bean: &'static str,
        property: String,
        #[source]
        source: AccessError,
    },

    #[error("cannot assign '{property}' of {bean}: {source}")]
    TypeMismatch {
        bean: &'static str,
        property: String,
        #[source]
        source: AccessError,
    },

    #[error("cannot construct {0}: no zero-argument constructor registered")]
    ConstructionFailure(&'static str),
}

impl BeanError {
    /// Name of the property involved, if the error concerns one.
    pub fn property(&self) -> Option<&str> {
        match self {
            BeanError::PropertyNotFound { property, .. }
            | BeanError::PropertyNotReadable { property, .. }
            | BeanError::PropertyNotWritable { property, .. }
            | BeanError::InvocationFailure { property, .. }
            | BeanError::TypeMismatch { property, .. } => Some(property),
            _ => None,
        }
    }
}

/// Error converting a [`Value`](crate::Value) into a concrete Rust type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("expected {expected}, found {found}")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{value} is out of range for {target}")]
    OutOfRange { value: String, target: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_property_and_bean() {
        let err = BeanError::PropertyNotFound {
            bean: "User",
            property: "nick".to_string(),
        };
        assert_eq!(err.to_string(), "property 'nick' not found on User");
        assert_eq!(err.property(), Some("nick"));
    }

    #[test]
    fn wrapped_cause_is_the_source() {
        use std::error::Error;

        let err = BeanError::TypeMismatch {
            bean: "User",
            property: "age".to_string(),
            source: Box::new(ValueError::Mismatch {
                expected: "integer",
                found: "text",
            }),
        };
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "expected integer, found text");
    }

    #[test]
    fn construction_failure_has_no_property() {
        let err = BeanError::ConstructionFailure("User");
        assert_eq!(err.property(), None);
    }
}
