use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{AccessError, BeanError, Result};
use crate::kind::Kind;
use crate::value::Value;

type ReadFn<B> = Box<dyn Fn(&B) -> Result<Value, AccessError> + Send + Sync>;
type WriteFn<B> = Box<dyn Fn(&mut B, Value) -> Result<(), AccessError> + Send + Sync>;

/// A type whose attributes can be resolved, read and written by name.
///
/// Usually derived:
///
/// ```
/// use polyol_core::{Bean, get_property};
///
/// #[derive(Bean, Default)]
/// #[bean(default)]
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// let user = User { name: "Ada".into(), age: 36 };
/// assert_eq!(get_property(&user, "age").unwrap().as_i64(), Some(36));
/// ```
///
/// Hand-written implementations describe their attributes with a
/// [`DescriptorBuilder`], which also allows computed attributes.
pub trait Bean: Sized + Send + Sync + 'static {
    /// Describes the attribute table. Called once per type; the built
    /// descriptor is cached process-wide.
    fn describe() -> DescriptorBuilder<Self>;
}

/// Resolved metadata and accessor bindings of one attribute.
pub struct AttributeDescriptor<B> {
    name: String,
    kind: Kind,
    read: Option<ReadFn<B>>,
    write: Option<WriteFn<B>>,
}

impl<B> AttributeDescriptor<B> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn can_read(&self) -> bool {
        self.read.is_some()
    }

    pub fn can_write(&self) -> bool {
        self.write.is_some()
    }

    /// Invokes the read accessor. `None` if the attribute is write-only.
    pub fn read(&self, bean: &B) -> Option<Result<Value, AccessError>> {
        self.read.as_ref().map(|read| read(bean))
    }

    /// Invokes the write accessor. `None` if the attribute is read-only.
    pub fn write(&self, bean: &mut B, value: Value) -> Option<Result<(), AccessError>> {
        self.write.as_ref().map(|write| write(bean, value))
    }
}

impl<B> fmt::Debug for AttributeDescriptor<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("can_read", &self.can_read())
            .field("can_write", &self.can_write())
            .finish()
    }
}

/// The attribute table of one bean type.
///
/// Attribute names are unique. Enumeration follows declaration order, which
/// is for display only.
pub struct TypeDescriptor<B> {
    type_name: &'static str,
    attributes: IndexMap<String, Arc<AttributeDescriptor<B>>>,
    constructor: Option<fn() -> B>,
}

impl<B> TypeDescriptor<B> {
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor<B>> {
        self.attributes.get(name).map(Arc::as_ref)
    }

    /// Like [`attribute`](Self::attribute), failing with `PropertyNotFound`.
    pub fn require(&self, name: &str) -> Result<&AttributeDescriptor<B>> {
        self.attribute(name).ok_or_else(|| self.not_found(name))
    }

    pub(crate) fn shared_attribute(&self, name: &str) -> Result<Arc<AttributeDescriptor<B>>> {
        self.attributes
            .get(name)
            .cloned()
            .ok_or_else(|| self.not_found(name))
    }

    fn not_found(&self, name: &str) -> BeanError {
        BeanError::PropertyNotFound {
            bean: self.type_name,
            property: name.to_string(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &AttributeDescriptor<B>> {
        self.attributes.values().map(Arc::as_ref)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Returns true if a zero-argument constructor was registered.
    pub fn is_constructible(&self) -> bool {
        self.constructor.is_some()
    }

    /// Creates a new instance with the registered zero-argument constructor.
    pub fn construct(&self) -> Result<B> {
        self.constructor
            .map(|construct| construct())
            .ok_or(BeanError::ConstructionFailure(self.type_name))
    }
}

impl<B> fmt::Debug for TypeDescriptor<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_name", &self.type_name)
            .field("attributes", &self.attributes().collect::<Vec<_>>())
            .field("constructible", &self.is_constructible())
            .finish()
    }
}

/// Collects attribute bindings for a [`TypeDescriptor`].
///
/// ```
/// use polyol_core::{Bean, DescriptorBuilder, Kind, PropertyValue};
///
/// struct Temperature {
///     celsius: f64,
/// }
///
/// impl Bean for Temperature {
///     fn describe() -> DescriptorBuilder<Self> {
///         DescriptorBuilder::new()
///             .property(
///                 "celsius",
///                 f64::kind(),
///                 |t: &Self| Ok(t.celsius.to_value()),
///                 |t: &mut Self, v| {
///                     t.celsius = f64::from_value(v)?;
///                     Ok(())
///                 },
///             )
///             .readable("fahrenheit", f64::kind(), |t: &Self| {
///                 Ok((t.celsius * 9.0 / 5.0 + 32.0).to_value())
///             })
///     }
/// }
/// ```
pub struct DescriptorBuilder<B> {
    attributes: Vec<AttributeDescriptor<B>>,
    constructor: Option<fn() -> B>,
}

impl<B: 'static> DescriptorBuilder<B> {
    pub fn new() -> Self {
        DescriptorBuilder {
            attributes: Vec::new(),
            constructor: None,
        }
    }

    /// Adds a readable and writable attribute.
    pub fn property<R, W>(self, name: impl Into<String>, kind: Kind, read: R, write: W) -> Self
    where
        R: Fn(&B) -> Result<Value, AccessError> + Send + Sync + 'static,
        W: Fn(&mut B, Value) -> Result<(), AccessError> + Send + Sync + 'static,
    {
        self.push(name.into(), kind, Some(Box::new(read)), Some(Box::new(write)))
    }

    /// Adds a read-only attribute.
    pub fn readable<R>(self, name: impl Into<String>, kind: Kind, read: R) -> Self
    where
        R: Fn(&B) -> Result<Value, AccessError> + Send + Sync + 'static,
    {
        self.push(name.into(), kind, Some(Box::new(read)), None)
    }

    /// Adds a write-only attribute.
    pub fn writable<W>(self, name: impl Into<String>, kind: Kind, write: W) -> Self
    where
        W: Fn(&mut B, Value) -> Result<(), AccessError> + Send + Sync + 'static,
    {
        self.push(name.into(), kind, None, Some(Box::new(write)))
    }

    /// Registers the zero-argument constructor used by `from_mapping`.
    pub fn constructor(mut self, construct: fn() -> B) -> Self {
        self.constructor = Some(construct);
        self
    }

    fn push(
        mut self,
        name: String,
        kind: Kind,
        read: Option<ReadFn<B>>,
        write: Option<WriteFn<B>>,
    ) -> Self {
        self.attributes.push(AttributeDescriptor {
            name,
            kind,
            read,
            write,
        });
        self
    }

    /// Validates the table and freezes it.
    ///
    /// Fails with `IntrospectionFailure` on an empty or duplicated name.
    pub fn build(self) -> Result<TypeDescriptor<B>> {
        let type_name = std::any::type_name::<B>();
        let mut attributes = IndexMap::with_capacity(self.attributes.len());

        for attribute in self.attributes {
            if attribute.name.is_empty() {
                return Err(BeanError::IntrospectionFailure {
                    bean: type_name,
                    reason: "attribute with an empty name".to_string(),
                });
            }
            if attributes.contains_key(&attribute.name) {
                return Err(BeanError::IntrospectionFailure {
                    bean: type_name,
                    reason: format!("duplicate attribute '{}'", attribute.name),
                });
            }
            attributes.insert(attribute.name.clone(), Arc::new(attribute));
        }

        Ok(TypeDescriptor {
            type_name,
            attributes,
            constructor: self.constructor,
        })
    }
}

impl<B: 'static> Default for DescriptorBuilder<B> {
    fn default() -> Self {
        Self::new()
    }
}
