//! Polyol resolves and manipulates the named attributes of structured values.
//!
//! Core concepts:
//! - **Bean**: A type whose attributes can be read and written by name
//! - **TypeDescriptor**: The attribute table of a bean type, built once and cached
//! - **Value**: A dynamically typed attribute value
//! - **Accessor**: A compile-time checked reference to a getter or setter,
//!   decoded into the attribute name it accesses
//! - **CopyOptions**: Exclusion rules for bulk copies between beans
//!
//! # Example
//!
//! ```
//! use polyol_core::{accessor, copy_bean, get_property, set_property, to_mapping};
//! use polyol_core::{Bean, CopyOptions, Value};
//!
//! #[derive(Debug, Default, Bean)]
//! #[bean(default, accessors)]
//! struct User {
//!     name: String,
//!     age: Option<u32>,
//! }
//!
//! let mut user = User::default();
//! set_property(&mut user, "name", "Ada").unwrap();
//! assert_eq!(get_property(&user, "name").unwrap(), Value::from("Ada"));
//!
//! // Copy everything but `age`, named through its getter.
//! let source = User { name: "Grace".into(), age: Some(85) };
//! let options = CopyOptions::new()
//!     .exclude_accessor(&accessor!(User::get_age))
//!     .unwrap();
//! let copy = copy_bean(&source, user, &options).unwrap();
//! assert_eq!(copy.name, "Grace");
//! assert_eq!(copy.age, None);
//!
//! let mapping = to_mapping(&copy).unwrap();
//! assert_eq!(mapping["age"], Value::Null);
//! ```

// Lets the derive macros, which emit `::polyol_core` paths, run inside this
// crate's own tests.
extern crate self as polyol_core;

mod accessor;
mod convert;
mod copy;
mod descriptor;
mod empty;
mod error;
mod kind;
mod property;
mod resolver;
mod value;

pub use accessor::{decode_accessor_name, Accessor};
pub use convert::{apply_mapping, from_mapping, to_mapping};
pub use copy::{copy_all, copy_bean, copy_properties, CopyOptions};
pub use descriptor::{AttributeDescriptor, Bean, DescriptorBuilder, TypeDescriptor};
pub use empty::{is_empty, is_not_empty, Emptiness};
pub use error::{AccessError, BeanError, Result, ValueError};
pub use kind::{FloatType, IntType, Kind};
pub use property::{
    get_property, get_property_as, get_property_by, has_property, is_readable, is_writable,
    set_property, set_property_by,
};
pub use resolver::{cached_types, clear_cache, resolve_attribute, resolve_type, DescriptorCache};
pub use value::{ByteString, PropertyMap, PropertyValue, Value};

#[cfg(feature = "derive")]
pub use polyol_derive::{model, Bean};
