use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::descriptor::{AttributeDescriptor, Bean, TypeDescriptor};
use crate::error::{BeanError, Result};

/// Process-wide cache of type descriptors keyed by type identity.
///
/// Descriptors are stored type-erased and downcast on lookup. A miss builds
/// the descriptor outside the lock; the first insert wins, so concurrent
/// first lookups of one type all observe the same descriptor.
pub struct DescriptorCache {
    entries: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl DescriptorCache {
    /// Creates a new empty cache.
    pub fn new() -> Self {
        DescriptorCache {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The cache shared by the free functions of this crate.
    pub fn global() -> &'static DescriptorCache {
        static GLOBAL: OnceLock<DescriptorCache> = OnceLock::new();
        GLOBAL.get_or_init(DescriptorCache::new)
    }

    /// Returns the descriptor of `B`, building it on first use.
    ///
    /// A build failure is returned and nothing is cached.
    pub fn resolve<B: Bean>(&self) -> Result<Arc<TypeDescriptor<B>>> {
        let id = TypeId::of::<B>();

        if let Some(existing) = self.entries.read().get(&id) {
            return Self::downcast(existing.clone());
        }

        let built: Arc<dyn Any + Send + Sync> = Arc::new(B::describe().build()?);

        let entry = {
            let mut entries = self.entries.write();
            entries.entry(id).or_insert(built).clone()
        };
        let descriptor = Self::downcast::<B>(entry)?;
        log::debug!(
            "resolved {} with {} attributes",
            descriptor.type_name(),
            descriptor.len()
        );
        Ok(descriptor)
    }

    /// Returns true if a descriptor for `B` is cached.
    pub fn contains<B: Bean>(&self) -> bool {
        self.entries.read().contains_key(&TypeId::of::<B>())
    }

    /// Drops the cached descriptor of `B`; the next lookup rebuilds it.
    pub fn evict<B: Bean>(&self) -> bool {
        self.entries.write().remove(&TypeId::of::<B>()).is_some()
    }

    /// Drops every cached descriptor.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Returns the number of cached descriptors.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn downcast<B: Bean>(entry: Arc<dyn Any + Send + Sync>) -> Result<Arc<TypeDescriptor<B>>> {
        entry
            .downcast::<TypeDescriptor<B>>()
            .map_err(|_| BeanError::IntrospectionFailure {
                bean: std::any::type_name::<B>(),
                reason: "cached descriptor has a different type".to_string(),
            })
    }
}

impl Default for DescriptorCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves the attribute table of `B` through the global cache.
pub fn resolve_type<B: Bean>() -> Result<Arc<TypeDescriptor<B>>> {
    DescriptorCache::global().resolve::<B>()
}

/// Resolves a single attribute of `B`, failing with `PropertyNotFound` if
/// the type has no attribute of that name.
pub fn resolve_attribute<B: Bean>(name: &str) -> Result<Arc<AttributeDescriptor<B>>> {
    let descriptor = resolve_type::<B>()?;
    descriptor.shared_attribute(name)
}

/// Drops every descriptor from the global cache.
pub fn clear_cache() {
    DescriptorCache::global().clear();
}

/// Number of bean types currently held by the global cache.
pub fn cached_types() -> usize {
    DescriptorCache::global().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::DescriptorBuilder;
    use crate::value::PropertyValue;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Probe {
        level: u8,
    }

    impl Bean for Probe {
        fn describe() -> DescriptorBuilder<Self> {
            DescriptorBuilder::new().readable("level", u8::kind(), |p: &Self| {
                Ok(p.level.to_value())
            })
        }
    }

    // Only resolved by `resolve_caches_per_type`, so the call count is exact.
    static DESCRIBE_CALLS: AtomicUsize = AtomicUsize::new(0);

    struct Counted;

    impl Bean for Counted {
        fn describe() -> DescriptorBuilder<Self> {
            DESCRIBE_CALLS.fetch_add(1, Ordering::SeqCst);
            DescriptorBuilder::new()
        }
    }

    struct Broken;

    impl Bean for Broken {
        fn describe() -> DescriptorBuilder<Self> {
            DescriptorBuilder::new()
                .readable("x", u8::kind(), |_: &Self| Ok(0u8.to_value()))
                .readable("x", u8::kind(), |_: &Self| Ok(1u8.to_value()))
        }
    }

    #[test]
    fn resolve_caches_per_type() {
        let cache = DescriptorCache::new();

        let counted = cache.resolve::<Counted>().unwrap();
        assert!(Arc::ptr_eq(&counted, &cache.resolve::<Counted>().unwrap()));
        assert_eq!(DESCRIBE_CALLS.load(Ordering::SeqCst), 1);
        assert!(counted.is_empty());

        let first = cache.resolve::<Probe>().unwrap();
        assert_eq!(cache.len(), 2);
        assert!(cache.contains::<Probe>());
        assert_eq!(first.attribute("level").unwrap().kind(), &u8::kind());
        let probe = Probe { level: 3 };
        assert_eq!(
            first.attribute("level").unwrap().read(&probe).unwrap().unwrap(),
            3u8.to_value()
        );
    }

    #[test]
    fn evict_forces_rebuild() {
        let cache = DescriptorCache::new();
        let first = cache.resolve::<Probe>().unwrap();
        assert!(cache.evict::<Probe>());
        assert!(!cache.evict::<Probe>());
        let second = cache.resolve::<Probe>().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn failure_is_not_cached() {
        let cache = DescriptorCache::new();
        assert!(matches!(
            cache.resolve::<Broken>(),
            Err(BeanError::IntrospectionFailure { .. })
        ));
        assert!(!cache.contains::<Broken>());
    }

    #[test]
    fn concurrent_first_lookup_agrees() {
        let cache = DescriptorCache::new();
        let resolved: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| cache.resolve::<Probe>().unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for descriptor in &resolved[1..] {
            assert!(Arc::ptr_eq(&resolved[0], descriptor));
        }
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn global_cache_reports_resolved_types() {
        resolve_type::<Probe>().unwrap();
        assert!(DescriptorCache::global().contains::<Probe>());
        assert!(cached_types() >= 1);
    }

    #[test]
    fn resolve_attribute_reports_missing_name() {
        let found = resolve_attribute::<Probe>("level").unwrap();
        assert_eq!(found.name(), "level");
        assert!(found.can_read());
        assert!(!found.can_write());

        match resolve_attribute::<Probe>("depth") {
            Err(BeanError::PropertyNotFound { property, .. }) => assert_eq!(property, "depth"),
            _ => panic!("expected PropertyNotFound"),
        }
    }
}
