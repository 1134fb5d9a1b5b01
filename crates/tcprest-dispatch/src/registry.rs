//! The resource registry: a mapping from class FQN to a
//! [`ResourceBinding`].

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::descriptor::ClassDescriptor;

/// A registered resource: either constructed fresh per call, or a single
/// shared instance supplied once at registration.
pub enum ResourceBinding {
    /// A fresh instance is built for every invocation.
    ClassOnly(Arc<ClassDescriptor>),
    /// The same instance answers every invocation.
    Singleton(Arc<ClassDescriptor>, Arc<dyn Any + Send + Sync>),
}

impl ResourceBinding {
    /// The class descriptor backing this binding, regardless of its kind.
    pub fn descriptor(&self) -> &Arc<ClassDescriptor> {
        match self {
            ResourceBinding::ClassOnly(d) => d,
            ResourceBinding::Singleton(d, _) => d,
        }
    }

    /// The instance to dispatch a call against: a freshly constructed one
    /// for a class-only binding, or the shared one for a singleton.
    pub fn instance(&self) -> Arc<dyn Any + Send + Sync> {
        match self {
            ResourceBinding::ClassOnly(d) => d.construct(),
            ResourceBinding::Singleton(_, instance) => Arc::clone(instance),
        }
    }
}

/// A mapping from class FQN to [`ResourceBinding`].
///
/// Insertion order is irrelevant; names are unique, so a second
/// registration under the same FQN replaces the first.
#[derive(Default)]
pub struct ResourceRegistry {
    bindings: RwLock<HashMap<String, ResourceBinding>>,
}

impl ResourceRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class-only binding: a fresh instance per call.
    pub fn register_class(&self, descriptor: ClassDescriptor) {
        let class_fqn = descriptor.class_fqn.clone();
        self.bindings
            .write()
            .expect("resource registry lock poisoned")
            .insert(class_fqn, ResourceBinding::ClassOnly(Arc::new(descriptor)));
    }

    /// Register a singleton binding: `instance` answers every call.
    pub fn register_singleton(
        &self,
        descriptor: ClassDescriptor,
        instance: Arc<dyn Any + Send + Sync>,
    ) {
        let class_fqn = descriptor.class_fqn.clone();
        self.bindings
            .write()
            .expect("resource registry lock poisoned")
            .insert(
                class_fqn,
                ResourceBinding::Singleton(Arc::new(descriptor), instance),
            );
    }

    /// Look up the class descriptor and instance-producer for `class_fqn`.
    pub fn lookup(&self, class_fqn: &str) -> Option<(Arc<ClassDescriptor>, Arc<dyn Any + Send + Sync>)> {
        let bindings = self.bindings.read().expect("resource registry lock poisoned");
        bindings.get(class_fqn).map(|b| (Arc::clone(b.descriptor()), b.instance()))
    }
}
