//! Binding table, resolver and instance cache
//!
//! ## Resolution
//!
//! ```text
//! resolve::<C>()
//!   ├── cached?            → return the same Arc
//!   ├── in progress?       → Error::Cycle   (chain ... -> C)
//!   ├── no binding?        → Error::Binding (chain ... -> C)
//!   └── resolve inputs depth-first, invoke constructor
//!          ├── Ok(instance) → cache under C, return
//!          └── Err(e)       → Error::Constructor (nothing cached for C)
//! ```
//!
//! Every distinct type is constructed at most once per container, so a full
//! resolution walks each node of the graph once no matter how often it is
//! requested.

use super::constructor::{Constructor, Instance};
use super::key::TypeKey;
use appinit_domain::error::{BoxError, Error, Result};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

type Factory = Box<dyn Fn(&[Instance]) -> std::result::Result<Instance, BoxError> + Send + Sync>;

struct Binding {
    inputs: Vec<TypeKey>,
    factory: Factory,
}

/// Summary of one binding, for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingInfo {
    /// Output type name
    pub output: &'static str,
    /// Declared input type names, in parameter order
    pub inputs: Vec<&'static str>,
    /// Whether an instance is already cached
    pub resolved: bool,
}

impl fmt::Display for BindingInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.output, self.inputs.join(", "))?;
        if self.resolved {
            f.write_str(" [resolved]")?;
        }
        Ok(())
    }
}

/// Dependency injection container
///
/// Owns the binding table and the singleton cache. Registration and
/// resolution take `&mut self`: bootstrap is single threaded, and once the
/// service is running the cache is only read through [`Container::get`].
#[derive(Default)]
pub struct Container {
    bindings: HashMap<TypeKey, Binding>,
    instances: HashMap<TypeKey, Instance>,
    resolving: Vec<TypeKey>,
}

impl Container {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a constructor under its output type
    ///
    /// A later registration for the same output type replaces the earlier
    /// one. Nothing is validated or constructed here.
    pub fn register<Args, C>(&mut self, constructor: C) -> &mut Self
    where
        C: Constructor<Args>,
    {
        let output = TypeKey::of::<C::Output>();
        let binding = Binding {
            inputs: C::inputs(),
            factory: Box::new(move |inputs: &[Instance]| {
                constructor
                    .construct(inputs)
                    .map(|instance| Arc::new(instance) as Instance)
            }),
        };

        if self.bindings.insert(output, binding).is_some() {
            debug!(type_name = output.name(), "Replacing existing binding");
        } else {
            trace!(type_name = output.name(), "Registered binding");
        }
        self
    }

    /// Bind an already built instance
    pub fn register_instance<T>(&mut self, instance: Arc<T>) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.register(move || Ok::<_, BoxError>(Arc::clone(&instance)))
    }

    /// Resolve `T`, constructing it and its inputs on first request
    pub fn resolve<T>(&mut self) -> Result<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let key = TypeKey::of::<T>();
        let instance = self.resolve_key(key)?;
        downcast::<T>(key, &instance)
    }

    /// Resolve `T` if it is bound
    ///
    /// Returns `Ok(None)` only when `T` itself has no binding; failures deeper
    /// in the graph are still errors.
    pub fn try_resolve<T>(&mut self) -> Result<Option<Arc<T>>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let key = TypeKey::of::<T>();
        if !self.instances.contains_key(&key) && !self.bindings.contains_key(&key) {
            debug!(type_name = key.name(), "No binding for optional type");
            return Ok(None);
        }
        self.resolve::<T>().map(Some)
    }

    /// Cached instance of `T`, without resolving
    pub fn get<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let key = TypeKey::of::<T>();
        self.instances
            .get(&key)
            .and_then(|instance| downcast::<T>(key, instance).ok())
    }

    /// Whether a constructor is bound for `T`
    pub fn is_bound<T: ?Sized + 'static>(&self) -> bool {
        self.bindings.contains_key(&TypeKey::of::<T>())
    }

    /// Whether `T` has been resolved and cached
    pub fn is_resolved<T: ?Sized + 'static>(&self) -> bool {
        self.instances.contains_key(&TypeKey::of::<T>())
    }

    /// All bindings, sorted by output type name
    pub fn bindings(&self) -> Vec<BindingInfo> {
        let mut infos: Vec<BindingInfo> = self
            .bindings
            .iter()
            .map(|(key, binding)| BindingInfo {
                output: key.name(),
                inputs: binding.inputs.iter().map(TypeKey::name).collect(),
                resolved: self.instances.contains_key(key),
            })
            .collect();
        infos.sort_by(|a, b| a.output.cmp(b.output));
        infos
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether nothing is bound
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn resolve_key(&mut self, key: TypeKey) -> Result<Instance> {
        if let Some(instance) = self.instances.get(&key) {
            return Ok(Arc::clone(instance));
        }

        if self.resolving.contains(&key) {
            return Err(Error::cycle(key.name(), self.chain_to(key)));
        }

        let Some(inputs) = self.bindings.get(&key).map(|b| b.inputs.clone()) else {
            return Err(Error::missing_binding(key.name(), self.chain_to(key)));
        };

        self.resolving.push(key);
        let result = self.construct(key, &inputs);
        self.resolving.pop();

        let instance = result?;
        debug!(type_name = key.name(), "Resolved type");
        self.instances.insert(key, Arc::clone(&instance));
        Ok(instance)
    }

    fn construct(&mut self, key: TypeKey, inputs: &[TypeKey]) -> Result<Instance> {
        let mut resolved = Vec::with_capacity(inputs.len());
        for input in inputs {
            resolved.push(self.resolve_key(*input)?);
        }

        let binding = self
            .bindings
            .get(&key)
            .ok_or_else(|| Error::internal(format!("binding for `{key}` vanished")))?;

        (binding.factory)(&resolved).map_err(|source| {
            Error::constructor(key.name(), self.chain_names(), source)
        })
    }

    /// Current chain plus `key`, root first
    fn chain_to(&self, key: TypeKey) -> Vec<String> {
        let mut chain = self.chain_names();
        chain.push(key.name().to_string());
        chain
    }

    fn chain_names(&self) -> Vec<String> {
        self.resolving.iter().map(|k| k.name().to_string()).collect()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("bindings", &self.bindings.len())
            .field("instances", &self.instances.len())
            .finish()
    }
}

fn downcast<T>(key: TypeKey, instance: &Instance) -> Result<Arc<T>>
where
    T: ?Sized + Send + Sync + 'static,
{
    let any: &(dyn Any + Send + Sync) = &**instance;
    any.downcast_ref::<Arc<T>>()
        .cloned()
        .ok_or_else(|| Error::internal(format!("cached instance is not `{key}`")))
}
