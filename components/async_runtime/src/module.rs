//! Module registry backing `require`.
//!
//! The registry maps a module name to a host capability. It is filled while
//! the runtime is being built and only read afterwards.
//!
//! Registering a name twice replaces the earlier capability (last write
//! wins); [`ModuleRegistry::register`] hands the replaced value back.

use crate::error::HostError;
use std::collections::HashMap;

/// Name to capability mapping.
///
/// # Examples
///
/// ```
/// use async_runtime::ModuleRegistry;
///
/// let mut registry = ModuleRegistry::new();
/// assert_eq!(registry.register("path", "v1"), None);
/// assert_eq!(registry.register("path", "v2"), Some("v1"));
/// assert_eq!(registry.resolve("path"), Some(&"v2"));
/// ```
#[derive(Debug, Clone)]
pub struct ModuleRegistry<M> {
    modules: HashMap<String, M>,
}

impl<M> ModuleRegistry<M> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            modules: HashMap::new(),
        }
    }

    /// Binds `capability` under `name`, returning the capability it replaced.
    pub fn register(&mut self, name: impl Into<String>, capability: M) -> Option<M> {
        let name = name.into();
        let previous = self.modules.insert(name.clone(), capability);
        if previous.is_some() {
            tracing::debug!(module = %name, "module registration replaced an existing binding");
        } else {
            tracing::trace!(module = %name, "module registered");
        }
        previous
    }

    /// Looks up a capability by name.
    pub fn resolve(&self, name: &str) -> Option<&M> {
        self.modules.get(name)
    }

    /// Resolves a `require` call.
    ///
    /// `None` stands for a call made without arguments and is rejected before
    /// any lookup happens.
    ///
    /// # Errors
    ///
    /// [`HostError::InvalidArgument`] for a missing name,
    /// [`HostError::ModuleNotFound`] for an unregistered one.
    pub fn require(&self, name: Option<&str>) -> Result<&M, HostError> {
        let name = name.ok_or_else(|| HostError::InvalidArgument {
            function: "require".to_string(),
            reason: "a module name is required".to_string(),
        })?;
        self.resolve(name).ok_or_else(|| HostError::ModuleNotFound {
            name: name.to_string(),
        })
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.modules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<M> Default for ModuleRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}
