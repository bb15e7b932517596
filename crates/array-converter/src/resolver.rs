//! Resolution of effective class configurations.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::config::ClassConfig;
use crate::convert::Convertible;
use crate::declaration::{Declaration, Mixin};
use crate::error::ConfigError;

type DeclareFn = fn(&mut Declaration<'_>);

/// Resolves and memoizes [`ClassConfig`]s.
///
/// Declarations are immutable for the lifetime of the process, so a resolved
/// configuration never goes stale. The cache only saves repeated work.
#[derive(Debug, Default)]
pub struct Resolver {
    cache: HashMap<TypeId, Arc<ClassConfig>>,
    resolving: Vec<TypeId>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective configuration of `T`, with its ancestors and mixins applied first.
    pub fn resolve<T: Convertible>(&mut self) -> Result<Arc<ClassConfig>, ConfigError> {
        self.resolve_with(TypeId::of::<T>(), T::CLASS, T::declare)
    }

    /// Configuration contributed by mixin `M`.
    pub fn resolve_mixin<M: Mixin>(&mut self) -> Result<Arc<ClassConfig>, ConfigError> {
        self.resolve_with(TypeId::of::<M>(), M::NAME, M::declare)
    }

    /// Number of memoized configurations.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    fn resolve_with(
        &mut self,
        id: TypeId,
        class: &'static str,
        declare: DeclareFn,
    ) -> Result<Arc<ClassConfig>, ConfigError> {
        if let Some(config) = self.cache.get(&id) {
            return Ok(Arc::clone(config));
        }
        if self.resolving.contains(&id) {
            return Err(ConfigError::CyclicDeclaration { class });
        }

        self.resolving.push(id);
        let mut decl = Declaration::new(self, class);
        declare(&mut decl);
        let layers = decl.layers();
        let result = decl.finish();
        self.resolving.pop();

        let config = Arc::new(result?);
        debug!(class, layers, "resolved class configuration");
        self.cache.insert(id, Arc::clone(&config));
        Ok(config)
    }
}
