//! Context passing and parent-child communication

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, PoisonError, RwLock};

use crate::component::ComponentError;

/// A type-erased value that can be stored in a context
pub trait ContextValue: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + Clone + Send + Sync + Debug + 'static> ContextValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Provider for component context
///
/// Values are looked up by type; a miss falls back to the parent provider, so
/// a document can provide defaults that individual elements override.
#[derive(Clone, Default)]
pub struct ContextProvider {
    /// Parent context provider
    parent: Option<Box<ContextProvider>>,
    values: Arc<RwLock<HashMap<TypeId, Box<dyn ContextValue>>>>,
}

impl Debug for ContextProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextProvider")
            .field("parent", &self.parent.is_some())
            .field(
                "values",
                &format!(
                    "[{} values]",
                    self.values.read().map(|v| v.len()).unwrap_or(0)
                ),
            )
            .finish()
    }
}

impl ContextProvider {
    /// Create a new context provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context provider with a parent
    pub fn with_parent(parent: ContextProvider) -> Self {
        Self {
            parent: Some(Box::new(parent)),
            values: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Set a value in the context
    pub fn provide<T: Clone + Send + Sync + Debug + 'static>(
        &self,
        value: T,
    ) -> Result<(), ComponentError> {
        let mut values = self.values.write().map_err(|_| {
            ComponentError::LockError("Failed to acquire write lock for context values".to_string())
        })?;
        values.insert(TypeId::of::<T>(), Box::new(value));
        Ok(())
    }

    /// Get a value from the context
    pub fn consume<T: Clone + Send + Sync + 'static>(&self) -> Option<T> {
        let found = self
            .values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<T>())
            .and_then(|value| value.as_any().downcast_ref::<T>().cloned());

        // Fall back to parent context if available
        match (found, &self.parent) {
            (Some(value), _) => Some(value),
            (None, Some(parent)) => parent.consume::<T>(),
            (None, None) => None,
        }
    }

    /// Check if a type exists in the context
    pub fn has<T: 'static>(&self) -> bool {
        let exists_here = self
            .values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&TypeId::of::<T>());

        exists_here || self.parent.as_ref().is_some_and(|parent| parent.has::<T>())
    }
}

/// A callback function that can be passed as a prop
pub struct Callback<Args, Ret = ()> {
    /// The function to call
    func: Arc<dyn Fn(Args) -> Ret + Send + Sync>,
}

impl<Args, Ret> Clone for Callback<Args, Ret> {
    fn clone(&self) -> Self {
        Self {
            func: self.func.clone(),
        }
    }
}

impl<Args, Ret> Debug for Callback<Args, Ret> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Callback(..)")
    }
}

impl<Args, Ret> Callback<Args, Ret> {
    /// Create a new callback
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(Args) -> Ret + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    /// Call the callback with the given arguments
    pub fn call(&self, args: Args) -> Ret {
        (self.func)(args)
    }
}

/// Convenience function for creating a callback
pub fn callback<F, Args, Ret>(func: F) -> Callback<Args, Ret>
where
    F: Fn(Args) -> Ret + Send + Sync + 'static,
{
    Callback::new(func)
}
