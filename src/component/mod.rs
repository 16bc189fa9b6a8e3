//! Component model for the Orbit button widget
//!
//! This module contains the types and traits related to the component model:
//! lifecycle phases, the per-component [`Context`], the render tree [`Node`]
//! and the [`CustomElement`] seam through which a host document drives an
//! attribute-based element.

mod context;
mod element;
mod error;
mod node;


pub use context::{callback, Callback, ContextProvider};
pub use element::CustomElement;
pub use error::ComponentError;
pub use node::{Node, NodeId};

use std::sync::Arc;

use crate::scheduler::{Clock, SystemClock, TimerQueue};

/// Lifecycle phase of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Component is created but not yet mounted
    Created,
    /// Component is attached to a document
    Mounted,
    /// Component was removed from its document and may be attached again
    Unmounted,
}

/// Component trait - implemented by all UI components
pub trait Component: Send + Sync + std::any::Any {
    /// The props type for this component
    type Props: Clone + Send + Sync + 'static;

    /// Create a new component instance
    fn create(props: Self::Props, context: Context) -> Self
    where
        Self: Sized;

    /// Mount component - called when component is added to a document
    fn mount(&mut self) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Update component with new props
    fn update(&mut self, props: Self::Props) -> Result<(), ComponentError>;

    /// Unmount component - called when component is removed from its document
    fn unmount(&mut self) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Render component - returns child nodes
    fn render(&self) -> Result<Vec<Node>, ComponentError>;

    /// Convert to Any for downcasting
    fn as_any(&self) -> &dyn std::any::Any;

    /// Convert to mutable Any for downcasting
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

/// Context passed to components providing access to time, timers and shared context
#[derive(Clone)]
pub struct Context {
    /// Queue for deferred cosmetic work
    timers: TimerQueue,

    /// Time source for event timestamps and timer deadlines
    clock: Arc<dyn Clock>,

    /// Current lifecycle phase
    lifecycle_phase: LifecyclePhase,

    /// Context provider for parent-child communication
    context_provider: ContextProvider,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("timers", &self.timers)
            .field("clock", &"[Clock]")
            .field("lifecycle_phase", &self.lifecycle_phase)
            .field("context_provider", &self.context_provider)
            .finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a standalone context with the system clock and a private timer queue
    pub fn new() -> Self {
        Self::with_host(TimerQueue::new(), Arc::new(SystemClock), ContextProvider::new())
    }

    /// Create a context bound to a host's timers, clock and context provider
    ///
    /// The component gets its own provider layered over `parent`.
    pub fn with_host(timers: TimerQueue, clock: Arc<dyn Clock>, parent: ContextProvider) -> Self {
        Self {
            timers,
            clock,
            lifecycle_phase: LifecyclePhase::Created,
            context_provider: ContextProvider::with_parent(parent),
        }
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    /// Current time in milliseconds since the Unix epoch
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn context_provider(&self) -> &ContextProvider {
        &self.context_provider
    }

    /// Get the current lifecycle phase
    pub fn lifecycle_phase(&self) -> LifecyclePhase {
        self.lifecycle_phase
    }

    /// Set the current lifecycle phase
    pub fn set_lifecycle_phase(&mut self, phase: LifecyclePhase) {
        self.lifecycle_phase = phase;
    }

    /// Move to `to` if the current phase is one of `allowed_from`
    pub fn transition(
        &mut self,
        operation: &str,
        allowed_from: &[LifecyclePhase],
        to: LifecyclePhase,
    ) -> Result<(), ComponentError> {
        if !allowed_from.contains(&self.lifecycle_phase) {
            return Err(ComponentError::InvalidLifecycleTransition(
                self.lifecycle_phase,
                operation.to_string(),
            ));
        }
        self.lifecycle_phase = to;
        Ok(())
    }
}
