//! Graph events and listener notification
//!
//! Listeners are kept in a copy-on-write list. `notify` takes a snapshot of
//! the list and releases the lock before calling anyone, so a listener may
//! register or unregister listeners (itself included) from inside its
//! callback. Such changes apply from the next notification on.

use crate::triple::Triple;
use std::sync::{Arc, PoisonError, RwLock};

/// What changed in a graph
#[derive(Debug, Clone, PartialEq)]
pub enum GraphEvent {
    Add(Triple),
    AddSlice(Vec<Triple>),
    AddList(Vec<Triple>),
    AddIter(Vec<Triple>),
    /// Triples copied from another graph
    AddGraph(Vec<Triple>),
    Delete(Triple),
    DeleteSlice(Vec<Triple>),
    DeleteList(Vec<Triple>),
    DeleteIter(Vec<Triple>),
    DeleteGraph(Vec<Triple>),
    /// Every triple was removed
    RemoveAll,
    /// Every triple matching the pattern was removed
    Remove(Triple),
    /// Application-defined notification
    Custom(serde_json::Value),
}

impl GraphEvent {
    /// Whether the event reports added triples
    pub fn is_add(&self) -> bool {
        matches!(
            self,
            GraphEvent::Add(_)
                | GraphEvent::AddSlice(_)
                | GraphEvent::AddList(_)
                | GraphEvent::AddIter(_)
                | GraphEvent::AddGraph(_)
        )
    }

    /// Whether the event reports removed triples
    pub fn is_delete(&self) -> bool {
        matches!(
            self,
            GraphEvent::Delete(_)
                | GraphEvent::DeleteSlice(_)
                | GraphEvent::DeleteList(_)
                | GraphEvent::DeleteIter(_)
                | GraphEvent::DeleteGraph(_)
                | GraphEvent::RemoveAll
                | GraphEvent::Remove(_)
        )
    }
}

/// Receives graph events
pub trait GraphListener: Send + Sync {
    fn on_event(&self, event: &GraphEvent);
}

type ListenerList = Arc<Vec<Arc<dyn GraphListener>>>;

/// Registered listeners of one graph
#[derive(Default)]
pub struct GraphEventManager {
    listeners: RwLock<ListenerList>,
}

impl GraphEventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener. Registering the same listener twice makes it hear
    /// every event twice.
    pub fn register(&self, listener: Arc<dyn GraphListener>) -> &Self {
        let mut guard = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = Vec::clone(&guard);
        next.push(listener);
        *guard = Arc::new(next);
        self
    }

    /// Remove one registration of `listener`, if any
    pub fn unregister(&self, listener: &dyn GraphListener) -> &Self {
        let target = listener as *const _ as *const ();
        let mut guard = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(i) = guard
            .iter()
            .position(|l| Arc::as_ptr(l) as *const () == target)
        {
            let mut next = Vec::clone(&guard);
            next.remove(i);
            *guard = Arc::new(next);
        }
        self
    }

    /// Whether anyone is registered
    pub fn listening(&self) -> bool {
        !self.snapshot().is_empty()
    }

    /// Number of registrations
    pub fn listener_count(&self) -> usize {
        self.snapshot().len()
    }

    fn snapshot(&self) -> ListenerList {
        Arc::clone(&self.listeners.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Deliver `event` to the listeners registered when the call starts
    pub fn notify(&self, event: &GraphEvent) {
        let listeners = self.snapshot();
        for listener in listeners.iter() {
            listener.on_event(event);
        }
    }

    /// Deliver an application-defined event
    pub fn notify_event(&self, value: serde_json::Value) {
        self.notify(&GraphEvent::Custom(value));
    }
}

impl std::fmt::Debug for GraphEventManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphEventManager")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
