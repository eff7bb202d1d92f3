// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Event System
//!
//! Callbacks for committed engine changes. Events are dispatched only after
//! the store has accepted the change.

use std::sync::Arc;

/// Events emitted by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Two contacts were merged into one.
    ContactsMerged {
        /// The surviving contact ID.
        primary_id: String,
        /// The ID of the contact that no longer exists.
        consumed_id: String,
        /// The history entry that can reverse the merge.
        history_entry_id: String,
    },

    /// The latest merge was reversed.
    MergeUndone {
        /// The contact restored to its pre-merge state.
        primary_id: String,
        /// The contact brought back.
        restored_id: String,
        /// The history entry that was consumed.
        history_entry_id: String,
    },

    /// An event was added to a contact's timeline.
    TimelineEventAppended {
        /// The contact ID.
        contact_id: String,
    },
}

/// Event handler trait.
///
/// Implement this trait to receive engine events.
pub trait EventHandler: Send + Sync {
    /// Called when an event occurs.
    fn on_event(&self, event: EngineEvent);
}

/// Simple callback-based event handler.
pub struct CallbackHandler<F>
where
    F: Fn(EngineEvent) + Send + Sync,
{
    callback: F,
}

impl<F> CallbackHandler<F>
where
    F: Fn(EngineEvent) + Send + Sync,
{
    /// Creates a new callback handler.
    pub fn new(callback: F) -> Self {
        CallbackHandler { callback }
    }
}

impl<F> EventHandler for CallbackHandler<F>
where
    F: Fn(EngineEvent) + Send + Sync,
{
    fn on_event(&self, event: EngineEvent) {
        (self.callback)(event);
    }
}

/// Fans events out to every registered handler, in registration order.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    /// Creates a new event dispatcher.
    pub fn new() -> Self {
        EventDispatcher {
            handlers: Vec::new(),
        }
    }

    /// Adds an event handler.
    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Dispatches an event to all handlers.
    pub fn dispatch(&self, event: EngineEvent) {
        for handler in &self.handlers {
            handler.on_event(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_dispatch_reaches_every_handler() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut dispatcher = EventDispatcher::new();
        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            dispatcher.add_handler(Arc::new(CallbackHandler::new(move |event| {
                if let EngineEvent::TimelineEventAppended { contact_id } = event {
                    seen.lock().unwrap().push(format!("{}:{}", tag, contact_id));
                }
            })));
        }

        dispatcher.dispatch(EngineEvent::TimelineEventAppended {
            contact_id: "c1".into(),
        });

        assert_eq!(dispatcher.handler_count(), 2);
        assert_eq!(*seen.lock().unwrap(), vec!["first:c1", "second:c1"]);
    }
}
