//! Typed dispatch from extracted commands to application handlers
//!
//! An action maps either to a single handler or to a per-slot handler map.
//! Missing handlers surface as explicit errors instead of falling through
//! silently.

use std::collections::HashMap;
use std::fmt;

use crate::command::CommandStructure;

/// Handler callback: receives the slot and the optional payload
pub type HandlerFn = Box<dyn Fn(&str, Option<&str>)>;

/// How an action is handled
pub enum Handler {
    /// One handler for the action regardless of slot
    Direct(HandlerFn),
    /// Slot-addressable action: a handler per slot key
    BySlot(HashMap<String, HandlerFn>),
}

/// Dispatch failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    NoHandlerForAction(String),
    NoHandlerForSlot(String, String),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::NoHandlerForAction(action) => {
                write!(f, "no handler registered for action \"{}\"", action)
            }
            DispatchError::NoHandlerForSlot(action, slot) => {
                write!(
                    f,
                    "no handler registered for action \"{}\" on slot \"{}\"",
                    action, slot
                )
            }
        }
    }
}

impl std::error::Error for DispatchError {}

/// Registry of action handlers
#[derive(Default)]
pub struct DispatchTable {
    handlers: HashMap<String, Handler>,
}

impl DispatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler that takes any slot
    pub fn register<F>(&mut self, action: &str, handler: F)
    where
        F: Fn(&str, Option<&str>) + 'static,
    {
        self.handlers
            .insert(action.to_string(), Handler::Direct(Box::new(handler)));
    }

    /// Register a handler for one slot of an action, keeping any handlers
    /// already registered for its other slots
    pub fn register_slot<F>(&mut self, action: &str, slot: &str, handler: F)
    where
        F: Fn(&str, Option<&str>) + 'static,
    {
        let entry = self
            .handlers
            .entry(action.to_string())
            .or_insert_with(|| Handler::BySlot(HashMap::new()));
        match entry {
            Handler::BySlot(slots) => {
                slots.insert(slot.to_string(), Box::new(handler));
            }
            Handler::Direct(_) => {
                let mut slots = HashMap::new();
                slots.insert(slot.to_string(), Box::new(handler) as HandlerFn);
                *entry = Handler::BySlot(slots);
            }
        }
    }

    /// Route an extracted command to its handler
    pub fn dispatch(&self, command: &CommandStructure) -> Result<(), DispatchError> {
        let handler = self
            .handlers
            .get(&command.action)
            .ok_or_else(|| DispatchError::NoHandlerForAction(command.action.clone()))?;
        match handler {
            Handler::Direct(f) => {
                f(&command.slot, command.payload.as_deref());
                Ok(())
            }
            Handler::BySlot(slots) => {
                let f = slots.get(&command.slot).ok_or_else(|| {
                    DispatchError::NoHandlerForSlot(
                        command.action.clone(),
                        command.slot.clone(),
                    )
                })?;
                f(&command.slot, command.payload.as_deref());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn command(action: &str, slot: &str, payload: Option<&str>) -> CommandStructure {
        CommandStructure {
            action: action.to_string(),
            slot: slot.to_string(),
            connective: None,
            payload: payload.map(str::to_string),
        }
    }

    #[test]
    fn test_direct_handler_receives_slot_and_payload() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen2 = Rc::clone(&seen);

        let mut table = DispatchTable::new();
        table.register("clear", move |slot, payload| {
            seen2.borrow_mut().push((slot.to_string(), payload.map(str::to_string)));
        });

        table.dispatch(&command("clear", "current", None)).unwrap();
        assert_eq!(*seen.borrow(), vec![("current".to_string(), None)]);
    }

    #[test]
    fn test_slot_handler_routing() {
        let filled = Rc::new(RefCell::new(String::new()));
        let filled2 = Rc::clone(&filled);

        let mut table = DispatchTable::new();
        table.register_slot("fill", "first", move |_, payload| {
            *filled2.borrow_mut() = payload.unwrap_or_default().to_string();
        });

        table
            .dispatch(&command("fill", "first", Some("hello")))
            .unwrap();
        assert_eq!(*filled.borrow(), "hello");
    }

    #[test]
    fn test_missing_action_is_an_error() {
        let table = DispatchTable::new();
        assert_eq!(
            table.dispatch(&command("focus", "current", None)),
            Err(DispatchError::NoHandlerForAction("focus".to_string()))
        );
    }

    #[test]
    fn test_missing_slot_is_an_error() {
        let mut table = DispatchTable::new();
        table.register_slot("fill", "first", |_, _| {});
        assert_eq!(
            table.dispatch(&command("fill", "second", Some("x"))),
            Err(DispatchError::NoHandlerForSlot(
                "fill".to_string(),
                "second".to_string()
            ))
        );
    }

    #[test]
    fn test_slot_registration_replaces_direct_handler() {
        let mut table = DispatchTable::new();
        table.register("focus", |_, _| {});
        table.register_slot("focus", "first", |_, _| {});
        // the action is now slot-addressable only
        assert_eq!(
            table.dispatch(&command("focus", "current", None)),
            Err(DispatchError::NoHandlerForSlot(
                "focus".to_string(),
                "current".to_string()
            ))
        );
    }
}
