use rustwave_core::types::{value_index, EventType};
use std::collections::HashMap;

/// A value update routed out of a command-class handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Byte(u8),
    Text(&'static str),
}

/// Destination for decoded values, owned by the node framework.
///
/// Handlers never store values themselves. Registration order matters:
/// consumers build ordered lists of a node's exposed values from the sequence
/// of `register_value` calls.
pub trait ValueSink {
    /// Declares a named value slot at a routing index. Re-registering an
    /// index is allowed and keeps the first name.
    fn register_value(&mut self, index: u16, name: &str);

    /// Publishes a fresh reading. Publishing to an unregistered index is the
    /// sink's concern; handlers do not pre-check.
    fn publish(&mut self, index: u16, value: Value);

    /// Whether the device answers get requests at all.
    fn has_get_capability(&self) -> bool;

    /// Event categories with a registered value slot, in registration order.
    fn known_event_types(&self) -> Vec<EventType>;
}

/// In-memory [`ValueSink`] used by tests and examples, standing in for the
/// node framework's value registry.
#[derive(Debug)]
pub struct MemoryValueStore {
    registrations: Vec<(u16, String)>,
    current: HashMap<u16, Value>,
    get_capability: bool,
}

impl Default for MemoryValueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryValueStore {
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
            current: HashMap::new(),
            get_capability: true,
        }
    }

    pub fn set_get_capability(&mut self, supported: bool) {
        self.get_capability = supported;
    }

    pub fn value(&self, index: u16) -> Option<Value> {
        self.current.get(&index).copied()
    }

    /// Registered slots in registration order.
    pub fn registrations(&self) -> &[(u16, String)] {
        &self.registrations
    }

    fn is_registered(&self, index: u16) -> bool {
        self.registrations.iter().any(|(i, _)| *i == index)
    }
}

impl ValueSink for MemoryValueStore {
    fn register_value(&mut self, index: u16, name: &str) {
        if !self.is_registered(index) {
            self.registrations.push((index, name.to_owned()));
        }
    }

    fn publish(&mut self, index: u16, value: Value) {
        self.current.insert(index, value);
    }

    fn has_get_capability(&self) -> bool {
        self.get_capability
    }

    fn known_event_types(&self) -> Vec<EventType> {
        self.registrations
            .iter()
            .filter_map(|(index, _)| {
                let ordinal = index.checked_sub(value_index::for_event(EventType::General))?;
                EventType::from_u8(u8::try_from(ordinal).ok()?)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryValueStore, Value, ValueSink};
    use rustwave_core::types::{value_index, EventType};

    #[test]
    fn registration_keeps_first_name_and_order() {
        let mut store = MemoryValueStore::new();
        store.register_value(1, "Alarm Level");
        store.register_value(0, "Alarm Type");
        store.register_value(1, "Renamed");
        let names: Vec<&str> = store.registrations().iter().map(|(_, n)| n.as_str()).collect();
        assert_eq!(names, vec!["Alarm Level", "Alarm Type"]);
    }

    #[test]
    fn known_event_types_come_from_extended_slots() {
        let mut store = MemoryValueStore::new();
        store.register_value(value_index::SOURCE_NODE_ID, "SourceNodeId");
        store.register_value(value_index::for_event(EventType::Smoke), "Smoke");
        store.register_value(value_index::for_event(EventType::Flood), "Flood");
        assert_eq!(
            store.known_event_types(),
            vec![EventType::Smoke, EventType::Flood]
        );
    }

    #[test]
    fn publish_overwrites_current_value() {
        let mut store = MemoryValueStore::new();
        store.publish(0, Value::Byte(7));
        store.publish(0, Value::Byte(9));
        assert_eq!(store.value(0), Some(Value::Byte(9)));
        assert_eq!(store.value(1), None);
    }
}
