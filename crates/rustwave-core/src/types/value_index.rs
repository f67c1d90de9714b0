//! Value-routing indices for the Alarm/Notification command class.
//!
//! Decoded fields are routed to the node's value registry by index. The first
//! three slots are fixed; per-category event parameters live at the category
//! ordinal offset by [`EXTENDED_BASE`]. Keeping the arithmetic here keeps the
//! offset convention in one place.

use crate::types::EventType;

pub const ALARM_TYPE: u16 = 0;
pub const ALARM_LEVEL: u16 = 1;
pub const SOURCE_NODE_ID: u16 = 2;

/// Legacy lock-state slot. Version 1 locks never expose a SourceNodeId, so
/// the slot is reused for the descriptive lock-state string.
pub const LOCK_STATE: u16 = 2;

const EXTENDED_BASE: u16 = 3;

/// Routing index for the event parameter of a raw category byte. Raw values
/// 14..=255 still get a well-defined index; whether anything is registered
/// there is the value registry's concern.
pub const fn extended(event_type: u8) -> u16 {
    event_type as u16 + EXTENDED_BASE
}

/// Routing index for a known event category.
pub const fn for_event(event: EventType) -> u16 {
    extended(event.to_u8())
}
