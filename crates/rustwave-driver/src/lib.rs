//! Driver-side handling for rustwave command classes.
//!
//! `rustwave-driver` sits between the codec layer (`rustwave-core`) and the
//! node framework that owns transport and value storage. It routes decoded
//! report fields into a [`ValueSink`], runs the one-shot supported-types
//! discovery per device, and builds outgoing request bodies for the
//! transport to frame and send.

pub mod alarm;
pub mod error;
pub mod sink;

pub use alarm::AlarmCommandClass;
pub use error::DriverError;
pub use sink::{MemoryValueStore, Value, ValueSink};
