//! Walk a version 2 smoke sensor through discovery and a report.
//!
//! Usage:
//!   cargo run -p rustwave-driver --example handle_alarm

use rustwave_driver::{AlarmCommandClass, MemoryValueStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut handler = AlarmCommandClass::new(2);
    let mut store = MemoryValueStore::new();

    // Attach: every alarm node exposes the type and level slots.
    handler.create_values(&mut store);

    // Discovery: ask the device which event types it can report.
    if let Some(body) = handler.request_supported()? {
        println!("-> SupportedGet body: {body:02X?}");
    }

    // Device answers: General and Smoke.
    handler.handle_message(&[0x08, 0x01, 0b0000_0011], &mut store)?;
    for (index, name) in store.registrations() {
        println!("registered value {index}: {name}");
    }

    // Poll current state, one request per supported type.
    for body in handler.request_current(&store)? {
        println!("-> Get body: {body:02X?}");
    }

    // Device reports a smoke event from source node 9.
    handler.handle_message(&[0x05, 0x07, 0x01, 0x09, 0x00, 0x01, 0x01], &mut store)?;
    for (index, _) in store.registrations() {
        println!("value {index} = {:?}", store.value(*index));
    }
    Ok(())
}
