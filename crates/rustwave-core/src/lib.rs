//! Mesh-network command-class encoding and decoding in pure Rust.
//!
//! `rustwave-core` provides zero-copy, `no_std`-compatible codecs for the
//! command classes spoken by rustwave device drivers, starting with the
//! Alarm/Notification class. It owns no transport state: payload bytes go in,
//! structured records come out, and the driver layer decides what to do with
//! them.
//!
//! # Feature flags
//!
//! - **`std`** (default) — enables `std::error::Error` implementations.
//! - **`serde`** — derives `Serialize`/`Deserialize` on core types.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

/// Command-class payload codecs (Alarm/Notification).
pub mod command_classes;
/// Zero-copy byte reader and writer for command-class payloads.
pub mod encoding;
/// Error types for encoding and decoding operations.
pub mod error;
/// Core data types: event categories, legacy lock states, value indices.
pub mod types;

pub use error::{DecodeError, EncodeError};
