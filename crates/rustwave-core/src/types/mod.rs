pub mod event_type;
pub mod lock_state;
pub mod value_index;

pub use event_type::EventType;
pub use lock_state::lock_state;
