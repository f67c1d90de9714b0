//! Legacy lock-state reinterpretation.
//!
//! Some door locks overload the basic alarm report: alarm types 17 through 25
//! describe how the bolt was driven rather than an alarm condition. The
//! mapping predates the versioned event-type scheme and applies whenever the
//! byte pattern matches, whatever version the device negotiated.

const LOCK_STATE_BASE: u8 = 17;

static LOCK_STATES: [&str; 9] = [
    "Secured at Keypad - Jammed",
    "Secured at Keypad - Success",
    "Unsecured at Keypad",
    "Unknown",
    "Secured Manually",
    "Unsecured Manually",
    "Secured by Controller - Jammed",
    "Secured by Controller",
    "Unsecured by Controller",
];

/// Looks up the descriptive lock state for an alarm type byte.
///
/// Returns `None` outside the legacy window [17, 25].
pub fn lock_state(alarm_type: u8) -> Option<&'static str> {
    let offset = alarm_type.checked_sub(LOCK_STATE_BASE)?;
    LOCK_STATES.get(usize::from(offset)).copied()
}

#[cfg(test)]
mod tests {
    use super::lock_state;

    #[test]
    fn window_maps_to_fixed_strings() {
        assert_eq!(lock_state(17), Some("Secured at Keypad - Jammed"));
        assert_eq!(lock_state(18), Some("Secured at Keypad - Success"));
        assert_eq!(lock_state(19), Some("Unsecured at Keypad"));
        assert_eq!(lock_state(20), Some("Unknown"));
        assert_eq!(lock_state(21), Some("Secured Manually"));
        assert_eq!(lock_state(22), Some("Unsecured Manually"));
        assert_eq!(lock_state(23), Some("Secured by Controller - Jammed"));
        assert_eq!(lock_state(24), Some("Secured by Controller"));
        assert_eq!(lock_state(25), Some("Unsecured by Controller"));
    }

    #[test]
    fn outside_window_is_none() {
        for t in (0..17).chain(26..=255u16) {
            assert_eq!(lock_state(t as u8), None);
        }
    }
}
