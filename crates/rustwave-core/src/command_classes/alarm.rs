//! Alarm/Notification command class.
//!
//! Three payload generations share one command set. Version 1 reports carry
//! only a `(type, level)` pair. Version 2 extends the report with a source
//! node, an event category, and a per-category parameter, and adds a
//! supported-types handshake. Version 3 keeps the version 2 layout and adds a
//! "first event" selector to the get request. The negotiated version is
//! per-device input on every call; this module stores nothing.

use crate::encoding::{Reader, Writer};
use crate::types::{lock_state, EventType};
use crate::{DecodeError, EncodeError};

pub const CMD_GET: u8 = 0x04;
pub const CMD_REPORT: u8 = 0x05;
/// Version 2 command. No encoder is provided; declared for dispatch tables.
pub const CMD_SET: u8 = 0x06;
pub const CMD_SUPPORTED_GET: u8 = 0x07;
pub const CMD_SUPPORTED_REPORT: u8 = 0x08;

/// Fields only present in version >= 2 reports of full length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtendedReport {
    pub source_node_id: u8,
    /// Reserved status byte between source node and event category.
    pub status: u8,
    /// Raw event category ordinal. May exceed the known table; resolve with
    /// [`EventType::from_u8`].
    pub event_type: u8,
    pub event_parameter: u8,
}

/// A decoded Alarm/Notification report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmReport {
    pub alarm_type: u8,
    pub level: u8,
    pub extended: Option<ExtendedReport>,
    /// Legacy lock-state string, attached on the basic path when
    /// `alarm_type` falls in the lock window [17, 25].
    pub lock_state: Option<&'static str>,
}

impl AlarmReport {
    /// Decodes a report payload under the device's negotiated version.
    ///
    /// `payload[0]` is the command identifier; the dispatcher has already
    /// matched it against [`CMD_REPORT`] and it is not re-verified here.
    /// A version >= 2 device that sends a short payload is decoded on the
    /// version 1 path, so `alarm_type` and `level` survive truncation.
    pub fn decode(payload: &[u8], version: u8) -> Result<Self, DecodeError> {
        if payload.len() < 3 {
            return Err(DecodeError::TooShort);
        }
        let mut r = Reader::new(payload);
        let _cmd = r.read_u8()?;
        let alarm_type = r.read_u8()?;
        let level = r.read_u8()?;

        if version <= 1 || payload.len() < 7 {
            return Ok(Self {
                alarm_type,
                level,
                extended: None,
                lock_state: lock_state(alarm_type),
            });
        }

        let source_node_id = r.read_u8()?;
        let status = r.read_u8()?;
        let event_type = r.read_u8()?;
        let event_parameter = r.read_u8()?;
        Ok(Self {
            alarm_type,
            level,
            extended: Some(ExtendedReport {
                source_node_id,
                status,
                event_type,
                event_parameter,
            }),
            lock_state: None,
        })
    }

    /// The reported event category, if it is in the known table.
    pub fn event_type(&self) -> Option<EventType> {
        self.extended.and_then(|ext| EventType::from_u8(ext.event_type))
    }

    /// Display name for the reported category; `"Unknown type"` for raw
    /// ordinals outside the table. `None` on basic reports.
    pub fn event_type_name(&self) -> Option<&'static str> {
        self.extended.map(|ext| match EventType::from_u8(ext.event_type) {
            Some(event) => event.name(),
            None => "Unknown type",
        })
    }
}

/// The set of event categories a device declares it can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SupportedEvents {
    mask: u16,
    unrecognized: u32,
}

impl SupportedEvents {
    /// Decodes a supported-report payload: `[cmd, num_bytes, bitmap...]`,
    /// LSB-first within each byte, logical index `byte*8 + bit`.
    ///
    /// Set bits beyond the known table are tallied in
    /// [`unrecognized`](Self::unrecognized) and never enter the set.
    pub fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        if payload.len() < 2 {
            return Err(DecodeError::TooShort);
        }
        let mut r = Reader::new(payload);
        let _cmd = r.read_u8()?;
        let num_bytes = usize::from(r.read_u8()?);
        if payload.len() < 2 + num_bytes {
            return Err(DecodeError::TooShort);
        }
        let bitmap = r.read_exact(num_bytes)?;

        let mut mask = 0u16;
        let mut unrecognized = 0u32;
        for (byte_index, byte) in bitmap.iter().enumerate() {
            for bit in 0..8 {
                if byte & (1 << bit) == 0 {
                    continue;
                }
                let index = byte_index * 8 + bit;
                if index < EventType::COUNT {
                    mask |= 1 << index;
                } else {
                    unrecognized += 1;
                }
            }
        }
        Ok(Self { mask, unrecognized })
    }

    pub fn contains(&self, event: EventType) -> bool {
        self.mask & (1 << event.to_u8()) != 0
    }

    /// Supported categories in ascending ordinal order. Downstream consumers
    /// build ordered value lists from this sequence, so the order is part of
    /// the contract.
    pub fn iter(&self) -> impl Iterator<Item = EventType> + '_ {
        EventType::ALL.iter().copied().filter(|event| self.contains(*event))
    }

    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Count of set bitmap positions that map to no known category.
    pub fn unrecognized(&self) -> u32 {
        self.unrecognized
    }
}

/// Outgoing get request polling current alarm state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmGetRequest {
    pub version: u8,
    /// Category to query. Required for version >= 2; ignored for version 1,
    /// where the device returns whatever state it holds.
    pub event_type: Option<EventType>,
}

impl AlarmGetRequest {
    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_u8(CMD_GET)?;
        if self.version <= 1 {
            return Ok(());
        }
        let event = self.event_type.ok_or(EncodeError::MissingEventType)?;
        // Reserved selector byte, always zero on the wire.
        w.write_u8(0x00)?;
        w.write_u8(event.to_u8())?;
        if self.version > 2 {
            // Ask for the first (oldest) pending event of this category.
            w.write_u8(0x01)?;
        }
        Ok(())
    }
}

/// Outgoing request for the supported-types bitmap. Only meaningful on
/// version > 1 devices; version 1 has no discovery handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmSupportedGetRequest;

impl AlarmSupportedGetRequest {
    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_u8(CMD_SUPPORTED_GET)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AlarmGetRequest, AlarmReport, AlarmSupportedGetRequest, SupportedEvents, CMD_REPORT,
        CMD_SUPPORTED_REPORT,
    };
    use crate::encoding::Writer;
    use crate::types::EventType;
    use crate::{DecodeError, EncodeError};
    use proptest::prelude::*;

    #[test]
    fn v1_report_has_no_extended_fields() {
        let report = AlarmReport::decode(&[CMD_REPORT, 7, 0xFF], 1).unwrap();
        assert_eq!(report.alarm_type, 7);
        assert_eq!(report.level, 0xFF);
        assert_eq!(report.extended, None);
        assert_eq!(report.lock_state, None);
        assert_eq!(report.event_type_name(), None);
    }

    #[test]
    fn short_report_is_too_short() {
        assert_eq!(
            AlarmReport::decode(&[CMD_REPORT, 7], 2).unwrap_err(),
            DecodeError::TooShort
        );
    }

    #[test]
    fn v2_report_carries_source_and_event() {
        let report = AlarmReport::decode(&[CMD_REPORT, 7, 1, 9, 0, 1, 1], 2).unwrap();
        assert_eq!(report.alarm_type, 7);
        assert_eq!(report.level, 1);
        let ext = report.extended.unwrap();
        assert_eq!(ext.source_node_id, 9);
        assert_eq!(ext.status, 0);
        assert_eq!(ext.event_type, 1);
        assert_eq!(ext.event_parameter, 1);
        assert_eq!(report.event_type(), Some(EventType::Smoke));
        assert_eq!(report.event_type_name(), Some("Smoke"));
    }

    #[test]
    fn v2_short_report_falls_back_to_basic_layout() {
        let report = AlarmReport::decode(&[CMD_REPORT, 3, 2], 2).unwrap();
        assert_eq!(report.alarm_type, 3);
        assert_eq!(report.level, 2);
        assert_eq!(report.extended, None);
    }

    #[test]
    fn unknown_event_type_is_labelled_not_indexed() {
        let report = AlarmReport::decode(&[CMD_REPORT, 0, 0, 1, 0, 200, 5], 3).unwrap();
        assert_eq!(report.event_type(), None);
        assert_eq!(report.event_type_name(), Some("Unknown type"));
        assert_eq!(report.extended.unwrap().event_parameter, 5);
    }

    #[test]
    fn lock_window_attaches_state_on_basic_path() {
        let report = AlarmReport::decode(&[CMD_REPORT, 21, 1], 1).unwrap();
        assert_eq!(report.lock_state, Some("Secured Manually"));
        // The window applies on short payloads whatever the version says.
        let report = AlarmReport::decode(&[CMD_REPORT, 25, 1], 3).unwrap();
        assert_eq!(report.lock_state, Some("Unsecured by Controller"));
        // Full-length extended reports never reinterpret the type byte.
        let report = AlarmReport::decode(&[CMD_REPORT, 21, 1, 9, 0, 6, 1], 2).unwrap();
        assert_eq!(report.lock_state, None);
    }

    #[test]
    fn supported_bitmap_low_bits() {
        let supported = SupportedEvents::decode(&[CMD_SUPPORTED_REPORT, 1, 0b0000_0011]).unwrap();
        let got: Vec<EventType> = supported.iter().collect();
        assert_eq!(got, vec![EventType::General, EventType::Smoke]);
        assert_eq!(supported.len(), 2);
        assert_eq!(supported.unrecognized(), 0);
    }

    #[test]
    fn supported_bitmap_spans_bytes_in_order() {
        // Bits 1 (Smoke), 8 (PowerManagement), 13 (HomeHealth).
        let supported =
            SupportedEvents::decode(&[CMD_SUPPORTED_REPORT, 2, 0b0000_0010, 0b0010_0001]).unwrap();
        let got: Vec<EventType> = supported.iter().collect();
        assert_eq!(
            got,
            vec![EventType::Smoke, EventType::PowerManagement, EventType::HomeHealth]
        );
    }

    #[test]
    fn bits_past_the_table_are_counted_not_registered() {
        // Bits 14 and 15 of the second byte plus bit 16 of a third byte.
        let supported =
            SupportedEvents::decode(&[CMD_SUPPORTED_REPORT, 3, 0x00, 0b1100_0000, 0b0000_0001])
                .unwrap();
        assert!(supported.is_empty());
        assert_eq!(supported.unrecognized(), 3);
    }

    #[test]
    fn truncated_bitmap_is_too_short() {
        assert_eq!(
            SupportedEvents::decode(&[CMD_SUPPORTED_REPORT, 4, 0xFF]).unwrap_err(),
            DecodeError::TooShort
        );
        assert_eq!(
            SupportedEvents::decode(&[CMD_SUPPORTED_REPORT]).unwrap_err(),
            DecodeError::TooShort
        );
    }

    #[test]
    fn get_request_shapes_per_version() {
        let mut buf = [0u8; 8];

        let mut w = Writer::new(&mut buf);
        AlarmGetRequest { version: 1, event_type: None }.encode(&mut w).unwrap();
        assert_eq!(w.as_written(), &[0x04]);

        let mut w = Writer::new(&mut buf);
        AlarmGetRequest { version: 2, event_type: Some(EventType::Smoke) }
            .encode(&mut w)
            .unwrap();
        assert_eq!(w.as_written(), &[0x04, 0x00, 0x01]);

        let mut w = Writer::new(&mut buf);
        AlarmGetRequest { version: 3, event_type: Some(EventType::Smoke) }
            .encode(&mut w)
            .unwrap();
        assert_eq!(w.as_written(), &[0x04, 0x00, 0x01, 0x01]);
    }

    #[test]
    fn versioned_get_requires_a_target() {
        let mut buf = [0u8; 8];
        let mut w = Writer::new(&mut buf);
        let err = AlarmGetRequest { version: 2, event_type: None }
            .encode(&mut w)
            .unwrap_err();
        assert_eq!(err, EncodeError::MissingEventType);
    }

    #[test]
    fn supported_get_is_a_single_byte() {
        let mut buf = [0u8; 2];
        let mut w = Writer::new(&mut buf);
        AlarmSupportedGetRequest.encode(&mut w).unwrap();
        assert_eq!(w.as_written(), &[0x07]);
    }

    proptest! {
        #[test]
        fn v1_reports_decode_for_all_byte_pairs(t in any::<u8>(), l in any::<u8>()) {
            let report = AlarmReport::decode(&[CMD_REPORT, t, l], 1).unwrap();
            prop_assert_eq!(report.alarm_type, t);
            prop_assert_eq!(report.level, l);
            prop_assert_eq!(report.extended, None);
            prop_assert_eq!(report.lock_state.is_some(), (17..=25).contains(&t));
        }

        #[test]
        fn extended_fields_come_from_fixed_offsets(
            t in any::<u8>(),
            l in any::<u8>(),
            src in any::<u8>(),
            status in any::<u8>(),
            event in any::<u8>(),
            param in any::<u8>(),
        ) {
            let payload = [CMD_REPORT, t, l, src, status, event, param];
            let report = AlarmReport::decode(&payload, 2).unwrap();
            let ext = report.extended.unwrap();
            prop_assert_eq!(ext.source_node_id, src);
            prop_assert_eq!(ext.event_type, event);
            prop_assert_eq!(ext.event_parameter, param);
            let name = report.event_type_name().unwrap();
            if event < 14 {
                prop_assert_ne!(name, "Unknown type");
            } else {
                prop_assert_eq!(name, "Unknown type");
            }
        }

        #[test]
        fn supported_set_matches_bitmap_bits(bitmap in proptest::collection::vec(any::<u8>(), 0..6)) {
            let mut payload = vec![CMD_SUPPORTED_REPORT, bitmap.len() as u8];
            payload.extend_from_slice(&bitmap);
            let supported = SupportedEvents::decode(&payload).unwrap();

            let mut expected = Vec::new();
            let mut expected_unrecognized = 0u32;
            for index in 0..bitmap.len() * 8 {
                if bitmap[index / 8] & (1 << (index % 8)) == 0 {
                    continue;
                }
                match EventType::from_u8(index as u8) {
                    Some(event) => expected.push(event),
                    None => expected_unrecognized += 1,
                }
            }
            let got: Vec<EventType> = supported.iter().collect();
            prop_assert_eq!(got, expected);
            prop_assert_eq!(supported.unrecognized(), expected_unrecognized);
        }
    }
}
