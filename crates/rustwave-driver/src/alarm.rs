//! Per-device Alarm/Notification handling.
//!
//! One `AlarmCommandClass` instance exists per device node. It carries the
//! negotiated version and the one-shot supported-types discovery gate; all
//! payload decoding and encoding is delegated to `rustwave-core`. The caller
//! serializes inbound dispatch per device, so no locking lives here.

use crate::error::DriverError;
use crate::sink::{Value, ValueSink};
use rustwave_core::command_classes::alarm::{
    AlarmGetRequest, AlarmReport, AlarmSupportedGetRequest, SupportedEvents, CMD_REPORT,
    CMD_SUPPORTED_REPORT,
};
use rustwave_core::encoding::Writer;
use rustwave_core::types::value_index;

#[derive(Debug)]
pub struct AlarmCommandClass {
    version: u8,
    /// Supported-types discovery gate. Armed at attach for version > 1
    /// devices, disarmed once a supported report is processed. Version 1 has
    /// no discovery handshake.
    supported_types_pending: bool,
}

impl AlarmCommandClass {
    pub fn new(version: u8) -> Self {
        Self {
            version,
            supported_types_pending: version > 1,
        }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    /// Registers the fixed value slots every alarm node exposes. Called when
    /// the command class attaches to a node, before any traffic.
    pub fn create_values<S: ValueSink>(&self, sink: &mut S) {
        sink.register_value(value_index::ALARM_TYPE, "Alarm Type");
        sink.register_value(value_index::ALARM_LEVEL, "Alarm Level");
    }

    /// Whether the supported-types handshake is still outstanding.
    pub fn needs_supported_query(&self) -> bool {
        self.supported_types_pending
    }

    /// Builds the supported-types request body, or `None` when the device is
    /// version 1 or discovery already finished. Stays pending until a
    /// supported report is processed, so the caller may re-issue; retries
    /// themselves belong to the transport.
    pub fn request_supported(&mut self) -> Result<Option<Vec<u8>>, DriverError> {
        if !self.supported_types_pending {
            return Ok(None);
        }
        let mut buf = [0u8; 1];
        let mut w = Writer::new(&mut buf);
        AlarmSupportedGetRequest.encode(&mut w)?;
        Ok(Some(w.as_written().to_vec()))
    }

    /// Builds the get request bodies polling current alarm state.
    ///
    /// Version 1 devices take a single untargeted get. Later versions take
    /// one request per event category with a registered value, in the sink's
    /// registration order. Refuses without producing bytes when the device
    /// lacks get capability.
    pub fn request_current<S: ValueSink>(&self, sink: &S) -> Result<Vec<Vec<u8>>, DriverError> {
        if !sink.has_get_capability() {
            log::info!("alarm get not supported on this node");
            return Err(DriverError::GetNotSupported);
        }

        let mut buf = [0u8; 4];
        if self.version <= 1 {
            let mut w = Writer::new(&mut buf);
            AlarmGetRequest { version: self.version, event_type: None }.encode(&mut w)?;
            return Ok(vec![w.as_written().to_vec()]);
        }

        let mut bodies = Vec::new();
        for event in sink.known_event_types() {
            let mut w = Writer::new(&mut buf);
            AlarmGetRequest { version: self.version, event_type: Some(event) }.encode(&mut w)?;
            bodies.push(w.as_written().to_vec());
        }
        Ok(bodies)
    }

    /// Dispatches an inbound payload on its command identifier. Returns
    /// `Ok(false)` for commands this class does not handle.
    pub fn handle_message<S: ValueSink>(
        &mut self,
        payload: &[u8],
        sink: &mut S,
    ) -> Result<bool, DriverError> {
        match payload.first() {
            Some(&CMD_REPORT) => {
                self.handle_report(payload, sink)?;
                Ok(true)
            }
            Some(&CMD_SUPPORTED_REPORT) => {
                self.handle_supported_report(payload, sink)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Decodes a report and routes its fields into the sink.
    ///
    /// Type and level are always published; source node and the per-category
    /// parameter only when the extended fields are present. A truncated
    /// extended report still publishes what was parsed.
    pub fn handle_report<S: ValueSink>(
        &self,
        payload: &[u8],
        sink: &mut S,
    ) -> Result<(), DriverError> {
        let report = AlarmReport::decode(payload, self.version)?;

        match report.extended {
            Some(ext) => log::info!(
                "received alarm report: type={}, level={}, source={}, event={} ({}), param={}, status={}",
                report.alarm_type,
                report.level,
                ext.source_node_id,
                ext.event_type,
                report.event_type_name().unwrap_or("Unknown type"),
                ext.event_parameter,
                ext.status,
            ),
            None => log::info!(
                "received alarm report: type={}, level={}",
                report.alarm_type,
                report.level
            ),
        }

        sink.publish(value_index::ALARM_TYPE, Value::Byte(report.alarm_type));
        sink.publish(value_index::ALARM_LEVEL, Value::Byte(report.level));

        if let Some(ext) = report.extended {
            sink.publish(value_index::SOURCE_NODE_ID, Value::Byte(ext.source_node_id));
            sink.publish(
                value_index::extended(ext.event_type),
                Value::Byte(ext.event_parameter),
            );
        }

        if let Some(state) = report.lock_state {
            log::debug!("lock state: {state}");
            sink.publish(value_index::LOCK_STATE, Value::Text(state));
        }
        Ok(())
    }

    /// Decodes a supported report, registers the advertised categories, and
    /// closes the discovery gate.
    pub fn handle_supported_report<S: ValueSink>(
        &mut self,
        payload: &[u8],
        sink: &mut S,
    ) -> Result<(), DriverError> {
        let supported = SupportedEvents::decode(payload)?;
        log::info!("received supported alarm types");

        // Version >= 2 reports carry a source node id, so the slot always
        // exists once discovery ran.
        sink.register_value(value_index::SOURCE_NODE_ID, "SourceNodeId");

        for event in supported.iter() {
            sink.register_value(value_index::for_event(event), event.name());
            log::info!("    added alarm type: {}", event.name());
        }
        if supported.unrecognized() > 0 {
            log::warn!(
                "supported report advertised {} unknown alarm type(s)",
                supported.unrecognized()
            );
        }

        self.supported_types_pending = false;
        Ok(())
    }
}
