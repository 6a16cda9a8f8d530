use std::sync::{Arc, Mutex};

use midir::{Ignore, MidiInput, MidiInputConnection, MidiInputPort};

use crate::{
    controller::{ControlChange, Controller},
    error::{Error, Result},
};

const CLIENT_NAME: &str = "nocturn-cc";
const CONNECTION_NAME: &str = "nocturn-cc-in";

/// Decode a raw MIDI message into a control change, if it is one.
pub fn parse_control_change(message: &[u8]) -> Option<ControlChange> {
    match message {
        [status, controller, value, ..] if status & 0xF0 == 0xB0 => Some(ControlChange {
            channel: status & 0x0F,
            controller: controller & 0x7F,
            value: value & 0x7F,
        }),
        _ => None,
    }
}

/// Names of all MIDI input ports currently visible.
pub fn list_input_ports() -> Result<Vec<String>> {
    let midi_in = MidiInput::new(CLIENT_NAME).map_err(|err| Error::MidiInit(err.to_string()))?;
    Ok(midi_in
        .ports()
        .iter()
        .map(|port| {
            midi_in
                .port_name(port)
                .unwrap_or_else(|_| "<unknown>".into())
        })
        .collect())
}

/// Live connection between a MIDI input port and a controller.
///
/// Every incoming control change is handed to the controller while holding
/// its mutex, so events are decoded one at a time in arrival order. The port
/// is closed when the link is dropped.
pub struct MidiInputLink {
    connection: Option<MidiInputConnection<()>>,
    port_name: String,
}

impl MidiInputLink {
    /// Connect `controller` to the first input port whose name contains
    /// `port_hint` (case-insensitive). An empty hint picks the first port.
    /// When `channel` is set, control changes on other channels are dropped.
    pub fn attach<C>(
        controller: Arc<Mutex<C>>,
        port_hint: &str,
        channel: Option<u8>,
    ) -> Result<Self>
    where
        C: Controller + Send + 'static,
    {
        let mut midi_in =
            MidiInput::new(CLIENT_NAME).map_err(|err| Error::MidiInit(err.to_string()))?;
        midi_in.ignore(Ignore::All);

        let target_port = find_port(&midi_in, port_hint)?;
        let port_name = midi_in
            .port_name(&target_port)
            .unwrap_or_else(|_| "<unknown>".into());

        let connection = midi_in
            .connect(
                &target_port,
                CONNECTION_NAME,
                move |_stamp, message, _| {
                    let Some(cc) = parse_control_change(message) else {
                        tracing::debug!(?message, "ignoring non-CC message");
                        return;
                    };
                    if channel.is_some_and(|ch| ch != cc.channel) {
                        return;
                    }
                    match controller.lock() {
                        Ok(mut controller) => controller.handle_control_change(cc),
                        Err(_) => tracing::warn!(?cc, "controller lock poisoned, dropping event"),
                    }
                },
                (),
            )
            .map_err(|err| Error::Connection(err.to_string()))?;

        tracing::info!(port = %port_name, "attached to MIDI input");

        Ok(Self {
            connection: Some(connection),
            port_name,
        })
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

impl Drop for MidiInputLink {
    fn drop(&mut self) {
        if let Some(connection) = self.connection.take() {
            let _ = connection.close();
        }
    }
}

fn find_port(midi_in: &MidiInput, port_hint: &str) -> Result<MidiInputPort> {
    let ports = midi_in.ports();

    if ports.is_empty() {
        return Err(Error::PortNotFound(port_hint.to_string()));
    }

    if port_hint.trim().is_empty() {
        return Ok(ports[0].clone());
    }

    let hint = port_hint.to_lowercase();
    ports
        .iter()
        .find(|port| {
            midi_in
                .port_name(port)
                .map(|name| name.to_lowercase().contains(&hint))
                .unwrap_or(false)
        })
        .cloned()
        .ok_or_else(|| Error::PortNotFound(port_hint.to_string()))
}
