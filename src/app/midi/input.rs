//! Listening to an external MIDI input port.

use crate::prelude::*;
use crossbeam_channel::TrySendError;
use midir::{Ignore, MidiInput, MidiInputConnection};
use tracing::{info, trace, warn};

/// Failure to listen to a MIDI input.
#[derive(Debug, thiserror::Error)]
pub enum MIDIError {
    #[error("MIDI access was denied: {0}")]
    AccessDenied(String),
    #[error("no MIDI input ports were found")]
    NoPorts,
    #[error("no MIDI input port contained \"{0}\"")]
    NoMatchingPort(String),
    #[error("failed to connect to MIDI port: {0}")]
    Connect(String),
}

/// Forwards every 3-byte message from one MIDI input port into a channel.
///
/// The callback runs on midir's own thread; the receiving side drains the
/// channel once per render tick.
pub struct MIDIInputListener {
    connection: Option<MidiInputConnection<()>>,
    bound_port_name: String,
}

impl MIDIInputListener {
    /// Binds to the first input port whose name contains `port_substring`
    /// (case-insensitive), or to the first port if no substring is given.
    ///
    /// # Errors
    ///
    /// Returns an error if MIDI input is unavailable, if there are no input
    /// ports, if no port matches, or if the connection fails.
    pub fn connect(
        client_name: &str,
        port_substring: Option<&str>,
        sender: CCSender<[u8; 3]>,
    ) -> Result<Self, MIDIError> {
        let mut input = MidiInput::new(client_name)
            .map_err(|e| MIDIError::AccessDenied(e.to_string()))?;
        input.ignore(Ignore::All);

        let ports = input.ports();
        let names: Vec<String> = ports
            .iter()
            .map(|p| {
                input.port_name(p).unwrap_or_else(|_| String::from("UNKNOWN"))
            })
            .collect();

        let index = select_port(&names, port_substring)?;
        let bound_port_name = names[index].clone();

        let connection = input
            .connect(
                &ports[index],
                &format!("{client_name}_in"),
                move |_stamp, bytes, _| forward(bytes, &sender),
                (),
            )
            .map_err(|e| MIDIError::Connect(e.to_string()))?;

        info!("listening to MIDI port \"{bound_port_name}\"");

        Ok(Self { connection: Some(connection), bound_port_name })
    }

    pub fn bound_port_name(&self) -> &str {
        &self.bound_port_name
    }

    /// Disconnects from the port. Calling this more than once has no extra
    /// effect.
    pub fn close(&mut self) {
        if let Some(connection) = self.connection.take() {
            connection.close();
            info!("closed MIDI port \"{}\"", self.bound_port_name);
        }
    }
}

impl Drop for MIDIInputListener {
    fn drop(&mut self) {
        self.close();
    }
}

/// Picks the port to bind to from the available port names.
fn select_port(
    names: &[String],
    port_substring: Option<&str>,
) -> Result<usize, MIDIError> {
    if names.is_empty() {
        return Err(MIDIError::NoPorts);
    }

    let Some(substring) = port_substring else {
        return Ok(0);
    };

    let s = substring.to_lowercase();

    names
        .iter()
        .position(|name| name.to_lowercase().contains(&s))
        .ok_or_else(|| MIDIError::NoMatchingPort(substring.to_string()))
}

fn forward(bytes: &[u8], sender: &CCSender<[u8; 3]>) {
    let &[status, data1, data2] = bytes else {
        trace!(len = bytes.len(), "dropping MIDI message that is not 3 bytes");
        return;
    };

    if let Err(TrySendError::Full(_)) = sender.try_send([status, data1, data2])
    {
        warn!("MIDI message queue is full, dropping message");
    }
}
