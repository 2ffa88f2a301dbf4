// MIDI output sink - boundary between the engine and the MIDI transport
// The engine opens a sink once at construction and drops it at teardown

use crate::midi::message::MidiMessage;
use midir::{MidiOutput, MidiOutputConnection};
use thiserror::Error;

/// MIDI output errors
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to initialize MIDI output: {0}")]
    Init(String),

    #[error("no MIDI output port available")]
    NoPortAvailable,

    #[error("failed to open MIDI output: {0}")]
    Connect(String),

    #[error("failed to send MIDI message: {0}")]
    Send(String),
}

/// Destination for the engine's note events
///
/// `Send` because the playback thread owns the sink for the lifetime of
/// the engine; dropping it releases the underlying output.
pub trait MidiSink: Send {
    fn send(&mut self, message: &MidiMessage) -> Result<(), SinkError>;
}

/// midir-backed sink
///
/// On unix this publishes a virtual destination other applications can
/// connect to; elsewhere it connects to the first available output port.
pub struct MidirSink {
    connection: MidiOutputConnection,
}

impl MidirSink {
    /// Open the output, failing if no destination can be created
    pub fn open(name: &str) -> Result<Self, SinkError> {
        let midi_out = MidiOutput::new(name).map_err(|e| SinkError::Init(e.to_string()))?;
        let connection = connect(midi_out, name)?;
        println!("MIDI output open: {name}");
        Ok(Self { connection })
    }

    /// Names of the output ports currently visible
    pub fn available_ports() -> Vec<String> {
        match MidiOutput::new("gridseq port scan") {
            Ok(midi_out) => midi_out
                .ports()
                .iter()
                .filter_map(|p| midi_out.port_name(p).ok())
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

#[cfg(unix)]
fn connect(midi_out: MidiOutput, name: &str) -> Result<MidiOutputConnection, SinkError> {
    use midir::os::unix::VirtualOutput;

    midi_out
        .create_virtual(name)
        .map_err(|e| SinkError::Connect(e.to_string()))
}

#[cfg(not(unix))]
fn connect(midi_out: MidiOutput, name: &str) -> Result<MidiOutputConnection, SinkError> {
    let ports = midi_out.ports();
    let port = ports.first().ok_or(SinkError::NoPortAvailable)?;
    midi_out
        .connect(port, name)
        .map_err(|e| SinkError::Connect(e.to_string()))
}

impl MidiSink for MidirSink {
    fn send(&mut self, message: &MidiMessage) -> Result<(), SinkError> {
        self.connection
            .send(&message.to_bytes())
            .map_err(|e| SinkError::Send(e.to_string()))
    }
}
