// MIDI output side: messages and the sink boundary

pub mod message;
pub mod output;

pub use message::MidiMessage;
pub use output::{MidiSink, MidirSink, SinkError};
