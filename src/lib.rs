// gridseq - 16-track step-sequencer MIDI engine
// 4x4 pad grid, 16 steps per track, one fixed MIDI channel per track

pub mod controller;
pub mod messaging;
pub mod midi;
pub mod sequencer;

// Re-export commonly used types for convenience
pub use controller::PadController;
pub use midi::message::MidiMessage;
pub use midi::output::{MidiSink, MidirSink, SinkError};
pub use sequencer::engine::{EngineConfig, EngineError, SequencerEngine};
pub use sequencer::pattern::{
    COLUMNS, Note, Pattern, ROWS, Step, TOTAL_PADS, Track,
};
pub use sequencer::timeline::Tempo;
pub use sequencer::transport::TransportState;
