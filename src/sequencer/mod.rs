// Sequencer module
// Pattern data, musical time, transport state, and the playback engine

pub mod engine;
pub mod pattern;
pub mod player;
pub mod timeline;
pub mod transport;

pub use engine::{EngineConfig, EngineError, SequencerEngine};
pub use pattern::{Note, Pattern, Step, Track};
pub use timeline::Tempo;
pub use transport::{SharedTransportState, TransportState};
