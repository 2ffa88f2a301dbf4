// Sequencer engine - transport clock, command draining, MIDI emission
// One playback thread owns the lanes, the player, and the sink

use crate::messaging::channels::{CommandConsumer, CommandProducer, create_command_channel};
use crate::messaging::command::Command;
use crate::midi::message::MidiMessage;
use crate::midi::output::{MidiSink, MidirSink, SinkError};
use crate::sequencer::pattern::Pattern;
use crate::sequencer::player::{Lane, StepPlayer, allocate_lanes};
use crate::sequencer::timeline::{LOOP_TICKS, Tempo, step_at_tick};
use crate::sequencer::transport::{SharedTransportState, TransportState};
use ringbuf::traits::{Consumer, Producer};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Commands the control thread can have in flight at once
const COMMAND_CAPACITY: usize = 64;

/// Playback thread cadence; windows are at most this far apart
const TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Engine construction errors
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("MIDI output unavailable: {0}")]
    MidiOutputUnavailable(#[from] SinkError),
}

/// Engine construction parameters
///
/// The loop length and the step grid are fixed constants; only the tempo
/// and the output name are configurable, both bound at construction.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub tempo: Tempo,
    pub port_name: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tempo: Tempo::default(),
            port_name: "gridseq".to_string(),
        }
    }
}

/// The sequencing engine
///
/// Owns the playback thread for its whole lifetime. All operations are
/// fire-and-forget: they enqueue a command and return without waiting
/// for the playback thread to apply it. Dropping the engine halts the
/// clock, flushes note-offs, and releases the MIDI output, in that
/// order.
pub struct SequencerEngine {
    commands: CommandProducer,
    shared: Arc<SharedTransportState>,
    worker: Option<JoinHandle<()>>,
}

impl SequencerEngine {
    /// Open the default MIDI output and start the engine with `initial`
    /// loaded, stopped, at the default tempo (100 BPM)
    pub fn new(initial: Pattern) -> Result<Self, EngineError> {
        Self::with_config(initial, EngineConfig::default())
    }

    /// Like [`SequencerEngine::new`] with explicit tempo and output name
    ///
    /// Failure to open the MIDI output is fatal to construction; no
    /// playback thread is started in that case.
    pub fn with_config(initial: Pattern, config: EngineConfig) -> Result<Self, EngineError> {
        let sink = MidirSink::open(&config.port_name)?;
        Ok(Self::with_sink(initial, config.tempo, Box::new(sink)))
    }

    /// Start the engine against an arbitrary sink
    ///
    /// The injection seam for tests and alternative outputs; cannot
    /// fail, the sink is already open.
    pub fn with_sink(initial: Pattern, tempo: Tempo, sink: Box<dyn MidiSink>) -> Self {
        let (commands, consumer) = create_command_channel(COMMAND_CAPACITY);
        let shared = SharedTransportState::new();

        let worker_shared = Arc::clone(&shared);
        let worker =
            thread::spawn(move || run_worker(consumer, worker_shared, sink, tempo, initial));

        Self {
            commands,
            shared,
            worker: Some(worker),
        }
    }

    /// Swap the active pattern, legal in any transport state
    ///
    /// Applied between playback ticks; steps unaffected by the change
    /// keep their timing, and notes already sounding keep their
    /// scheduled note-offs.
    pub fn update_pattern(&mut self, pattern: Pattern) {
        self.push(Command::UpdatePattern(pattern));
    }

    /// Start or resume the transport; no-op while already playing
    pub fn play(&mut self) {
        self.push(Command::Play);
    }

    /// Freeze the transport at its current position
    pub fn pause(&mut self) {
        self.push(Command::Pause);
    }

    /// Halt the transport and reset the position to beat 0
    pub fn stop(&mut self) {
        self.push(Command::Stop);
    }

    /// Current transport state
    pub fn state(&self) -> TransportState {
        self.shared.state()
    }

    /// Current loop position in ticks
    pub fn position_ticks(&self) -> u64 {
        self.shared.position_ticks()
    }

    /// Step index the playhead currently occupies (for a UI playhead)
    pub fn current_step(&self) -> usize {
        step_at_tick(self.shared.position_ticks())
    }

    fn push(&mut self, command: Command) {
        if self.commands.try_push(command).is_err() {
            eprintln!("gridseq: command queue full, command dropped");
        }
    }
}

impl Drop for SequencerEngine {
    fn drop(&mut self) {
        self.shared.request_shutdown();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Playback thread body
fn run_worker(
    mut commands: CommandConsumer,
    shared: Arc<SharedTransportState>,
    sink: Box<dyn MidiSink>,
    tempo: Tempo,
    initial: Pattern,
) {
    let mut worker = Worker::new(sink, shared.clone(), tempo);
    worker.handle_command(Command::UpdatePattern(initial));

    while !shared.shutdown_requested() {
        // Mutations apply between windows, never during one
        while let Some(command) = commands.try_pop() {
            worker.handle_command(command);
        }
        worker.tick();
        thread::sleep(TICK_INTERVAL);
    }

    // Halt first, release second: flush note-offs while the sink is
    // still open, then drop it to close the output
    worker.flush_notes();
}

/// Playback-side state: lanes, player, clock anchor, sink
struct Worker {
    lanes: Vec<Lane>,
    player: StepPlayer,
    tempo: Tempo,
    sink: Box<dyn MidiSink>,
    shared: Arc<SharedTransportState>,

    /// Absolute tick up to which events have been emitted
    cursor: u64,

    /// Wall-clock anchor while playing: instant of the last play() and
    /// the absolute tick position at that instant
    anchor: Option<(Instant, u64)>,
}

impl Worker {
    fn new(sink: Box<dyn MidiSink>, shared: Arc<SharedTransportState>, tempo: Tempo) -> Self {
        Self {
            lanes: allocate_lanes(),
            player: StepPlayer::new(),
            tempo,
            sink,
            shared,
            cursor: 0,
            anchor: None,
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::UpdatePattern(pattern) => {
                for (index, lane) in self.lanes.iter_mut().enumerate() {
                    lane.load(pattern.track(index));
                }
            }
            Command::Play => {
                if self.anchor.is_none() {
                    self.anchor = Some((Instant::now(), self.cursor));
                    self.shared.set_state(TransportState::Playing);
                }
            }
            Command::Pause => {
                if self.anchor.take().is_some() {
                    self.flush_notes();
                    self.shared.set_state(TransportState::Paused);
                }
            }
            Command::Stop => {
                // Cancel the rest of the loop outright; only the
                // note-offs for sounding notes still go out
                self.anchor = None;
                self.flush_notes();
                self.cursor = 0;
                self.shared.set_position_ticks(0);
                self.shared.set_state(TransportState::Stopped);
            }
        }
    }

    /// Advance the clock from the wall-time anchor
    fn tick(&mut self) {
        if let Some((instant, base)) = self.anchor {
            let now = base + self.tempo.duration_to_ticks(instant.elapsed());
            self.advance_to(now);
        }
    }

    /// Emit everything due in `[cursor, now)` and move the cursor
    fn advance_to(&mut self, now: u64) {
        if now <= self.cursor {
            return;
        }

        let events = self.player.process(&self.lanes, self.cursor, now);
        self.send_all(&events);
        self.cursor = now;
        self.shared.set_position_ticks(now % LOOP_TICKS);
    }

    /// Note-off every sounding note immediately
    fn flush_notes(&mut self) {
        let offs = self.player.stop_all_notes();
        self.send_all(&offs);
    }

    fn send_all(&mut self, messages: &[MidiMessage]) {
        for message in messages {
            // A failed send must not halt the clock mid-loop
            if let Err(e) = self.sink.send(message) {
                eprintln!("gridseq: MIDI send failed: {e}");
            }
        }
    }
}
