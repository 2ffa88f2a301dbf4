// Step player - Turns lane schedules into MIDI note events
// Window-based emission over an absolute tick clock

use crate::midi::message::MidiMessage;
use crate::sequencer::pattern::{Note, TOTAL_PADS, Track};
use crate::sequencer::timeline::{GATE_TICKS, LOOP_TICKS, step_tick};

/// One scheduled step of a lane: a loop tick and the notes it fires
#[derive(Debug, Clone)]
struct StepTrigger {
    tick: u64,
    notes: Vec<Note>,
}

/// Per-track scheduling unit, bound to one fixed MIDI channel
///
/// The channel binding happens once, at lane allocation; pattern
/// updates only ever replace the trigger list.
#[derive(Debug, Clone)]
pub struct Lane {
    channel: u8,
    triggers: Vec<StepTrigger>,
}

impl Lane {
    /// Create an empty lane bound to `channel`
    pub fn new(channel: u8) -> Self {
        Self {
            channel,
            triggers: Vec::new(),
        }
    }

    /// The fixed MIDI channel of this lane
    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Clear the schedule and repopulate it from a track
    ///
    /// `None` (a pattern supplying fewer tracks than lanes) leaves the
    /// lane silent. Steps past the track's end are silent as well.
    pub fn load(&mut self, track: Option<&Track>) {
        self.triggers.clear();

        let Some(track) = track else {
            return;
        };

        for step_index in 0..TOTAL_PADS {
            if let Some(step) = track.step(step_index) {
                if !step.is_empty() {
                    self.triggers.push(StepTrigger {
                        tick: step_tick(step_index),
                        notes: step.notes().to_vec(),
                    });
                }
            }
        }
    }

    /// Check if the lane has nothing scheduled
    pub fn is_silent(&self) -> bool {
        self.triggers.is_empty()
    }
}

/// Allocate one lane per pad, channel = lane index
pub fn allocate_lanes() -> Vec<Lane> {
    (0..TOTAL_PADS).map(|i| Lane::new(i as u8)).collect()
}

/// A note that received its NoteOn and still awaits its NoteOff
#[derive(Debug, Clone, Copy)]
struct ActiveNote {
    channel: u8,
    pitch: u8,
    velocity: u8,
    off_tick: u64,
}

/// Emits note events for the tick windows the clock sweeps over
///
/// Tracks active notes independently of the lane schedules, so a
/// pattern swap never orphans a pending NoteOff.
#[derive(Debug, Default)]
pub struct StepPlayer {
    active: Vec<ActiveNote>,
}

impl StepPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit every event due in the half-open absolute window `[start, end)`
    ///
    /// Triggers fire at every absolute tick congruent to their loop tick;
    /// a NoteOff landing past the window stays pending and is emitted by
    /// a later window (at the loop wrap at the latest). Within a window,
    /// events are ordered by tick, NoteOff before NoteOn at equal ticks
    /// so a back-to-back retrigger of the same pitch is not cut short.
    pub fn process(&mut self, lanes: &[Lane], start: u64, end: u64) -> Vec<MidiMessage> {
        if end <= start {
            return Vec::new();
        }

        // (tick, order): NoteOff sorts before NoteOn at the same tick
        let mut timed: Vec<(u64, u8, MidiMessage)> = Vec::new();

        self.active.retain(|note| {
            if note.off_tick < end {
                timed.push((note.off_tick, 0, note_off(note)));
                false
            } else {
                true
            }
        });

        for lane in lanes {
            for trigger in &lane.triggers {
                for fire in fire_ticks(trigger.tick, start, end) {
                    for note in &trigger.notes {
                        timed.push((
                            fire,
                            1,
                            MidiMessage::NoteOn {
                                channel: lane.channel,
                                pitch: note.pitch,
                                velocity: note.velocity,
                            },
                        ));

                        let active = ActiveNote {
                            channel: lane.channel,
                            pitch: note.pitch,
                            velocity: note.velocity,
                            off_tick: fire + GATE_TICKS,
                        };
                        if active.off_tick < end {
                            timed.push((active.off_tick, 0, note_off(&active)));
                        } else {
                            self.active.push(active);
                        }
                    }
                }
            }
        }

        // Stable sort keeps insertion order for notes sharing a step
        timed.sort_by_key(|&(tick, order, _)| (tick, order));
        timed.into_iter().map(|(_, _, message)| message).collect()
    }

    /// Send NoteOff for every sounding note (stop/pause/teardown)
    pub fn stop_all_notes(&mut self) -> Vec<MidiMessage> {
        self.active.drain(..).map(|note| note_off(&note)).collect()
    }

    /// Number of notes awaiting their NoteOff
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

fn note_off(note: &ActiveNote) -> MidiMessage {
    MidiMessage::NoteOff {
        channel: note.channel,
        pitch: note.pitch,
        velocity: note.velocity,
    }
}

/// Absolute ticks in `[start, end)` at which a loop-relative trigger fires
fn fire_ticks(trigger_tick: u64, start: u64, end: u64) -> Vec<u64> {
    let mut fires = Vec::new();
    let mut base = (start / LOOP_TICKS) * LOOP_TICKS;

    loop {
        let candidate = base + trigger_tick;
        if candidate >= end {
            break;
        }
        if candidate >= start {
            fires.push(candidate);
        }
        base += LOOP_TICKS;
    }

    fires
}
