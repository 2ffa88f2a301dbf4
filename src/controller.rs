// Pad controller - UI-facing facade over the engine
// Holds the authoritative cell grid, pushes full Pattern snapshots

use crate::sequencer::engine::SequencerEngine;
use crate::sequencer::pattern::{Pattern, TOTAL_PADS};
use crate::sequencer::transport::TransportState;

/// Translates discrete pad toggles into full pattern snapshots
///
/// The grid here is the source of truth; every change recomputes a
/// complete [`Pattern`] and pushes it to the engine. No diffing: the
/// grid is small and fixed, a full rebuild is cheaper than being
/// clever. Performs no MIDI I/O itself.
pub struct PadController {
    engine: SequencerEngine,
    cells: [[bool; TOTAL_PADS]; TOTAL_PADS], // [track][step]
}

impl PadController {
    /// Wrap an engine; the grid starts fully cleared
    pub fn new(engine: SequencerEngine) -> Self {
        Self {
            engine,
            cells: [[false; TOTAL_PADS]; TOTAL_PADS],
        }
    }

    /// Flip one cell; out-of-range indices are ignored
    pub fn toggle_step(&mut self, track: usize, step: usize) {
        if track < TOTAL_PADS && step < TOTAL_PADS {
            self.cells[track][step] = !self.cells[track][step];
            self.push_pattern();
        }
    }

    /// Set one cell; out-of-range indices are ignored
    pub fn set_step(&mut self, track: usize, step: usize, active: bool) {
        if track < TOTAL_PADS && step < TOTAL_PADS && self.cells[track][step] != active {
            self.cells[track][step] = active;
            self.push_pattern();
        }
    }

    /// Check one cell; out-of-range reads as inactive
    pub fn is_step_active(&self, track: usize, step: usize) -> bool {
        track < TOTAL_PADS && step < TOTAL_PADS && self.cells[track][step]
    }

    /// Clear every step of one track
    pub fn clear_track(&mut self, track: usize) {
        if track < TOTAL_PADS {
            self.cells[track] = [false; TOTAL_PADS];
            self.push_pattern();
        }
    }

    /// Clear the whole grid
    pub fn clear_all(&mut self) {
        self.cells = [[false; TOTAL_PADS]; TOTAL_PADS];
        self.push_pattern();
    }

    pub fn play(&mut self) {
        self.engine.play();
    }

    pub fn pause(&mut self) {
        self.engine.pause();
    }

    pub fn stop(&mut self) {
        self.engine.stop();
    }

    /// Play when stopped or paused, pause when playing
    pub fn toggle_play(&mut self) {
        if self.engine.state().is_playing() {
            self.engine.pause();
        } else {
            self.engine.play();
        }
    }

    pub fn state(&self) -> TransportState {
        self.engine.state()
    }

    /// Step index under the playhead, for grid highlighting
    pub fn current_step(&self) -> usize {
        self.engine.current_step()
    }

    /// Snapshot of the grid as a pattern
    pub fn pattern(&self) -> Pattern {
        Pattern::from_grid(self.active_cells())
    }

    fn active_cells(&self) -> Vec<(usize, usize)> {
        let mut active = Vec::new();
        for (track, steps) in self.cells.iter().enumerate() {
            for (step, &on) in steps.iter().enumerate() {
                if on {
                    active.push((track, step));
                }
            }
        }
        active
    }

    fn push_pattern(&mut self) {
        let pattern = Pattern::from_grid(self.active_cells());
        self.engine.update_pattern(pattern);
    }
}
