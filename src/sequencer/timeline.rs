// Timeline - Musical time in ticks and the fixed step grid
// The grid is a design constant: 4 steps per beat over TOTAL_PADS steps

use crate::sequencer::pattern::TOTAL_PADS;
use std::fmt;
use std::time::Duration;

/// Ticks per quarter note (PPQN - Pulses Per Quarter Note)
/// Standard MIDI resolution
pub const TICKS_PER_QUARTER: u64 = 480;

/// Steps per beat (16th-note grid)
pub const STEPS_PER_BEAT: u64 = 4;

/// Duration of one step in ticks (a quarter of a beat)
pub const STEP_TICKS: u64 = TICKS_PER_QUARTER / STEPS_PER_BEAT;

/// Gate duration of a triggered note, in ticks
/// Back-to-back with the next step: no overlap, no gap
pub const GATE_TICKS: u64 = STEP_TICKS;

/// Total loop length in ticks
///
/// Sized to the pad count, not derived from the active pattern or the
/// tempo. This is a fixed design constant of the engine.
pub const LOOP_TICKS: u64 = TOTAL_PADS as u64 * STEP_TICKS;

/// Default transport tempo in BPM
pub const DEFAULT_BPM: f64 = 100.0;

/// Tempo in BPM (Beats Per Minute)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tempo {
    bpm: f64,
}

impl Tempo {
    /// Creates a new tempo
    /// BPM must be in range [20.0, 999.0]
    pub fn new(bpm: f64) -> Self {
        assert!(
            (20.0..=999.0).contains(&bpm),
            "BPM must be between 20 and 999"
        );
        Self { bpm }
    }

    /// Get BPM value
    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    /// Duration of one beat in seconds
    pub fn beat_duration_seconds(&self) -> f64 {
        60.0 / self.bpm
    }

    /// Ticks elapsed over a wall-clock duration at this tempo
    pub fn duration_to_ticks(&self, elapsed: Duration) -> u64 {
        let beats = elapsed.as_secs_f64() / self.beat_duration_seconds();
        (beats * TICKS_PER_QUARTER as f64) as u64
    }

    /// Wall-clock duration of a tick count at this tempo
    pub fn ticks_to_duration(&self, ticks: u64) -> Duration {
        let beats = ticks as f64 / TICKS_PER_QUARTER as f64;
        Duration::from_secs_f64(beats * self.beat_duration_seconds())
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self::new(DEFAULT_BPM)
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} BPM", self.bpm)
    }
}

/// Loop tick of a step index
pub fn step_tick(step: usize) -> u64 {
    step as u64 * STEP_TICKS
}

/// Step index currently occupied by a loop position
pub fn step_at_tick(position_ticks: u64) -> usize {
    ((position_ticks / STEP_TICKS) as usize) % TOTAL_PADS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_constants() {
        assert_eq!(STEP_TICKS, 120);
        assert_eq!(GATE_TICKS, 120);
        // 16 steps at a quarter beat each = 4 beats
        assert_eq!(LOOP_TICKS, 1920);
        assert_eq!(LOOP_TICKS, 4 * TICKS_PER_QUARTER);
    }

    #[test]
    fn test_tempo() {
        let tempo = Tempo::new(120.0);
        assert_eq!(tempo.bpm(), 120.0);
        assert_eq!(tempo.beat_duration_seconds(), 0.5);

        // One beat at 120 BPM = 0.5s = 480 ticks
        assert_eq!(tempo.duration_to_ticks(Duration::from_millis(500)), 480);
        assert_eq!(tempo.ticks_to_duration(480), Duration::from_millis(500));
    }

    #[test]
    fn test_default_tempo() {
        assert_eq!(Tempo::default().bpm(), 100.0);
    }

    #[test]
    #[should_panic(expected = "BPM must be between 20 and 999")]
    fn test_invalid_tempo() {
        Tempo::new(10.0);
    }

    #[test]
    fn test_step_tick_mapping() {
        assert_eq!(step_tick(0), 0);
        assert_eq!(step_tick(4), 480); // one full beat in
        assert_eq!(step_tick(15), 1800);

        assert_eq!(step_at_tick(0), 0);
        assert_eq!(step_at_tick(119), 0);
        assert_eq!(step_at_tick(120), 1);
        assert_eq!(step_at_tick(1800), 15);
        // Positions wrap with the loop
        assert_eq!(step_at_tick(LOOP_TICKS), 0);
    }
}
