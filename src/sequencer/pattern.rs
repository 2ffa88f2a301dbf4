// Pattern - Immutable step data for the pad grid
// One Track per pad, one fixed note per active step

/// Number of pad columns on the grid.
pub const COLUMNS: usize = 4;

/// Number of pad rows on the grid.
pub const ROWS: usize = 4;

/// Total pad count. Doubles as track count and steps-per-track.
pub const TOTAL_PADS: usize = COLUMNS * ROWS;

/// Note triggered by an active grid cell (G4).
pub const DEFAULT_PITCH: u8 = 67;

/// Velocity of grid-triggered notes.
pub const DEFAULT_VELOCITY: u8 = 127;

/// A note to be emitted when its step fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    /// MIDI note number (0-127, where 60 = C4)
    pub pitch: u8,

    /// MIDI velocity (0-127, where 127 = maximum)
    pub velocity: u8,
}

impl Note {
    /// Creates a new note
    pub fn new(pitch: u8, velocity: u8) -> Self {
        assert!(pitch <= 127, "MIDI pitch must be 0-127");
        assert!(velocity <= 127, "MIDI velocity must be 0-127");

        Self { pitch, velocity }
    }

    /// The fixed note an active grid cell produces
    pub fn grid_default() -> Self {
        Self::new(DEFAULT_PITCH, DEFAULT_VELOCITY)
    }
}

/// One step of a track
///
/// A step can hold any number of notes; they are emitted in insertion
/// order when the step fires. An empty step is silent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Step {
    notes: Vec<Note>,
}

impl Step {
    /// Silent step
    pub fn empty() -> Self {
        Self { notes: Vec::new() }
    }

    /// Step holding a single note
    pub fn single(note: Note) -> Self {
        Self { notes: vec![note] }
    }

    /// Step holding the given notes, emission order = insertion order
    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    /// Notes emitted when this step fires
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Check if the step is silent
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// One track of steps, mapped to one lane (and thus one MIDI channel)
///
/// Nominal length is [`TOTAL_PADS`] steps. A shorter track is legal:
/// missing indices read as silent via the permissive [`Track::step`]
/// accessor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    steps: Vec<Step>,
}

impl Track {
    /// Track with the given steps
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Fully silent track of [`TOTAL_PADS`] steps
    pub fn silent() -> Self {
        Self {
            steps: vec![Step::empty(); TOTAL_PADS],
        }
    }

    /// Step at `index`
    ///
    /// Out-of-range indices return `None` rather than panicking; a
    /// missing step is treated as silent. This is intentional, not a
    /// bounds bug.
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Number of steps actually stored
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if no steps are stored
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Snapshot of all tracks' step data
///
/// Immutable once built; the engine swaps whole Patterns rather than
/// editing them in place. Nominal size is [`TOTAL_PADS`] tracks of
/// [`TOTAL_PADS`] steps, and the same implicit-silence rule as
/// [`Track::step`] applies when fewer tracks are supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
    tracks: Vec<Track>,
}

impl Pattern {
    /// Pattern with the given tracks
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    /// All-silent pattern, [`TOTAL_PADS`] × [`TOTAL_PADS`]
    pub fn empty() -> Self {
        Self {
            tracks: vec![Track::silent(); TOTAL_PADS],
        }
    }

    /// Build a pattern from a set of active `(track, step)` cells
    ///
    /// Each in-range active cell yields a step containing exactly one
    /// [`Note::grid_default`]; everything else is silent. Out-of-range
    /// cells are ignored.
    pub fn from_grid(active: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut grid = [[false; TOTAL_PADS]; TOTAL_PADS];
        for (track, step) in active {
            if track < TOTAL_PADS && step < TOTAL_PADS {
                grid[track][step] = true;
            }
        }

        let tracks = grid
            .iter()
            .map(|steps| {
                Track::new(
                    steps
                        .iter()
                        .map(|&on| {
                            if on {
                                Step::single(Note::grid_default())
                            } else {
                                Step::empty()
                            }
                        })
                        .collect(),
                )
            })
            .collect();

        Self { tracks }
    }

    /// Track at `index`, `None` when out of range (treated as silent)
    pub fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Number of tracks actually stored
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Check if every step of every track is silent
    pub fn is_silent(&self) -> bool {
        self.tracks
            .iter()
            .all(|t| t.steps.iter().all(|s| s.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_creation() {
        let note = Note::new(67, 127);
        assert_eq!(note.pitch, 67);
        assert_eq!(note.velocity, 127);
    }

    #[test]
    #[should_panic(expected = "MIDI pitch must be 0-127")]
    fn test_invalid_pitch() {
        Note::new(128, 100);
    }

    #[test]
    #[should_panic(expected = "MIDI velocity must be 0-127")]
    fn test_invalid_velocity() {
        Note::new(60, 128);
    }

    #[test]
    fn test_empty_pattern_dimensions() {
        let pattern = Pattern::empty();
        assert_eq!(pattern.track_count(), TOTAL_PADS);
        for i in 0..TOTAL_PADS {
            let track = pattern.track(i).unwrap();
            assert_eq!(track.len(), TOTAL_PADS);
            for s in 0..TOTAL_PADS {
                assert!(track.step(s).unwrap().is_empty());
            }
        }
        assert!(pattern.is_silent());
    }

    #[test]
    fn test_from_grid() {
        let pattern = Pattern::from_grid([(0, 0), (2, 4), (15, 15)]);

        let step = pattern.track(0).unwrap().step(0).unwrap();
        assert_eq!(step.notes(), &[Note::new(67, 127)]);

        assert!(!pattern.track(2).unwrap().step(4).unwrap().is_empty());
        assert!(!pattern.track(15).unwrap().step(15).unwrap().is_empty());

        // Every other cell stays silent
        assert!(pattern.track(0).unwrap().step(1).unwrap().is_empty());
        assert!(pattern.track(1).unwrap().step(0).unwrap().is_empty());
    }

    #[test]
    fn test_from_grid_ignores_out_of_range() {
        let pattern = Pattern::from_grid([(16, 0), (0, 16), (99, 99)]);
        assert!(pattern.is_silent());
    }

    #[test]
    fn test_permissive_indexing() {
        let pattern = Pattern::new(vec![Track::new(vec![Step::empty(); 4])]);

        assert!(pattern.track(0).is_some());
        assert!(pattern.track(1).is_none());
        assert!(pattern.track(16).is_none());

        let track = pattern.track(0).unwrap();
        assert!(track.step(3).is_some());
        assert!(track.step(4).is_none());
        assert!(track.step(15).is_none());
    }

    #[test]
    fn test_step_note_order() {
        let step = Step::with_notes(vec![Note::new(60, 100), Note::new(64, 90)]);
        assert_eq!(step.notes()[0].pitch, 60);
        assert_eq!(step.notes()[1].pitch, 64);
    }
}
