// Demo binary: publish a MIDI output, play a small pattern for two
// loops, then stop. Point a synth at the "gridseq" destination to hear
// it.

use gridseq::{PadController, Pattern, SequencerEngine};
use std::thread;
use std::time::Duration;

fn main() {
    if let Err(e) = run() {
        eprintln!("gridseq: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), gridseq::EngineError> {
    let engine = SequencerEngine::new(Pattern::empty())?;
    let mut controller = PadController::new(engine);

    // Four-on-the-floor on track 2, offbeats on track 5
    for step in [0, 4, 8, 12] {
        controller.set_step(2, step, true);
    }
    for step in [2, 6, 10, 14] {
        controller.set_step(5, step, true);
    }

    controller.play();
    println!("Playing two loops...");

    // One loop is 4 beats; 2.4s per loop at the default 100 BPM
    thread::sleep(Duration::from_millis(4800));

    controller.stop();
    println!("Done");
    Ok(())
}
