// Commands - Communication control thread → playback thread

use crate::sequencer::pattern::Pattern;

#[derive(Debug, Clone)]
pub enum Command {
    UpdatePattern(Pattern),
    Play,
    Pause,
    Stop,
}
