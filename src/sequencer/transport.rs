// Transport - Playback state shared between control and playback threads
// The playback thread writes, the control thread reads

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Transport state (play/pause/stop)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    Stopped,
    Playing,
    Paused,
}

impl TransportState {
    /// Check if the transport clock is running
    pub fn is_playing(&self) -> bool {
        matches!(self, TransportState::Playing)
    }

    /// Check if transport is stopped or paused
    pub fn is_stopped(&self) -> bool {
        matches!(self, TransportState::Stopped | TransportState::Paused)
    }
}

impl Default for TransportState {
    fn default() -> Self {
        TransportState::Stopped
    }
}

/// Shared transport state
/// Thread-safe via atomics for communication with the playback thread
#[derive(Debug)]
pub struct SharedTransportState {
    playing: AtomicBool,
    paused: AtomicBool,
    position_ticks: AtomicU64,
    shutdown: AtomicBool,
}

impl SharedTransportState {
    /// Create new shared transport state
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Get current transport state
    pub fn state(&self) -> TransportState {
        if self.playing.load(Ordering::Relaxed) {
            TransportState::Playing
        } else if self.paused.load(Ordering::Relaxed) {
            TransportState::Paused
        } else {
            TransportState::Stopped
        }
    }

    /// Publish a transport state
    pub fn set_state(&self, state: TransportState) {
        let (playing, paused) = match state {
            TransportState::Playing => (true, false),
            TransportState::Paused => (false, true),
            TransportState::Stopped => (false, false),
        };
        self.playing.store(playing, Ordering::Relaxed);
        self.paused.store(paused, Ordering::Relaxed);
    }

    /// Current loop position in ticks
    pub fn position_ticks(&self) -> u64 {
        self.position_ticks.load(Ordering::Relaxed)
    }

    /// Publish the loop position
    pub fn set_position_ticks(&self, ticks: u64) {
        self.position_ticks.store(ticks, Ordering::Relaxed);
    }

    /// Ask the playback thread to exit
    ///
    /// An atomic rather than a queued command: shutdown must get
    /// through even when the command ring buffer is full.
    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Check if shutdown was requested
    pub fn shutdown_requested(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }
}

impl Default for SharedTransportState {
    fn default() -> Self {
        Self {
            playing: AtomicBool::new(false),
            paused: AtomicBool::new(false),
            position_ticks: AtomicU64::new(0),
            shutdown: AtomicBool::new(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_state_predicates() {
        assert!(TransportState::Playing.is_playing());
        assert!(!TransportState::Playing.is_stopped());

        assert!(!TransportState::Paused.is_playing());
        assert!(TransportState::Paused.is_stopped());

        assert!(!TransportState::Stopped.is_playing());
        assert!(TransportState::Stopped.is_stopped());

        assert_eq!(TransportState::default(), TransportState::Stopped);
    }

    #[test]
    fn test_shared_state_round_trip() {
        let shared = SharedTransportState::new();

        assert_eq!(shared.state(), TransportState::Stopped);
        assert_eq!(shared.position_ticks(), 0);

        shared.set_state(TransportState::Playing);
        assert_eq!(shared.state(), TransportState::Playing);

        shared.set_state(TransportState::Paused);
        assert_eq!(shared.state(), TransportState::Paused);

        shared.set_state(TransportState::Stopped);
        assert_eq!(shared.state(), TransportState::Stopped);

        shared.set_position_ticks(360);
        assert_eq!(shared.position_ticks(), 360);
    }

    #[test]
    fn test_shutdown_flag() {
        let shared = SharedTransportState::new();
        assert!(!shared.shutdown_requested());
        shared.request_shutdown();
        assert!(shared.shutdown_requested());
    }
}
