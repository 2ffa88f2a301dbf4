// MIDI output messages
// Channel voice messages the engine emits, with raw-byte encoding

/// A channel voice message bound for the output sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiMessage {
    NoteOn { channel: u8, pitch: u8, velocity: u8 },
    NoteOff { channel: u8, pitch: u8, velocity: u8 },
}

impl MidiMessage {
    /// Channel the message addresses (0-15)
    pub fn channel(&self) -> u8 {
        match *self {
            MidiMessage::NoteOn { channel, .. } | MidiMessage::NoteOff { channel, .. } => channel,
        }
    }

    /// Encode as a raw 3-byte MIDI message
    ///
    /// Data bytes are masked to 7 bits, the channel to 4 bits.
    pub fn to_bytes(&self) -> [u8; 3] {
        match *self {
            MidiMessage::NoteOn {
                channel,
                pitch,
                velocity,
            } => [0x90 | (channel & 0x0F), pitch & 0x7F, velocity & 0x7F],
            MidiMessage::NoteOff {
                channel,
                pitch,
                velocity,
            } => [0x80 | (channel & 0x0F), pitch & 0x7F, velocity & 0x7F],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_on_bytes() {
        let message = MidiMessage::NoteOn {
            channel: 0,
            pitch: 67,
            velocity: 127,
        };
        assert_eq!(message.to_bytes(), [0x90, 67, 127]);
    }

    #[test]
    fn test_note_off_bytes() {
        let message = MidiMessage::NoteOff {
            channel: 2,
            pitch: 60,
            velocity: 0,
        };
        assert_eq!(message.to_bytes(), [0x82, 60, 0]);
    }

    #[test]
    fn test_channel_encoding() {
        // One status byte per channel, data bytes untouched
        for channel in 0..16u8 {
            let message = MidiMessage::NoteOn {
                channel,
                pitch: 67,
                velocity: 100,
            };
            assert_eq!(message.channel(), channel);
            assert_eq!(message.to_bytes()[0], 0x90 | channel);
        }
    }
}
