//! Frequency to note-name mapping (12-TET, A4 = 440 Hz = MIDI 69)

use std::fmt;

/// Reference frequency for A4 (440 Hz)
const A4_FREQ: f32 = 440.0;

/// MIDI note number of A4
const A4_MIDI: i32 = 69;

/// Pitch class names, index 0 = C
const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Label shown when there is no valid frequency
pub const NO_NOTE: &str = "--";

/// Nearest equal-tempered note to a frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    /// MIDI note number (may be negative for sub-audio input)
    pub midi: i32,
}

impl Note {
    /// Nearest note to `freq`, `None` for non-positive or non-finite input
    pub fn from_frequency(freq: f32) -> Option<Self> {
        if !freq.is_finite() || freq <= 0.0 {
            return None;
        }
        let midi = (12.0 * (freq / A4_FREQ).log2() + A4_MIDI as f32).round() as i32;
        Some(Self { midi })
    }

    /// Pitch class (0-11, where 0=C)
    pub fn pitch_class(&self) -> u8 {
        self.midi.rem_euclid(12) as u8
    }

    /// Note name without octave, e.g. "F#"
    pub fn name(&self) -> &'static str {
        NOTE_NAMES[self.pitch_class() as usize]
    }

    /// Scientific pitch octave: `floor(midi / 12) - 1`
    pub fn octave(&self) -> i32 {
        self.midi.div_euclid(12) - 1
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name(), self.octave())
    }
}

/// Display label for a frequency, [`NO_NOTE`] when undefined
pub fn note_label(freq: f32) -> String {
    Note::from_frequency(freq)
        .map(|n| n.to_string())
        .unwrap_or_else(|| NO_NOTE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_and_a5() {
        assert_eq!(note_label(440.0), "A4");
        assert_eq!(note_label(880.0), "A5");
        assert_eq!(note_label(220.0), "A3");
    }

    #[test]
    fn test_sentinel_for_invalid() {
        assert_eq!(note_label(0.0), NO_NOTE);
        assert_eq!(note_label(-12.0), NO_NOTE);
        assert_eq!(note_label(f32::NAN), NO_NOTE);
        assert!(Note::from_frequency(f32::INFINITY).is_none());
    }

    #[test]
    fn test_middle_c_and_sharps() {
        assert_eq!(note_label(261.63), "C4");
        assert_eq!(note_label(277.18), "C#4");
        // Rounds to nearest semitone
        assert_eq!(note_label(452.0), "A4");
        assert_eq!(note_label(460.0), "A#4");
    }

    #[test]
    fn test_low_frequency_octaves() {
        // 64.6 Hz sits closest to C2 (65.41 Hz)
        assert_eq!(note_label(64.6), "C2");
        // MIDI 0 = C-1
        let n = Note::from_frequency(8.1758).unwrap();
        assert_eq!(n.midi, 0);
        assert_eq!(n.to_string(), "C-1");
    }

    #[test]
    fn test_negative_midi_wraps_pitch_class() {
        // One semitone below MIDI 0
        let n = Note::from_frequency(7.7169).unwrap();
        assert_eq!(n.midi, -1);
        assert_eq!(n.name(), "B");
        assert_eq!(n.octave(), -2);
    }
}
