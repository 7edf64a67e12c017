//! Note name parsing
//!
//! Turns note image filenames such as `Fs3-1.png` and bare note names such as `F#3`
//! into pitch data. Pitch numbers follow MIDI numbering, so C4 = 60.
//!
//! ```
//! use notedrill::pitch::{parse_filename, Accidental};
//!
//! let entry = parse_filename("Fs3-1.png", "png").unwrap();
//! assert_eq!(entry.pitch_number, 54);
//! assert_eq!(entry.label, "F♯3");
//! assert_eq!(entry.accidental, Accidental::Sharp);
//! ```

use serde::Serialize;

use crate::error::DrillError;

/// Note letters A through G
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// Accepts either case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    /// Semitone offset of the natural note from C
    pub fn base_semitone(self) -> u8 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accidental {
    Flat,
    Natural,
    Sharp,
}

impl Accidental {
    /// `s` and `#` are sharps, `b` is a flat.
    pub fn from_marker(c: char) -> Option<Self> {
        match c {
            's' | '#' => Some(Accidental::Sharp),
            'b' => Some(Accidental::Flat),
            _ => None,
        }
    }

    pub fn offset(self) -> i8 {
        match self {
            Accidental::Flat => -1,
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Accidental::Flat => "♭",
            Accidental::Natural => "",
            Accidental::Sharp => "♯",
        }
    }

    pub fn is_natural(self) -> bool {
        self == Accidental::Natural
    }
}

/// A spelled note: letter, accidental and octave digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spelling {
    pub letter: Letter,
    pub accidental: Accidental,
    pub octave: u8,
}

impl Spelling {
    /// Pitch class 0-11. Cb wraps to 11 and B# to 0 without touching the octave.
    pub fn pitch_class(&self) -> u8 {
        (self.letter.base_semitone() as i8 + self.accidental.offset()).rem_euclid(12) as u8
    }

    /// MIDI-style pitch number: `(octave + 1) * 12 + pitch_class`
    pub fn pitch_number(&self) -> u8 {
        (self.octave + 1) * 12 + self.pitch_class()
    }

    /// Display label, e.g. "F♯3"
    pub fn label(&self) -> String {
        format!(
            "{}{}{}",
            self.letter.as_char(),
            self.accidental.glyph(),
            self.octave
        )
    }
}

/// One note image from the manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchEntry {
    /// Original filename, unique per spelling
    pub source_id: String,
    pub letter: Letter,
    pub accidental: Accidental,
    pub octave: u8,
    pub pitch_number: u8,
    pub label: String,
}

impl PitchEntry {
    fn new(source_id: &str, spelling: Spelling) -> Self {
        Self {
            source_id: source_id.to_string(),
            letter: spelling.letter,
            accidental: spelling.accidental,
            octave: spelling.octave,
            pitch_number: spelling.pitch_number(),
            label: spelling.label(),
        }
    }
}

/// Scan the `letter [marker] digit` head of a name.
/// Returns the spelling and the unconsumed remainder.
fn parse_head(s: &str) -> Option<(Spelling, &str)> {
    let mut chars = s.char_indices().peekable();

    let letter = chars.next().and_then(|(_, c)| Letter::from_char(c))?;

    let accidental = match chars.peek() {
        Some(&(_, c)) => match Accidental::from_marker(c) {
            Some(acc) => {
                chars.next();
                acc
            }
            None => Accidental::Natural,
        },
        None => return None,
    };

    let (idx, digit) = chars.next()?;
    let octave = digit.to_digit(10)? as u8;

    let rest = &s[idx + digit.len_utf8()..];
    Some((
        Spelling {
            letter,
            accidental,
            octave,
        },
        rest,
    ))
}

/// Parse a bare note name such as `C4`, `F#3`, `Fs3` or `Db5`.
///
/// Used for preset bounds. Anything after the octave digit is rejected.
pub fn parse_note_name(name: &str) -> Result<Spelling, DrillError> {
    match parse_head(name.trim()) {
        Some((spelling, "")) => Ok(spelling),
        _ => Err(DrillError::UnparseableName(name.to_string())),
    }
}

/// Parse a note image filename such as `C4.png`, `Db5-1.png` or `F#3_alt.png`.
///
/// After the octave digit the stem may be empty or start with `-` or `_` followed by
/// any text. The extension is compared case-insensitively.
pub fn parse_filename(file_name: &str, extension: &str) -> Result<PitchEntry, DrillError> {
    let reject = || DrillError::UnparseableName(file_name.to_string());

    let stem = strip_extension(file_name, extension).ok_or_else(reject)?;
    let (spelling, rest) = parse_head(stem).ok_or_else(reject)?;

    match rest.chars().next() {
        None | Some('-') | Some('_') => Ok(PitchEntry::new(file_name, spelling)),
        Some(_) => Err(reject()),
    }
}

fn strip_extension<'a>(file_name: &'a str, extension: &str) -> Option<&'a str> {
    let split = file_name.len().checked_sub(extension.len() + 1)?;
    let stem = file_name.get(..split)?;
    let suffix = file_name.get(split..)?;
    let ext = suffix.strip_prefix('.')?;
    ext.eq_ignore_ascii_case(extension).then_some(stem)
}
