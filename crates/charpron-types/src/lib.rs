//! Shared, dependency-free types for the merged character pronunciation
//! dictionary.
//!
//! Every table in the pipeline is built from the records defined here:
//! [`CharRecord`] rows of the character table, [`FrequencyWord`] rows of the
//! reference frequency list, and [`WordEntry`]/[`ResolvedWord`] rows of the
//! per-dialect word tables. Readings are keyed by [`Dialect`]; a missing
//! reading is always `None`, never an empty string.
//!
//! ```rust
//! use charpron_types::{CharRecord, Dialect};
//!
//! let rec = CharRecord::augmented("行", Dialect::Hakka, "hang2");
//! assert_eq!(rec.reading(Dialect::Hakka), Some("hang2"));
//! assert_eq!(rec.reading(Dialect::Canton), None);
//! ```

use std::fmt;

/// Pronunciation system tracked per character.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Dialect {
    /// Reference dialect; its readings key the frequency list.
    Canton,
    Waitau,
    Hakka,
}

impl Dialect {
    pub const ALL: [Dialect; 3] = [Dialect::Canton, Dialect::Waitau, Dialect::Hakka];

    pub const REFERENCE: Dialect = Dialect::Canton;

    /// Dialects that get a word table, in pass order.
    pub const TARGETS: [Dialect; 2] = [Dialect::Waitau, Dialect::Hakka];

    /// Lowercase name, used for column headers and output file names.
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Canton => "canton",
            Dialect::Waitau => "waitau",
            Dialect::Hakka => "hakka",
        }
    }

    /// Capitalized name, used for the validation list file names.
    pub fn title(self) -> &'static str {
        match self {
            Dialect::Canton => "Canton",
            Dialect::Waitau => "Waitau",
            Dialect::Hakka => "Hakka",
        }
    }

    fn slot(self) -> usize {
        match self {
            Dialect::Canton => 0,
            Dialect::Waitau => 1,
            Dialect::Hakka => 2,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One optional reading per dialect.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Readings([Option<String>; 3]);

impl Readings {
    pub fn new(canton: Option<String>, waitau: Option<String>, hakka: Option<String>) -> Self {
        Self([canton, waitau, hakka])
    }

    /// Readings with a value for `dialect` only.
    pub fn only(dialect: Dialect, reading: impl Into<String>) -> Self {
        let mut readings = Self::default();
        readings.set(dialect, Some(reading.into()));
        readings
    }

    pub fn get(&self, dialect: Dialect) -> Option<&str> {
        self.0[dialect.slot()].as_deref()
    }

    pub fn set(&mut self, dialect: Dialect, reading: Option<String>) {
        self.0[dialect.slot()] = reading;
    }
}

/// Row of the character table.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CharRecord {
    pub character: String,
    pub readings: Readings,
    pub notes: Option<String>,
    /// Position of the matching row in the reference frequency list; only
    /// used to break ties when sorting the final table.
    pub order: Option<usize>,
    /// Example words mined from `notes`.
    pub collocations: Vec<String>,
}

impl CharRecord {
    pub fn new(character: impl Into<String>, readings: Readings, notes: Option<String>) -> Self {
        Self {
            character: character.into(),
            readings,
            notes,
            order: None,
            collocations: Vec::new(),
        }
    }

    /// A row added by augmentation: one character, one dialect reading.
    pub fn augmented(
        character: impl Into<String>,
        dialect: Dialect,
        reading: impl Into<String>,
    ) -> Self {
        Self::new(character, Readings::only(dialect, reading), None)
    }

    pub fn reading(&self, dialect: Dialect) -> Option<&str> {
        self.readings.get(dialect)
    }
}

/// Row of the reference frequency list.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FrequencyWord {
    pub characters: String,
    /// Space-separated reference readings, already canonicalized.
    pub reading: String,
    pub frequency: i64,
    /// Zero-based data-row position in the source file.
    pub order: usize,
}

impl FrequencyWord {
    pub fn char_count(&self) -> usize {
        self.characters.chars().count()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.reading.split_whitespace()
    }
}

/// Character sequence paired with one reading per character.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct WordEntry {
    pub characters: String,
    pub pronunciation: String,
}

impl WordEntry {
    pub fn new(characters: impl Into<String>, pronunciation: impl Into<String>) -> Self {
        Self {
            characters: characters.into(),
            pronunciation: pronunciation.into(),
        }
    }

    pub fn char_count(&self) -> usize {
        self.characters.chars().count()
    }

    pub fn syllable_count(&self) -> usize {
        self.pronunciation.split_whitespace().count()
    }

    /// True when every character has exactly one syllable.
    pub fn is_aligned(&self) -> bool {
        self.char_count() == self.syllable_count()
    }
}

/// Where the reading at one position of a resolved word came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PositionSource {
    /// The record whose notes mention the collocation.
    Collocation,
    /// The character's own readings in the snapshot table.
    CharacterFallback,
    /// The (character, reference reading) pair of the master table.
    ReferencePair,
}

/// Which list a word table row came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum WordSource {
    /// Multi-character row of the dialect's own validation list.
    Validated,
    Collocation,
    Frequency,
}

impl fmt::Display for WordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WordSource::Validated => "validated",
            WordSource::Collocation => "collocation",
            WordSource::Frequency => "frequency",
        })
    }
}

/// Word table row with provenance. `positions` is empty for validated rows.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedWord {
    pub entry: WordEntry,
    pub source: WordSource,
    pub positions: Vec<PositionSource>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialect_names() {
        let names: Vec<&str> = Dialect::ALL.iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["canton", "waitau", "hakka"]);
        assert_eq!(Dialect::Waitau.title(), "Waitau");
        assert_eq!(Dialect::Hakka.to_string(), "hakka");
    }

    #[test]
    fn readings_only_sets_one_slot() {
        let readings = Readings::only(Dialect::Waitau, "hong2");
        assert_eq!(readings.get(Dialect::Waitau), Some("hong2"));
        assert_eq!(readings.get(Dialect::Canton), None);
        assert_eq!(readings.get(Dialect::Hakka), None);
    }

    #[test]
    fn word_alignment_counts_chars_not_bytes() {
        assert!(WordEntry::new("行人", "hang2 ngin2").is_aligned());
        assert!(!WordEntry::new("行人", "hang2").is_aligned());
        assert!(!WordEntry::new("行", "hang2 hong2").is_aligned());
    }
}
