//! Per-dialect cross-reference pass.
//!
//! A pass for dialect `D`:
//! 1. **Augment**: single-character rows of `D`'s validation list whose
//!    reading the snapshot does not know become new character-table rows.
//! 2. **Resolve** multi-character candidates with two separate strategies:
//!    - collocations mined from notes: per position, the mentioning rows'
//!      reading, falling back to the character's own reading;
//!    - reference frequency words: per position, only the reading listed for
//!      the exact (character, reference reading) pair; no fallback.
//!
//!    A word is a candidate only when at least one of its characters is
//!    ambiguous in `D`.
//! 3. **Merge** the validated multi-character rows with the resolved words,
//!    dropping exact duplicates.
//!
//! Lookup misses only skip the affected word; a pass never fails.

use std::collections::HashSet;

use charpron_db::ValidationRow;
use charpron_text::{is_single_syllable, normalize_character, normalize_reading};
use charpron_types::{
    CharRecord, Dialect, FrequencyWord, PositionSource, ResolvedWord, WordEntry, WordSource,
};
use tracing::{debug, info, trace, warn};

use crate::collocations::{Collocation, CollocationIndex};
use crate::snapshot::Snapshot;
use crate::table::CharTable;

/// Frequency-list words below this count are ignored.
pub const MIN_FREQUENCY: i64 = 10;

const VALID_FLAG: &str = "OK";

/// Validation-list rows that passed the flag and syllable-count filters.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ValidatedWords {
    pub single: Vec<WordEntry>,
    pub multi: Vec<WordEntry>,
}

impl ValidatedWords {
    /// Keep rows flagged `OK` whose reading has one syllable per character.
    pub fn from_rows(rows: &[ValidationRow]) -> Self {
        let mut out = Self::default();
        for row in rows {
            if row.valid != VALID_FLAG {
                continue;
            }
            let (Some(characters), Some(reading)) = (
                normalize_character(&row.characters),
                normalize_reading(&row.reading),
            ) else {
                continue;
            };
            let entry = WordEntry::new(characters, reading);
            if !entry.is_aligned() {
                continue;
            }
            if entry.char_count() == 1 {
                out.single.push(entry);
            } else {
                out.multi.push(entry);
            }
        }
        out
    }
}

/// Counters for one strategy within a pass.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StrategyReport {
    pub candidates: usize,
    pub accepted: usize,
    pub rejected: usize,
}

impl StrategyReport {
    fn record(&mut self, accepted: bool) {
        self.candidates += 1;
        if accepted {
            self.accepted += 1;
        } else {
            self.rejected += 1;
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PassReport {
    pub dialect: Dialect,
    pub augmented: usize,
    pub validated: usize,
    pub collocation: StrategyReport,
    pub frequency: StrategyReport,
    pub words: usize,
}

/// Result of a pass: the grown table handed back, plus the word table.
#[derive(Clone, Debug)]
pub struct PassOutput {
    pub table: CharTable,
    pub words: Vec<ResolvedWord>,
    pub report: PassReport,
}

/// Everything a pass reads; none of it changes during the pass.
#[derive(Clone, Copy, Debug)]
pub struct DialectPass<'a> {
    dialect: Dialect,
    snapshot: &'a Snapshot,
    collocations: &'a CollocationIndex,
    frequency: &'a [FrequencyWord],
}

impl<'a> DialectPass<'a> {
    pub fn new(
        dialect: Dialect,
        snapshot: &'a Snapshot,
        collocations: &'a CollocationIndex,
        frequency: &'a [FrequencyWord],
    ) -> Self {
        Self {
            dialect,
            snapshot,
            collocations,
            frequency,
        }
    }

    /// Run augment, resolve and merge, threading `table` through.
    pub fn run(&self, mut table: CharTable, validation: &[ValidationRow]) -> PassOutput {
        let validated = ValidatedWords::from_rows(validation);
        let augmented = self.augment(&mut table, &validated.single);

        let mut report = PassReport {
            dialect: self.dialect,
            augmented,
            validated: validated.multi.len(),
            collocation: StrategyReport::default(),
            frequency: StrategyReport::default(),
            words: 0,
        };

        let mut resolved = Vec::new();
        for collocation in self.collocations.iter() {
            if !self.is_candidate(collocation.text) {
                continue;
            }
            let word = self.resolve_collocation(collocation);
            report.collocation.record(word.is_some());
            resolved.extend(word);
        }
        for word in self.frequency {
            if word.char_count() <= 1 || word.frequency < MIN_FREQUENCY {
                continue;
            }
            if !self.is_candidate(&word.characters) {
                continue;
            }
            let resolved_word = self.resolve_frequency(word);
            report.frequency.record(resolved_word.is_some());
            resolved.extend(resolved_word);
        }

        let words = merge(validated.multi, resolved);
        report.words = words.len();
        info!(
            "{}: +{} character rows, {} words ({} validated, collocations {}/{}, frequency {}/{})",
            self.dialect,
            report.augmented,
            report.words,
            report.validated,
            report.collocation.accepted,
            report.collocation.candidates,
            report.frequency.accepted,
            report.frequency.candidates,
        );

        PassOutput {
            table,
            words,
            report,
        }
    }

    /// Append rows for single-character readings the snapshot lacks.
    pub fn augment(&self, table: &mut CharTable, singles: &[WordEntry]) -> usize {
        let mut queued: HashSet<(&str, &str)> = HashSet::new();
        for entry in singles {
            let pair = (entry.characters.as_str(), entry.pronunciation.as_str());
            if self.snapshot.has_reading(pair.0, self.dialect, pair.1) || !queued.insert(pair) {
                continue;
            }
            trace!("{}: new reading {} for {}", self.dialect, pair.1, pair.0);
            table.push(CharRecord::augmented(pair.0, self.dialect, pair.1));
        }
        if singles.is_empty() {
            warn!("{}: validation list has no single-character rows", self.dialect);
        }
        queued.len()
    }

    /// At least one character has several readings in this dialect.
    pub fn is_candidate(&self, characters: &str) -> bool {
        characters
            .chars()
            .any(|ch| self.snapshot.is_ambiguous(&ch.to_string(), self.dialect))
    }

    /// Collocation strategy: mentioning rows first, then the character itself.
    pub fn resolve_collocation(&self, collocation: Collocation<'_>) -> Option<ResolvedWord> {
        let mut readings = Vec::new();
        let mut positions = Vec::new();
        for ch in collocation.text.chars() {
            let ch = ch.to_string();
            let from_rows = self
                .snapshot
                .distinct_readings(collocation.rows_for(&ch), self.dialect);
            let resolved = match sole_syllable(&from_rows) {
                Some(reading) => Some((reading, PositionSource::Collocation)),
                None => sole_syllable(&self.snapshot.readings(&ch, self.dialect))
                    .map(|reading| (reading, PositionSource::CharacterFallback)),
            };
            let Some((reading, source)) = resolved else {
                debug!(
                    "{}: collocation {} unresolved at {}",
                    self.dialect, collocation.text, ch
                );
                return None;
            };
            readings.push(reading);
            positions.push(source);
        }
        finish(collocation.text, readings, positions, WordSource::Collocation)
    }

    /// Frequency strategy: only the (character, reference reading) pair.
    pub fn resolve_frequency(&self, word: &FrequencyWord) -> Option<ResolvedWord> {
        let references: Vec<&str> = word.tokens().collect();
        if references.len() != word.char_count() {
            debug!(
                "{}: {} has {} reference syllables for {} characters",
                self.dialect,
                word.characters,
                references.len(),
                word.char_count()
            );
            return None;
        }

        let mut readings = Vec::with_capacity(references.len());
        for (ch, reference) in word.characters.chars().zip(references) {
            let ch = ch.to_string();
            let reading = self
                .snapshot
                .readings_for_reference(&ch, reference, self.dialect)
                .and_then(|values| sole_syllable(&values));
            let Some(reading) = reading else {
                debug!(
                    "{}: {} rejected, no single reading for {} ({})",
                    self.dialect, word.characters, ch, reference
                );
                return None;
            };
            readings.push(reading);
        }
        let positions = vec![PositionSource::ReferencePair; readings.len()];
        finish(&word.characters, readings, positions, WordSource::Frequency)
    }
}

/// The one distinct value, if it is a single syllable.
fn sole_syllable<'v>(values: &[&'v str]) -> Option<&'v str> {
    match values {
        [only] if is_single_syllable(only) => Some(*only),
        _ => None,
    }
}

fn finish(
    characters: &str,
    readings: Vec<&str>,
    positions: Vec<PositionSource>,
    source: WordSource,
) -> Option<ResolvedWord> {
    let entry = WordEntry::new(characters, readings.join(" "));
    if !entry.is_aligned() {
        return None;
    }
    Some(ResolvedWord {
        entry,
        source,
        positions,
    })
}

fn merge(validated: Vec<WordEntry>, resolved: Vec<ResolvedWord>) -> Vec<ResolvedWord> {
    let mut seen: HashSet<WordEntry> = HashSet::new();
    validated
        .into_iter()
        .map(|entry| ResolvedWord {
            entry,
            source: WordSource::Validated,
            positions: Vec::new(),
        })
        .chain(resolved)
        .filter(|word| seen.insert(word.entry.clone()))
        .collect()
}
