//! Frozen copy of the character table taken before any augmentation.
//!
//! Every dialect pass answers its ambiguity and fallback questions from the
//! same snapshot, so rows added by one pass never change what a later pass
//! sees.

use std::collections::HashMap;

use charpron_types::{CharRecord, Dialect};

use crate::table::CharTable;

#[derive(Clone, Debug)]
pub struct Snapshot {
    records: Vec<CharRecord>,
    by_char: HashMap<String, Vec<usize>>,
}

impl Snapshot {
    pub fn capture(table: &CharTable) -> Self {
        let records = table.records().to_vec();
        let mut by_char: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, record) in records.iter().enumerate() {
            by_char.entry(record.character.clone()).or_default().push(idx);
        }
        Self { records, by_char }
    }

    pub fn records(&self) -> &[CharRecord] {
        &self.records
    }

    fn rows(&self, character: &str) -> &[usize] {
        self.by_char.get(character).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Distinct non-missing readings of the given rows, first-seen order.
    pub fn distinct_readings(&self, rows: &[usize], dialect: Dialect) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for &idx in rows {
            if let Some(reading) = self.records.get(idx).and_then(|r| r.reading(dialect))
                && !out.contains(&reading)
            {
                out.push(reading);
            }
        }
        out
    }

    /// Distinct recorded `dialect` readings of `character`.
    pub fn readings(&self, character: &str, dialect: Dialect) -> Vec<&str> {
        self.distinct_readings(self.rows(character), dialect)
    }

    /// More than one distinct `dialect` reading is recorded for `character`.
    pub fn is_ambiguous(&self, character: &str, dialect: Dialect) -> bool {
        self.readings(character, dialect).len() > 1
    }

    pub fn has_reading(&self, character: &str, dialect: Dialect, reading: &str) -> bool {
        self.rows(character)
            .iter()
            .any(|&idx| self.records[idx].reading(dialect) == Some(reading))
    }

    /// `dialect` readings of the rows whose reference reading is `reference`.
    ///
    /// `None` when the master table never lists that combination.
    pub fn readings_for_reference(
        &self,
        character: &str,
        reference: &str,
        dialect: Dialect,
    ) -> Option<Vec<&str>> {
        let rows: Vec<usize> = self
            .rows(character)
            .iter()
            .copied()
            .filter(|&idx| self.records[idx].reading(Dialect::REFERENCE) == Some(reference))
            .collect();
        if rows.is_empty() {
            return None;
        }
        Some(self.distinct_readings(&rows, dialect))
    }
}
