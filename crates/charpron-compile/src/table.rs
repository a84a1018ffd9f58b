//! The character table: normalized, deduplicated master rows plus rows added
//! by augmentation.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use charpron_db::{FrequencyRow, MasterRow};
use charpron_text::{
    canonicalize, extract_collocations, normalize_character, normalize_notes, normalize_reading,
};
use charpron_types::{CharRecord, Dialect, FrequencyWord, Readings};
use tracing::{debug, info};

/// Frequency-list rows with canonical reference readings and their row order.
pub fn frequency_words(rows: &[FrequencyRow]) -> Vec<FrequencyWord> {
    rows.iter()
        .enumerate()
        .map(|(order, row)| FrequencyWord {
            characters: row.characters.clone(),
            reading: canonicalize(&row.reading),
            frequency: row.frequency,
            order,
        })
        .collect()
}

/// Order-preserving character table.
#[derive(Clone, Debug, Default)]
pub struct CharTable {
    records: Vec<CharRecord>,
}

impl CharTable {
    /// Normalize master rows, attach frequency order, drop exact duplicates
    /// and mine collocations from the cleaned notes.
    pub fn build(master: &[MasterRow], frequency: &[FrequencyWord]) -> Self {
        let mut first_order: HashMap<(&str, &str), usize> = HashMap::new();
        for word in frequency {
            first_order
                .entry((word.characters.as_str(), word.reading.as_str()))
                .or_insert(word.order);
        }

        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(master.len());
        let (mut unnamed, mut duplicates) = (0usize, 0usize);
        for row in master {
            let Some(character) = normalize_character(&row.character) else {
                unnamed += 1;
                continue;
            };
            let mut readings = Readings::default();
            for dialect in Dialect::ALL {
                readings.set(dialect, normalize_reading(row.reading(dialect)));
            }
            let notes = normalize_notes(&row.notes, Some(&character));
            let order = readings
                .get(Dialect::REFERENCE)
                .and_then(|reading| first_order.get(&(character.as_str(), reading)))
                .copied();

            let mut record = CharRecord::new(character, readings, notes);
            record.order = order;
            if seen.insert(record.clone()) {
                records.push(record);
            } else {
                duplicates += 1;
            }
        }
        if unnamed > 0 {
            debug!("dropped {unnamed} master rows without a character");
        }

        for record in &mut records {
            if let Some(notes) = &record.notes {
                record.collocations = extract_collocations(notes, &record.character);
            }
        }

        info!(
            "character table: {} rows ({} duplicates removed)",
            records.len(),
            duplicates
        );
        Self { records }
    }

    pub fn from_records(records: Vec<CharRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CharRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: CharRecord) {
        self.records.push(record);
    }

    /// Rows in output order: character, then frequency order, then
    /// reference reading, missing values last. Ties keep table order.
    pub fn into_sorted(self) -> Vec<CharRecord> {
        let mut records = self.records;
        records.sort_by(|a, b| {
            a.character
                .cmp(&b.character)
                .then_with(|| missing_last(a.order, b.order))
                .then_with(|| {
                    missing_last(a.reading(Dialect::REFERENCE), b.reading(Dialect::REFERENCE))
                })
        });
        records
    }
}

fn missing_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
