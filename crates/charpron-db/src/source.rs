//! Raw rows of the three source tables, columns picked by position.

use charpron_types::Dialect;

use crate::records::{Record, TableError, read_records};

pub const MASTER_FILE: &str = "dictionary.csv";
pub const FREQUENCY_FILE: &str = "public.csv";

/// `WaitauWords.csv`, `HakkaWords.csv`, ...
pub fn validation_file(dialect: Dialect) -> String {
    format!("{}Words.csv", dialect.title())
}

const MASTER_COLUMNS: [usize; 5] = [0, 1, 2, 3, 4];
const FREQUENCY_COLUMNS: [usize; 3] = [0, 1, 8];
const VALIDATION_COLUMNS: [usize; 3] = [5, 7, 8];

/// Master character table row, fields verbatim.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MasterRow {
    pub character: String,
    pub canton: String,
    pub waitau: String,
    pub hakka: String,
    pub notes: String,
}

impl MasterRow {
    pub fn reading(&self, dialect: Dialect) -> &str {
        match dialect {
            Dialect::Canton => &self.canton,
            Dialect::Waitau => &self.waitau,
            Dialect::Hakka => &self.hakka,
        }
    }
}

/// Reference frequency list row.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FrequencyRow {
    pub characters: String,
    pub reading: String,
    pub frequency: i64,
}

/// Dialect validation list row.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidationRow {
    pub characters: String,
    pub reading: String,
    pub valid: String,
}

pub(crate) fn parse_master(bytes: &[u8]) -> Result<Vec<MasterRow>, TableError> {
    data_records(bytes)?
        .map(|record| -> Result<MasterRow, TableError> {
            let [character, canton, waitau, hakka, notes] = record.columns(MASTER_COLUMNS)?;
            Ok(MasterRow {
                character: character.to_string(),
                canton: canton.to_string(),
                waitau: waitau.to_string(),
                hakka: hakka.to_string(),
                notes: notes.to_string(),
            })
        })
        .collect()
}

pub(crate) fn parse_frequency(bytes: &[u8]) -> Result<Vec<FrequencyRow>, TableError> {
    data_records(bytes)?
        .map(|record| -> Result<FrequencyRow, TableError> {
            let [characters, reading, frequency] = record.columns(FREQUENCY_COLUMNS)?;
            let frequency = frequency
                .trim()
                .parse::<i64>()
                .map_err(|_| TableError::BadFrequency {
                    record: record.number,
                    value: frequency.to_string(),
                })?;
            Ok(FrequencyRow {
                characters: characters.to_string(),
                reading: reading.to_string(),
                frequency,
            })
        })
        .collect()
}

pub(crate) fn parse_validation(bytes: &[u8]) -> Result<Vec<ValidationRow>, TableError> {
    data_records(bytes)?
        .map(|record| -> Result<ValidationRow, TableError> {
            let [characters, reading, valid] = record.columns(VALIDATION_COLUMNS)?;
            Ok(ValidationRow {
                characters: characters.to_string(),
                reading: reading.to_string(),
                valid: valid.to_string(),
            })
        })
        .collect()
}

fn data_records(bytes: &[u8]) -> Result<impl Iterator<Item = Record>, TableError> {
    let records = read_records(bytes)?;
    if records.is_empty() {
        return Err(TableError::MissingHeader);
    }
    Ok(records.into_iter().skip(1))
}
