//! Compile the merged character table and the per-dialect word tables.
//!
//! The pipeline runs strictly in order:
//! 1. [`CharTable::build`] normalizes the master rows and attaches the
//!    frequency order.
//! 2. A [`Snapshot`] of that table is frozen and a [`CollocationIndex`] is
//!    built over it.
//! 3. One [`DialectPass`] per target dialect grows the table and resolves
//!    that dialect's words; every pass reads the same snapshot.
//! 4. The grown table is sorted for output.
//!
//! # Example
//! ```no_run
//! use charpron_compile::compile;
//! use charpron_db::SourceTables;
//! use charpron_types::Dialect;
//!
//! # fn main() -> anyhow::Result<()> {
//! let sources = SourceTables::load("/path/to/sources")?;
//! let compiled = compile(&sources);
//! for word in compiled.word_entries(Dialect::Hakka) {
//!     println!("{} {}", word.characters, word.pronunciation);
//! }
//! # Ok(()) }
//! ```

use std::collections::BTreeMap;

use charpron_db::SourceTables;
use charpron_types::{CharRecord, Dialect, ResolvedWord, WordEntry};
use tracing::info;

pub mod collocations;
pub mod resolver;
pub mod snapshot;
pub mod table;

pub use collocations::{Collocation, CollocationIndex};
pub use resolver::{
    DialectPass, MIN_FREQUENCY, PassOutput, PassReport, StrategyReport, ValidatedWords,
};
pub use snapshot::Snapshot;
pub use table::{CharTable, frequency_words};

/// Output of a complete run.
#[derive(Clone, Debug)]
pub struct Compiled {
    /// Character table in output order.
    pub chars: Vec<CharRecord>,
    pub words: BTreeMap<Dialect, Vec<ResolvedWord>>,
    pub reports: Vec<PassReport>,
}

impl Compiled {
    pub fn words(&self, dialect: Dialect) -> &[ResolvedWord] {
        self.words.get(&dialect).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn word_entries(&self, dialect: Dialect) -> Vec<WordEntry> {
        self.words(dialect).iter().map(|w| w.entry.clone()).collect()
    }
}

/// Run every stage over fully loaded sources.
pub fn compile(sources: &SourceTables) -> Compiled {
    let frequency = frequency_words(&sources.frequency);
    let mut table = CharTable::build(&sources.master, &frequency);
    let snapshot = Snapshot::capture(&table);
    let collocations = CollocationIndex::build(snapshot.records());
    info!("{} collocations indexed", collocations.len());

    let mut words = BTreeMap::new();
    let mut reports = Vec::with_capacity(Dialect::TARGETS.len());
    for dialect in Dialect::TARGETS {
        let pass = DialectPass::new(dialect, &snapshot, &collocations, &frequency);
        let output = pass.run(table, sources.validation(dialect));
        table = output.table;
        words.insert(dialect, output.words);
        reports.push(output.report);
    }

    Compiled {
        chars: table.into_sorted(),
        words,
        reports,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charpron_db::{MasterRow, ValidationRow};

    fn master(character: &str, canton: &str, reading: &str, notes: &str) -> MasterRow {
        MasterRow {
            character: character.into(),
            canton: canton.into(),
            waitau: reading.into(),
            hakka: reading.into(),
            notes: notes.into(),
        }
    }

    fn sources() -> SourceTables {
        SourceTables::from_rows(
            vec![
                master("行", "häng4", "hang2", ""),
                master("行", "hong4", "hong2", "紙~"),
                master("紙", "zi2", "zi2", ""),
            ],
            Vec::new(),
            [(
                Dialect::Waitau,
                vec![ValidationRow {
                    characters: "紙".into(),
                    reading: "zi3".into(),
                    valid: "OK".into(),
                }],
            )],
        )
    }

    #[test]
    fn passes_share_the_pre_augmentation_table() {
        let compiled = compile(&sources());

        let expected = vec![WordEntry::new("紙行", "zi2 hong2")];
        assert_eq!(compiled.word_entries(Dialect::Waitau), expected);
        assert_eq!(compiled.word_entries(Dialect::Hakka), expected);
        assert_eq!(compiled.reports[0].augmented, 1);
        assert_eq!(compiled.reports[1].augmented, 0);

        let paper: Vec<Option<&str>> = compiled
            .chars
            .iter()
            .filter(|r| r.character == "紙")
            .map(|r| r.reading(Dialect::Waitau))
            .collect();
        assert_eq!(paper, vec![Some("zi2"), Some("zi3")]);
    }
}
