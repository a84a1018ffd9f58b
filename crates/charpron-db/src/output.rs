//! Writers for the compiled tables.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use charpron_types::{CharRecord, Dialect, WordEntry};

use crate::records::RecordWriter;

pub const CHARS_FILE: &str = "chars.csv";

/// `waitau_words.csv`, `hakka_words.csv`, ...
pub fn words_file(dialect: Dialect) -> String {
    format!("{}_words.csv", dialect.name())
}

/// Write `char,<target readings...>,notes`, rows in the given order.
pub fn write_char_table(path: impl AsRef<Path>, records: &[CharRecord]) -> Result<()> {
    let path = path.as_ref();
    let mut header = vec!["char"];
    header.extend(Dialect::TARGETS.iter().map(|d| d.name()));
    header.push("notes");

    let mut writer = create(path)?;
    writer
        .write_record(header)
        .with_context(|| format!("write {}", path.display()))?;
    for record in records {
        let mut row = vec![record.character.as_str()];
        row.extend(
            Dialect::TARGETS
                .iter()
                .map(|d| record.reading(*d).unwrap_or_default()),
        );
        row.push(record.notes.as_deref().unwrap_or_default());
        writer
            .write_record(row)
            .with_context(|| format!("write {}", path.display()))?;
    }
    writer
        .into_inner()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

/// Write `char,pron`.
pub fn write_word_table(path: impl AsRef<Path>, words: &[WordEntry]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = create(path)?;
    writer
        .write_record(["char", "pron"])
        .with_context(|| format!("write {}", path.display()))?;
    for word in words {
        writer
            .write_record([word.characters.as_str(), word.pronunciation.as_str()])
            .with_context(|| format!("write {}", path.display()))?;
    }
    writer
        .into_inner()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

fn create(path: &Path) -> Result<RecordWriter<BufWriter<File>>> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    Ok(RecordWriter::new(BufWriter::new(file)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use charpron_types::Readings;

    #[test]
    fn char_table_leaves_missing_values_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CHARS_FILE);
        let records = vec![
            CharRecord::new(
                "行",
                Readings::new(Some("hang4".into()), Some("hang2".into()), None),
                Some("～人、銀～".into()),
            ),
            CharRecord::augmented("行", Dialect::Hakka, "hang2"),
        ];
        write_char_table(&path, &records).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "char,waitau,hakka,notes\n行,hang2,,～人、銀～\n行,,hang2,\n"
        );
    }

    #[test]
    fn word_table_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(words_file(Dialect::Waitau));
        write_word_table(&path, &[WordEntry::new("行人", "hang2 yan2")]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "char,pron\n行人,hang2 yan2\n");
        assert!(path.ends_with("waitau_words.csv"));
    }
}
