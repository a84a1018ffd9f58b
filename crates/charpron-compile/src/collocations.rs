//! Index of example words mined from notes, keyed by (collocation, character).

use std::collections::BTreeMap;

use charpron_types::CharRecord;

/// `collocation -> character -> rows` whose notes mention the collocation.
#[derive(Clone, Debug, Default)]
pub struct CollocationIndex {
    entries: BTreeMap<String, BTreeMap<String, Vec<usize>>>,
}

/// One collocation and the rows that mention it, grouped by character.
#[derive(Clone, Copy, Debug)]
pub struct Collocation<'a> {
    pub text: &'a str,
    members: &'a BTreeMap<String, Vec<usize>>,
}

impl<'a> Collocation<'a> {
    /// Rows of `character` whose notes list this collocation.
    pub fn rows_for(&self, character: &str) -> &'a [usize] {
        self.members
            .get(character)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

impl CollocationIndex {
    /// Index `records` by position; positions refer back into `records`.
    pub fn build(records: &[CharRecord]) -> Self {
        let mut entries: BTreeMap<String, BTreeMap<String, Vec<usize>>> = BTreeMap::new();
        for (idx, record) in records.iter().enumerate() {
            for collocation in &record.collocations {
                entries
                    .entry(collocation.clone())
                    .or_default()
                    .entry(record.character.clone())
                    .or_default()
                    .push(idx);
            }
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Collocations in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = Collocation<'_>> + '_ {
        self.entries.iter().map(|(text, members)| Collocation {
            text: text.as_str(),
            members,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charpron_types::Readings;

    fn record(character: &str, collocations: &[&str]) -> CharRecord {
        let mut rec = CharRecord::new(character, Readings::default(), None);
        rec.collocations = collocations.iter().map(|c| c.to_string()).collect();
        rec
    }

    #[test]
    fn groups_rows_by_collocation_and_character() {
        let records = vec![
            record("銀", &["銀行"]),
            record("行", &["銀行", "行人"]),
            record("行", &["銀行"]),
        ];
        let index = CollocationIndex::build(&records);
        assert_eq!(index.len(), 2);

        let all: Vec<Collocation<'_>> = index.iter().collect();
        let bank = all.iter().find(|c| c.text == "銀行").unwrap();
        assert_eq!(bank.rows_for("銀"), &[0]);
        assert_eq!(bank.rows_for("行"), &[1, 2]);
        assert!(bank.rows_for("人").is_empty());
        assert_eq!(bank.char_count(), 2);
    }
}
