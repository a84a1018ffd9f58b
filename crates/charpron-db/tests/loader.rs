use std::fs;
use std::path::Path;

use charpron_db::{
    FREQUENCY_FILE, LoadMode, MASTER_FILE, SourceTables, TableError, validation_file,
};
use charpron_types::Dialect;

fn write_fixtures(dir: &Path) {
    fs::write(
        dir.join(MASTER_FILE),
        "字,粵拼,圍頭話,客家話,備註\n\
         行,hang4,hang2,hang2,\"~人, 銀~\"\n\
         行【異】,hong4,hong2,hong2,\n",
    )
    .unwrap();
    fs::write(
        dir.join(FREQUENCY_FILE),
        "詞,拼音,2,3,4,5,6,7,頻\n\
         行人,hang4 jan4,,,,,,,250\n\
         銀行,ngan4 hong4,,,,,,,9\n",
    )
    .unwrap();
    for dialect in Dialect::TARGETS {
        fs::write(
            dir.join(validation_file(dialect)),
            "0,1,2,3,4,字,6,音,狀態\n\
             ,,,,,行,,hang2,OK\n\
             ,,,,,行人,,hang2 ngin2,OK\n",
        )
        .unwrap();
    }
}

#[test]
fn loads_every_table_in_both_modes() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    for mode in [LoadMode::Mmap, LoadMode::Owned] {
        let tables = SourceTables::load_with_mode(dir.path(), mode).expect("load fixtures");
        assert_eq!(tables.master.len(), 2);
        assert_eq!(tables.master[0].notes, "~人, 銀~");
        assert_eq!(tables.master[1].character, "行【異】");
        assert_eq!(tables.frequency.len(), 2);
        assert_eq!(tables.frequency[1].frequency, 9);
        assert_eq!(tables.validation(Dialect::Hakka).len(), 2);
        assert_eq!(tables.validation(Dialect::Waitau)[1].reading, "hang2 ngin2");
        assert!(tables.validation(Dialect::Canton).is_empty());
    }
}

#[test]
fn missing_table_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    fs::remove_file(dir.path().join(validation_file(Dialect::Hakka))).unwrap();

    let err = SourceTables::load(dir.path()).unwrap_err();
    assert!(err.to_string().contains("HakkaWords.csv"));
}

#[test]
fn non_numeric_frequency_aborts() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    fs::write(
        dir.path().join(FREQUENCY_FILE),
        "詞,拼音,2,3,4,5,6,7,頻\n行人,hang4 jan4,,,,,,,lots\n",
    )
    .unwrap();

    let err = SourceTables::load(dir.path()).unwrap_err();
    assert!(err.to_string().contains(FREQUENCY_FILE));
    assert!(matches!(
        err.downcast_ref::<TableError>(),
        Some(TableError::BadFrequency { record: 2, .. })
    ));
}
