//! Load the dictionary source tables and write the compiled ones.
//!
//! Inputs are CSV files in one directory: the master character table
//! ([`MASTER_FILE`]), the reference frequency list ([`FREQUENCY_FILE`]) and
//! one validation list per target dialect ([`validation_file`]). Each file is
//! read whole (memory-mapped or into an owned buffer, see [`LoadMode`]),
//! parsed with `csv_core`, and reduced to the positional columns the compiler
//! needs. Fields are kept verbatim; cleaning happens downstream.
//!
//! Structural problems (short rows, non-numeric frequency, bad UTF-8) are
//! fatal and reported as [`TableError`] wrapped with the file path.
//!
//! # Example
//! ```no_run
//! use charpron_db::{LoadMode, SourceTables};
//! use charpron_types::Dialect;
//!
//! # fn main() -> anyhow::Result<()> {
//! let tables = SourceTables::load_with_mode("/path/to/sources", LoadMode::Owned)?;
//! println!("master rows: {}", tables.master.len());
//! println!("waitau rows: {}", tables.validation(Dialect::Waitau).len());
//! # Ok(()) }
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use charpron_types::Dialect;
use memmap2::Mmap;
use tracing::{debug, info};

pub mod output;
pub mod records;
pub mod source;

pub use output::{CHARS_FILE, write_char_table, write_word_table, words_file};
pub use records::{Record, RecordWriter, TableError, read_records};
pub use source::{
    FREQUENCY_FILE, FrequencyRow, MASTER_FILE, MasterRow, ValidationRow, validation_file,
};

/// Strategy for loading source files.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map each file.
    Mmap,
    /// Read each file into an owned buffer.
    Owned,
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

/// Every source table of one run, fully loaded.
#[derive(Clone, Debug, Default)]
pub struct SourceTables {
    pub master: Vec<MasterRow>,
    pub frequency: Vec<FrequencyRow>,
    validation: BTreeMap<Dialect, Vec<ValidationRow>>,
}

impl SourceTables {
    /// Load every table from `dir`, memory-mapping the files.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_mode(dir, LoadMode::Mmap)
    }

    /// Load every table from `dir` choosing the buffer strategy at runtime.
    pub fn load_with_mode(dir: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        let dir = dir.as_ref();
        let mut required = vec![MASTER_FILE.to_string(), FREQUENCY_FILE.to_string()];
        required.extend(Dialect::TARGETS.iter().map(|d| validation_file(*d)));
        for name in &required {
            let path = dir.join(name);
            if !path.exists() {
                anyhow::bail!("missing required source table: {}", path.display());
            }
        }

        let master = parse_file(dir.join(MASTER_FILE), mode, source::parse_master)?;
        let frequency = parse_file(dir.join(FREQUENCY_FILE), mode, source::parse_frequency)?;
        let mut validation = BTreeMap::new();
        for dialect in Dialect::TARGETS {
            let rows = parse_file(
                dir.join(validation_file(dialect)),
                mode,
                source::parse_validation,
            )?;
            debug!("{dialect}: {} validation rows", rows.len());
            validation.insert(dialect, rows);
        }

        info!(
            "loaded {} master rows and {} frequency rows from {}",
            master.len(),
            frequency.len(),
            dir.display()
        );
        Ok(Self {
            master,
            frequency,
            validation,
        })
    }

    /// Build from rows already in memory.
    pub fn from_rows(
        master: Vec<MasterRow>,
        frequency: Vec<FrequencyRow>,
        validation: impl IntoIterator<Item = (Dialect, Vec<ValidationRow>)>,
    ) -> Self {
        Self {
            master,
            frequency,
            validation: validation.into_iter().collect(),
        }
    }

    /// Validation rows for `dialect`; empty when none were loaded.
    pub fn validation(&self, dialect: Dialect) -> &[ValidationRow] {
        self.validation
            .get(&dialect)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn parse_file<T>(
    path: PathBuf,
    mode: LoadMode,
    parse: fn(&[u8]) -> Result<Vec<T>, TableError>,
) -> Result<Vec<T>> {
    let buffer = load_file(&path, mode)?;
    parse(buffer.as_slice()).with_context(|| format!("parse {}", path.display()))
}

fn load_file(path: &Path, mode: LoadMode) -> Result<Buffer> {
    match mode {
        LoadMode::Mmap => {
            let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            unsafe { Mmap::map(&file) }
                .map(Buffer::Mmap)
                .with_context(|| format!("mmap {}", path.display()))
        }
        LoadMode::Owned => {
            let mut file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .with_context(|| format!("read {}", path.display()))?;
            Ok(Buffer::Owned(buf))
        }
    }
}
