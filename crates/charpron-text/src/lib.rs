//! Deterministic text rules for the noisy source tables.
//!
//! Three families of rules live here:
//! 1. [`normalize`]: clean raw character, reading and notes cells.
//! 2. [`romanize`]: rewrite reference (Jyutping) readings into the phonemic
//!    spelling used by the master table.
//! 3. [`collocation`]: recover example words from cleaned notes.
//!
//! None of the rules fail; a cell that cleans down to nothing becomes `None`.
//!
//! ```rust
//! use charpron_text::{canonicalize, normalize_reading};
//!
//! assert_eq!(normalize_reading("hong2 / hang4?").as_deref(), Some("hong2 hang4"));
//! assert_eq!(canonicalize("gaa1"), "ga1");
//! ```

pub mod collocation;
pub mod normalize;
pub mod romanize;

pub use collocation::extract_collocations;
pub use normalize::{
    CLOSE_PAREN, EQUALS, LIST_SEPARATOR, OPEN_PAREN, TILDE, is_single_syllable,
    normalize_character, normalize_notes, normalize_reading,
};
pub use romanize::canonicalize;
