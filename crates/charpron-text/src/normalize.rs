use std::sync::LazyLock;

use regex::Regex;

/// Marker standing in for the record's own character inside notes.
pub const TILDE: &str = "～";
pub const LIST_SEPARATOR: &str = "、";
pub const OPEN_PAREN: &str = "（";
pub const CLOSE_PAREN: &str = "）";
pub const EQUALS: &str = "＝";

static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(【\s*)+.*?(】\s*)+").expect("bracket pattern"));
static SYLLABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zäöüæ]+[1-6]").expect("syllable pattern"));
static COMMAS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*([,，]\s*)+").expect("comma pattern"));
static OPENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*([(（]\s*)+").expect("open paren pattern"));
static CLOSES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*([)）]\s*)+").expect("close paren pattern"));

/// Trim a character cell and drop every `【…】` annotation run.
pub fn normalize_character(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let cleaned = BRACKETED.replace_all(trimmed, "");
    non_empty(cleaned.into_owned())
}

/// Keep only well-formed syllables (letters + tone 1-6), space-joined.
pub fn normalize_reading(raw: &str) -> Option<String> {
    let tokens: Vec<&str> = SYLLABLE.find_iter(raw).map(|m| m.as_str()).collect();
    non_empty(tokens.join(" "))
}

/// Clean a free-text notes cell belonging to `character`.
///
/// Self references become [`TILDE`], `=` becomes [`EQUALS`], comma runs
/// become [`LIST_SEPARATOR`] and parenthesis runs collapse to a single
/// full-width parenthesis.
pub fn normalize_notes(raw: &str, character: Option<&str>) -> Option<String> {
    let mut note = raw.trim().replace('~', TILDE);
    if let Some(ch) = character.filter(|c| !c.is_empty()) {
        note = note.replace(ch, TILDE);
    }
    let note = note.replace('=', EQUALS);
    let note = COMMAS.replace_all(&note, LIST_SEPARATOR);
    let note = OPENS.replace_all(&note, OPEN_PAREN);
    let note = CLOSES.replace_all(&note, CLOSE_PAREN);
    non_empty(note.into_owned())
}

/// True when `reading` holds exactly one syllable token.
pub fn is_single_syllable(reading: &str) -> bool {
    let mut tokens = reading.split_whitespace();
    tokens.next().is_some() && tokens.next().is_none()
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_is_trimmed() {
        assert_eq!(normalize_character("  行 ").as_deref(), Some("行"));
        assert_eq!(normalize_character("   "), None);
        assert_eq!(normalize_character(""), None);
    }

    #[test]
    fn character_drops_bracket_runs() {
        assert_eq!(normalize_character("行【異】").as_deref(), Some("行"));
        assert_eq!(normalize_character("行 【 異 】【又】").as_deref(), Some("行"));
        assert_eq!(normalize_character("【【異】】行").as_deref(), Some("行"));
        assert_eq!(normalize_character("【異】"), None);
    }

    #[test]
    fn reading_extracts_syllables() {
        assert_eq!(normalize_reading("hong2").as_deref(), Some("hong2"));
        assert_eq!(
            normalize_reading(" hong2, hang4 (又)").as_deref(),
            Some("hong2 hang4")
        );
        assert_eq!(normalize_reading("höü5/sæ3").as_deref(), Some("höü5 sæ3"));
    }

    #[test]
    fn reading_rejects_bad_tones_and_empty() {
        assert_eq!(normalize_reading("hong7"), None);
        assert_eq!(normalize_reading("hong"), None);
        assert_eq!(normalize_reading(""), None);
        assert_eq!(normalize_reading("HONG2"), None);
    }

    #[test]
    fn notes_replace_ascii_tilde() {
        assert_eq!(normalize_notes("~人", None).as_deref(), Some("～人"));
    }

    #[test]
    fn notes_compact_self_reference() {
        assert_eq!(
            normalize_notes("愛錫，愛人", Some("愛")).as_deref(),
            Some("～錫、～人")
        );
        assert_eq!(
            normalize_notes("愛（～錫）", Some("愛")).as_deref(),
            Some("～（～錫）")
        );
    }

    #[test]
    fn notes_widen_equals() {
        assert_eq!(normalize_notes("=行", Some("走")).as_deref(), Some("＝行"));
    }

    #[test]
    fn notes_collapse_comma_runs() {
        assert_eq!(normalize_notes("甲 , ，乙", None).as_deref(), Some("甲、乙"));
        assert_eq!(normalize_notes("甲,乙,,丙", None).as_deref(), Some("甲、乙、丙"));
    }

    #[test]
    fn notes_collapse_parenthesis_runs() {
        assert_eq!(normalize_notes("甲 ((乙) )", None).as_deref(), Some("甲（乙）"));
        assert_eq!(normalize_notes("甲（ 乙 ）丙", None).as_deref(), Some("甲（乙）丙"));
    }

    #[test]
    fn notes_empty_after_trim() {
        assert_eq!(normalize_notes("  ", Some("行")), None);
    }

    #[test]
    fn single_syllable_check() {
        assert!(is_single_syllable("hong2"));
        assert!(!is_single_syllable("hong2 hang4"));
        assert!(!is_single_syllable(""));
    }
}
