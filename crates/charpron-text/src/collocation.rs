use std::sync::LazyLock;

use regex::Regex;

use crate::normalize::{LIST_SEPARATOR, TILDE};

static ASIDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"（.*?）").expect("aside pattern"));

/// Example words for `character` found in its cleaned notes.
///
/// The tilde marker is expanded back to the character, parenthesized asides
/// are dropped, and only list items that contain the character survive.
pub fn extract_collocations(notes: &str, character: &str) -> Vec<String> {
    if character.is_empty() {
        return Vec::new();
    }
    let expanded = notes.replace(TILDE, character);
    let stripped = ASIDE.replace_all(&expanded, "");
    stripped
        .split(LIST_SEPARATOR)
        .filter(|fragment| fragment.contains(character))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_notes;

    #[test]
    fn recovers_character_from_tilde() {
        assert_eq!(
            extract_collocations("～錫、～人", "愛"),
            vec!["愛錫".to_string(), "愛人".to_string()]
        );
    }

    #[test]
    fn drops_asides_and_foreign_fragments() {
        assert_eq!(
            extract_collocations("～人（又）、走路、行～", "行"),
            vec!["行人".to_string(), "行行".to_string()]
        );
    }

    #[test]
    fn self_reference_survives_normalization() {
        let notes = normalize_notes("愛（～錫）", Some("愛")).unwrap();
        assert_eq!(notes, "～（～錫）");
        assert_eq!(extract_collocations(&notes, "愛"), vec!["愛".to_string()]);
    }

    #[test]
    fn nothing_left_after_stripping() {
        assert!(extract_collocations("（～錫）", "愛").is_empty());
        assert!(extract_collocations("走路", "愛").is_empty());
    }
}
