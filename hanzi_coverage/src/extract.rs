//! Ideograph extraction.
//!
//! Only the CJK Unified Ideographs block (U+4E00..=U+9FFF) counts. Extension
//! blocks, compatibility ideographs and punctuation are ignored.

use std::collections::BTreeSet;

use crate::regexes::regex_ideograph;

pub const IDEOGRAPH_START: char = '\u{4E00}';
pub const IDEOGRAPH_END: char = '\u{9FFF}';

pub fn is_ideograph(ch: char) -> bool {
    (IDEOGRAPH_START..=IDEOGRAPH_END).contains(&ch)
}

/// Ideographs of `text` in order of occurrence, duplicates included.
pub fn extract_ideographs(text: &str) -> Vec<char> {
    regex_ideograph()
        .find_iter(text)
        .filter_map(|m| m.as_str().chars().next())
        .collect()
}

/// Distinct ideographs of `text`, ascending by code point.
pub fn ideograph_set(text: &str) -> BTreeSet<char> {
    extract_ideographs(text).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_order_and_duplicates() {
        assert_eq!(
            extract_ideographs("人之初，性本善。性相近"),
            vec!['人', '之', '初', '性', '本', '善', '性', '相', '近']
        );
    }

    #[test]
    fn ignores_everything_outside_the_block() {
        // kana, hangul, fullwidth punctuation, latin, extension-A and compat ideographs
        let text = "abc 123 ひらがな 한국어 ，。！ \u{3400} \u{F900} \u{20000}";
        assert!(extract_ideographs(text).is_empty());
    }

    #[test]
    fn block_boundaries_are_inclusive() {
        let text = "\u{4DFF}\u{4E00}\u{9FFF}\u{A000}";
        assert_eq!(extract_ideographs(text), vec!['\u{4E00}', '\u{9FFF}']);
        assert!(is_ideograph('\u{4E00}'));
        assert!(is_ideograph('\u{9FFF}'));
        assert!(!is_ideograph('\u{4DFF}'));
        assert!(!is_ideograph('\u{A000}'));
    }

    #[test]
    fn traditional_forms_are_ideographs() {
        assert_eq!(extract_ideographs("學而時習之"), vec!['學', '而', '時', '習', '之']);
    }

    #[test]
    fn empty_and_plain_text_yield_nothing() {
        assert!(extract_ideographs("").is_empty());
        assert!(ideograph_set("plain ascii").is_empty());
    }

    #[test]
    fn extraction_is_deterministic_and_in_range() {
        let text = "道可道，非常道。名可名，非常名。The Way 道";
        let first = extract_ideographs(text);
        assert_eq!(first, extract_ideographs(text));
        assert!(first.iter().all(|c| is_ideograph(*c)));
    }

    #[test]
    fn set_deduplicates() {
        let set = ideograph_set("道可道非常道");
        assert_eq!(set.into_iter().collect::<String>(), "可常道非");
    }
}
