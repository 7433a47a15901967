//! Case and diacritic folding for the string-matching operators.

use std::borrow::Cow;

use deunicode::deunicode_char;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::op::{Fold, Insensitivity};

/// Folds `input` according to `insensitivity`.
///
/// Diacritics are stripped first, then case is folded, so `"Émile"` under
/// `[cd]` becomes `"emile"`. Returns the input unchanged when no flag is set.
pub(crate) fn fold(input: &str, insensitivity: Insensitivity) -> Cow<'_, str> {
    let mut folded = Cow::Borrowed(input);

    if insensitivity.contains(Fold::Diacritic) && !folded.is_ascii() {
        folded = Cow::Owned(strip_diacritics(&folded));
    }

    if insensitivity.contains(Fold::Case) {
        folded = Cow::Owned(casefold(&folded));
    }

    folded
}

fn casefold(input: &str) -> String {
    if input.is_ascii() {
        return input.to_ascii_lowercase();
    }

    input.to_lowercase()
}

/// Removes diacritics while keeping each base letter in its own script.
///
/// Text is decomposed, combining marks are dropped and the rest recomposed,
/// so precomposed and decomposed spellings fold alike. Latin letters whose
/// mark is not a combining one (`ø`, `ł`, `đ`) map to their single base
/// letter; ligatures such as `ß` and `æ` are left alone.
fn strip_diacritics(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .map(|c| latin_base(c).unwrap_or(c))
        .collect()
}

fn latin_base(c: char) -> Option<char> {
    if !is_extended_latin(c) {
        return None;
    }

    let mut base = deunicode_char(c)?.chars();
    match (base.next(), base.next()) {
        (Some(letter), None) if letter.is_ascii_alphabetic() => Some(letter),
        _ => None,
    }
}

fn is_extended_latin(c: char) -> bool {
    matches!(c, '\u{00C0}'..='\u{024F}' | '\u{1E00}'..='\u{1EFF}') && c.is_alphabetic()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_borrows() {
        assert!(matches!(fold("Eden", Insensitivity::NONE), Cow::Borrowed("Eden")));
    }

    #[test]
    fn case_folding() {
        assert_eq!(fold("EdEn", Insensitivity::CASE), "eden");
        assert_eq!(fold("ÉMILE", Insensitivity::CASE), "émile");
    }

    #[test]
    fn diacritic_folding_keeps_case() {
        assert_eq!(fold("Émile", Insensitivity::DIACRITIC), "Emile");
        assert_eq!(fold("naïve café", Insensitivity::DIACRITIC), "naive cafe");
        assert_eq!(fold("Łódź", Insensitivity::DIACRITIC), "Lodz");
        assert_eq!(fold("Søren", Insensitivity::DIACRITIC), "Soren");
    }

    #[test]
    fn combined_folding() {
        let both = Insensitivity::from([Fold::Case, Fold::Diacritic]);
        assert_eq!(fold("Émile", both), "emile");
    }

    #[test]
    fn decomposed_input_folds() {
        assert_eq!(fold("E\u{0301}mile", Insensitivity::DIACRITIC), "Emile");
        assert_eq!(fold("E\u{0301}mile", Insensitivity::DIACRITIC), fold("Émile", Insensitivity::DIACRITIC));
    }

    #[test]
    fn ligatures_are_not_diacritics() {
        assert_eq!(fold("Straße", Insensitivity::DIACRITIC), "Straße");
        assert_eq!(fold("Cæsar", Insensitivity::DIACRITIC), "Cæsar");
    }

    #[test]
    fn other_scripts_keep_their_letters() {
        assert_eq!(fold("東京", Insensitivity::DIACRITIC), "東京");
        assert_eq!(fold("дом", Insensitivity::DIACRITIC), "дом");
        assert_eq!(fold("αβγ", Insensitivity::DIACRITIC), "αβγ");
        assert_eq!(fold("한국", Insensitivity::DIACRITIC), "한국");
    }

    #[test]
    fn other_scripts_lose_their_marks() {
        assert_eq!(fold("ἄλφα", Insensitivity::DIACRITIC), "αλφα");
        assert_eq!(fold("ёж", Insensitivity::DIACRITIC), "еж");
    }
}
