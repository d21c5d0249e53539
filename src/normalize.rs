//! Text normalization shared by the signal extractor and the classifier.

use unicode_normalization::UnicodeNormalization;

/// Lowercase and strip combining diacritics so "después" and "despues"
/// match the same keyword lists.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_diacritic(*c))
        .collect()
}

/// Combining Diacritical Marks block
fn is_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// True when `text` contains any of `terms` as a substring.
pub fn contains_any<S: AsRef<str>>(text: &str, terms: &[S]) -> bool {
    terms.iter().any(|t| text.contains(t.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_accents_and_lowercases() {
        assert_eq!(normalize("Después"), "despues");
        assert_eq!(normalize("INSCRIPCIÓN Última"), "inscripcion ultima");
        assert_eq!(normalize("Niño"), "nino");
    }

    #[test]
    fn test_keeps_non_latin_punctuation() {
        assert_eq!(normalize("¿Qué opinas?"), "¿que opinas?");
        assert_eq!(normalize("50% • 20€"), "50% • 20€");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_contains_any() {
        assert!(contains_any("antes y despues", &["despues"]));
        assert!(!contains_any("hola", &["adios", "chao"]));
        assert!(!contains_any::<&str>("hola", &[]));
    }
}
