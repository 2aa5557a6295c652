use regex::Regex;

use crate::core::errors::LexankiError;

/// Turns a conjugation table row set into one cloze-deletion string.
///
/// Forms that open with a known subject pronoun keep the pronoun visible and
/// hide the verb; anything else is dropped in the first pass. If no form
/// matched at all (an unexpected table layout), every original form is
/// wrapped whole so the card is never empty for non-empty input.
pub struct ClozeFormatter {
    pronouns: Regex,
}

impl ClozeFormatter {
    pub fn new() -> Result<Self, LexankiError> {
        let pronouns = Regex::new(r"^(j'|je|tu|il, elle|nous|vous|ils, elles)\s*")?;
        Ok(Self { pronouns })
    }

    pub fn format(&self, conjugations: &[String]) -> String {
        let mut parts: Vec<String> = Vec::new();

        for form in conjugations {
            if let Some(m) = self.pronouns.find(form) {
                let pronoun = m.as_str().trim();
                let verb = form[m.end()..].trim();
                parts.push(format!("{} {{{{c1::{}}}}}", pronoun, verb));
            }
        }

        if parts.is_empty() {
            parts = conjugations.iter().map(|form| format!("{{{{c1::{}}}}}", form)).collect();
        }

        parts.join("<br>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forms(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_present_tense_row() {
        let formatter = ClozeFormatter::new().unwrap();
        let result = formatter.format(&forms(&["je joue", "tu joues", "il, elle joue"]));
        assert_eq!(result, "je {{c1::joue}}<br>tu {{c1::joues}}<br>il, elle {{c1::joue}}");
    }

    #[test]
    fn test_elided_and_plural_pronouns() {
        let formatter = ClozeFormatter::new().unwrap();
        let result = formatter.format(&forms(&["j'aime", "nous aimons", "ils, elles aiment"]));
        assert_eq!(result, "j' {{c1::aime}}<br>nous {{c1::aimons}}<br>ils, elles {{c1::aiment}}");
    }

    #[test]
    fn test_fallback_wraps_unrecognized_layout() {
        // No pronoun matches, so every original form is kept verbatim.
        let formatter = ClozeFormatter::new().unwrap();
        let result = formatter.format(&forms(&["xyz unknown form"]));
        assert_eq!(result, "{{c1::xyz unknown form}}");
    }

    #[test]
    fn test_fallback_preserves_order_and_count() {
        let formatter = ClozeFormatter::new().unwrap();
        let result = formatter.format(&forms(&["joue", "joues"]));
        assert_eq!(result, "{{c1::joue}}<br>{{c1::joues}}");
    }

    #[test]
    fn test_non_matching_forms_dropped_when_any_match() {
        // Imperative rows carry no pronoun and fall out of the first pass.
        let formatter = ClozeFormatter::new().unwrap();
        let result = formatter.format(&forms(&["joue", "tu joues"]));
        assert_eq!(result, "tu {{c1::joues}}");
    }

    #[test]
    fn test_empty_input() {
        let formatter = ClozeFormatter::new().unwrap();
        assert_eq!(formatter.format(&[]), "");
    }

    #[test]
    fn test_pronoun_with_empty_remainder_passes_through() {
        let formatter = ClozeFormatter::new().unwrap();
        assert_eq!(formatter.format(&forms(&["je "])), "je {{c1::}}");
    }
}
