use std::collections::HashMap;

use crate::core::{
    cloze::ClozeFormatter,
    errors::LexankiError,
    media::MediaAsset,
    models::{
        ConjugationResult,
        DefinitionEntry,
        Mood,
        Note,
    },
};

// Model names are the contract with the Anki profile: they must match the
// templates configured there byte for byte, misspellings included.
pub const BASIC_TYPE_IN_ANSWER: &str = "Basic (type in the answer)";
pub const BASIC_AND_REVERSED_FRENCH: &str = "Basic (and reversed card french)";
pub const FRENCH_DEFINITION: &str = "French Defenition";
pub const DEFINITION_AND_REVERSED: &str =
    "Basic (and reversed card (Word/Transcription/PartOfSpeach/Audio)";
pub const INDICATIF_PRESENT: &str = "French Conjugation: INDICATIF Présent";
pub const IMPERATIF_PRESENT: &str = "French Conjugation: IMPÉRATIF Présent";

/// Maps one looked-up word onto the note models its deck category uses.
/// Pure transformation: media download and submission happen around it.
pub struct NoteBuilder {
    cloze: ClozeFormatter,
}

impl NoteBuilder {
    pub fn new() -> Result<Self, LexankiError> {
        Ok(Self { cloze: ClozeFormatter::new()? })
    }

    /// A phrase feeds the same text into a type-in card and a reversed card.
    /// The translation side is entered manually in Anki to avoid duplicates.
    pub fn phrase_notes(&self, deck_name: &str, phrase: &str) -> Vec<Note> {
        [BASIC_TYPE_IN_ANSWER, BASIC_AND_REVERSED_FRENCH]
            .iter()
            .map(|model| Note {
                deck_name: deck_name.to_string(),
                model_name: model.to_string(),
                fields: HashMap::from([
                    ("Front".to_string(), phrase.to_string()),
                    ("Back".to_string(), phrase.to_string()),
                ]),
            })
            .collect()
    }

    /// One definition entry becomes a cloze definition card and a reversed
    /// word card, both pointing at the already-named audio asset.
    pub fn definition_notes(
        &self,
        deck_name: &str,
        entry: &DefinitionEntry,
        audio: &MediaAsset,
    ) -> Vec<Note> {
        let sound = format!("[sound:{}]", audio.filename);

        vec![
            Note {
                deck_name: deck_name.to_string(),
                model_name: FRENCH_DEFINITION.to_string(),
                fields: HashMap::from([
                    ("Rubric".to_string(), entry.text.clone()),
                    ("Question".to_string(), format!("{{{{c1::{}}}}}", entry.text)),
                    ("Image".to_string(), entry.part_of_speech.clone()),
                    ("Audio".to_string(), sound.clone()),
                ]),
            },
            Note {
                deck_name: deck_name.to_string(),
                model_name: DEFINITION_AND_REVERSED.to_string(),
                fields: HashMap::from([
                    ("Front-Expression".to_string(), entry.text.clone()),
                    ("Front-PartOfSpeech".to_string(), entry.part_of_speech.clone()),
                    ("Front-Audio".to_string(), sound),
                    ("Back".to_string(), "-".to_string()),
                ]),
            },
        ]
    }

    /// One verb becomes one cloze card per consumed mood, present tense only.
    pub fn verb_notes(&self, deck_name: &str, word: &str, table: &ConjugationResult) -> Vec<Note> {
        [(Mood::Indicatif, INDICATIF_PRESENT), (Mood::Imperatif, IMPERATIF_PRESENT)]
            .iter()
            .map(|(mood, model)| Note {
                deck_name: deck_name.to_string(),
                model_name: model.to_string(),
                fields: HashMap::from([
                    ("Rubric".to_string(), word.to_string()),
                    ("Question".to_string(), self.cloze.format(table.present(*mood))),
                ]),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn builder() -> NoteBuilder {
        NoteBuilder::new().unwrap()
    }

    #[test]
    fn test_phrase_fans_out_to_two_models() {
        let notes = builder().phrase_notes("French::Phrases", "avoir le cafard");

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].model_name, BASIC_TYPE_IN_ANSWER);
        assert_eq!(notes[1].model_name, BASIC_AND_REVERSED_FRENCH);
        for note in &notes {
            assert_eq!(note.deck_name, "French::Phrases");
            assert_eq!(note.fields["Front"], "avoir le cafard");
            assert_eq!(note.fields["Back"], "avoir le cafard");
        }
    }

    #[test]
    fn test_definition_entry_fans_out_to_two_models() {
        let entry = DefinitionEntry {
            text: "maison".to_string(),
            part_of_speech: "nom féminin".to_string(),
            audio_url: "https://voix.example.fr/maison.mp3".to_string(),
        };
        let audio = MediaAsset::new("maison.mp3", b"audio".to_vec());

        let notes = builder().definition_notes("French::Vocab", &entry, &audio);
        let sound = format!("[sound:{}]", audio.filename);

        assert_eq!(notes.len(), 2);

        assert_eq!(notes[0].model_name, FRENCH_DEFINITION);
        assert_eq!(notes[0].fields["Rubric"], "maison");
        assert_eq!(notes[0].fields["Question"], "{{c1::maison}}");
        assert_eq!(notes[0].fields["Image"], "nom féminin");
        assert_eq!(notes[0].fields["Audio"], sound);

        assert_eq!(notes[1].model_name, DEFINITION_AND_REVERSED);
        assert_eq!(notes[1].fields["Front-Expression"], "maison");
        assert_eq!(notes[1].fields["Front-PartOfSpeech"], "nom féminin");
        assert_eq!(notes[1].fields["Front-Audio"], sound);
        assert_eq!(notes[1].fields["Back"], "-");
    }

    #[test]
    fn test_verb_fans_out_to_one_note_per_mood() {
        let table = ConjugationResult {
            indicatif: HashMap::from([(
                "Présent".to_string(),
                vec!["je joue".to_string(), "tu joues".to_string()],
            )]),
            imperatif: HashMap::from([("Présent".to_string(), vec!["joue".to_string()])]),
        };

        let notes = builder().verb_notes("French::Verbs", "jouer", &table);

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].model_name, INDICATIF_PRESENT);
        assert_eq!(notes[0].fields["Rubric"], "jouer");
        assert_eq!(notes[0].fields["Question"], "je {{c1::joue}}<br>tu {{c1::joues}}");
        assert_eq!(notes[1].model_name, IMPERATIF_PRESENT);
        assert_eq!(notes[1].fields["Question"], "{{c1::joue}}");
    }
}
