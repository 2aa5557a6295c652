use std::{
    collections::HashMap,
    fs,
    path::Path,
};

use serde::Deserialize;

use crate::core::errors::LexankiError;

/// Deck configuration file: three top-level groups, one per note category.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeckFile {
    #[serde(default)]
    pub verbs: DecksContainer,
    #[serde(default)]
    pub definition: DecksContainer,
    #[serde(default)]
    pub phrases: DecksContainer,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DecksContainer {
    #[serde(default)]
    pub decks: Vec<Deck>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Deck {
    pub name: String,
    #[serde(default)]
    pub words: Vec<String>,
}

impl DeckFile {
    pub fn load(path: &Path) -> Result<Self, LexankiError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            LexankiError::FailedToLoadDecks(format!("{}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// The group a deck was loaded from fixes its kind for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckKind {
    Phrase,
    Definition,
    Verb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Indicatif,
    Imperatif,
}

pub const PRESENT: &str = "Présent";

/// Conjugation table keyed by tense name, split by mood. Only the moods the
/// note models consume are kept.
#[derive(Debug, Clone, Default)]
pub struct ConjugationResult {
    pub indicatif: HashMap<String, Vec<String>>,
    pub imperatif: HashMap<String, Vec<String>>,
}

impl ConjugationResult {
    pub fn present(&self, mood: Mood) -> &[String] {
        let tenses = match mood {
            Mood::Indicatif => &self.indicatif,
            Mood::Imperatif => &self.imperatif,
        };
        tenses.get(PRESENT).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// One headword block from the dictionary: display text, grammatical
/// category and the pronunciation audio location.
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionEntry {
    pub text: String,
    pub part_of_speech: String,
    pub audio_url: String,
}

/// A note ready for submission. Built once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub deck_name: String,
    pub model_name: String,
    pub fields: HashMap<String, String>,
}
