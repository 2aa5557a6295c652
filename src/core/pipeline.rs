use crate::{
    anki::notes::NoteBuilder,
    core::{
        errors::LexankiError,
        media::MediaAsset,
        models::{
            ConjugationResult,
            DeckFile,
            DeckKind,
            DecksContainer,
            DefinitionEntry,
            Note,
        },
    },
};

pub trait ConjugationSource {
    fn conjugate(&self, verb: &str) -> Result<ConjugationResult, LexankiError>;
}

pub trait DefinitionSource {
    fn define(&self, word: &str) -> Result<Vec<DefinitionEntry>, LexankiError>;
}

pub trait MediaSource {
    fn fetch(&self, url: &str) -> Result<(Vec<u8>, String), LexankiError>;
}

pub trait NoteSink {
    fn add_note(&self, note: &Note) -> Result<(), LexankiError>;
    fn store_media(&self, filename: &str, bytes: &[u8]) -> Result<(), LexankiError>;
}

#[derive(Debug, Clone)]
pub struct WordFailure {
    pub kind: DeckKind,
    pub deck: String,
    pub word: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub submitted: usize,
    pub rejected: usize,
    pub failures: Vec<WordFailure>,
}

/// Walks the deck groups in a fixed order and drives lookups, note building
/// and submission word by word. A lookup or media failure skips only the word
/// it belongs to; a rejected submission is logged and the run moves on.
pub struct DeckProcessor<'a, C, D, M, S> {
    conjugations: &'a C,
    definitions: &'a D,
    media: &'a M,
    sink: &'a S,
    builder: NoteBuilder,
}

impl<'a, C, D, M, S> DeckProcessor<'a, C, D, M, S>
where
    C: ConjugationSource,
    D: DefinitionSource,
    M: MediaSource,
    S: NoteSink,
{
    pub fn new(
        conjugations: &'a C,
        definitions: &'a D,
        media: &'a M,
        sink: &'a S,
    ) -> Result<Self, LexankiError> {
        Ok(Self { conjugations, definitions, media, sink, builder: NoteBuilder::new()? })
    }

    /// Submission order follows deck and word order exactly, so a run over
    /// the same deck file always produces the same sequence of notes.
    pub fn run(&self, decks: &DeckFile) -> RunReport {
        let mut report = RunReport::default();

        for (kind, group) in groups(decks) {
            for deck in &group.decks {
                for word in &deck.words {
                    if let Err(e) = self.process_word(kind, &deck.name, word, &mut report) {
                        eprintln!("skipping '{}' in deck '{}': {}", word, deck.name, e);
                        report.failures.push(WordFailure {
                            kind,
                            deck: deck.name.clone(),
                            word: word.clone(),
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        report
    }

    fn process_word(
        &self,
        kind: DeckKind,
        deck_name: &str,
        word: &str,
        report: &mut RunReport,
    ) -> Result<(), LexankiError> {
        match kind {
            DeckKind::Phrase => {
                self.submit(&self.builder.phrase_notes(deck_name, word), report);
            }
            DeckKind::Definition => {
                let entries = self.definitions.define(word)?;
                for entry in &entries {
                    let (bytes, suggested) = self.media.fetch(&entry.audio_url)?;
                    let audio = MediaAsset::new(&suggested, bytes);

                    if let Err(e) = self.sink.store_media(&audio.filename, &audio.bytes) {
                        eprintln!("media store failed ({}): {}", audio.filename, e);
                    } else {
                        println!("stored media: {}", audio.filename);
                    }

                    self.submit(&self.builder.definition_notes(deck_name, entry, &audio), report);
                }
            }
            DeckKind::Verb => {
                let table = self.conjugations.conjugate(word)?;
                self.submit(&self.builder.verb_notes(deck_name, word, &table), report);
            }
        }

        Ok(())
    }

    fn submit(&self, notes: &[Note], report: &mut RunReport) {
        for note in notes {
            match self.sink.add_note(note) {
                Ok(()) => report.submitted += 1,
                Err(e) => {
                    eprintln!("note rejected ({}): {}", note.model_name, e);
                    report.rejected += 1;
                }
            }
        }
    }
}

fn groups(decks: &DeckFile) -> [(DeckKind, &DecksContainer); 3] {
    [
        (DeckKind::Phrase, &decks.phrases),
        (DeckKind::Definition, &decks.definition),
        (DeckKind::Verb, &decks.verbs),
    ]
}
