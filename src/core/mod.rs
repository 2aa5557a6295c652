pub mod cloze;
pub mod errors;
pub mod http;
pub mod media;
pub mod models;
pub mod pipeline;

pub use errors::LexankiError;
pub use models::{ Deck, DeckFile, DeckKind, DefinitionEntry, Note };
