pub mod api;
pub mod notes;

pub use api::AnkiClient;
pub use notes::NoteBuilder;
