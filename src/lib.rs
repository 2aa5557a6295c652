pub mod anki;
pub mod core;
pub mod lookup;

pub use crate::core::LexankiError;
