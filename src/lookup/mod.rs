pub mod larousse;

pub use larousse::LarousseClient;
