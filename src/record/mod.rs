pub mod builder;

pub use builder::{DocumentRecord, word_count};
