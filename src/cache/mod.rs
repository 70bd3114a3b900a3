pub mod content_hash;
pub mod store;

pub use content_hash::{ContentHash, content_hash};
pub use store::{CacheStats, FingerprintCache};
