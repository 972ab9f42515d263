//! Durable key-value storage port.
//!
//! The scorer and the theme store persist through this seam instead of
//! touching a concrete backend, so tests run against [`MemoryStore`] and a
//! native host can swap in [`JsonFileStore`] (or its own origin storage).

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::errors::StorageError;

/// Key holding the last computed completion score, as decimal text.
pub const COMPLETION_KEY: &str = "profileCompletion";

/// Key holding the theme tag, one of `"dark"` / `"light"`.
pub const THEME_KEY: &str = "theme";

/// Origin-scoped durable key-value storage with textual keys and values.
///
/// This crate is the sole writer of its keys. `set` must be atomic with
/// respect to concurrent `get`s: a reader observes either the old or the
/// new value, never a partial write.
pub trait StoragePort: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
