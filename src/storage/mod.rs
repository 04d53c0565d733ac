pub mod file;
pub mod keys;
pub mod store;

pub use file::FileStore;
pub use store::{MemoryStore, StateStore};
