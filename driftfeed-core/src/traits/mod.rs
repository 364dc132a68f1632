//! Storage abstraction traits

mod file_store;

pub use file_store::FileStore;
