//! Platform storage adapters

mod fs_store;
mod paths;

pub use fs_store::TokioFileStore;
pub use paths::default_data_dir;
