pub mod local;
pub mod store;

pub use local::LocalFileStore;
pub use store::{FileMeta, FileName, FileStore, StorageError, StorageResult};
