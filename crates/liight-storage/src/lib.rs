//! Liight Storage Library
//!
//! Storage abstraction for uploaded project files, the local filesystem
//! backend, and the staged-upload handle that guarantees a file written during
//! a failed request does not outlive it.
//!
//! # Storage key format
//!
//! Keys are flat file names of the form `<millis>-<32 hex chars><ext>`. Keys
//! must not contain path separators or `..`. Key generation lives in the
//! `keys` module.

pub mod keys;
pub mod local;
pub mod staged;
pub mod traits;

// Re-export commonly used types
pub use keys::generate_upload_key;
pub use local::LocalStorage;
pub use staged::StagedUpload;
pub use traits::{Storage, StorageError, StorageResult, StorageWriter};
