//! Storage abstraction for versioned documentation trees.
//!
//! This crate provides a [`Storage`] trait for abstracting how raw Markdown
//! sources are located and read. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Backend flexibility** (filesystem today, object stores later)
//! - **Clean separation** between the rendering pipeline and I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `read()` and `exists()` methods
//! - [`FsStorage`] implementation rooted at a documentation directory
//! - [`MockStorage`] for testing (behind `mock` feature flag)

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind};
