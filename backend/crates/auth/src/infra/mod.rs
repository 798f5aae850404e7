//! Infrastructure Layer
//!
//! Storage implementations.

pub mod file_store;

pub use file_store::FileAuthRepository;
