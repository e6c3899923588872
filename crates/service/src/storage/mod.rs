//! Storage abstractions for service layer
//!
//! Contains the reusable file-backed collection store. Every access to the
//! data file goes through its lock.

pub mod json_vec_store;

pub use json_vec_store::JsonVecStore;
