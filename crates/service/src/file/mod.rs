//! File-backed implementations of the service repositories.

pub mod hospital_store;
