//! Service layer owning the hospital collection.
//! - `storage` holds the generic file-backed collection store and its locking discipline.
//! - `hospital` holds the domain types and the repository abstraction.
//! - `file` holds the JSON-file implementation of that repository.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod hospital;
pub mod file;
