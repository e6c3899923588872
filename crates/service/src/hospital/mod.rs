//! Hospital records: domain types and the repository abstraction the HTTP layer talks to.

pub mod domain;
pub mod repository;

pub use domain::{Hospital, HospitalId, HospitalInput};
pub use repository::HospitalRepository;
