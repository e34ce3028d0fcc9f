//! Customers domain module (customer records with an owned postal address).
//!
//! This crate contains the entity lifecycle (validation, identity assignment,
//! cascade to the owned address) and the repository that maps store records
//! to entities. Storage itself is reached only through [`CustomerDataAccess`].

pub mod address;
pub mod customer;
pub mod data_access;
pub mod error;
pub mod record;
pub mod repository;

#[cfg(test)]
mod testing;

pub use address::Address;
pub use customer::{Customer, SaveOutcome};
pub use data_access::{CustomerDataAccess, DataAccessError};
pub use error::CustomerError;
pub use record::{AddressRecord, CustomerRecord};
pub use repository::CustomerRepository;
