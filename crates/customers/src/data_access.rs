//! Data-access port: CRUD primitives against the durable customer store.
//!
//! The port knows nothing about validation or lifecycle. It stores and loads
//! plain records keyed by store-assigned integer identifiers.

use std::sync::Arc;

use thiserror::Error;

use rolodex_core::{AddressId, CustomerId};

use crate::record::{AddressRecord, CustomerRecord};

/// Store operation error.
///
/// These are **infrastructure errors** as opposed to domain errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DataAccessError {
    /// Update or delete targeted a row that does not exist.
    #[error("record not found: {0}")]
    NotFound(String),

    /// A storage constraint rejected the write (foreign key, not-null, ...).
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// The store could not be reached (closed pool, missing runtime, IO).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Any other backend failure.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Synchronous customer/address store.
///
/// Implementations must:
/// - assign previously-unused positive identifiers on insert
/// - return `Ok(None)` (not an error) when a lookup finds nothing
/// - return customers from `get_all_customers` ordered by last name, then first name
pub trait CustomerDataAccess: Send + Sync {
    fn insert_customer(&self, customer: &CustomerRecord) -> Result<CustomerId, DataAccessError>;
    fn update_customer(&self, customer: &CustomerRecord) -> Result<(), DataAccessError>;
    fn delete_customer(&self, id: CustomerId) -> Result<(), DataAccessError>;
    fn get_customer(&self, id: CustomerId) -> Result<Option<CustomerRecord>, DataAccessError>;
    fn get_all_customers(&self) -> Result<Vec<CustomerRecord>, DataAccessError>;

    fn insert_address(&self, address: &AddressRecord) -> Result<AddressId, DataAccessError>;
    fn update_address(&self, address: &AddressRecord) -> Result<(), DataAccessError>;
    fn delete_address(&self, id: AddressId) -> Result<(), DataAccessError>;
    fn get_address_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<AddressRecord>, DataAccessError>;
}

impl<S> CustomerDataAccess for Arc<S>
where
    S: CustomerDataAccess + ?Sized,
{
    fn insert_customer(&self, customer: &CustomerRecord) -> Result<CustomerId, DataAccessError> {
        (**self).insert_customer(customer)
    }

    fn update_customer(&self, customer: &CustomerRecord) -> Result<(), DataAccessError> {
        (**self).update_customer(customer)
    }

    fn delete_customer(&self, id: CustomerId) -> Result<(), DataAccessError> {
        (**self).delete_customer(id)
    }

    fn get_customer(&self, id: CustomerId) -> Result<Option<CustomerRecord>, DataAccessError> {
        (**self).get_customer(id)
    }

    fn get_all_customers(&self) -> Result<Vec<CustomerRecord>, DataAccessError> {
        (**self).get_all_customers()
    }

    fn insert_address(&self, address: &AddressRecord) -> Result<AddressId, DataAccessError> {
        (**self).insert_address(address)
    }

    fn update_address(&self, address: &AddressRecord) -> Result<(), DataAccessError> {
        (**self).update_address(address)
    }

    fn delete_address(&self, id: AddressId) -> Result<(), DataAccessError> {
        (**self).delete_address(id)
    }

    fn get_address_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<AddressRecord>, DataAccessError> {
        (**self).get_address_by_customer(customer_id)
    }
}
