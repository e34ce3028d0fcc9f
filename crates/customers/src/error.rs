use thiserror::Error;

use rolodex_core::{CustomerId, DomainError};

use crate::data_access::DataAccessError;

/// Failure of a customer lifecycle operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CustomerError {
    /// The customer failed validation; the store was not touched.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Delete was requested for a customer that was never stored.
    #[error("customer has not been saved")]
    NotPersisted,

    /// The store rejected or failed an operation.
    #[error("store failure: {0}")]
    Store(#[from] DataAccessError),

    /// The customer row was inserted, the address insert failed, and removing
    /// the customer row again failed too. The row `customer_id` is still stored.
    #[error(
        "customer {customer_id} was stored without its address ({source}); \
         rollback failed: {rollback}"
    )]
    PartialSave {
        customer_id: CustomerId,
        source: DataAccessError,
        rollback: DataAccessError,
    },
}

impl CustomerError {
    /// `true` for expected business outcomes (as opposed to store faults).
    pub fn is_validation(&self) -> bool {
        matches!(self, CustomerError::Domain(DomainError::Validation(_)))
    }
}
