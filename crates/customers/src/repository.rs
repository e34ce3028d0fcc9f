use std::sync::Arc;

use tracing::{error, instrument};

use rolodex_core::CustomerId;

use crate::address::Address;
use crate::customer::Customer;
use crate::data_access::CustomerDataAccess;
use crate::error::CustomerError;
use crate::record::CustomerRecord;

/// Entry point for loading and creating customers.
///
/// Maps store records to [`Customer`] entities and hands every entity the
/// same store handle, so later `save`/`delete` calls go back to that store.
/// Cloning is cheap and shares the store.
#[derive(Clone)]
pub struct CustomerRepository {
    data_access: Arc<dyn CustomerDataAccess>,
}

impl core::fmt::Debug for CustomerRepository {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CustomerRepository").finish_non_exhaustive()
    }
}

impl CustomerRepository {
    pub fn new(data_access: Arc<dyn CustomerDataAccess>) -> Self {
        Self { data_access }
    }

    /// Fresh transient customer with blank fields and an empty address.
    pub fn get_new_customer(&self) -> Customer {
        Customer::new(self.data_access.clone())
    }

    /// Load a customer and its address; `None` when no such customer exists.
    ///
    /// Store failures are logged and reported as `None`.
    pub fn get_customer_by_id(&self, id: CustomerId) -> Option<Customer> {
        self.try_get_customer_by_id(id).unwrap_or_else(|e| {
            error!(customer_id = %id, "customer lookup failed: {e}");
            None
        })
    }

    #[instrument(skip(self), fields(customer_id = %id), err)]
    pub fn try_get_customer_by_id(
        &self,
        id: CustomerId,
    ) -> Result<Option<Customer>, CustomerError> {
        if !id.is_persisted() {
            return Ok(None);
        }

        match self.data_access.get_customer(id)? {
            Some(record) => self.hydrate(record).map(Some),
            None => Ok(None),
        }
    }

    /// All customers ordered by last name, then first name.
    ///
    /// Store failures are logged and reported as an empty list.
    pub fn get_list(&self) -> Vec<Customer> {
        self.try_get_list().unwrap_or_else(|e| {
            error!("customer listing failed: {e}");
            Vec::new()
        })
    }

    #[instrument(skip(self), err)]
    pub fn try_get_list(&self) -> Result<Vec<Customer>, CustomerError> {
        self.data_access
            .get_all_customers()?
            .into_iter()
            .map(|record| self.hydrate(record))
            .collect()
    }

    /// Compose an entity from its customer row and (optional) address row.
    fn hydrate(&self, record: CustomerRecord) -> Result<Customer, CustomerError> {
        let address = match self.data_access.get_address_by_customer(record.id)? {
            Some(address) => Address::from_record(address),
            None => {
                let mut empty = Address::new();
                empty.customer_id = record.id;
                empty
            }
        };
        Ok(Customer::from_parts(record, address, self.data_access.clone()))
    }
}
