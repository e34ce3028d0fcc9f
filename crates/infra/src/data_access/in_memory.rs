use std::collections::BTreeMap;
use std::sync::RwLock;

use tracing::debug;

use rolodex_core::{AddressId, CustomerId};
use rolodex_customers::{AddressRecord, CustomerDataAccess, CustomerRecord, DataAccessError};

#[derive(Debug, Default)]
struct Tables {
    customers: BTreeMap<CustomerId, CustomerRecord>,
    addresses: BTreeMap<AddressId, AddressRecord>,
    last_customer_id: i64,
    last_address_id: i64,
}

/// In-memory customer store.
///
/// Intended for tests/dev. Behaves like the relational store where it
/// matters to callers: ids start at 1 and are never reused, an address must
/// reference an existing customer, and a customer cannot be deleted while an
/// address still points at it.
#[derive(Debug, Default)]
pub struct InMemoryCustomerDataAccess {
    tables: RwLock<Tables>,
}

impl InMemoryCustomerDataAccess {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>, DataAccessError> {
        self.tables
            .read()
            .map_err(|_| DataAccessError::Unavailable("lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Tables>, DataAccessError> {
        self.tables
            .write()
            .map_err(|_| DataAccessError::Unavailable("lock poisoned".to_string()))
    }
}

fn require_customer(tables: &Tables, id: CustomerId) -> Result<(), DataAccessError> {
    if tables.customers.contains_key(&id) {
        Ok(())
    } else {
        Err(DataAccessError::Constraint(format!(
            "address references missing customer {id}"
        )))
    }
}

impl CustomerDataAccess for InMemoryCustomerDataAccess {
    fn insert_customer(&self, customer: &CustomerRecord) -> Result<CustomerId, DataAccessError> {
        let mut tables = self.write()?;
        tables.last_customer_id += 1;
        let id = CustomerId::new(tables.last_customer_id);
        tables.customers.insert(
            id,
            CustomerRecord {
                id,
                ..customer.clone()
            },
        );
        debug!(customer_id = %id, "inserted customer");
        Ok(id)
    }

    fn update_customer(&self, customer: &CustomerRecord) -> Result<(), DataAccessError> {
        let mut tables = self.write()?;
        let row = tables
            .customers
            .get_mut(&customer.id)
            .ok_or_else(|| DataAccessError::NotFound(format!("customer {}", customer.id)))?;
        *row = customer.clone();
        debug!(customer_id = %customer.id, "updated customer");
        Ok(())
    }

    fn delete_customer(&self, id: CustomerId) -> Result<(), DataAccessError> {
        let mut tables = self.write()?;
        if tables.addresses.values().any(|a| a.customer_id == id) {
            return Err(DataAccessError::Constraint(format!(
                "customer {id} is still referenced by an address"
            )));
        }
        tables
            .customers
            .remove(&id)
            .ok_or_else(|| DataAccessError::NotFound(format!("customer {id}")))?;
        debug!(customer_id = %id, "deleted customer");
        Ok(())
    }

    fn get_customer(&self, id: CustomerId) -> Result<Option<CustomerRecord>, DataAccessError> {
        Ok(self.read()?.customers.get(&id).cloned())
    }

    fn get_all_customers(&self) -> Result<Vec<CustomerRecord>, DataAccessError> {
        let mut all: Vec<CustomerRecord> = self.read()?.customers.values().cloned().collect();
        all.sort_by(|a, b| {
            (&a.last_name, &a.first_name, a.id).cmp(&(&b.last_name, &b.first_name, b.id))
        });
        Ok(all)
    }

    fn insert_address(&self, address: &AddressRecord) -> Result<AddressId, DataAccessError> {
        let mut tables = self.write()?;
        require_customer(&tables, address.customer_id)?;
        tables.last_address_id += 1;
        let id = AddressId::new(tables.last_address_id);
        tables.addresses.insert(
            id,
            AddressRecord {
                id,
                ..address.clone()
            },
        );
        debug!(address_id = %id, customer_id = %address.customer_id, "inserted address");
        Ok(id)
    }

    fn update_address(&self, address: &AddressRecord) -> Result<(), DataAccessError> {
        let mut tables = self.write()?;
        require_customer(&tables, address.customer_id)?;
        let row = tables
            .addresses
            .get_mut(&address.id)
            .ok_or_else(|| DataAccessError::NotFound(format!("address {}", address.id)))?;
        *row = address.clone();
        debug!(address_id = %address.id, "updated address");
        Ok(())
    }

    fn delete_address(&self, id: AddressId) -> Result<(), DataAccessError> {
        let mut tables = self.write()?;
        tables
            .addresses
            .remove(&id)
            .ok_or_else(|| DataAccessError::NotFound(format!("address {id}")))?;
        debug!(address_id = %id, "deleted address");
        Ok(())
    }

    fn get_address_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<AddressRecord>, DataAccessError> {
        Ok(self
            .read()?
            .addresses
            .values()
            .find(|a| a.customer_id == customer_id)
            .cloned())
    }
}
