//! Recording in-memory store used by this crate's unit tests.

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use rolodex_core::{AddressId, CustomerId};

use crate::data_access::{CustomerDataAccess, DataAccessError};
use crate::record::{AddressRecord, CustomerRecord};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Op {
    InsertCustomer,
    UpdateCustomer,
    DeleteCustomer,
    GetCustomer,
    GetAllCustomers,
    InsertAddress,
    UpdateAddress,
    DeleteAddress,
    GetAddressByCustomer,
}

#[derive(Debug, Default)]
struct State {
    customers: BTreeMap<CustomerId, CustomerRecord>,
    addresses: BTreeMap<AddressId, AddressRecord>,
    last_customer_id: i64,
    last_address_id: i64,
    calls: Vec<Op>,
    failing: HashSet<Op>,
}

#[derive(Debug, Default)]
pub struct RecordingDataAccess {
    state: Mutex<State>,
}

impl RecordingDataAccess {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(&self, op: Op) {
        self.state.lock().unwrap().failing.insert(op);
    }

    pub fn calls(&self) -> Vec<Op> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn customers(&self) -> Vec<CustomerRecord> {
        self.state.lock().unwrap().customers.values().cloned().collect()
    }

    pub fn addresses(&self) -> Vec<AddressRecord> {
        self.state.lock().unwrap().addresses.values().cloned().collect()
    }

    /// Seed a customer (and optionally its address) without recording calls.
    pub fn seed(
        &self,
        first: &str,
        last: &str,
        company: &str,
        address: Option<(&str, &str, &str, &str)>,
    ) -> CustomerId {
        let mut state = self.state.lock().unwrap();
        state.last_customer_id += 1;
        let id = CustomerId::new(state.last_customer_id);
        state.customers.insert(
            id,
            CustomerRecord {
                id,
                first_name: Some(first.to_string()),
                last_name: Some(last.to_string()),
                company_name: Some(company.to_string()),
            },
        );
        if let Some((street, city, st, zip)) = address {
            state.last_address_id += 1;
            let address_id = AddressId::new(state.last_address_id);
            state.addresses.insert(
                address_id,
                AddressRecord {
                    id: address_id,
                    customer_id: id,
                    street: Some(street.to_string()),
                    city: Some(city.to_string()),
                    state: Some(st.to_string()),
                    zip: Some(zip.to_string()),
                },
            );
        }
        id
    }

    fn enter(&self, op: Op) -> Result<std::sync::MutexGuard<'_, State>, DataAccessError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(op);
        if state.failing.contains(&op) {
            return Err(DataAccessError::Backend(format!("injected failure: {op:?}")));
        }
        Ok(state)
    }
}

impl CustomerDataAccess for RecordingDataAccess {
    fn insert_customer(&self, customer: &CustomerRecord) -> Result<CustomerId, DataAccessError> {
        let mut state = self.enter(Op::InsertCustomer)?;
        state.last_customer_id += 1;
        let id = CustomerId::new(state.last_customer_id);
        state.customers.insert(id, CustomerRecord { id, ..customer.clone() });
        Ok(id)
    }

    fn update_customer(&self, customer: &CustomerRecord) -> Result<(), DataAccessError> {
        let mut state = self.enter(Op::UpdateCustomer)?;
        match state.customers.get_mut(&customer.id) {
            Some(row) => {
                *row = customer.clone();
                Ok(())
            }
            None => Err(DataAccessError::NotFound(format!("customer {}", customer.id))),
        }
    }

    fn delete_customer(&self, id: CustomerId) -> Result<(), DataAccessError> {
        let mut state = self.enter(Op::DeleteCustomer)?;
        if state.addresses.values().any(|a| a.customer_id == id) {
            return Err(DataAccessError::Constraint(format!("customer {id} still has an address")));
        }
        state
            .customers
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DataAccessError::NotFound(format!("customer {id}")))
    }

    fn get_customer(&self, id: CustomerId) -> Result<Option<CustomerRecord>, DataAccessError> {
        let state = self.enter(Op::GetCustomer)?;
        Ok(state.customers.get(&id).cloned())
    }

    fn get_all_customers(&self) -> Result<Vec<CustomerRecord>, DataAccessError> {
        let state = self.enter(Op::GetAllCustomers)?;
        let mut all: Vec<_> = state.customers.values().cloned().collect();
        all.sort_by(|a, b| (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name)));
        Ok(all)
    }

    fn insert_address(&self, address: &AddressRecord) -> Result<AddressId, DataAccessError> {
        let mut state = self.enter(Op::InsertAddress)?;
        if !state.customers.contains_key(&address.customer_id) {
            return Err(DataAccessError::Constraint(format!(
                "customer {} does not exist",
                address.customer_id
            )));
        }
        state.last_address_id += 1;
        let id = AddressId::new(state.last_address_id);
        state.addresses.insert(id, AddressRecord { id, ..address.clone() });
        Ok(id)
    }

    fn update_address(&self, address: &AddressRecord) -> Result<(), DataAccessError> {
        let mut state = self.enter(Op::UpdateAddress)?;
        match state.addresses.get_mut(&address.id) {
            Some(row) => {
                *row = address.clone();
                Ok(())
            }
            None => Err(DataAccessError::NotFound(format!("address {}", address.id))),
        }
    }

    fn delete_address(&self, id: AddressId) -> Result<(), DataAccessError> {
        let mut state = self.enter(Op::DeleteAddress)?;
        state
            .addresses
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DataAccessError::NotFound(format!("address {id}")))
    }

    fn get_address_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<AddressRecord>, DataAccessError> {
        let state = self.enter(Op::GetAddressByCustomer)?;
        Ok(state
            .addresses
            .values()
            .find(|a| a.customer_id == customer_id)
            .cloned())
    }
}
