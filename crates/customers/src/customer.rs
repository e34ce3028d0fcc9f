use std::sync::Arc;

use tracing::{debug, error, warn};

use rolodex_core::{AddressId, CustomerId, DomainError, DomainResult, Entity};

use crate::address::Address;
use crate::data_access::CustomerDataAccess;
use crate::error::CustomerError;
use crate::record::CustomerRecord;

/// What a successful save did to the store.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The customer was transient and now has a store-assigned id.
    Inserted,
    /// The customer already existed and its rows were updated.
    Updated,
}

/// Customer entity.
///
/// Lifecycle:
///
/// ```text
/// [transient, id=0] --save--> [persisted, id=N] --save--> [persisted, id=N]
/// [persisted, id=N] --delete--> [transient, id=0]
/// ```
///
/// Customers are created by [`CustomerRepository`](crate::CustomerRepository)
/// and keep a handle to the store they came from, so `save`/`delete` need no
/// further wiring.
///
/// Not `Clone`: two copies of one stored customer would each insert their own
/// address row.
///
/// ```compile_fail
/// fn needs_clone<T: Clone>() {}
/// needs_clone::<rolodex_customers::Customer>();
/// ```
pub struct Customer {
    id: CustomerId,
    first_name: Option<String>,
    last_name: Option<String>,
    company_name: Option<String>,
    address: Address,
    data_access: Arc<dyn CustomerDataAccess>,
}

impl core::fmt::Debug for Customer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Customer")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("company_name", &self.company_name)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl Customer {
    pub(crate) fn new(data_access: Arc<dyn CustomerDataAccess>) -> Self {
        Self {
            id: CustomerId::TRANSIENT,
            first_name: None,
            last_name: None,
            company_name: None,
            address: Address::new(),
            data_access,
        }
    }

    pub(crate) fn from_parts(
        record: CustomerRecord,
        address: Address,
        data_access: Arc<dyn CustomerDataAccess>,
    ) -> Self {
        Self {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            company_name: record.company_name,
            address,
            data_access,
        }
    }

    pub fn to_record(&self) -> CustomerRecord {
        CustomerRecord {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            company_name: self.company_name.clone(),
        }
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn company_name(&self) -> Option<&str> {
        self.company_name.as_deref()
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Mutable access to the owned address (identity fields stay private).
    pub fn address_mut(&mut self) -> &mut Address {
        &mut self.address
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) {
        self.first_name = Some(first_name.into());
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) {
        self.last_name = Some(last_name.into());
    }

    pub fn set_company_name(&mut self, company_name: impl Into<String>) {
        self.company_name = Some(company_name.into());
    }

    /// Copy the postal fields of `address` into the owned address.
    ///
    /// The owned address keeps its own identity; `address` is not retained.
    pub fn set_address(&mut self, address: &Address) {
        self.address.copy_fields_from(address);
    }

    /// `true` iff last name and company name are both non-blank.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Validation rule behind [`is_valid`](Self::is_valid), naming what is missing.
    pub fn validate(&self) -> DomainResult<()> {
        let missing: Vec<&str> = [
            ("last name", &self.last_name),
            ("company name", &self.company_name),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(format!(
                "customer requires {}",
                missing.join(" and ")
            )))
        }
    }

    /// Persist the customer, reporting failures as `false`.
    ///
    /// Invalid customers never reach the store. See [`try_save`](Self::try_save)
    /// for the detailed outcome.
    pub fn save(&mut self) -> bool {
        match self.try_save() {
            Ok(outcome) => {
                debug!(customer_id = %self.id, ?outcome, "customer saved");
                true
            }
            Err(e) if e.is_validation() => {
                warn!(customer_id = %self.id, "customer not saved: {e}");
                false
            }
            Err(e) => {
                error!(customer_id = %self.id, "customer save failed: {e}");
                false
            }
        }
    }

    /// Persist the customer and its address.
    ///
    /// Transient customers are inserted (customer row first, then the address
    /// if it has any content). Persisted customers are updated, and their
    /// address is inserted or updated depending on whether it has an id.
    pub fn try_save(&mut self) -> Result<SaveOutcome, CustomerError> {
        self.validate()?;

        if self.id.is_transient() {
            self.insert()?;
            Ok(SaveOutcome::Inserted)
        } else {
            self.update()?;
            Ok(SaveOutcome::Updated)
        }
    }

    fn insert(&mut self) -> Result<(), CustomerError> {
        let id = self.data_access.insert_customer(&self.to_record())?;
        if !id.is_persisted() {
            return Err(DomainError::invariant(format!(
                "store assigned non-positive customer id {id}"
            ))
            .into());
        }
        self.id = id;
        self.address.customer_id = id;

        if self.address.is_empty() {
            return Ok(());
        }

        match self.data_access.insert_address(&self.address.to_record()) {
            Ok(address_id) => {
                self.address.id = address_id;
                Ok(())
            }
            Err(source) => match self.data_access.delete_customer(id) {
                Ok(()) => {
                    self.id = CustomerId::TRANSIENT;
                    self.address.customer_id = CustomerId::TRANSIENT;
                    Err(CustomerError::Store(source))
                }
                Err(rollback) => Err(CustomerError::PartialSave {
                    customer_id: id,
                    source,
                    rollback,
                }),
            },
        }
    }

    fn update(&mut self) -> Result<(), CustomerError> {
        self.data_access.update_customer(&self.to_record())?;

        self.address.customer_id = self.id;
        if self.address.id.is_transient() {
            self.address.id = self.data_access.insert_address(&self.address.to_record())?;
        } else {
            self.data_access.update_address(&self.address.to_record())?;
        }
        Ok(())
    }

    /// Remove the customer from the store, reporting failures as `false`.
    ///
    /// A transient customer returns `false` without touching the store.
    pub fn delete(&mut self) -> bool {
        match self.try_delete() {
            Ok(()) => true,
            Err(CustomerError::NotPersisted) => {
                debug!("delete requested for unsaved customer");
                false
            }
            Err(e) => {
                error!(customer_id = %self.id, "customer delete failed: {e}");
                false
            }
        }
    }

    /// Delete the address row (if stored), then the customer row, then reset
    /// identity so the entity can be saved afresh.
    pub fn try_delete(&mut self) -> Result<(), CustomerError> {
        if self.id.is_transient() {
            return Err(CustomerError::NotPersisted);
        }

        if self.address.id.is_persisted() {
            self.data_access.delete_address(self.address.id)?;
            self.address.id = AddressId::TRANSIENT;
        }

        self.data_access.delete_customer(self.id)?;
        self.id = CustomerId::TRANSIENT;
        self.address.customer_id = CustomerId::TRANSIENT;
        Ok(())
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(|s| s.trim().is_empty()).unwrap_or(true)
}
