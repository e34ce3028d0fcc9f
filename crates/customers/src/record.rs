//! Plain storage records exchanged with the data-access port.
//!
//! Records carry no behaviour; the repository maps them to and from entities.

use serde::{Deserialize, Serialize};

use rolodex_core::{AddressId, CustomerId};

/// Row shape of a stored customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: CustomerId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
}

/// Row shape of a stored address.
///
/// `customer_id` is the storage join back to the owning customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub id: AddressId,
    pub customer_id: CustomerId,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}
