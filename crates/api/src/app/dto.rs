use serde::Deserialize;
use serde_json::{json, Value};

use rolodex_core::Entity;
use rolodex_customers::{Address, Customer};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub address: Option<AddressRequest>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AddressRequest {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

impl AddressRequest {
    pub fn to_address(&self) -> Address {
        Address::with_fields(
            self.street.as_deref(),
            self.city.as_deref(),
            self.state.as_deref(),
            self.zip.as_deref(),
        )
    }
}

impl CustomerRequest {
    /// Overwrite the customer's fields with the request's.
    ///
    /// Missing name fields become blank. The address is replaced only when the
    /// request carries one.
    pub fn apply_to(&self, customer: &mut Customer) {
        customer.set_first_name(self.first_name.clone().unwrap_or_default());
        customer.set_last_name(self.last_name.clone().unwrap_or_default());
        customer.set_company_name(self.company_name.clone().unwrap_or_default());
        if let Some(address) = &self.address {
            customer.set_address(&address.to_address());
        }
    }
}

// -------------------------
// Response mapping
// -------------------------

pub fn customer_to_json(customer: &Customer) -> Value {
    let address = customer.address();
    json!({
        "id": customer.id(),
        "firstName": customer.first_name().unwrap_or_default(),
        "lastName": customer.last_name().unwrap_or_default(),
        "companyName": customer.company_name().unwrap_or_default(),
        "address": {
            "street": address.street().unwrap_or_default(),
            "city": address.city().unwrap_or_default(),
            "state": address.state().unwrap_or_default(),
            "zip": address.zip().unwrap_or_default(),
            "addressBlock": address.address_block(),
        },
    })
}
