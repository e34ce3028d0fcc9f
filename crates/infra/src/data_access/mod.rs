//! Concrete implementations of the customer data-access port.

mod in_memory;
mod sqlite;

pub use in_memory::InMemoryCustomerDataAccess;
pub use sqlite::SqliteCustomerDataAccess;
