//! Infrastructure layer: store adapters, store configuration and the
//! repository factory.

pub mod config;
pub mod data_access;
pub mod factory;

mod integration_tests;

pub use config::{ConfigError, StoreBackend, StoreConfig};
pub use data_access::{InMemoryCustomerDataAccess, SqliteCustomerDataAccess};
pub use factory::{CustomerFactory, FactoryError};
