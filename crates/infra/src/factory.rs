use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::info;

use rolodex_customers::{CustomerDataAccess, CustomerRepository, DataAccessError};

use crate::config::{ConfigError, StoreBackend, StoreConfig};
use crate::data_access::{InMemoryCustomerDataAccess, SqliteCustomerDataAccess};

#[derive(Debug, Error)]
pub enum FactoryError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to open customer store: {0}")]
    Store(#[from] DataAccessError),

    #[error("customer factory lock poisoned")]
    Poisoned,
}

/// Builds the customer repository for the configured store.
///
/// The store is opened on the first [`CustomerFactory::create_repository`]
/// call; every later call returns a repository sharing that same store. If
/// opening fails nothing is bound and the next call tries again.
#[derive(Debug)]
pub struct CustomerFactory {
    config: Option<StoreConfig>,
    repository: Mutex<Option<CustomerRepository>>,
}

impl CustomerFactory {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config: Some(config),
            repository: Mutex::new(None),
        }
    }

    pub fn from_env() -> Result<Self, FactoryError> {
        Ok(Self::new(StoreConfig::from_env()?))
    }

    /// Bind an already-constructed store (tests, embedding).
    pub fn with_data_access(data_access: Arc<dyn CustomerDataAccess>) -> Self {
        Self {
            config: None,
            repository: Mutex::new(Some(CustomerRepository::new(data_access))),
        }
    }

    pub fn create_repository(&self) -> Result<CustomerRepository, FactoryError> {
        let mut bound = self.repository.lock().map_err(|_| FactoryError::Poisoned)?;
        if let Some(repository) = bound.as_ref() {
            return Ok(repository.clone());
        }

        let config = self.config.clone().unwrap_or_default();
        let data_access: Arc<dyn CustomerDataAccess> = match &config.backend {
            StoreBackend::InMemory => {
                info!(backend = "memory", "binding customer store");
                Arc::new(InMemoryCustomerDataAccess::new())
            }
            StoreBackend::Sqlite { url } => {
                info!(backend = "sqlite", url = %url, "binding customer store");
                Arc::new(SqliteCustomerDataAccess::connect(url)?)
            }
        };

        let repository = CustomerRepository::new(data_access);
        *bound = Some(repository.clone());
        Ok(repository)
    }
}
