//! SQLite-backed customer store.
//!
//! sqlx is async, the [`CustomerDataAccess`] port is not. The adapter owns a
//! small current-thread runtime and blocks on it for every call.
//!
//! Calling it from an async task panics (tokio refuses to block a worker
//! thread). Async callers go through `spawn_blocking`.

use std::future::Future;
use std::str::FromStr;

use sqlx::error::ErrorKind;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, instrument};

use rolodex_core::{AddressId, CustomerId};
use rolodex_customers::{AddressRecord, CustomerDataAccess, CustomerRecord, DataAccessError};

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS customer (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT,
        last_name TEXT NOT NULL,
        company_name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS address (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        customer_id INTEGER NOT NULL REFERENCES customer(id),
        street TEXT,
        city TEXT,
        state TEXT,
        zip TEXT
    )",
    "CREATE INDEX IF NOT EXISTS idx_address_customer_id ON address(customer_id)",
];

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    first_name: Option<String>,
    last_name: Option<String>,
    company_name: Option<String>,
}

impl From<CustomerRow> for CustomerRecord {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: CustomerId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            company_name: row.company_name,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AddressRow {
    id: i64,
    customer_id: i64,
    street: Option<String>,
    city: Option<String>,
    state: Option<String>,
    zip: Option<String>,
}

impl From<AddressRow> for AddressRecord {
    fn from(row: AddressRow) -> Self {
        Self {
            id: AddressId::new(row.id),
            customer_id: CustomerId::new(row.customer_id),
            street: row.street,
            city: row.city,
            state: row.state,
            zip: row.zip,
        }
    }
}

/// Customer store on a SQLite database.
///
/// Tables are created on connect if missing. Foreign keys are enforced, so an
/// address row must point at an existing customer and a customer cannot be
/// removed while its address remains.
#[derive(Debug)]
pub struct SqliteCustomerDataAccess {
    pool: SqlitePool,
    runtime: Option<Runtime>,
}

impl SqliteCustomerDataAccess {
    /// Open (or create) the database at `url` and ensure the schema exists.
    ///
    /// Accepts any sqlx SQLite URL, including `sqlite::memory:`.
    pub fn connect(url: &str) -> Result<Self, DataAccessError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| DataAccessError::Unavailable(format!("failed to start runtime: {e}")))?;

        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| map_sqlx_error("connect", e))?
            .create_if_missing(true)
            .foreign_keys(true);

        // One long-lived connection: an in-memory database lives only as long
        // as its connection.
        let pool = runtime
            .block_on(
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(options),
            )
            .map_err(|e| map_sqlx_error("connect", e))?;

        let store = Self {
            pool,
            runtime: Some(runtime),
        };
        store.run(store.migrate())?;
        debug!(url, "sqlite customer store ready");
        Ok(store)
    }

    fn run<T, F>(&self, fut: F) -> Result<T, DataAccessError>
    where
        F: Future<Output = Result<T, DataAccessError>>,
    {
        match &self.runtime {
            Some(runtime) => runtime.block_on(fut),
            None => Err(DataAccessError::Unavailable("runtime shut down".to_string())),
        }
    }

    async fn migrate(&self) -> Result<(), DataAccessError> {
        for statement in SCHEMA {
            sqlx::query(*statement)
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("migrate", e))?;
        }
        Ok(())
    }

    #[instrument(skip(self, customer), err)]
    pub async fn insert_customer_async(
        &self,
        customer: &CustomerRecord,
    ) -> Result<CustomerId, DataAccessError> {
        let result = sqlx::query(
            "INSERT INTO customer (first_name, last_name, company_name) VALUES (?, ?, ?)",
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.company_name)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_customer", e))?;

        Ok(CustomerId::new(result.last_insert_rowid()))
    }

    #[instrument(skip(self, customer), fields(customer_id = %customer.id), err)]
    pub async fn update_customer_async(
        &self,
        customer: &CustomerRecord,
    ) -> Result<(), DataAccessError> {
        let result = sqlx::query(
            "UPDATE customer SET first_name = ?, last_name = ?, company_name = ? WHERE id = ?",
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.company_name)
        .bind(customer.id.get())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_customer", e))?;

        if result.rows_affected() == 0 {
            return Err(DataAccessError::NotFound(format!("customer {}", customer.id)));
        }
        Ok(())
    }

    #[instrument(skip(self), fields(customer_id = %id), err)]
    pub async fn delete_customer_async(&self, id: CustomerId) -> Result<(), DataAccessError> {
        let result = sqlx::query("DELETE FROM customer WHERE id = ?")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_customer", e))?;

        if result.rows_affected() == 0 {
            return Err(DataAccessError::NotFound(format!("customer {id}")));
        }
        Ok(())
    }

    pub async fn get_customer_async(
        &self,
        id: CustomerId,
    ) -> Result<Option<CustomerRecord>, DataAccessError> {
        let row: Option<CustomerRow> = sqlx::query_as(
            "SELECT id, first_name, last_name, company_name FROM customer WHERE id = ?",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_customer", e))?;

        Ok(row.map(Into::into))
    }

    pub async fn get_all_customers_async(&self) -> Result<Vec<CustomerRecord>, DataAccessError> {
        let rows: Vec<CustomerRow> = sqlx::query_as(
            "SELECT id, first_name, last_name, company_name FROM customer
             ORDER BY last_name, first_name, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_all_customers", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, address), fields(customer_id = %address.customer_id), err)]
    pub async fn insert_address_async(
        &self,
        address: &AddressRecord,
    ) -> Result<AddressId, DataAccessError> {
        let result = sqlx::query(
            "INSERT INTO address (customer_id, street, city, state, zip) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(address.customer_id.get())
        .bind(&address.street)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.zip)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_address", e))?;

        Ok(AddressId::new(result.last_insert_rowid()))
    }

    #[instrument(skip(self, address), fields(address_id = %address.id), err)]
    pub async fn update_address_async(
        &self,
        address: &AddressRecord,
    ) -> Result<(), DataAccessError> {
        let result = sqlx::query(
            "UPDATE address SET customer_id = ?, street = ?, city = ?, state = ?, zip = ?
             WHERE id = ?",
        )
        .bind(address.customer_id.get())
        .bind(&address.street)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.zip)
        .bind(address.id.get())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_address", e))?;

        if result.rows_affected() == 0 {
            return Err(DataAccessError::NotFound(format!("address {}", address.id)));
        }
        Ok(())
    }

    #[instrument(skip(self), fields(address_id = %id), err)]
    pub async fn delete_address_async(&self, id: AddressId) -> Result<(), DataAccessError> {
        let result = sqlx::query("DELETE FROM address WHERE id = ?")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_address", e))?;

        if result.rows_affected() == 0 {
            return Err(DataAccessError::NotFound(format!("address {id}")));
        }
        Ok(())
    }

    pub async fn get_address_by_customer_async(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<AddressRecord>, DataAccessError> {
        let row: Option<AddressRow> = sqlx::query_as(
            "SELECT id, customer_id, street, city, state, zip FROM address
             WHERE customer_id = ? ORDER BY id LIMIT 1",
        )
        .bind(customer_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_address_by_customer", e))?;

        Ok(row.map(Into::into))
    }
}

impl Drop for SqliteCustomerDataAccess {
    fn drop(&mut self) {
        // Dropping a runtime from async context panics.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

impl CustomerDataAccess for SqliteCustomerDataAccess {
    fn insert_customer(&self, customer: &CustomerRecord) -> Result<CustomerId, DataAccessError> {
        self.run(self.insert_customer_async(customer))
    }

    fn update_customer(&self, customer: &CustomerRecord) -> Result<(), DataAccessError> {
        self.run(self.update_customer_async(customer))
    }

    fn delete_customer(&self, id: CustomerId) -> Result<(), DataAccessError> {
        self.run(self.delete_customer_async(id))
    }

    fn get_customer(&self, id: CustomerId) -> Result<Option<CustomerRecord>, DataAccessError> {
        self.run(self.get_customer_async(id))
    }

    fn get_all_customers(&self) -> Result<Vec<CustomerRecord>, DataAccessError> {
        self.run(self.get_all_customers_async())
    }

    fn insert_address(&self, address: &AddressRecord) -> Result<AddressId, DataAccessError> {
        self.run(self.insert_address_async(address))
    }

    fn update_address(&self, address: &AddressRecord) -> Result<(), DataAccessError> {
        self.run(self.update_address_async(address))
    }

    fn delete_address(&self, id: AddressId) -> Result<(), DataAccessError> {
        self.run(self.delete_address_async(id))
    }

    fn get_address_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<AddressRecord>, DataAccessError> {
        self.run(self.get_address_by_customer_async(customer_id))
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> DataAccessError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("{operation}: {}", db_err.message());
            match db_err.kind() {
                ErrorKind::ForeignKeyViolation
                | ErrorKind::UniqueViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => DataAccessError::Constraint(msg),
                _ => DataAccessError::Backend(msg),
            }
        }
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => {
            DataAccessError::Unavailable(format!("{operation}: connection pool unavailable"))
        }
        sqlx::Error::Io(e) => DataAccessError::Unavailable(format!("{operation}: {e}")),
        other => DataAccessError::Backend(format!("{operation}: {other}")),
    }
}
