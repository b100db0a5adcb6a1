//! In-memory implementation of the store for testing and development
//!
//! Uses RwLock-guarded maps for thread-safe access. Every operation clones
//! rows out, so callers never observe a partially applied mutation.

use crate::core::error::{AuthError, Error};
use crate::core::store::{Authenticator, DashboardStore, StoreError};
use crate::model::{Customer, Invoice, InvoiceUpdate, NewInvoice, Revenue};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

const BACKEND: &str = "memory";

fn lock_error(message: impl std::fmt::Display) -> StoreError {
    StoreError::Query {
        backend: BACKEND.to_string(),
        message: format!("failed to acquire lock: {}", message),
    }
}

/// In-memory dashboard store
///
/// Clones share the same underlying tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    invoices: Arc<RwLock<HashMap<Uuid, Invoice>>>,
    customers: Arc<RwLock<HashMap<Uuid, Customer>>>,
    revenue: Arc<RwLock<Vec<Revenue>>>,
}

impl InMemoryStore {
    /// Create a new store with empty tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a customer row; returns the store for chaining
    pub fn with_customer(self, customer: Customer) -> Self {
        self.customers
            .write()
            .expect("lock poisoned")
            .insert(customer.id, customer);
        self
    }

    /// Seed an invoice row; returns the store for chaining
    pub fn with_invoice(self, invoice: Invoice) -> Self {
        self.invoices
            .write()
            .expect("lock poisoned")
            .insert(invoice.id, invoice);
        self
    }

    /// Seed a revenue row; returns the store for chaining
    pub fn with_revenue(self, revenue: Revenue) -> Self {
        self.revenue.write().expect("lock poisoned").push(revenue);
        self
    }
}

#[async_trait]
impl DashboardStore for InMemoryStore {
    async fn insert_invoice(&self, invoice: NewInvoice) -> Result<Invoice, StoreError> {
        let mut invoices = self.invoices.write().map_err(lock_error)?;

        let row = Invoice {
            id: Uuid::new_v4(),
            customer_id: invoice.customer_id,
            amount: invoice.amount,
            status: invoice.status,
            date: invoice.date,
        };
        invoices.insert(row.id, row.clone());

        Ok(row)
    }

    async fn update_invoice(&self, id: Uuid, update: InvoiceUpdate) -> Result<(), StoreError> {
        let mut invoices = self.invoices.write().map_err(lock_error)?;

        // Zero rows affected when the id is missing; not an error.
        if let Some(row) = invoices.get_mut(&id) {
            row.customer_id = update.customer_id;
            row.amount = update.amount;
            row.status = update.status;
        }

        Ok(())
    }

    async fn delete_invoice(&self, id: Uuid) -> Result<(), StoreError> {
        let mut invoices = self.invoices.write().map_err(lock_error)?;

        invoices.remove(&id);

        Ok(())
    }

    async fn get_invoice(&self, id: Uuid) -> Result<Option<Invoice>, StoreError> {
        let invoices = self.invoices.read().map_err(lock_error)?;

        Ok(invoices.get(&id).cloned())
    }

    async fn list_invoices(&self) -> Result<Vec<Invoice>, StoreError> {
        let invoices = self.invoices.read().map_err(lock_error)?;

        Ok(invoices.values().cloned().collect())
    }

    async fn list_invoices_with_customers(
        &self,
    ) -> Result<Vec<(Invoice, Customer)>, StoreError> {
        let invoices = self.invoices.read().map_err(lock_error)?;
        let customers = self.customers.read().map_err(lock_error)?;

        // Inner join: invoices with a dangling customer reference drop out.
        Ok(invoices
            .values()
            .filter_map(|invoice| {
                customers
                    .get(&invoice.customer_id)
                    .map(|customer| (invoice.clone(), customer.clone()))
            })
            .collect())
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, StoreError> {
        let customers = self.customers.read().map_err(lock_error)?;

        Ok(customers.values().cloned().collect())
    }

    async fn list_customers_with_invoices(
        &self,
    ) -> Result<Vec<(Customer, Vec<Invoice>)>, StoreError> {
        let invoices = self.invoices.read().map_err(lock_error)?;
        let customers = self.customers.read().map_err(lock_error)?;

        Ok(customers
            .values()
            .map(|customer| {
                let theirs: Vec<Invoice> = invoices
                    .values()
                    .filter(|invoice| invoice.customer_id == customer.id)
                    .cloned()
                    .collect();
                (customer.clone(), theirs)
            })
            .collect())
    }

    async fn list_revenue(&self) -> Result<Vec<Revenue>, StoreError> {
        let revenue = self.revenue.read().map_err(lock_error)?;

        Ok(revenue.clone())
    }
}

/// Authenticator backed by a fixed email/password table
///
/// For tests and demos; real credential storage is out of scope.
#[derive(Clone, Default)]
pub struct StaticAuthenticator {
    users: Arc<RwLock<HashMap<String, String>>>,
}

impl StaticAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user; returns the authenticator for chaining
    pub fn with_user(self, email: &str, password: &str) -> Self {
        self.users
            .write()
            .expect("lock poisoned")
            .insert(email.to_string(), password.to_string());
        self
    }
}

#[async_trait]
impl Authenticator for StaticAuthenticator {
    async fn sign_in(&self, email: &str, password: &str) -> Result<(), Error> {
        let users = self.users.read().map_err(|e| {
            Error::Auth(AuthError::Other {
                message: format!("failed to acquire lock: {}", e),
            })
        })?;

        match users.get(email) {
            Some(stored) if stored == password => Ok(()),
            _ => Err(Error::Auth(AuthError::InvalidCredentials)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InvoiceStatus;
    use chrono::NaiveDate;

    fn customer() -> Customer {
        Customer {
            id: Uuid::new_v4(),
            name: "Alice Smith".to_string(),
            email: "alice@example.com".to_string(),
            image_url: "/customers/alice.png".to_string(),
        }
    }

    fn new_invoice(customer_id: Uuid, amount: i64) -> NewInvoice {
        NewInvoice {
            customer_id,
            amount,
            status: InvoiceStatus::Pending,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_an_id_and_stores_the_row() {
        let store = InMemoryStore::new();
        let customer_id = Uuid::new_v4();

        let created = store
            .insert_invoice(new_invoice(customer_id, 1000))
            .await
            .unwrap();

        assert_eq!(created.customer_id, customer_id);
        assert_eq!(created.amount, 1000);

        let fetched = store.get_invoice(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn update_changes_only_the_partial_fields() {
        let store = InMemoryStore::new();
        let created = store
            .insert_invoice(new_invoice(Uuid::new_v4(), 1000))
            .await
            .unwrap();

        let new_customer = Uuid::new_v4();
        store
            .update_invoice(
                created.id,
                InvoiceUpdate {
                    customer_id: new_customer,
                    amount: 2500,
                    status: InvoiceStatus::Paid,
                },
            )
            .await
            .unwrap();

        let updated = store.get_invoice(created.id).await.unwrap().unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.customer_id, new_customer);
        assert_eq!(updated.amount, 2500);
        assert_eq!(updated.status, InvoiceStatus::Paid);
        // Date untouched by updates.
        assert_eq!(updated.date, created.date);
    }

    #[tokio::test]
    async fn update_of_missing_id_affects_nothing() {
        let store = InMemoryStore::new();
        let result = store
            .update_invoice(
                Uuid::new_v4(),
                InvoiceUpdate {
                    customer_id: Uuid::new_v4(),
                    amount: 100,
                    status: InvoiceStatus::Paid,
                },
            )
            .await;
        assert!(result.is_ok());
        assert!(store.list_invoices().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_the_row_and_tolerates_missing_ids() {
        let store = InMemoryStore::new();
        let created = store
            .insert_invoice(new_invoice(Uuid::new_v4(), 1000))
            .await
            .unwrap();

        store.delete_invoice(created.id).await.unwrap();
        assert_eq!(store.get_invoice(created.id).await.unwrap(), None);

        // Second delete of the same id still succeeds.
        store.delete_invoice(created.id).await.unwrap();
    }

    #[tokio::test]
    async fn join_drops_invoices_without_a_customer() {
        let alice = customer();
        let store = InMemoryStore::new().with_customer(alice.clone());

        store
            .insert_invoice(new_invoice(alice.id, 500))
            .await
            .unwrap();
        store
            .insert_invoice(new_invoice(Uuid::new_v4(), 700))
            .await
            .unwrap();

        let joined = store.list_invoices_with_customers().await.unwrap();
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].1.name, "Alice Smith");
    }

    #[tokio::test]
    async fn customers_with_invoices_includes_empty_lists() {
        let alice = customer();
        let store = InMemoryStore::new().with_customer(alice);

        let joined = store.list_customers_with_invoices().await.unwrap();
        assert_eq!(joined.len(), 1);
        assert!(joined[0].1.is_empty());
    }

    #[tokio::test]
    async fn revenue_is_a_passthrough() {
        let store = InMemoryStore::new().with_revenue(Revenue {
            month: "Jan".to_string(),
            revenue: 2000,
        });
        let rows = store.list_revenue().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].month, "Jan");
    }

    #[tokio::test]
    async fn static_authenticator_accepts_matching_credentials() {
        let auth = StaticAuthenticator::new().with_user("user@acme.dev", "123456");
        assert!(auth.sign_in("user@acme.dev", "123456").await.is_ok());
    }

    #[tokio::test]
    async fn static_authenticator_rejects_wrong_password() {
        let auth = StaticAuthenticator::new().with_user("user@acme.dev", "123456");
        let err = auth.sign_in("user@acme.dev", "wrong").await.unwrap_err();
        assert!(matches!(err, Error::Auth(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn static_authenticator_rejects_unknown_user() {
        let auth = StaticAuthenticator::new();
        let err = auth.sign_in("ghost@acme.dev", "pw").await.unwrap_err();
        assert!(matches!(err, Error::Auth(AuthError::InvalidCredentials)));
    }
}
