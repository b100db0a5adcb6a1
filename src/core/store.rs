//! Store and authenticator traits
//!
//! The store is an explicitly constructed handle passed into actions and
//! queries rather than process-wide shared state, so tests can substitute
//! the in-memory implementation for a real backend.

use crate::core::error::Error;
use crate::model::{Customer, Invoice, InvoiceUpdate, NewInvoice, Revenue};
use async_trait::async_trait;
use uuid::Uuid;

/// What a storage backend reports when a call fails
///
/// This is the raw backend-side detail. Callers of the action/query layer
/// never see it directly; it travels as the `source` of a
/// [`crate::core::error::StorageError`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A query against the backend failed
    #[error("{backend} query error: {message}")]
    Query { backend: String, message: String },

    /// The backend could not be reached
    #[error("failed to connect to {backend}: {message}")]
    Connection { backend: String, message: String },

    /// No row matched an exact-id lookup
    #[error("{what} not found")]
    NotFound { what: String },
}

/// Capability surface of the relational backend
///
/// Tables: invoices, customers, revenue. Ordering, filtering, pagination,
/// and aggregation all live in the query layer so that page counts and
/// page contents share one filter predicate; implementations only move
/// rows.
#[async_trait]
pub trait DashboardStore: Send + Sync {
    /// Insert one invoice row
    async fn insert_invoice(&self, invoice: NewInvoice) -> Result<Invoice, StoreError>;

    /// Apply a partial update to the row matching `id`
    ///
    /// Updating a nonexistent id is not an error; zero rows are affected,
    /// matching the backend's behavior.
    async fn update_invoice(&self, id: Uuid, update: InvoiceUpdate) -> Result<(), StoreError>;

    /// Delete the row matching `id`
    ///
    /// Deleting a nonexistent id is not an error. There is no existence
    /// pre-check anywhere in the mutation path.
    async fn delete_invoice(&self, id: Uuid) -> Result<(), StoreError>;

    /// Get one invoice by exact id match
    async fn get_invoice(&self, id: Uuid) -> Result<Option<Invoice>, StoreError>;

    /// All invoice rows, in no particular order
    async fn list_invoices(&self) -> Result<Vec<Invoice>, StoreError>;

    /// All invoices inner-joined with their customer display fields
    async fn list_invoices_with_customers(&self)
    -> Result<Vec<(Invoice, Customer)>, StoreError>;

    /// All customer rows, in no particular order
    async fn list_customers(&self) -> Result<Vec<Customer>, StoreError>;

    /// All customers with their (possibly empty) invoice lists
    async fn list_customers_with_invoices(
        &self,
    ) -> Result<Vec<(Customer, Vec<Invoice>)>, StoreError>;

    /// All revenue rows
    async fn list_revenue(&self) -> Result<Vec<Revenue>, StoreError>;
}

/// Credential sign-in seam
///
/// Session management is out of scope; implementations only answer whether
/// the supplied credentials are acceptable. Failures are reported through
/// [`crate::core::error::AuthError`] inside [`Error`]; any other error
/// shape is re-raised unchanged by [`crate::actions::authenticate`].
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<(), Error>;
}
