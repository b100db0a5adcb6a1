//! Mutation actions for invoices, plus credential authentication
//!
//! Each action validates first, writes through the injected store handle,
//! and returns its side effects as an ordered list: the cached invoices
//! view is always invalidated BEFORE any redirect, so the next render
//! observes fresh data. The two effects are independent external calls
//! with no atomicity; returning them as data lets a harness assert both
//! occurred in order.
//!
//! Validation errors surface to the caller uncaught (the caller renders
//! them as form errors). Store failures are logged with context and
//! re-raised wrapped in a fixed, backend-agnostic message.

use crate::config::DashboardConfig;
use crate::core::error::{AuthError, DashResult, Error, StorageError};
use crate::core::forms::{InvoiceFormData, SignInFormData};
use crate::core::store::{Authenticator, DashboardStore};
use crate::model::{InvoiceUpdate, NewInvoice};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// A side effect the caller must perform after a successful mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Mark the named view's cached data stale
    RevalidatePath(String),

    /// Transition the caller to the named view
    Redirect(String),
}

/// Form-handling mutation actions over the invoices table
#[derive(Clone)]
pub struct InvoiceActions {
    store: Arc<dyn DashboardStore>,
    config: DashboardConfig,
}

impl InvoiceActions {
    pub fn new(store: Arc<dyn DashboardStore>, config: DashboardConfig) -> Self {
        Self { store, config }
    }

    /// Validate the form, insert one invoice row stamped with today's
    /// date, and invalidate-then-redirect
    ///
    /// The amount arrives as a decimal string and is stored as integer
    /// cents (input × 100).
    pub async fn create_invoice(&self, form: &InvoiceFormData) -> DashResult<Vec<Effect>> {
        let input = form.parse()?;

        let invoice = NewInvoice {
            customer_id: input.customer_id,
            amount: input.amount_cents,
            status: input.status,
            date: Utc::now().date_naive(),
        };

        if let Err(e) = self.store.insert_invoice(invoice).await {
            tracing::error!(error = %e, "failed to create invoice");
            return Err(StorageError::new("Failed to create invoice.", e).into());
        }

        Ok(self.invalidate_and_redirect())
    }

    /// Validate the form and apply a partial update to the row matching
    /// `id`, then invalidate-then-redirect
    ///
    /// The id is trusted (it is not form input). Only customer, amount,
    /// and status change; the stored date is untouched.
    pub async fn update_invoice(
        &self,
        id: Uuid,
        form: &InvoiceFormData,
    ) -> DashResult<Vec<Effect>> {
        let input = form.parse()?;

        let update = InvoiceUpdate {
            customer_id: input.customer_id,
            amount: input.amount_cents,
            status: input.status,
        };

        if let Err(e) = self.store.update_invoice(id, update).await {
            tracing::error!(invoice_id = %id, error = %e, "failed to update invoice");
            return Err(StorageError::new("Failed to update invoice.", e).into());
        }

        Ok(self.invalidate_and_redirect())
    }

    /// Delete the row matching `id` and invalidate the invoices view
    ///
    /// No redirect: delete is invoked from within the listing view itself.
    /// There is no existence pre-check; deleting a nonexistent id still
    /// hits the store and still invalidates on success.
    pub async fn delete_invoice(&self, id: Uuid) -> DashResult<Vec<Effect>> {
        if let Err(e) = self.store.delete_invoice(id).await {
            tracing::error!(invoice_id = %id, error = %e, "failed to delete invoice");
            return Err(StorageError::new("Failed to delete invoice.", e).into());
        }

        Ok(vec![Effect::RevalidatePath(self.config.invoices_path.clone())])
    }

    /// Invalidation strictly before redirect.
    fn invalidate_and_redirect(&self) -> Vec<Effect> {
        vec![
            Effect::RevalidatePath(self.config.invoices_path.clone()),
            Effect::Redirect(self.config.invoices_path.clone()),
        ]
    }
}

/// Attempt a credential sign-in, returning an inline message on failure
///
/// Authentication failures are rendered inline rather than thrown:
/// `Ok(None)` means success, `Ok(Some(message))` carries the user-facing
/// string for the two recognized [`AuthError`] kinds. Any other error
/// shape is re-raised unchanged.
pub async fn authenticate(
    authenticator: &dyn Authenticator,
    form: &SignInFormData,
) -> DashResult<Option<String>> {
    match authenticator.sign_in(&form.email, &form.password).await {
        Ok(()) => Ok(None),
        Err(Error::Auth(AuthError::InvalidCredentials)) => {
            Ok(Some("Invalid credentials.".to_string()))
        }
        Err(Error::Auth(AuthError::Other { .. })) => Ok(Some("Something went wrong.".to_string())),
        Err(e) => Err(e),
    }
}
