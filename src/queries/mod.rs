//! Data-fetching queries and in-memory post-processing
//!
//! Reads go through the injected store handle and are reshaped here:
//! currency formatting, ordering, the shared search predicate, page
//! windows, and per-customer/per-status aggregation. Every store failure
//! is logged with context and re-raised wrapped in a fixed message with
//! the backend detail attached as the error source.

use crate::config::DashboardConfig;
use crate::core::error::{DashResult, Error, StorageError};
use crate::core::filter::{customer_matches, status_matches};
use crate::core::money::{format_currency, to_major};
use crate::core::pagination::{page_window, total_pages};
use crate::core::store::{DashboardStore, StoreError};
use crate::model::{InvoiceStatus, Revenue};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

/// One of the five most recent invoices, amount pre-formatted for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestInvoice {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
    /// Display currency string, e.g. `$1,250.00`
    pub amount: String,
}

/// Summary statistics for the dashboard cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardData {
    pub number_of_invoices: usize,
    /// Count of invoices with status `pending`
    pub total_pending_invoices: usize,
    /// Distinct customer references across all invoices
    pub number_of_customers: usize,
    /// Sum of `paid` invoice amounts, formatted as currency
    pub total_paid_invoices: String,
}

/// One row of the filtered invoices table, amounts in raw cents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceRow {
    pub id: Uuid,
    pub amount: i64,
    pub date: NaiveDate,
    pub status: InvoiceStatus,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// Editable fields of one invoice, amount back in major units for the
/// edit form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceForm {
    pub id: Uuid,
    pub customer_id: Uuid,
    /// Stored cents divided by 100
    pub amount: f64,
    pub status: InvoiceStatus,
}

/// Customer id/name pair for selection lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerField {
    pub id: Uuid,
    pub name: String,
}

/// One row of the customers table with aggregated invoice totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: usize,
    /// Sum of pending invoice amounts, formatted as currency
    pub total_pending: String,
    /// Sum of paid invoice amounts, formatted as currency
    pub total_paid: String,
}

fn wrap_store_error(message: &'static str, e: StoreError) -> Error {
    tracing::error!(error = %e, context = message, "database error");
    StorageError::new(message, e).into()
}

/// Read-side queries over the dashboard tables
#[derive(Clone)]
pub struct DashboardQueries {
    store: Arc<dyn DashboardStore>,
    config: DashboardConfig,
}

impl DashboardQueries {
    pub fn new(store: Arc<dyn DashboardStore>, config: DashboardConfig) -> Self {
        Self { store, config }
    }

    /// Passthrough read of all revenue rows
    pub async fn revenue(&self) -> DashResult<Vec<Revenue>> {
        self.store
            .list_revenue()
            .await
            .map_err(|e| wrap_store_error("Failed to fetch revenue data.", e))
    }

    /// The five most recent invoices joined with customer display fields,
    /// newest first, amounts formatted as currency
    pub async fn latest_invoices(&self) -> DashResult<Vec<LatestInvoice>> {
        let mut rows = self
            .store
            .list_invoices_with_customers()
            .await
            .map_err(|e| wrap_store_error("Failed to fetch the latest invoices.", e))?;

        // Date descending; id breaks ties so pages are deterministic.
        rows.sort_by(|a, b| b.0.date.cmp(&a.0.date).then_with(|| a.0.id.cmp(&b.0.id)));

        Ok(rows
            .into_iter()
            .take(self.config.latest_invoices)
            .map(|(invoice, customer)| LatestInvoice {
                id: invoice.id,
                name: customer.name,
                email: customer.email,
                image_url: customer.image_url,
                amount: format_currency(invoice.amount),
            })
            .collect())
    }

    /// The four dashboard card statistics over all invoices
    pub async fn card_data(&self) -> DashResult<CardData> {
        let invoices = self
            .store
            .list_invoices()
            .await
            .map_err(|e| wrap_store_error("Failed to fetch card data.", e))?;

        let number_of_invoices = invoices.len();
        let total_pending_invoices = invoices
            .iter()
            .filter(|i| i.status == InvoiceStatus::Pending)
            .count();
        let number_of_customers = invoices
            .iter()
            .map(|i| i.customer_id)
            .collect::<HashSet<_>>()
            .len();
        let paid_sum: i64 = invoices
            .iter()
            .filter(|i| i.status == InvoiceStatus::Paid)
            .map(|i| i.amount)
            .sum();

        Ok(CardData {
            number_of_invoices,
            total_pending_invoices,
            number_of_customers,
            total_paid_invoices: format_currency(paid_sum),
        })
    }

    /// One page of the invoices table, newest first, restricted by the
    /// shared status predicate
    pub async fn filtered_invoices(
        &self,
        query: &str,
        page: usize,
    ) -> DashResult<Vec<InvoiceRow>> {
        let mut rows = self
            .store
            .list_invoices_with_customers()
            .await
            .map_err(|e| wrap_store_error("Failed to fetch invoices.", e))?;

        rows.sort_by(|a, b| b.0.date.cmp(&a.0.date).then_with(|| a.0.id.cmp(&b.0.id)));
        rows.retain(|(invoice, _)| status_matches(invoice.status, query));

        Ok(page_window(rows, page, self.config.items_per_page)
            .into_iter()
            .map(|(invoice, customer)| InvoiceRow {
                id: invoice.id,
                amount: invoice.amount,
                date: invoice.date,
                status: invoice.status,
                name: customer.name,
                email: customer.email,
                image_url: customer.image_url,
            })
            .collect())
    }

    /// Total page count for the invoices table under the same predicate
    /// that [`Self::filtered_invoices`] uses
    pub async fn invoices_pages(&self, query: &str) -> DashResult<usize> {
        let invoices = self
            .store
            .list_invoices()
            .await
            .map_err(|e| wrap_store_error("Failed to fetch total number of invoices.", e))?;

        let matching = invoices
            .iter()
            .filter(|i| status_matches(i.status, query))
            .count();

        Ok(total_pages(matching, self.config.items_per_page))
    }

    /// One invoice's editable fields by exact id, amount converted back
    /// to major units for form pre-population
    ///
    /// A missing row is a storage error, same as a backend failure.
    pub async fn invoice_by_id(&self, id: Uuid) -> DashResult<InvoiceForm> {
        let invoice = self
            .store
            .get_invoice(id)
            .await
            .map_err(|e| wrap_store_error("Failed to fetch invoice.", e))?
            .ok_or_else(|| {
                wrap_store_error(
                    "Failed to fetch invoice.",
                    StoreError::NotFound {
                        what: "invoice".to_string(),
                    },
                )
            })?;

        Ok(InvoiceForm {
            id: invoice.id,
            customer_id: invoice.customer_id,
            amount: to_major(invoice.amount),
            status: invoice.status,
        })
    }

    /// All customers' id/name, ordered by name ascending, for selection
    /// lists
    pub async fn customers(&self) -> DashResult<Vec<CustomerField>> {
        let mut customers = self
            .store
            .list_customers()
            .await
            .map_err(|e| wrap_store_error("Failed to fetch all customers.", e))?;

        customers.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(customers
            .into_iter()
            .map(|c| CustomerField {
                id: c.id,
                name: c.name,
            })
            .collect())
    }

    /// Customers matching the name/email predicate, ordered by name
    /// ascending, each with pending and paid totals formatted as currency
    /// plus an invoice count
    pub async fn filtered_customers(&self, query: &str) -> DashResult<Vec<CustomerSummary>> {
        let mut rows = self
            .store
            .list_customers_with_invoices()
            .await
            .map_err(|e| wrap_store_error("Failed to fetch customer table.", e))?;

        rows.sort_by(|a, b| a.0.name.cmp(&b.0.name));

        Ok(rows
            .into_iter()
            .filter(|(customer, _)| customer_matches(customer, query))
            .map(|(customer, invoices)| {
                let pending_sum: i64 = invoices
                    .iter()
                    .filter(|i| i.status == InvoiceStatus::Pending)
                    .map(|i| i.amount)
                    .sum();
                let paid_sum: i64 = invoices
                    .iter()
                    .filter(|i| i.status == InvoiceStatus::Paid)
                    .map(|i| i.amount)
                    .sum();

                CustomerSummary {
                    id: customer.id,
                    name: customer.name,
                    email: customer.email,
                    image_url: customer.image_url,
                    total_invoices: invoices.len(),
                    total_pending: format_currency(pending_sum),
                    total_paid: format_currency(paid_sum),
                }
            })
            .collect())
    }
}
