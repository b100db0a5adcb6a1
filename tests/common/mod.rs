//! Shared fixtures for integration tests
#![allow(dead_code)]

use acme_dashboard::core::store::{DashboardStore, StoreError};
use acme_dashboard::model::{Customer, Invoice, InvoiceStatus, InvoiceUpdate, NewInvoice, Revenue};
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

pub fn customer(name: &str, email: &str) -> Customer {
    Customer {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: email.to_string(),
        image_url: format!("/customers/{}.png", name.to_lowercase().replace(' ', "-")),
    }
}

pub fn invoice(
    customer_id: Uuid,
    amount: i64,
    status: InvoiceStatus,
    date: NaiveDate,
) -> Invoice {
    Invoice {
        id: Uuid::new_v4(),
        customer_id,
        amount,
        status,
        date,
    }
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A store whose every call fails, for exercising the error-wrapping
/// policy
pub struct FailingStore;

fn backend_down() -> StoreError {
    StoreError::Query {
        backend: "memory".to_string(),
        message: "backend unavailable".to_string(),
    }
}

#[async_trait]
impl DashboardStore for FailingStore {
    async fn insert_invoice(&self, _invoice: NewInvoice) -> Result<Invoice, StoreError> {
        Err(backend_down())
    }

    async fn update_invoice(&self, _id: Uuid, _update: InvoiceUpdate) -> Result<(), StoreError> {
        Err(backend_down())
    }

    async fn delete_invoice(&self, _id: Uuid) -> Result<(), StoreError> {
        Err(backend_down())
    }

    async fn get_invoice(&self, _id: Uuid) -> Result<Option<Invoice>, StoreError> {
        Err(backend_down())
    }

    async fn list_invoices(&self) -> Result<Vec<Invoice>, StoreError> {
        Err(backend_down())
    }

    async fn list_invoices_with_customers(
        &self,
    ) -> Result<Vec<(Invoice, Customer)>, StoreError> {
        Err(backend_down())
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, StoreError> {
        Err(backend_down())
    }

    async fn list_customers_with_invoices(
        &self,
    ) -> Result<Vec<(Customer, Vec<Invoice>)>, StoreError> {
        Err(backend_down())
    }

    async fn list_revenue(&self) -> Result<Vec<Revenue>, StoreError> {
        Err(backend_down())
    }
}
