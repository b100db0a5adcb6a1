//! PostgreSQL implementation of the store (requires `postgres` feature)
//!
//! Tables: `invoices (id uuid, customer_id uuid, amount bigint,
//! status text, date date)`, `customers (id uuid, name text, email text,
//! image_url text)`, `revenue (month text, revenue bigint)`.

use crate::core::store::{DashboardStore, StoreError};
use crate::model::{Customer, Invoice, InvoiceStatus, InvoiceUpdate, NewInvoice, Revenue};
use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use uuid::Uuid;

const BACKEND: &str = "postgres";

fn query_error(e: sqlx::Error) -> StoreError {
    StoreError::Query {
        backend: BACKEND.to_string(),
        message: e.to_string(),
    }
}

/// PostgreSQL-backed dashboard store
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect to the database and build a store around the pool
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Connection {
                backend: BACKEND.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { pool })
    }

    /// Build a store around an existing pool
    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn invoice_from_row(row: &PgRow) -> Result<Invoice, StoreError> {
    let status_label: String = row.try_get("status").map_err(query_error)?;
    let status = InvoiceStatus::parse(&status_label).ok_or_else(|| StoreError::Query {
        backend: BACKEND.to_string(),
        message: format!("unexpected status label '{}'", status_label),
    })?;

    Ok(Invoice {
        id: row.try_get("id").map_err(query_error)?,
        customer_id: row.try_get("customer_id").map_err(query_error)?,
        amount: row.try_get("amount").map_err(query_error)?,
        status,
        date: row.try_get("date").map_err(query_error)?,
    })
}

fn customer_from_row(row: &PgRow) -> Result<Customer, StoreError> {
    Ok(Customer {
        id: row.try_get("id").map_err(query_error)?,
        name: row.try_get("name").map_err(query_error)?,
        email: row.try_get("email").map_err(query_error)?,
        image_url: row.try_get("image_url").map_err(query_error)?,
    })
}

#[async_trait]
impl DashboardStore for PostgresStore {
    async fn insert_invoice(&self, invoice: NewInvoice) -> Result<Invoice, StoreError> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO invoices (id, customer_id, amount, status, date) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(invoice.customer_id)
        .bind(invoice.amount)
        .bind(invoice.status.as_str())
        .bind(invoice.date)
        .execute(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(Invoice {
            id,
            customer_id: invoice.customer_id,
            amount: invoice.amount,
            status: invoice.status,
            date: invoice.date,
        })
    }

    async fn update_invoice(&self, id: Uuid, update: InvoiceUpdate) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE invoices SET customer_id = $1, amount = $2, status = $3 WHERE id = $4",
        )
        .bind(update.customer_id)
        .bind(update.amount)
        .bind(update.status.as_str())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(())
    }

    async fn delete_invoice(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(())
    }

    async fn get_invoice(&self, id: Uuid) -> Result<Option<Invoice>, StoreError> {
        let row = sqlx::query(
            "SELECT id, customer_id, amount, status, date FROM invoices WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error)?;

        row.as_ref().map(invoice_from_row).transpose()
    }

    async fn list_invoices(&self) -> Result<Vec<Invoice>, StoreError> {
        let rows = sqlx::query("SELECT id, customer_id, amount, status, date FROM invoices")
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        rows.iter().map(invoice_from_row).collect()
    }

    async fn list_invoices_with_customers(
        &self,
    ) -> Result<Vec<(Invoice, Customer)>, StoreError> {
        let rows = sqlx::query(
            "SELECT i.id, i.customer_id, i.amount, i.status, i.date, \
                    c.id AS c_id, c.name, c.email, c.image_url \
             FROM invoices i JOIN customers c ON c.id = i.customer_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(query_error)?;

        rows.iter()
            .map(|row| {
                let invoice = invoice_from_row(row)?;
                let customer = Customer {
                    id: row.try_get("c_id").map_err(query_error)?,
                    name: row.try_get("name").map_err(query_error)?,
                    email: row.try_get("email").map_err(query_error)?,
                    image_url: row.try_get("image_url").map_err(query_error)?,
                };
                Ok((invoice, customer))
            })
            .collect()
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, StoreError> {
        let rows = sqlx::query("SELECT id, name, email, image_url FROM customers")
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        rows.iter().map(customer_from_row).collect()
    }

    async fn list_customers_with_invoices(
        &self,
    ) -> Result<Vec<(Customer, Vec<Invoice>)>, StoreError> {
        let customers = self.list_customers().await?;
        let invoices = self.list_invoices().await?;

        Ok(customers
            .into_iter()
            .map(|customer| {
                let theirs: Vec<Invoice> = invoices
                    .iter()
                    .filter(|invoice| invoice.customer_id == customer.id)
                    .cloned()
                    .collect();
                (customer, theirs)
            })
            .collect())
    }

    async fn list_revenue(&self) -> Result<Vec<Revenue>, StoreError> {
        let rows = sqlx::query("SELECT month, revenue FROM revenue")
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        rows.iter()
            .map(|row| {
                Ok(Revenue {
                    month: row.try_get("month").map_err(query_error)?,
                    revenue: row.try_get("revenue").map_err(query_error)?,
                })
            })
            .collect()
    }
}
