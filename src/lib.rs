//! # Acme Dashboard Data Layer
//!
//! Server-side form-handling actions and data-fetching queries for a
//! financial dashboard (invoices, customers, revenue).
//!
//! ## Features
//!
//! - **Mutation Actions**: validate form input, write invoice rows, and
//!   return the invalidate-then-redirect effect sequence as data
//! - **Query/Aggregation Layer**: currency formatting, one shared search
//!   predicate for page counts and page contents, page windows, and
//!   per-customer/per-status totals
//! - **Pluggable Store**: an explicitly constructed store handle behind a
//!   trait; in-memory by default, PostgreSQL behind the `postgres` feature
//! - **HTTP Exposure**: an axum router over the actions and queries
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use acme_dashboard::prelude::*;
//!
//! let store: Arc<dyn DashboardStore> = Arc::new(InMemoryStore::new());
//! let queries = DashboardQueries::new(store.clone(), DashboardConfig::default());
//! let actions = InvoiceActions::new(store, DashboardConfig::default());
//!
//! let effects = actions.create_invoice(&form).await?;
//! // effects == [RevalidatePath("/dashboard/invoices"), Redirect("/dashboard/invoices")]
//! let cards = queries.card_data().await?;
//! ```

pub mod actions;
pub mod config;
pub mod core;
pub mod model;
pub mod queries;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Authenticator, DashResult, DashboardStore, Error, InvoiceFormData, SignInFormData,
        StoreError, ValidationError,
    };
    pub use crate::core::money::{format_currency, to_cents, to_major};

    // === Model ===
    pub use crate::model::{Customer, Invoice, InvoiceStatus, InvoiceUpdate, NewInvoice, Revenue};

    // === Actions and queries ===
    pub use crate::actions::{Effect, InvoiceActions, authenticate};
    pub use crate::queries::{CardData, DashboardQueries};

    // === Storage ===
    pub use crate::storage::{InMemoryStore, StaticAuthenticator};
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresStore;

    // === Config ===
    pub use crate::config::DashboardConfig;

    // === Server ===
    pub use crate::server::{AppState, init_tracing, router, serve};

    // === External dependencies ===
    pub use chrono::NaiveDate;
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
