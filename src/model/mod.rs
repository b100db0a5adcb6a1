//! Dashboard data model: invoices, customers, revenue

pub mod customer;
pub mod invoice;
pub mod revenue;

pub use customer::Customer;
pub use invoice::{Invoice, InvoiceStatus, InvoiceUpdate, NewInvoice};
pub use revenue::Revenue;
