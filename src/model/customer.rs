//! Customer rows
//!
//! Customers are read-only in this scope: no mutation actions exist for
//! them, they are only joined against invoices for display.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored customer row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
}
