//! Invoice rows and their mutation inputs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Invoice status
///
/// Exactly two values are valid; anything else is rejected at write time
/// by form validation. Read-side search matches against the label returned
/// by [`InvoiceStatus::as_str`], so an unknown search term simply matches
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }

    /// Parse a status label, returning `None` for anything outside the
    /// two-value enumeration
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(InvoiceStatus::Pending),
            "paid" => Some(InvoiceStatus::Paid),
            _ => None,
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored invoice row
///
/// `amount` is an integer count of minor currency units (cents), converted
/// from the decimal form input at creation time and back when read for
/// editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub customer_id: Uuid,
    /// Amount in cents, always non-negative
    pub amount: i64,
    pub status: InvoiceStatus,
    /// Calendar date, ISO 8601 (YYYY-MM-DD) in serialized form
    pub date: NaiveDate,
}

/// Input for inserting one invoice row
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub customer_id: Uuid,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Partial update applied to the row matching an id
///
/// Only customer, amount, and status change; id and date are untouched.
#[derive(Debug, Clone)]
pub struct InvoiceUpdate {
    pub customer_id: Uuid,
    pub amount: i64,
    pub status: InvoiceStatus,
}
