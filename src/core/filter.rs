//! Search predicates shared by every filter call site
//!
//! Page counting and page fetching must agree on what "matches" means, so
//! both go through the same pure predicate instead of filtering in two
//! places with two implementations.

use crate::model::{Customer, InvoiceStatus};

/// Does an invoice's status match the search query?
///
/// The query is trimmed; an empty query matches everything. Otherwise the
/// match is a case-insensitive substring test against the status label
/// only. Customer name and email are not searched here.
pub fn status_matches(status: InvoiceStatus, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    status.as_str().contains(&query.to_lowercase())
}

/// Does a customer match the search query?
///
/// Case-insensitive substring match against name OR email; empty query
/// matches everything.
pub fn customer_matches(customer: &Customer, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    customer.name.to_lowercase().contains(&query)
        || customer.email.to_lowercase().contains(&query)
}
