//! Form input parsing and validation
//!
//! Mutation actions receive a flat mapping of field name to string value.
//! Parsing collects every offending field into one
//! [`ValidationError::FieldErrors`] rather than stopping at the first, so
//! the caller can render the whole form state at once. Validation happens
//! before any store call.

use crate::core::error::{FieldValidationError, ValidationError};
use crate::core::money;
use crate::model::InvoiceStatus;
use serde::Deserialize;
use uuid::Uuid;

/// Raw invoice form fields as submitted
///
/// All values arrive as strings; coercion and enum checks happen in
/// [`InvoiceFormData::parse`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InvoiceFormData {
    pub customer_id: String,
    pub amount: String,
    pub status: String,
}

/// Validated, typed invoice input ready for the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceInput {
    pub customer_id: Uuid,
    /// Amount converted from the decimal form value to integer cents
    pub amount_cents: i64,
    pub status: InvoiceStatus,
}

impl InvoiceFormData {
    /// Validate and convert the raw fields
    ///
    /// - `customer_id`: non-empty and a well-formed UUID
    /// - `amount`: coerces to a non-negative number; stored value is the
    ///   input multiplied by 100 (cents)
    /// - `status`: exactly one of the two allowed values
    pub fn parse(&self) -> Result<InvoiceInput, ValidationError> {
        let mut errors = Vec::new();

        let customer_id = if self.customer_id.trim().is_empty() {
            errors.push(field_error("customer_id", "is required"));
            None
        } else {
            match Uuid::parse_str(self.customer_id.trim()) {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.push(field_error("customer_id", "must be a valid UUID"));
                    None
                }
            }
        };

        let amount_cents = match self.amount.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount >= 0.0 => Some(money::to_cents(amount)),
            Ok(_) => {
                errors.push(field_error("amount", "must be a non-negative number"));
                None
            }
            Err(_) => {
                errors.push(field_error("amount", "must be a number"));
                None
            }
        };

        let status = match InvoiceStatus::parse(self.status.trim()) {
            Some(status) => Some(status),
            None => {
                errors.push(field_error("status", "must be 'pending' or 'paid'"));
                None
            }
        };

        match (customer_id, amount_cents, status) {
            (Some(customer_id), Some(amount_cents), Some(status)) if errors.is_empty() => {
                Ok(InvoiceInput {
                    customer_id,
                    amount_cents,
                    status,
                })
            }
            _ => Err(ValidationError::FieldErrors(errors)),
        }
    }
}

/// Raw sign-in form fields
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignInFormData {
    pub email: String,
    pub password: String,
}

fn field_error(field: &str, message: &str) -> FieldValidationError {
    FieldValidationError {
        field: field.to_string(),
        message: message.to_string(),
    }
}
