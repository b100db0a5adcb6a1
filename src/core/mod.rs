//! Core building blocks: errors, money, filtering, pagination, forms, and
//! the store/authenticator traits

pub mod error;
pub mod filter;
pub mod forms;
pub mod money;
pub mod pagination;
pub mod store;

pub use error::{
    AuthError, ConfigError, DashResult, Error, ErrorResponse, FieldValidationError,
    StorageError, ValidationError,
};
pub use forms::{InvoiceFormData, InvoiceInput, SignInFormData};
pub use store::{Authenticator, DashboardStore, StoreError};
