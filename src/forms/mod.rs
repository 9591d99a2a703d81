//! Form definitions backing the versment entry dialog.

use thiserror::Error;
use validator::ValidationErrors;

pub mod versment;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
///
/// Every variant is user-correctable: the form stays open for editing.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("no valid client selected")]
    InvalidClient,

    #[error("amount is required")]
    AmountRequired,

    #[error("type is required")]
    TypeRequired,

    #[error("payment date is required")]
    PaymentDateRequired,

    #[error("year concerned is required")]
    YearConcernedRequired,

    #[error("invalid amount format")]
    InvalidAmount,

    #[error("invalid date format (YYYY-MM-DD)")]
    InvalidDate,

    #[error("the dialog is already closed")]
    DialogClosed,
}
