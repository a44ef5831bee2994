use thiserror::Error;

/// Recoverable, user-facing failures of the order subsystem. Every variant
/// maps to a rejected request with a distinguishing kind; none is fatal.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid cart: {0}")]
    InvalidCart(String),

    #[error("Promo code not found")]
    CodeNotFound,

    #[error("Promo code has expired")]
    CodeExpired,

    #[error("Promo code usage limit reached")]
    UsageLimitReached,

    #[error("Cart subtotal does not meet the minimum of {minimum} for this code")]
    MinimumNotMet { minimum: String },

    #[error("Order not found")]
    OrderNotFound,

    #[error("Invalid status transition from '{from}' to '{to}'")]
    InvalidTransition { from: String, to: String },

    #[error("Invalid order state: {0}")]
    InvalidState(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
