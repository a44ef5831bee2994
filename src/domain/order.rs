use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;
use super::pricing::CartLine;

/// Fulfillment progress. The transition graph is strict:
/// `pending -> confirmed -> completed`, with `cancelled` reachable from the
/// two non-terminal states. Terminal states have no outgoing edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::InvalidInput(format!(
                "unknown order status '{}'",
                other
            ))),
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    pub fn can_transition_to(self, to: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, to),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
        )
    }

    /// Graph check as a result, with the error carrying both endpoints.
    pub fn check_transition(self, to: OrderStatus) -> Result<(), DomainError> {
        if self.can_transition_to(to) {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition {
                from: self.as_str().to_string(),
                to: to.as_str().to_string(),
            })
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checkout submission, already normalized by the application layer.
#[derive(Debug, Clone)]
pub struct NewOrderInput {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub items: Vec<CartLine>,
    pub promo_code: Option<String>,
    pub remark: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OrderItemView {
    pub product_name: String,
    pub variation_name: Option<String>,
    pub unit_price: BigDecimal,
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct StatusHistoryEntry {
    pub old_status: String,
    pub new_status: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub items: Vec<OrderItemView>,
    pub subtotal: BigDecimal,
    pub discount_amount: BigDecimal,
    pub service_charge: BigDecimal,
    pub tax_amount: BigDecimal,
    pub total_amount: BigDecimal,
    pub promo_code: Option<String>,
    pub remark: Option<String>,
    pub status: OrderStatus,
    pub reference_number: Option<String>,
    pub payment_proof_url: Option<String>,
    pub payment_method: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub history: Vec<StatusHistoryEntry>,
}

#[derive(Debug, Clone)]
pub struct OrderListResult {
    pub items: Vec<OrderView>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::OrderStatus::*;
    use super::*;

    #[test]
    fn linear_path_is_allowed() {
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Completed));
    }

    #[test]
    fn cancellation_is_allowed_before_completion() {
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
    }

    #[test]
    fn completing_a_pending_order_requires_confirmation_first() {
        assert!(!Pending.can_transition_to(Completed));
        let err = Pending.check_transition(Completed).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }

    #[test]
    fn terminal_states_have_no_outgoing_transitions() {
        for terminal in [Completed, Cancelled] {
            assert!(terminal.is_terminal());
            for target in [Pending, Confirmed, Completed, Cancelled] {
                assert!(!terminal.can_transition_to(target));
            }
        }
    }

    #[test]
    fn self_transitions_are_rejected() {
        for status in [Pending, Confirmed, Completed, Cancelled] {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [Pending, Confirmed, Completed, Cancelled] {
            assert_eq!(OrderStatus::parse(status.as_str()).unwrap(), status);
        }
        assert!(OrderStatus::parse("shipped").is_err());
    }
}
