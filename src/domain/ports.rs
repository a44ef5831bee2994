use uuid::Uuid;

use super::errors::DomainError;
use super::order::{NewOrderInput, OrderListResult, OrderStatus, OrderView};
use super::promo::PromoCode;

pub trait OrderRepository: Send + Sync + 'static {
    /// Price the cart, redeem the promo (if any) and persist the order as
    /// `pending`, all in one transaction. The promo usage limit is
    /// re-verified at commit time; a concurrent redeemer losing the race
    /// gets [`DomainError::UsageLimitReached`].
    fn create(&self, input: NewOrderInput) -> Result<OrderView, DomainError>;

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError>;

    fn list(
        &self,
        page: i64,
        limit: i64,
        status: Option<OrderStatus>,
    ) -> Result<OrderListResult, DomainError>;

    /// Atomically move the order to `to` and append the matching history
    /// entry; no observer sees one write without the other.
    fn transition(
        &self,
        id: Uuid,
        to: OrderStatus,
        note: Option<String>,
        reference_number: Option<String>,
    ) -> Result<OrderView, DomainError>;

    /// Record the payment-proof asset and method name on a pending order
    /// without changing its status.
    fn attach_payment_proof(
        &self,
        id: Uuid,
        proof_url: String,
        payment_method: String,
    ) -> Result<OrderView, DomainError>;
}

pub trait PromoRepository: Send + Sync + 'static {
    /// Look up an active code by its normalized form.
    fn find_active(&self, code: &str) -> Result<Option<PromoCode>, DomainError>;
}
