use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrderInput, OrderListResult, OrderStatus, OrderView};
use crate::domain::ports::OrderRepository;

pub struct OrderService<R> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validate the checkout submission and persist it as a pending order.
    /// Pricing, promo redemption and the deadline stamp all happen inside
    /// the repository transaction.
    pub fn create_order(&self, mut input: NewOrderInput) -> Result<OrderView, DomainError> {
        input.customer_name = input.customer_name.trim().to_string();
        input.customer_phone = input.customer_phone.trim().to_string();
        if input.customer_name.is_empty() {
            return Err(DomainError::InvalidInput(
                "customer name is required".to_string(),
            ));
        }
        if input.customer_phone.is_empty() {
            return Err(DomainError::InvalidInput(
                "customer phone is required".to_string(),
            ));
        }

        self.repo.create(input)
    }

    pub fn get_order(&self, id: Uuid) -> Result<OrderView, DomainError> {
        self.repo.find_by_id(id)?.ok_or(DomainError::OrderNotFound)
    }

    pub fn list_orders(
        &self,
        page: i64,
        limit: i64,
        status: Option<OrderStatus>,
    ) -> Result<OrderListResult, DomainError> {
        self.repo.list(page, limit, status)
    }

    pub fn transition(
        &self,
        id: Uuid,
        to: OrderStatus,
        note: Option<String>,
        reference_number: Option<String>,
    ) -> Result<OrderView, DomainError> {
        self.repo.transition(id, to, note, reference_number)
    }

    pub fn attach_payment_proof(
        &self,
        id: Uuid,
        proof_url: String,
        payment_method: String,
    ) -> Result<OrderView, DomainError> {
        let proof_url = proof_url.trim().to_string();
        if proof_url.is_empty() {
            return Err(DomainError::InvalidInput(
                "payment proof reference is required".to_string(),
            ));
        }
        self.repo.attach_payment_proof(id, proof_url, payment_method)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use super::*;
    use crate::domain::pricing::CartLine;

    /// Repository double that records nothing and returns an error if the
    /// service ever delegates; lets us test pre-validation in isolation.
    struct RejectingRepo;

    impl OrderRepository for RejectingRepo {
        fn create(&self, _input: NewOrderInput) -> Result<OrderView, DomainError> {
            Err(DomainError::Internal("unexpected delegation".to_string()))
        }
        fn find_by_id(&self, _id: Uuid) -> Result<Option<OrderView>, DomainError> {
            Ok(None)
        }
        fn list(
            &self,
            _page: i64,
            _limit: i64,
            _status: Option<OrderStatus>,
        ) -> Result<OrderListResult, DomainError> {
            Ok(OrderListResult {
                items: vec![],
                total: 0,
            })
        }
        fn transition(
            &self,
            _id: Uuid,
            _to: OrderStatus,
            _note: Option<String>,
            _reference_number: Option<String>,
        ) -> Result<OrderView, DomainError> {
            Err(DomainError::OrderNotFound)
        }
        fn attach_payment_proof(
            &self,
            _id: Uuid,
            _proof_url: String,
            _payment_method: String,
        ) -> Result<OrderView, DomainError> {
            Err(DomainError::Internal("unexpected delegation".to_string()))
        }
    }

    fn checkout(name: &str, phone: &str) -> NewOrderInput {
        NewOrderInput {
            customer_name: name.to_string(),
            customer_phone: phone.to_string(),
            customer_email: None,
            items: vec![CartLine {
                product_name: "PUBG UC".to_string(),
                variation_name: Some("60 UC".to_string()),
                unit_price: BigDecimal::from_str("140").unwrap(),
                quantity: 1,
            }],
            promo_code: None,
            remark: None,
        }
    }

    #[test]
    fn blank_customer_name_is_rejected() {
        let service = OrderService::new(RejectingRepo);
        let err = service.create_order(checkout("   ", "+977980")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn blank_customer_phone_is_rejected() {
        let service = OrderService::new(RejectingRepo);
        let err = service.create_order(checkout("Sujan", "")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn missing_order_maps_to_order_not_found() {
        let service = OrderService::new(RejectingRepo);
        let err = service.get_order(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, DomainError::OrderNotFound));
    }

    #[test]
    fn blank_proof_reference_is_rejected() {
        let service = OrderService::new(RejectingRepo);
        let err = service
            .attach_payment_proof(Uuid::new_v4(), "  ".to_string(), "eSewa".to_string())
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }
}
