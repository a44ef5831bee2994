use bigdecimal::BigDecimal;
use chrono::Utc;

use crate::domain::errors::DomainError;
use crate::domain::ports::PromoRepository;
use crate::domain::promo::normalize_code;

/// Outcome of a successful validation, for the client to carry into order
/// submission. Nothing is redeemed at this point.
#[derive(Debug, Clone)]
pub struct PromoQuote {
    pub code: String,
    pub discount_amount: BigDecimal,
}

pub struct PromoService<P> {
    repo: P,
}

impl<P: PromoRepository> PromoService<P> {
    pub fn new(repo: P) -> Self {
        Self { repo }
    }

    /// Pure redeemability check against the current cart subtotal. Usage
    /// counts move only when an order is created.
    pub fn validate(&self, raw_code: &str, subtotal: &BigDecimal) -> Result<PromoQuote, DomainError> {
        let code = normalize_code(raw_code);
        let promo = self
            .repo
            .find_active(&code)?
            .ok_or(DomainError::CodeNotFound)?;
        let discount_amount = promo.validate(Utc::now(), subtotal)?;

        Ok(PromoQuote {
            code: promo.code,
            discount_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use uuid::Uuid;

    use super::*;
    use crate::domain::promo::{DiscountType, PromoCode};

    struct OneCodeRepo(PromoCode);

    impl PromoRepository for OneCodeRepo {
        fn find_active(&self, code: &str) -> Result<Option<PromoCode>, DomainError> {
            Ok((self.0.code == code).then(|| self.0.clone()))
        }
    }

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn save10() -> PromoCode {
        PromoCode {
            id: Uuid::new_v4(),
            code: "SAVE10".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: dec("10"),
            min_subtotal: None,
            max_discount: Some(dec("80")),
            expires_at: None,
            usage_limit: None,
            usage_count: 0,
            is_active: true,
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let service = PromoService::new(OneCodeRepo(save10()));
        let quote = service.validate("  save10 ", &dec("1000")).unwrap();
        assert_eq!(quote.code, "SAVE10");
        assert_eq!(quote.discount_amount, dec("80.00"));
    }

    #[test]
    fn unknown_code_fails() {
        let service = PromoService::new(OneCodeRepo(save10()));
        let err = service.validate("SAVE20", &dec("1000")).unwrap_err();
        assert!(matches!(err, DomainError::CodeNotFound));
    }
}
