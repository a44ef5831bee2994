use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;
use super::pricing::round_minor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountType {
    Percentage,
    Fixed,
}

impl DiscountType {
    pub fn as_str(self) -> &'static str {
        match self {
            DiscountType::Percentage => "percentage",
            DiscountType::Fixed => "fixed",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "percentage" => Ok(DiscountType::Percentage),
            "fixed" => Ok(DiscountType::Fixed),
            other => Err(DomainError::InvalidInput(format!(
                "unknown discount type '{}'",
                other
            ))),
        }
    }
}

/// A redeemable discount rule. Codes are stored upper-case; matching is
/// case-insensitive via [`normalize_code`].
#[derive(Debug, Clone)]
pub struct PromoCode {
    pub id: Uuid,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: BigDecimal,
    pub min_subtotal: Option<BigDecimal>,
    pub max_discount: Option<BigDecimal>,
    pub expires_at: Option<DateTime<Utc>>,
    pub usage_limit: Option<i32>,
    pub usage_count: i32,
    pub is_active: bool,
}

/// Canonical form used for storage and lookup.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

impl PromoCode {
    /// Pure redeemability check. Checks run in a fixed order so each failure
    /// surfaces its own kind; nothing is mutated here. The usage count is
    /// consumed separately, atomically with order creation.
    pub fn validate(&self, now: DateTime<Utc>, subtotal: &BigDecimal) -> Result<BigDecimal, DomainError> {
        if let Some(expires_at) = self.expires_at {
            if expires_at < now {
                return Err(DomainError::CodeExpired);
            }
        }
        if let Some(limit) = self.usage_limit {
            if self.usage_count >= limit {
                return Err(DomainError::UsageLimitReached);
            }
        }
        if let Some(minimum) = &self.min_subtotal {
            if subtotal < minimum {
                return Err(DomainError::MinimumNotMet {
                    minimum: minimum.to_string(),
                });
            }
        }
        Ok(self.discount_for(subtotal))
    }

    /// Discount amount for a given subtotal. Percentage discounts respect
    /// the configured cap; fixed discounts never exceed the subtotal.
    pub fn discount_for(&self, subtotal: &BigDecimal) -> BigDecimal {
        match self.discount_type {
            DiscountType::Percentage => {
                let raw = round_minor(&(subtotal * &self.discount_value / BigDecimal::from(100)));
                match &self.max_discount {
                    Some(cap) if raw > *cap => round_minor(cap),
                    _ => raw,
                }
            }
            DiscountType::Fixed => {
                if self.discount_value > *subtotal {
                    round_minor(subtotal)
                } else {
                    round_minor(&self.discount_value)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::Duration;

    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    fn promo(discount_type: DiscountType, value: &str) -> PromoCode {
        PromoCode {
            id: Uuid::new_v4(),
            code: "SAVE10".to_string(),
            discount_type,
            discount_value: dec(value),
            min_subtotal: None,
            max_discount: None,
            expires_at: None,
            usage_limit: None,
            usage_count: 0,
            is_active: true,
        }
    }

    #[test]
    fn normalize_trims_and_uppercases() {
        assert_eq!(normalize_code("  save10 "), "SAVE10");
    }

    #[test]
    fn percentage_discount_is_capped() {
        // 10% of 1000 is 100, but the cap holds it at 80.
        let mut p = promo(DiscountType::Percentage, "10");
        p.max_discount = Some(dec("80"));
        assert_eq!(p.discount_for(&dec("1000")), dec("80.00"));
    }

    #[test]
    fn percentage_discount_below_cap_is_untouched() {
        let mut p = promo(DiscountType::Percentage, "10");
        p.max_discount = Some(dec("80"));
        assert_eq!(p.discount_for(&dec("500")), dec("50.00"));
    }

    #[test]
    fn fixed_discount_never_exceeds_subtotal() {
        let p = promo(DiscountType::Fixed, "500");
        assert_eq!(p.discount_for(&dec("120")), dec("120.00"));
        assert_eq!(p.discount_for(&dec("900")), dec("500.00"));
    }

    #[test]
    fn expired_code_is_rejected() {
        let mut p = promo(DiscountType::Fixed, "50");
        p.expires_at = Some(Utc::now() - Duration::hours(1));
        let err = p.validate(Utc::now(), &dec("1000")).unwrap_err();
        assert!(matches!(err, DomainError::CodeExpired));
    }

    #[test]
    fn future_expiry_is_accepted() {
        let mut p = promo(DiscountType::Fixed, "50");
        p.expires_at = Some(Utc::now() + Duration::hours(1));
        assert_eq!(p.validate(Utc::now(), &dec("1000")).unwrap(), dec("50.00"));
    }

    #[test]
    fn exhausted_usage_limit_is_rejected() {
        let mut p = promo(DiscountType::Fixed, "50");
        p.usage_limit = Some(3);
        p.usage_count = 3;
        let err = p.validate(Utc::now(), &dec("1000")).unwrap_err();
        assert!(matches!(err, DomainError::UsageLimitReached));
    }

    #[test]
    fn minimum_subtotal_is_enforced() {
        let mut p = promo(DiscountType::Percentage, "10");
        p.min_subtotal = Some(dec("500"));
        let err = p.validate(Utc::now(), &dec("499")).unwrap_err();
        assert!(matches!(err, DomainError::MinimumNotMet { .. }));
        assert!(p.validate(Utc::now(), &dec("500")).is_ok());
    }

    #[test]
    fn expiry_is_checked_before_usage_limit() {
        let mut p = promo(DiscountType::Fixed, "50");
        p.expires_at = Some(Utc::now() - Duration::hours(1));
        p.usage_limit = Some(1);
        p.usage_count = 1;
        let err = p.validate(Utc::now(), &dec("1000")).unwrap_err();
        assert!(matches!(err, DomainError::CodeExpired));
    }
}
