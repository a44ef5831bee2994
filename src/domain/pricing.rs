use bigdecimal::{BigDecimal, RoundingMode, Zero};

use super::errors::DomainError;

/// One cart line as submitted at checkout. Prices are snapshots of the
/// catalog at the time the customer built the cart.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub product_name: String,
    pub variation_name: Option<String>,
    pub unit_price: BigDecimal,
    pub quantity: i32,
}

/// Global pricing settings, read fresh per checkout from the settings store
/// and threaded through explicitly rather than held as ambient state.
#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub service_charge: BigDecimal,
    pub tax_percent: BigDecimal,
    pub payment_window_minutes: i32,
}

/// Deterministic charge breakdown. Upholds
/// `total == subtotal - discount + service_charge + tax`, every term
/// rounded to the rupee's minor unit.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingBreakdown {
    pub subtotal: BigDecimal,
    pub discount_amount: BigDecimal,
    pub service_charge: BigDecimal,
    pub tax_amount: BigDecimal,
    pub total_amount: BigDecimal,
}

/// Round to the currency's minor unit (2 decimal places, half-up).
pub fn round_minor(amount: &BigDecimal) -> BigDecimal {
    amount.with_scale_round(2, RoundingMode::HalfUp)
}

/// Validate the cart shape and return its rounded subtotal.
///
/// A cart must contain at least one line; every line needs a quantity of at
/// least 1 and a non-negative unit price.
pub fn cart_subtotal(lines: &[CartLine]) -> Result<BigDecimal, DomainError> {
    if lines.is_empty() {
        return Err(DomainError::InvalidCart("cart is empty".to_string()));
    }

    let mut subtotal = BigDecimal::zero();
    for line in lines {
        if line.quantity < 1 {
            return Err(DomainError::InvalidCart(format!(
                "quantity must be at least 1 for '{}'",
                line.product_name
            )));
        }
        if line.unit_price < BigDecimal::zero() {
            return Err(DomainError::InvalidCart(format!(
                "unit price must not be negative for '{}'",
                line.product_name
            )));
        }
        subtotal += &line.unit_price * BigDecimal::from(line.quantity);
    }

    Ok(round_minor(&subtotal))
}

/// Price a cart, in fixed order: subtotal, discount (clamped so the total
/// never goes negative), tax on the post-discount amount, then the flat
/// service charge.
pub fn price_cart(
    lines: &[CartLine],
    discount: &BigDecimal,
    settings: &StoreSettings,
) -> Result<PricingBreakdown, DomainError> {
    let subtotal = cart_subtotal(lines)?;

    // The discount can zero out the product cost but never push past it.
    let discount = if *discount > subtotal {
        subtotal.clone()
    } else {
        round_minor(discount)
    };

    let after_discount = &subtotal - &discount;
    let tax_amount = round_minor(&(&after_discount * &settings.tax_percent / BigDecimal::from(100)));
    let service_charge = round_minor(&settings.service_charge);
    let total_amount = &after_discount + &service_charge + &tax_amount;

    Ok(PricingBreakdown {
        subtotal,
        discount_amount: discount,
        service_charge,
        tax_amount,
        total_amount,
    })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    fn line(price: &str, quantity: i32) -> CartLine {
        CartLine {
            product_name: "Netflix Premium".to_string(),
            variation_name: Some("1 Month".to_string()),
            unit_price: dec(price),
            quantity,
        }
    }

    fn settings(service_charge: &str, tax_percent: &str) -> StoreSettings {
        StoreSettings {
            service_charge: dec(service_charge),
            tax_percent: dec(tax_percent),
            payment_window_minutes: 10,
        }
    }

    #[test]
    fn subtotal_sums_price_times_quantity() {
        let lines = vec![line("449", 2), line("140", 3)];
        assert_eq!(cart_subtotal(&lines).unwrap(), dec("1318.00"));
    }

    #[test]
    fn empty_cart_is_invalid() {
        let err = cart_subtotal(&[]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidCart(_)));
    }

    #[test]
    fn zero_quantity_is_invalid() {
        let err = cart_subtotal(&[line("449", 0)]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidCart(_)));
    }

    #[test]
    fn negative_price_is_invalid() {
        let err = cart_subtotal(&[line("-1", 1)]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidCart(_)));
    }

    #[test]
    fn free_item_is_allowed() {
        assert_eq!(cart_subtotal(&[line("0", 1)]).unwrap(), dec("0.00"));
    }

    #[test]
    fn breakdown_matches_capped_promo_scenario() {
        // Subtotal 1000, discount 80 (10% capped), no service charge, 13% tax.
        let lines = vec![line("1000", 1)];
        let breakdown = price_cart(&lines, &dec("80"), &settings("0", "13")).unwrap();

        assert_eq!(breakdown.subtotal, dec("1000.00"));
        assert_eq!(breakdown.discount_amount, dec("80.00"));
        assert_eq!(breakdown.tax_amount, dec("119.60"));
        assert_eq!(breakdown.total_amount, dec("1039.60"));
    }

    #[test]
    fn breakdown_identity_holds() {
        let lines = vec![line("399", 1), line("999", 2)];
        let breakdown = price_cart(&lines, &dec("50"), &settings("25", "13")).unwrap();

        let expected = &breakdown.subtotal - &breakdown.discount_amount
            + &breakdown.service_charge
            + &breakdown.tax_amount;
        assert_eq!(breakdown.total_amount, expected);
    }

    #[test]
    fn discount_is_clamped_to_subtotal() {
        let lines = vec![line("100", 1)];
        let breakdown = price_cart(&lines, &dec("500"), &settings("50", "13")).unwrap();

        assert_eq!(breakdown.discount_amount, dec("100.00"));
        assert_eq!(breakdown.tax_amount, dec("0.00"));
        // The flat charge survives even a fully discounted cart.
        assert_eq!(breakdown.total_amount, dec("50.00"));
    }

    #[test]
    fn total_is_never_below_service_charge() {
        let lines = vec![line("10", 1)];
        let breakdown = price_cart(&lines, &dec("10"), &settings("30", "0")).unwrap();
        assert!(breakdown.total_amount >= breakdown.service_charge);
    }

    #[test]
    fn tax_rounds_half_up() {
        // 333 * 13% = 43.29 exactly; 99.99 * 13% = 12.9987 -> 13.00.
        let breakdown =
            price_cart(&[line("99.99", 1)], &BigDecimal::zero(), &settings("0", "13")).unwrap();
        assert_eq!(breakdown.tax_amount, dec("13.00"));
    }
}
