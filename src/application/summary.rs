//! Plain-text order summaries for the messaging handoff. The storefront
//! passes the rendered text to whatever chat channel the customer uses;
//! delivery itself is out of scope here.

use bigdecimal::Zero;

use crate::domain::order::OrderView;

pub fn order_summary_text(order: &OrderView) -> String {
    let mut out = String::new();

    // Short id keeps the message readable; the full UUID stays in the API.
    let short_id = &order.id.simple().to_string()[..8];
    out.push_str(&format!("Order #{}\n", short_id.to_uppercase()));
    out.push_str(&format!("Name: {}\n", order.customer_name));
    out.push_str(&format!("Phone: {}\n", order.customer_phone));
    out.push('\n');

    for item in &order.items {
        match &item.variation_name {
            Some(variation) => out.push_str(&format!(
                "- {} ({}) x{} - Rs. {}\n",
                item.product_name, variation, item.quantity, item.unit_price
            )),
            None => out.push_str(&format!(
                "- {} x{} - Rs. {}\n",
                item.product_name, item.quantity, item.unit_price
            )),
        }
    }

    out.push('\n');
    out.push_str(&format!("Subtotal: Rs. {}\n", order.subtotal));
    if !order.discount_amount.is_zero() {
        match &order.promo_code {
            Some(code) => out.push_str(&format!(
                "Discount: Rs. {} ({})\n",
                order.discount_amount, code
            )),
            None => out.push_str(&format!("Discount: Rs. {}\n", order.discount_amount)),
        }
    }
    if !order.service_charge.is_zero() {
        out.push_str(&format!("Service charge: Rs. {}\n", order.service_charge));
    }
    if !order.tax_amount.is_zero() {
        out.push_str(&format!("Tax: Rs. {}\n", order.tax_amount));
    }
    out.push_str(&format!("Total: Rs. {}\n", order.total_amount));
    out.push_str(&format!("Status: {}\n", order.status));

    if let Some(remark) = &order.remark {
        out.push_str(&format!("Remark: {}\n", remark));
    }

    out
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::domain::order::{OrderItemView, OrderStatus};

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn order() -> OrderView {
        OrderView {
            id: Uuid::new_v4(),
            customer_name: "Anisha Sharma".to_string(),
            customer_phone: "+9779812345678".to_string(),
            customer_email: None,
            items: vec![OrderItemView {
                product_name: "Netflix Premium".to_string(),
                variation_name: Some("1 Month".to_string()),
                unit_price: dec("449.00"),
                quantity: 2,
            }],
            subtotal: dec("898.00"),
            discount_amount: dec("80.00"),
            service_charge: dec("0.00"),
            tax_amount: dec("106.34"),
            total_amount: dec("924.34"),
            promo_code: Some("SAVE10".to_string()),
            remark: None,
            status: OrderStatus::Pending,
            reference_number: None,
            payment_proof_url: None,
            payment_method: None,
            expires_at: Utc::now(),
            created_at: Utc::now(),
            history: vec![],
        }
    }

    #[test]
    fn summary_lists_items_and_breakdown() {
        let text = order_summary_text(&order());
        assert!(text.contains("Name: Anisha Sharma"));
        assert!(text.contains("- Netflix Premium (1 Month) x2 - Rs. 449.00"));
        assert!(text.contains("Discount: Rs. 80.00 (SAVE10)"));
        assert!(text.contains("Total: Rs. 924.34"));
        assert!(text.contains("Status: pending"));
    }

    #[test]
    fn zero_lines_are_omitted() {
        let mut o = order();
        o.discount_amount = dec("0");
        o.promo_code = None;
        let text = order_summary_text(&o);
        assert!(!text.contains("Discount"));
        assert!(!text.contains("Service charge"));
    }
}
