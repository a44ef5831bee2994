use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::{order_items, order_status_history, orders};

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub subtotal: BigDecimal,
    pub discount_amount: BigDecimal,
    pub service_charge: BigDecimal,
    pub tax_amount: BigDecimal,
    pub total_amount: BigDecimal,
    pub promo_code: Option<String>,
    pub remark: Option<String>,
    pub status: String,
    pub reference_number: Option<String>,
    pub payment_proof_url: Option<String>,
    pub payment_method: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub subtotal: BigDecimal,
    pub discount_amount: BigDecimal,
    pub service_charge: BigDecimal,
    pub tax_amount: BigDecimal,
    pub total_amount: BigDecimal,
    pub promo_code: Option<String>,
    pub remark: Option<String>,
    pub status: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, Associations,
)]
#[diesel(table_name = order_items)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItemRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_name: String,
    pub variation_name: Option<String>,
    pub unit_price: BigDecimal,
    pub quantity: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_items)]
pub struct NewOrderItemRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_name: String,
    pub variation_name: Option<String>,
    pub unit_price: BigDecimal,
    pub quantity: i32,
}

#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, Associations,
)]
#[diesel(table_name = order_status_history)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StatusHistoryRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub old_status: String,
    pub new_status: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_status_history)]
pub struct NewStatusHistoryRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub old_status: String,
    pub new_status: String,
    pub note: Option<String>,
}
