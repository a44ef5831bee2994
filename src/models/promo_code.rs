use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::promo::{DiscountType, PromoCode};
use crate::schema::promo_codes;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = promo_codes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PromoCodeRow {
    pub id: Uuid,
    pub code: String,
    pub discount_type: String,
    pub discount_value: BigDecimal,
    pub min_subtotal: Option<BigDecimal>,
    pub max_discount: Option<BigDecimal>,
    pub expires_at: Option<DateTime<Utc>>,
    pub usage_limit: Option<i32>,
    pub usage_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl PromoCodeRow {
    pub fn into_domain(self) -> Result<PromoCode, DomainError> {
        Ok(PromoCode {
            id: self.id,
            code: self.code,
            discount_type: DiscountType::parse(&self.discount_type)?,
            discount_value: self.discount_value,
            min_subtotal: self.min_subtotal,
            max_discount: self.max_discount,
            expires_at: self.expires_at,
            usage_limit: self.usage_limit,
            usage_count: self.usage_count,
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = promo_codes)]
pub struct NewPromoCodeRow {
    pub id: Uuid,
    pub code: String,
    pub discount_type: String,
    pub discount_value: BigDecimal,
    pub min_subtotal: Option<BigDecimal>,
    pub max_discount: Option<BigDecimal>,
    pub expires_at: Option<DateTime<Utc>>,
    pub usage_limit: Option<i32>,
    pub is_active: bool,
}
