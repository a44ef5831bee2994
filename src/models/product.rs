use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::{product_variations, products};

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub category_id: Option<Uuid>,
    pub is_active: bool,
    pub is_sold_out: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = products)]
pub struct NewProduct {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub category_id: Option<Uuid>,
    pub is_active: bool,
    pub is_sold_out: bool,
}

#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, Associations,
)]
#[diesel(table_name = product_variations)]
#[diesel(belongs_to(Product))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductVariation {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub price: BigDecimal,
    pub original_price: Option<BigDecimal>,
    pub description: Option<String>,
    pub position: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = product_variations)]
pub struct NewProductVariation {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub price: BigDecimal,
    pub original_price: Option<BigDecimal>,
    pub description: Option<String>,
    pub position: i32,
}
