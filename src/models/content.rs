//! Rows for the lightweight storefront content tables: FAQs, social links
//! and manual payment methods.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::schema::{faqs, payment_methods, social_links};

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, ToSchema)]
#[diesel(table_name = faqs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Faq {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = faqs)]
pub struct NewFaq {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub position: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, ToSchema)]
#[diesel(table_name = social_links)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SocialLink {
    pub id: Uuid,
    pub platform: String,
    pub url: String,
    pub icon: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = social_links)]
pub struct NewSocialLink {
    pub id: Uuid,
    pub platform: String,
    pub url: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, ToSchema)]
#[diesel(table_name = payment_methods)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PaymentMethod {
    pub id: Uuid,
    pub name: String,
    pub instructions: Option<String>,
    pub qr_image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = payment_methods)]
pub struct NewPaymentMethod {
    pub id: Uuid,
    pub name: String,
    pub instructions: Option<String>,
    pub qr_image_url: Option<String>,
    pub is_active: bool,
}
