//! The single store_settings row (id = 1) that drives pricing: service
//! charge, tax percentage and the payment window for pending orders.

use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

use crate::auth::AdminUser;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::settings::StoreSettingsRow;
use crate::schema::store_settings;

#[derive(Debug, Serialize, ToSchema)]
pub struct SettingsResponse {
    pub service_charge: String,
    pub tax_percent: String,
    pub payment_window_minutes: i32,
}

impl From<StoreSettingsRow> for SettingsResponse {
    fn from(row: StoreSettingsRow) -> Self {
        SettingsResponse {
            service_charge: row.service_charge.to_string(),
            tax_percent: row.tax_percent.to_string(),
            payment_window_minutes: row.payment_window_minutes,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSettingsRequest {
    /// Flat service charge added to every order, as a decimal string.
    pub service_charge: String,
    /// Tax percentage applied after discount, as a decimal string.
    pub tax_percent: String,
    pub payment_window_minutes: i32,
}

fn parse_amount(field: &str, raw: &str) -> Result<BigDecimal, AppError> {
    let value = BigDecimal::from_str(raw).map_err(|e| AppError::BadRequest {
        code: "invalid_input",
        message: format!("Invalid {} '{}': {}", field, raw, e),
    })?;
    if value < BigDecimal::from(0) {
        return Err(AppError::BadRequest {
            code: "invalid_input",
            message: format!("{} must not be negative", field),
        });
    }
    Ok(value)
}

/// GET /api/settings
#[utoipa::path(
    get,
    path = "/api/settings",
    responses((status = 200, description = "Current store settings", body = SettingsResponse)),
    tag = "settings"
)]
pub async fn get_settings(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let row = web::block(move || {
        let mut conn = pool.get()?;
        let row = store_settings::table
            .find(1)
            .select(StoreSettingsRow::as_select())
            .first(&mut conn)?;
        Ok::<_, AppError>(row)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(SettingsResponse::from(row)))
}

/// PUT /api/settings (admin)
#[utoipa::path(
    put,
    path = "/api/settings",
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Settings updated", body = SettingsResponse),
        (status = 400, description = "Invalid amounts"),
        (status = 401, description = "Missing or invalid admin token"),
    ),
    tag = "settings"
)]
pub async fn update_settings(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    body: web::Json<UpdateSettingsRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let service_charge = parse_amount("service_charge", &body.service_charge)?;
    let tax_percent = parse_amount("tax_percent", &body.tax_percent)?;
    if body.payment_window_minutes < 1 {
        return Err(AppError::BadRequest {
            code: "invalid_input",
            message: "payment_window_minutes must be at least 1".to_string(),
        });
    }
    let payment_window_minutes = body.payment_window_minutes;

    let row = web::block(move || {
        let mut conn = pool.get()?;
        diesel::update(store_settings::table.find(1))
            .set((
                store_settings::service_charge.eq(service_charge),
                store_settings::tax_percent.eq(tax_percent),
                store_settings::payment_window_minutes.eq(payment_window_minutes),
                store_settings::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;
        let row = store_settings::table
            .find(1)
            .select(StoreSettingsRow::as_select())
            .first(&mut conn)?;
        Ok::<_, AppError>(row)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(SettingsResponse::from(row)))
}
