use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::promo_service::PromoService;
use crate::auth::AdminUser;
use crate::db::DbPool;
use crate::domain::promo::{normalize_code, DiscountType};
use crate::errors::AppError;
use crate::infrastructure::promo_repo::DieselPromoRepository;
use crate::models::promo_code::{NewPromoCodeRow, PromoCodeRow};
use crate::schema::promo_codes;

pub type Promos = PromoService<DieselPromoRepository>;

// ── DTOs ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ValidatePromoRequest {
    pub code: String,
    /// Current cart subtotal as a decimal string.
    pub subtotal: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidatePromoResponse {
    /// Normalized code, to be echoed back at checkout.
    pub code: String,
    pub discount_amount: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PromoCodeRequest {
    pub code: String,
    /// "percentage" or "fixed".
    pub discount_type: String,
    pub discount_value: String,
    pub min_subtotal: Option<String>,
    pub max_discount: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub usage_limit: Option<i32>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PromoCodeResponse {
    pub id: Uuid,
    pub code: String,
    pub discount_type: String,
    pub discount_value: String,
    pub min_subtotal: Option<String>,
    pub max_discount: Option<String>,
    pub expires_at: Option<String>,
    pub usage_limit: Option<i32>,
    pub usage_count: i32,
    pub is_active: bool,
    pub created_at: String,
}

impl From<PromoCodeRow> for PromoCodeResponse {
    fn from(row: PromoCodeRow) -> Self {
        PromoCodeResponse {
            id: row.id,
            code: row.code,
            discount_type: row.discount_type,
            discount_value: row.discount_value.to_string(),
            min_subtotal: row.min_subtotal.map(|v| v.to_string()),
            max_discount: row.max_discount.map(|v| v.to_string()),
            expires_at: row.expires_at.map(|t| t.to_rfc3339()),
            usage_limit: row.usage_limit,
            usage_count: row.usage_count,
            is_active: row.is_active,
            created_at: row.created_at.to_rfc3339(),
        }
    }
}

fn parse_amount(field: &str, raw: &str) -> Result<BigDecimal, AppError> {
    BigDecimal::from_str(raw).map_err(|e| AppError::BadRequest {
        code: "invalid_input",
        message: format!("Invalid {} '{}': {}", field, raw, e),
    })
}

struct ParsedPromo {
    code: String,
    discount_type: DiscountType,
    discount_value: BigDecimal,
    min_subtotal: Option<BigDecimal>,
    max_discount: Option<BigDecimal>,
}

fn parse_request(body: &PromoCodeRequest) -> Result<ParsedPromo, AppError> {
    let code = normalize_code(&body.code);
    if code.is_empty() {
        return Err(AppError::BadRequest {
            code: "invalid_input",
            message: "code must not be empty".to_string(),
        });
    }
    let discount_type = DiscountType::parse(&body.discount_type).map_err(AppError::from)?;
    let discount_value = parse_amount("discount_value", &body.discount_value)?;
    if discount_value < BigDecimal::from(0) {
        return Err(AppError::BadRequest {
            code: "invalid_input",
            message: "discount_value must not be negative".to_string(),
        });
    }
    if discount_type == DiscountType::Percentage && discount_value > BigDecimal::from(100) {
        return Err(AppError::BadRequest {
            code: "invalid_input",
            message: "percentage discount must not exceed 100".to_string(),
        });
    }
    let min_subtotal = body
        .min_subtotal
        .as_deref()
        .map(|v| parse_amount("min_subtotal", v))
        .transpose()?;
    let max_discount = body
        .max_discount
        .as_deref()
        .map(|v| parse_amount("max_discount", v))
        .transpose()?;

    Ok(ParsedPromo {
        code,
        discount_type,
        discount_value,
        min_subtotal,
        max_discount,
    })
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/promo-codes/validate
///
/// Pure check: reports whether the code is redeemable for the given subtotal
/// and what it would discount. The usage count moves only at checkout.
#[utoipa::path(
    post,
    path = "/api/promo-codes/validate",
    request_body = ValidatePromoRequest,
    responses(
        (status = 200, description = "Code is redeemable", body = ValidatePromoResponse),
        (status = 400, description = "Expired code or minimum subtotal not met"),
        (status = 404, description = "No such active code"),
        (status = 409, description = "Usage limit reached"),
    ),
    tag = "promo-codes"
)]
pub async fn validate_promo(
    service: web::Data<Promos>,
    body: web::Json<ValidatePromoRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let subtotal = parse_amount("subtotal", &body.subtotal)?;

    let quote = web::block(move || service.validate(&body.code, &subtotal))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(AppError::from)?;

    Ok(HttpResponse::Ok().json(ValidatePromoResponse {
        code: quote.code,
        discount_amount: quote.discount_amount.to_string(),
    }))
}

/// GET /api/promo-codes (admin)
#[utoipa::path(
    get,
    path = "/api/promo-codes",
    responses(
        (status = 200, description = "All promo codes", body = [PromoCodeResponse]),
        (status = 401, description = "Missing or invalid admin token"),
    ),
    tag = "promo-codes"
)]
pub async fn list_promos(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let rows = web::block(move || {
        let mut conn = pool.get()?;
        let rows: Vec<PromoCodeRow> = promo_codes::table
            .select(PromoCodeRow::as_select())
            .order(promo_codes::created_at.desc())
            .load(&mut conn)?;
        Ok::<_, AppError>(rows)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    let response: Vec<PromoCodeResponse> = rows.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// POST /api/promo-codes (admin)
#[utoipa::path(
    post,
    path = "/api/promo-codes",
    request_body = PromoCodeRequest,
    responses(
        (status = 201, description = "Promo code created", body = PromoCodeResponse),
        (status = 400, description = "Invalid code or discount definition"),
        (status = 401, description = "Missing or invalid admin token"),
    ),
    tag = "promo-codes"
)]
pub async fn create_promo(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    body: web::Json<PromoCodeRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let parsed = parse_request(&body)?;

    let row = web::block(move || {
        let mut conn = pool.get()?;
        let id = Uuid::new_v4();
        diesel::insert_into(promo_codes::table)
            .values(&NewPromoCodeRow {
                id,
                code: parsed.code,
                discount_type: parsed.discount_type.as_str().to_string(),
                discount_value: parsed.discount_value,
                min_subtotal: parsed.min_subtotal,
                max_discount: parsed.max_discount,
                expires_at: body.expires_at,
                usage_limit: body.usage_limit,
                is_active: body.is_active,
            })
            .execute(&mut conn)?;
        let row = promo_codes::table
            .find(id)
            .select(PromoCodeRow::as_select())
            .first(&mut conn)?;
        Ok::<_, AppError>(row)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(PromoCodeResponse::from(row)))
}

/// PUT /api/promo-codes/{id} (admin)
///
/// Full replace of the rule definition; the usage count is preserved.
#[utoipa::path(
    put,
    path = "/api/promo-codes/{id}",
    params(("id" = Uuid, Path, description = "Promo code UUID")),
    request_body = PromoCodeRequest,
    responses(
        (status = 200, description = "Promo code updated", body = PromoCodeResponse),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 404, description = "Promo code not found"),
    ),
    tag = "promo-codes"
)]
pub async fn update_promo(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<PromoCodeRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();
    let parsed = parse_request(&body)?;

    let row = web::block(move || {
        let mut conn = pool.get()?;
        let updated = diesel::update(promo_codes::table.find(id))
            .set((
                promo_codes::code.eq(parsed.code),
                promo_codes::discount_type.eq(parsed.discount_type.as_str()),
                promo_codes::discount_value.eq(parsed.discount_value),
                promo_codes::min_subtotal.eq(parsed.min_subtotal),
                promo_codes::max_discount.eq(parsed.max_discount),
                promo_codes::expires_at.eq(body.expires_at),
                promo_codes::usage_limit.eq(body.usage_limit),
                promo_codes::is_active.eq(body.is_active),
            ))
            .execute(&mut conn)?;
        if updated == 0 {
            return Err(AppError::not_found("Promo code not found"));
        }
        let row = promo_codes::table
            .find(id)
            .select(PromoCodeRow::as_select())
            .first(&mut conn)?;
        Ok::<_, AppError>(row)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(PromoCodeResponse::from(row)))
}

/// DELETE /api/promo-codes/{id} (admin)
#[utoipa::path(
    delete,
    path = "/api/promo-codes/{id}",
    params(("id" = Uuid, Path, description = "Promo code UUID")),
    responses(
        (status = 200, description = "Promo code deleted"),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 404, description = "Promo code not found"),
    ),
    tag = "promo-codes"
)]
pub async fn delete_promo(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    web::block(move || {
        let mut conn = pool.get()?;
        let deleted = diesel::delete(promo_codes::table.find(id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(AppError::not_found("Promo code not found"));
        }
        Ok::<_, AppError>(())
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Promo code deleted" })))
}
