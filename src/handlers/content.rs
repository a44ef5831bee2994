//! CRUD for the lightweight storefront content: FAQs, social links and the
//! manual payment methods shown at checkout. Reads are public, writes are
//! admin-only.

use actix_web::{web, HttpResponse};
use diesel::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::AdminUser;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::content::{
    Faq, NewFaq, NewPaymentMethod, NewSocialLink, PaymentMethod, SocialLink,
};
use crate::schema::{faqs, payment_methods, social_links};

// ── FAQs ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct FaqRequest {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub position: i32,
}

/// GET /api/faqs
#[utoipa::path(
    get,
    path = "/api/faqs",
    responses((status = 200, description = "FAQs in display order", body = [Faq])),
    tag = "content"
)]
pub async fn list_faqs(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let rows = web::block(move || {
        let mut conn = pool.get()?;
        let rows: Vec<Faq> = faqs::table
            .select(Faq::as_select())
            .order(faqs::position.asc())
            .load(&mut conn)?;
        Ok::<_, AppError>(rows)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(rows))
}

/// POST /api/faqs (admin)
#[utoipa::path(
    post,
    path = "/api/faqs",
    request_body = FaqRequest,
    responses(
        (status = 201, description = "FAQ created", body = Faq),
        (status = 401, description = "Missing or invalid admin token"),
    ),
    tag = "content"
)]
pub async fn create_faq(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    body: web::Json<FaqRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let row = web::block(move || {
        let mut conn = pool.get()?;
        let id = Uuid::new_v4();
        diesel::insert_into(faqs::table)
            .values(&NewFaq {
                id,
                question: body.question,
                answer: body.answer,
                position: body.position,
            })
            .execute(&mut conn)?;
        let row = faqs::table.find(id).select(Faq::as_select()).first(&mut conn)?;
        Ok::<_, AppError>(row)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(row))
}

/// PUT /api/faqs/{id} (admin)
#[utoipa::path(
    put,
    path = "/api/faqs/{id}",
    params(("id" = Uuid, Path, description = "FAQ UUID")),
    request_body = FaqRequest,
    responses(
        (status = 200, description = "FAQ updated", body = Faq),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 404, description = "FAQ not found"),
    ),
    tag = "content"
)]
pub async fn update_faq(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<FaqRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();

    let row = web::block(move || {
        let mut conn = pool.get()?;
        let updated = diesel::update(faqs::table.find(id))
            .set((
                faqs::question.eq(body.question),
                faqs::answer.eq(body.answer),
                faqs::position.eq(body.position),
            ))
            .execute(&mut conn)?;
        if updated == 0 {
            return Err(AppError::not_found("FAQ not found"));
        }
        let row = faqs::table.find(id).select(Faq::as_select()).first(&mut conn)?;
        Ok::<_, AppError>(row)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(row))
}

/// DELETE /api/faqs/{id} (admin)
#[utoipa::path(
    delete,
    path = "/api/faqs/{id}",
    params(("id" = Uuid, Path, description = "FAQ UUID")),
    responses(
        (status = 200, description = "FAQ deleted"),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 404, description = "FAQ not found"),
    ),
    tag = "content"
)]
pub async fn delete_faq(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    web::block(move || {
        let mut conn = pool.get()?;
        let deleted = diesel::delete(faqs::table.find(id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(AppError::not_found("FAQ not found"));
        }
        Ok::<_, AppError>(())
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "FAQ deleted" })))
}

// ── Social links ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct SocialLinkRequest {
    pub platform: String,
    pub url: String,
    pub icon: Option<String>,
}

/// GET /api/social-links
#[utoipa::path(
    get,
    path = "/api/social-links",
    responses((status = 200, description = "All social links", body = [SocialLink])),
    tag = "content"
)]
pub async fn list_social_links(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let rows = web::block(move || {
        let mut conn = pool.get()?;
        let rows: Vec<SocialLink> = social_links::table
            .select(SocialLink::as_select())
            .order(social_links::platform.asc())
            .load(&mut conn)?;
        Ok::<_, AppError>(rows)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(rows))
}

/// POST /api/social-links (admin)
#[utoipa::path(
    post,
    path = "/api/social-links",
    request_body = SocialLinkRequest,
    responses(
        (status = 201, description = "Social link created", body = SocialLink),
        (status = 401, description = "Missing or invalid admin token"),
    ),
    tag = "content"
)]
pub async fn create_social_link(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    body: web::Json<SocialLinkRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let row = web::block(move || {
        let mut conn = pool.get()?;
        let id = Uuid::new_v4();
        diesel::insert_into(social_links::table)
            .values(&NewSocialLink {
                id,
                platform: body.platform,
                url: body.url,
                icon: body.icon,
            })
            .execute(&mut conn)?;
        let row = social_links::table
            .find(id)
            .select(SocialLink::as_select())
            .first(&mut conn)?;
        Ok::<_, AppError>(row)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(row))
}

/// PUT /api/social-links/{id} (admin)
#[utoipa::path(
    put,
    path = "/api/social-links/{id}",
    params(("id" = Uuid, Path, description = "Social link UUID")),
    request_body = SocialLinkRequest,
    responses(
        (status = 200, description = "Social link updated", body = SocialLink),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 404, description = "Social link not found"),
    ),
    tag = "content"
)]
pub async fn update_social_link(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<SocialLinkRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();

    let row = web::block(move || {
        let mut conn = pool.get()?;
        let updated = diesel::update(social_links::table.find(id))
            .set((
                social_links::platform.eq(body.platform),
                social_links::url.eq(body.url),
                social_links::icon.eq(body.icon),
            ))
            .execute(&mut conn)?;
        if updated == 0 {
            return Err(AppError::not_found("Social link not found"));
        }
        let row = social_links::table
            .find(id)
            .select(SocialLink::as_select())
            .first(&mut conn)?;
        Ok::<_, AppError>(row)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(row))
}

/// DELETE /api/social-links/{id} (admin)
#[utoipa::path(
    delete,
    path = "/api/social-links/{id}",
    params(("id" = Uuid, Path, description = "Social link UUID")),
    responses(
        (status = 200, description = "Social link deleted"),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 404, description = "Social link not found"),
    ),
    tag = "content"
)]
pub async fn delete_social_link(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    web::block(move || {
        let mut conn = pool.get()?;
        let deleted = diesel::delete(social_links::table.find(id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(AppError::not_found("Social link not found"));
        }
        Ok::<_, AppError>(())
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Social link deleted" })))
}

// ── Payment methods ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentMethodRequest {
    pub name: String,
    pub instructions: Option<String>,
    pub qr_image_url: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// GET /api/payment-methods
///
/// Only active methods; this is what the checkout page renders.
#[utoipa::path(
    get,
    path = "/api/payment-methods",
    responses((status = 200, description = "Active payment methods", body = [PaymentMethod])),
    tag = "content"
)]
pub async fn list_payment_methods(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let rows = web::block(move || {
        let mut conn = pool.get()?;
        let rows: Vec<PaymentMethod> = payment_methods::table
            .filter(payment_methods::is_active.eq(true))
            .select(PaymentMethod::as_select())
            .order(payment_methods::name.asc())
            .load(&mut conn)?;
        Ok::<_, AppError>(rows)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(rows))
}

/// GET /api/admin/payment-methods (admin)
///
/// Includes inactive methods for management.
#[utoipa::path(
    get,
    path = "/api/admin/payment-methods",
    responses(
        (status = 200, description = "All payment methods", body = [PaymentMethod]),
        (status = 401, description = "Missing or invalid admin token"),
    ),
    tag = "content"
)]
pub async fn list_all_payment_methods(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, AppError> {
    let rows = web::block(move || {
        let mut conn = pool.get()?;
        let rows: Vec<PaymentMethod> = payment_methods::table
            .select(PaymentMethod::as_select())
            .order(payment_methods::name.asc())
            .load(&mut conn)?;
        Ok::<_, AppError>(rows)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(rows))
}

/// POST /api/payment-methods (admin)
#[utoipa::path(
    post,
    path = "/api/payment-methods",
    request_body = PaymentMethodRequest,
    responses(
        (status = 201, description = "Payment method created", body = PaymentMethod),
        (status = 401, description = "Missing or invalid admin token"),
    ),
    tag = "content"
)]
pub async fn create_payment_method(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    body: web::Json<PaymentMethodRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let row = web::block(move || {
        let mut conn = pool.get()?;
        let id = Uuid::new_v4();
        diesel::insert_into(payment_methods::table)
            .values(&NewPaymentMethod {
                id,
                name: body.name,
                instructions: body.instructions,
                qr_image_url: body.qr_image_url,
                is_active: body.is_active,
            })
            .execute(&mut conn)?;
        let row = payment_methods::table
            .find(id)
            .select(PaymentMethod::as_select())
            .first(&mut conn)?;
        Ok::<_, AppError>(row)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(row))
}

/// PUT /api/payment-methods/{id} (admin)
#[utoipa::path(
    put,
    path = "/api/payment-methods/{id}",
    params(("id" = Uuid, Path, description = "Payment method UUID")),
    request_body = PaymentMethodRequest,
    responses(
        (status = 200, description = "Payment method updated", body = PaymentMethod),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 404, description = "Payment method not found"),
    ),
    tag = "content"
)]
pub async fn update_payment_method(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<PaymentMethodRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();

    let row = web::block(move || {
        let mut conn = pool.get()?;
        let updated = diesel::update(payment_methods::table.find(id))
            .set((
                payment_methods::name.eq(body.name),
                payment_methods::instructions.eq(body.instructions),
                payment_methods::qr_image_url.eq(body.qr_image_url),
                payment_methods::is_active.eq(body.is_active),
            ))
            .execute(&mut conn)?;
        if updated == 0 {
            return Err(AppError::not_found("Payment method not found"));
        }
        let row = payment_methods::table
            .find(id)
            .select(PaymentMethod::as_select())
            .first(&mut conn)?;
        Ok::<_, AppError>(row)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(row))
}

/// DELETE /api/payment-methods/{id} (admin)
#[utoipa::path(
    delete,
    path = "/api/payment-methods/{id}",
    params(("id" = Uuid, Path, description = "Payment method UUID")),
    responses(
        (status = 200, description = "Payment method deleted"),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 404, description = "Payment method not found"),
    ),
    tag = "content"
)]
pub async fn delete_payment_method(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    web::block(move || {
        let mut conn = pool.get()?;
        let deleted = diesel::delete(payment_methods::table.find(id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(AppError::not_found("Payment method not found"));
        }
        Ok::<_, AppError>(())
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Payment method deleted" })))
}
