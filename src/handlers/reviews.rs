use actix_web::{web, HttpResponse};
use chrono::Utc;
use diesel::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::AdminUser;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::review::{NewReview, Review};
use crate::schema::reviews;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewRequest {
    pub reviewer_name: String,
    pub rating: i32,
    pub comment: String,
}

fn check_rating(rating: i32) -> Result<(), AppError> {
    if !(1..=5).contains(&rating) {
        return Err(AppError::BadRequest {
            code: "invalid_input",
            message: format!("rating must be between 1 and 5, got {}", rating),
        });
    }
    Ok(())
}

/// GET /api/reviews
#[utoipa::path(
    get,
    path = "/api/reviews",
    responses((status = 200, description = "All reviews, newest first", body = [Review])),
    tag = "reviews"
)]
pub async fn list_reviews(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let rows = web::block(move || {
        let mut conn = pool.get()?;
        let rows: Vec<Review> = reviews::table
            .select(Review::as_select())
            .order(reviews::review_date.desc())
            .load(&mut conn)?;
        Ok::<_, AppError>(rows)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(rows))
}

/// POST /api/reviews (admin)
#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body = ReviewRequest,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, description = "Rating out of range"),
        (status = 401, description = "Missing or invalid admin token"),
    ),
    tag = "reviews"
)]
pub async fn create_review(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    body: web::Json<ReviewRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    check_rating(body.rating)?;

    let row = web::block(move || {
        let mut conn = pool.get()?;
        let id = Uuid::new_v4();
        diesel::insert_into(reviews::table)
            .values(&NewReview {
                id,
                reviewer_name: body.reviewer_name,
                rating: body.rating,
                comment: body.comment,
                review_date: Utc::now(),
            })
            .execute(&mut conn)?;
        let row = reviews::table
            .find(id)
            .select(Review::as_select())
            .first(&mut conn)?;
        Ok::<_, AppError>(row)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(row))
}

/// PUT /api/reviews/{id} (admin)
#[utoipa::path(
    put,
    path = "/api/reviews/{id}",
    params(("id" = Uuid, Path, description = "Review UUID")),
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = Review),
        (status = 400, description = "Rating out of range"),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 404, description = "Review not found"),
    ),
    tag = "reviews"
)]
pub async fn update_review(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<ReviewRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();
    check_rating(body.rating)?;

    let row = web::block(move || {
        let mut conn = pool.get()?;
        let updated = diesel::update(reviews::table.find(id))
            .set((
                reviews::reviewer_name.eq(body.reviewer_name),
                reviews::rating.eq(body.rating),
                reviews::comment.eq(body.comment),
            ))
            .execute(&mut conn)?;
        if updated == 0 {
            return Err(AppError::not_found("Review not found"));
        }
        let row = reviews::table
            .find(id)
            .select(Review::as_select())
            .first(&mut conn)?;
        Ok::<_, AppError>(row)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(row))
}

/// DELETE /api/reviews/{id} (admin)
#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    params(("id" = Uuid, Path, description = "Review UUID")),
    responses(
        (status = 200, description = "Review deleted"),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 404, description = "Review not found"),
    ),
    tag = "reviews"
)]
pub async fn delete_review(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    web::block(move || {
        let mut conn = pool.get()?;
        let deleted = diesel::delete(reviews::table.find(id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(AppError::not_found("Review not found"));
        }
        Ok::<_, AppError>(())
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Review deleted" })))
}
