use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::AdminUser;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::category::{Category, NewCategory};
use crate::models::product::{NewProduct, NewProductVariation, Product, ProductVariation};
use crate::schema::{categories, product_variations, products};

// ── DTOs ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CategoryRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VariationRequest {
    pub name: String,
    /// Decimal price as a string, e.g. "399".
    pub price: String,
    pub original_price: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductRequest {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub category_id: Option<Uuid>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_sold_out: bool,
    #[serde(default)]
    pub variations: Vec<VariationRequest>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VariationResponse {
    pub id: Uuid,
    pub name: String,
    pub price: String,
    pub original_price: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub category_id: Option<Uuid>,
    pub is_active: bool,
    pub is_sold_out: bool,
    pub variations: Vec<VariationResponse>,
    pub created_at: String,
}

impl ProductResponse {
    fn new(product: Product, variations: Vec<ProductVariation>) -> Self {
        ProductResponse {
            id: product.id,
            name: product.name,
            description: product.description,
            image_url: product.image_url,
            category_id: product.category_id,
            is_active: product.is_active,
            is_sold_out: product.is_sold_out,
            variations: variations
                .into_iter()
                .map(|v| VariationResponse {
                    id: v.id,
                    name: v.name,
                    price: v.price.to_string(),
                    original_price: v.original_price.map(|p| p.to_string()),
                    description: v.description,
                })
                .collect(),
            created_at: product.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListProductsParams {
    pub category_id: Option<Uuid>,
    /// When true (the default) only active products are returned.
    #[serde(default = "default_true")]
    pub active_only: bool,
}

fn slugify(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "-")
}

fn parse_price(field: &str, raw: &str) -> Result<BigDecimal, AppError> {
    BigDecimal::from_str(raw).map_err(|e| AppError::BadRequest {
        code: "invalid_input",
        message: format!("Invalid {} '{}': {}", field, raw, e),
    })
}

fn parse_variations(
    product_id: Uuid,
    variations: &[VariationRequest],
) -> Result<Vec<NewProductVariation>, AppError> {
    variations
        .iter()
        .enumerate()
        .map(|(position, v)| {
            Ok(NewProductVariation {
                id: Uuid::new_v4(),
                product_id,
                name: v.name.clone(),
                price: parse_price("price", &v.price)?,
                original_price: v
                    .original_price
                    .as_deref()
                    .map(|p| parse_price("original_price", p))
                    .transpose()?,
                description: v.description.clone(),
                position: position as i32,
            })
        })
        .collect()
}

// ── Category handlers ────────────────────────────────────────────────────────

/// GET /api/categories
#[utoipa::path(
    get,
    path = "/api/categories",
    responses((status = 200, description = "All categories", body = [Category])),
    tag = "catalog"
)]
pub async fn list_categories(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let rows = web::block(move || {
        let mut conn = pool.get()?;
        let rows: Vec<Category> = categories::table
            .select(Category::as_select())
            .order(categories::name.asc())
            .load(&mut conn)?;
        Ok::<_, AppError>(rows)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(rows))
}

/// POST /api/categories (admin)
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 401, description = "Missing or invalid admin token"),
    ),
    tag = "catalog"
)]
pub async fn create_category(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    body: web::Json<CategoryRequest>,
) -> Result<HttpResponse, AppError> {
    let name = body.into_inner().name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest {
            code: "invalid_input",
            message: "category name must not be empty".to_string(),
        });
    }

    let row = web::block(move || {
        let mut conn = pool.get()?;
        let id = Uuid::new_v4();
        diesel::insert_into(categories::table)
            .values(&NewCategory {
                id,
                slug: slugify(&name),
                name,
            })
            .execute(&mut conn)?;
        let row = categories::table
            .find(id)
            .select(Category::as_select())
            .first(&mut conn)?;
        Ok::<_, AppError>(row)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(row))
}

/// PUT /api/categories/{id} (admin)
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(("id" = Uuid, Path, description = "Category UUID")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 404, description = "Category not found"),
    ),
    tag = "catalog"
)]
pub async fn update_category(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<CategoryRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let name = body.into_inner().name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest {
            code: "invalid_input",
            message: "category name must not be empty".to_string(),
        });
    }

    let row = web::block(move || {
        let mut conn = pool.get()?;
        let updated = diesel::update(categories::table.find(id))
            .set((
                categories::slug.eq(slugify(&name)),
                categories::name.eq(name),
            ))
            .execute(&mut conn)?;
        if updated == 0 {
            return Err(AppError::not_found("Category not found"));
        }
        let row = categories::table
            .find(id)
            .select(Category::as_select())
            .first(&mut conn)?;
        Ok::<_, AppError>(row)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(row))
}

/// DELETE /api/categories/{id} (admin)
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(("id" = Uuid, Path, description = "Category UUID")),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 404, description = "Category not found"),
    ),
    tag = "catalog"
)]
pub async fn delete_category(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    web::block(move || {
        let mut conn = pool.get()?;
        let deleted = diesel::delete(categories::table.find(id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(AppError::not_found("Category not found"));
        }
        Ok::<_, AppError>(())
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Category deleted" })))
}

// ── Product handlers ─────────────────────────────────────────────────────────

/// GET /api/products
///
/// Storefront product grid: newest first, variations embedded, inactive
/// products hidden unless `active_only=false`.
#[utoipa::path(
    get,
    path = "/api/products",
    params(
        ("category_id" = Option<Uuid>, Query, description = "Filter by category"),
        ("active_only" = Option<bool>, Query, description = "Hide inactive products (default true)"),
    ),
    responses((status = 200, description = "Products with variations", body = [ProductResponse])),
    tag = "catalog"
)]
pub async fn list_products(
    pool: web::Data<DbPool>,
    query: web::Query<ListProductsParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();

    let response = web::block(move || {
        let mut conn = pool.get()?;

        let mut query = products::table.into_boxed();
        if let Some(category_id) = params.category_id {
            query = query.filter(products::category_id.eq(category_id));
        }
        if params.active_only {
            query = query.filter(products::is_active.eq(true));
        }
        let product_rows: Vec<Product> = query
            .select(Product::as_select())
            .order(products::created_at.desc())
            .load(&mut conn)?;

        let variation_rows: Vec<ProductVariation> = ProductVariation::belonging_to(&product_rows)
            .order(product_variations::position.asc())
            .select(ProductVariation::as_select())
            .load(&mut conn)?;

        let grouped = variation_rows.grouped_by(&product_rows);
        let response: Vec<ProductResponse> = product_rows
            .into_iter()
            .zip(grouped)
            .map(|(product, variations)| ProductResponse::new(product, variations))
            .collect();
        Ok::<_, AppError>(response)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product UUID")),
    responses(
        (status = 200, description = "Product with variations", body = ProductResponse),
        (status = 404, description = "Product not found"),
    ),
    tag = "catalog"
)]
pub async fn get_product(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let response = web::block(move || {
        let mut conn = pool.get()?;

        let product = products::table
            .find(id)
            .select(Product::as_select())
            .first(&mut conn)
            .optional()?;
        let Some(product) = product else {
            return Err(AppError::not_found("Product not found"));
        };

        let variations = product_variations::table
            .filter(product_variations::product_id.eq(product.id))
            .order(product_variations::position.asc())
            .select(ProductVariation::as_select())
            .load(&mut conn)?;

        Ok::<_, AppError>(ProductResponse::new(product, variations))
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(response))
}

/// POST /api/products (admin)
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 401, description = "Missing or invalid admin token"),
    ),
    tag = "catalog"
)]
pub async fn create_product(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    body: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let id = Uuid::new_v4();
    let new_variations = parse_variations(id, &body.variations)?;

    let response = web::block(move || {
        let mut conn = pool.get()?;

        conn.transaction::<_, AppError, _>(|conn| {
            diesel::insert_into(products::table)
                .values(&NewProduct {
                    id,
                    name: body.name,
                    description: body.description,
                    image_url: body.image_url,
                    category_id: body.category_id,
                    is_active: body.is_active,
                    is_sold_out: body.is_sold_out,
                })
                .execute(conn)?;
            diesel::insert_into(product_variations::table)
                .values(&new_variations)
                .execute(conn)?;

            let product = products::table
                .find(id)
                .select(Product::as_select())
                .first(conn)?;
            let variations = product_variations::table
                .filter(product_variations::product_id.eq(id))
                .order(product_variations::position.asc())
                .select(ProductVariation::as_select())
                .load(conn)?;
            Ok(ProductResponse::new(product, variations))
        })
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(response))
}

/// PUT /api/products/{id} (admin)
///
/// Full replace; the variation list is swapped wholesale.
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product UUID")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 404, description = "Product not found"),
    ),
    tag = "catalog"
)]
pub async fn update_product(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();
    let new_variations = parse_variations(id, &body.variations)?;

    let response = web::block(move || {
        let mut conn = pool.get()?;

        conn.transaction::<_, AppError, _>(|conn| {
            let updated = diesel::update(products::table.find(id))
                .set((
                    products::name.eq(body.name),
                    products::description.eq(body.description),
                    products::image_url.eq(body.image_url),
                    products::category_id.eq(body.category_id),
                    products::is_active.eq(body.is_active),
                    products::is_sold_out.eq(body.is_sold_out),
                    products::updated_at.eq(Utc::now()),
                ))
                .execute(conn)?;
            if updated == 0 {
                return Err(AppError::not_found("Product not found"));
            }

            diesel::delete(
                product_variations::table.filter(product_variations::product_id.eq(id)),
            )
            .execute(conn)?;
            diesel::insert_into(product_variations::table)
                .values(&new_variations)
                .execute(conn)?;

            let product = products::table
                .find(id)
                .select(Product::as_select())
                .first(conn)?;
            let variations = product_variations::table
                .filter(product_variations::product_id.eq(id))
                .order(product_variations::position.asc())
                .select(ProductVariation::as_select())
                .load(conn)?;
            Ok(ProductResponse::new(product, variations))
        })
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(response))
}

/// DELETE /api/products/{id} (admin)
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product UUID")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 404, description = "Product not found"),
    ),
    tag = "catalog"
)]
pub async fn delete_product(
    _admin: AdminUser,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    web::block(move || {
        let mut conn = pool.get()?;
        let deleted = diesel::delete(products::table.find(id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(AppError::not_found("Product not found"));
        }
        Ok::<_, AppError>(())
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Product deleted" })))
}
