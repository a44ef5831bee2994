use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::order_service::OrderService;
use crate::application::summary::order_summary_text;
use crate::auth::AdminUser;
use crate::domain::order::{NewOrderInput, OrderStatus, OrderView};
use crate::domain::pricing::CartLine;
use crate::errors::AppError;
use crate::infrastructure::order_repo::DieselOrderRepository;

pub type Orders = OrderService<DieselOrderRepository>;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderItemRequest {
    pub product_name: String,
    pub variation_name: Option<String>,
    /// Decimal price as a string to avoid floating-point issues, e.g. "449.00"
    pub unit_price: String,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub items: Vec<OrderItemRequest>,
    pub promo_code: Option<String>,
    pub remark: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TransitionRequest {
    /// Target status: "confirmed", "completed" or "cancelled".
    pub status: String,
    pub note: Option<String>,
    pub reference_number: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AttachProofRequest {
    /// Stable URL of the already-uploaded proof image.
    pub payment_proof_url: String,
    pub payment_method: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub product_name: String,
    pub variation_name: Option<String>,
    pub unit_price: String,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusHistoryResponse {
    pub old_status: String,
    pub new_status: String,
    pub note: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub items: Vec<OrderItemResponse>,
    pub subtotal: String,
    pub discount_amount: String,
    pub service_charge: String,
    pub tax_amount: String,
    pub total_amount: String,
    pub promo_code: Option<String>,
    pub remark: Option<String>,
    pub status: String,
    pub reference_number: Option<String>,
    pub payment_proof_url: Option<String>,
    pub payment_method: Option<String>,
    pub expires_at: String,
    pub created_at: String,
    pub history: Vec<StatusHistoryResponse>,
}

impl OrderResponse {
    fn from_view(order: OrderView) -> Self {
        OrderResponse {
            id: order.id,
            customer_name: order.customer_name,
            customer_phone: order.customer_phone,
            customer_email: order.customer_email,
            items: order
                .items
                .into_iter()
                .map(|i| OrderItemResponse {
                    product_name: i.product_name,
                    variation_name: i.variation_name,
                    unit_price: i.unit_price.to_string(),
                    quantity: i.quantity,
                })
                .collect(),
            subtotal: order.subtotal.to_string(),
            discount_amount: order.discount_amount.to_string(),
            service_charge: order.service_charge.to_string(),
            tax_amount: order.tax_amount.to_string(),
            total_amount: order.total_amount.to_string(),
            promo_code: order.promo_code,
            remark: order.remark,
            status: order.status.as_str().to_string(),
            reference_number: order.reference_number,
            payment_proof_url: order.payment_proof_url,
            payment_method: order.payment_method,
            expires_at: order.expires_at.to_rfc3339(),
            created_at: order.created_at.to_rfc3339(),
            history: order
                .history
                .into_iter()
                .map(|h| StatusHistoryResponse {
                    old_status: h.old_status,
                    new_status: h.new_status,
                    note: h.note,
                    created_at: h.created_at.to_rfc3339(),
                })
                .collect(),
        }
    }
}

// ── Pagination ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListOrdersParams {
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page. Defaults to 20, maximum 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Optional status filter.
    pub status: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListOrdersResponse {
    pub items: Vec<OrderResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderSummaryResponse {
    pub text: String,
}

fn parse_price(raw: &str) -> Result<BigDecimal, AppError> {
    BigDecimal::from_str(raw).map_err(|e| AppError::BadRequest {
        code: "invalid_input",
        message: format!("Invalid unit_price '{}': {}", raw, e),
    })
}

fn to_input(body: CreateOrderRequest) -> Result<NewOrderInput, AppError> {
    let items = body
        .items
        .into_iter()
        .map(|i| {
            Ok(CartLine {
                product_name: i.product_name,
                variation_name: i.variation_name,
                unit_price: parse_price(&i.unit_price)?,
                quantity: i.quantity,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(NewOrderInput {
        customer_name: body.customer_name,
        customer_phone: body.customer_phone,
        customer_email: body.customer_email,
        items,
        promo_code: body.promo_code,
        remark: body.remark,
    })
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/orders
///
/// Checkout: prices the cart against current store settings, redeems the
/// promo code (if any) and persists the order as `pending`. Order row,
/// items, and the OrderCreated outbox event commit in a single database
/// transaction.
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Invalid cart or customer details"),
        (status = 404, description = "Promo code not found"),
        (status = 409, description = "Promo usage limit reached"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<Orders>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let input = to_input(body.into_inner())?;

    let order = web::block(move || service.create_order(input))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(AppError::from)?;

    Ok(HttpResponse::Created().json(OrderResponse::from_view(order)))
}

/// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = Uuid, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Order with items and status history", body = OrderResponse),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<Orders>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let order = web::block(move || service.get_order(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(AppError::from)?;

    Ok(HttpResponse::Ok().json(OrderResponse::from_view(order)))
}

/// GET /api/orders/{id}/summary
///
/// Plain-text summary for handing the order to a chat channel.
#[utoipa::path(
    get,
    path = "/api/orders/{id}/summary",
    params(("id" = Uuid, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Chat-ready summary text", body = OrderSummaryResponse),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order_summary(
    service: web::Data<Orders>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let order = web::block(move || service.get_order(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(AppError::from)?;

    Ok(HttpResponse::Ok().json(OrderSummaryResponse {
        text: order_summary_text(&order),
    }))
}

/// GET /api/orders (admin)
#[utoipa::path(
    get,
    path = "/api/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 20, max 100)"),
        ("status" = Option<String>, Query, description = "Filter by order status"),
    ),
    responses(
        (status = 200, description = "Paginated list of orders", body = ListOrdersResponse),
        (status = 401, description = "Missing or invalid admin token"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    _admin: AdminUser,
    service: web::Data<Orders>,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let page = params.page.max(1);
    let limit = params.limit.clamp(1, 100);
    let status = params
        .status
        .as_deref()
        .map(OrderStatus::parse)
        .transpose()
        .map_err(AppError::from)?;

    let result = web::block(move || service.list_orders(page, limit, status))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(AppError::from)?;

    Ok(HttpResponse::Ok().json(ListOrdersResponse {
        items: result
            .items
            .into_iter()
            .map(OrderResponse::from_view)
            .collect(),
        total: result.total,
        page,
        limit,
    }))
}

/// PUT /api/orders/{id}/status (admin)
///
/// Moves the order along the strict graph pending -> confirmed -> completed,
/// with cancellation allowed from the two non-terminal states. Appends a
/// history entry and an outbox event atomically with the status write.
#[utoipa::path(
    put,
    path = "/api/orders/{id}/status",
    params(("id" = Uuid, Path, description = "Order UUID")),
    request_body = TransitionRequest,
    responses(
        (status = 200, description = "Order after the transition", body = OrderResponse),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Transition not allowed from the current status"),
    ),
    tag = "orders"
)]
pub async fn transition_order(
    _admin: AdminUser,
    service: web::Data<Orders>,
    path: web::Path<Uuid>,
    body: web::Json<TransitionRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();
    let to = OrderStatus::parse(&body.status).map_err(AppError::from)?;

    let order = web::block(move || service.transition(id, to, body.note, body.reference_number))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(AppError::from)?;

    Ok(HttpResponse::Ok().json(OrderResponse::from_view(order)))
}

/// PUT /api/orders/{id}/payment-proof
///
/// Records the proof reference on a pending order; the status only moves
/// via explicit admin transitions. Late proof on a lapsed order cancels it.
#[utoipa::path(
    put,
    path = "/api/orders/{id}/payment-proof",
    params(("id" = Uuid, Path, description = "Order UUID")),
    request_body = AttachProofRequest,
    responses(
        (status = 200, description = "Order with proof attached", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order is not pending, or the payment window elapsed"),
    ),
    tag = "orders"
)]
pub async fn attach_payment_proof(
    service: web::Data<Orders>,
    path: web::Path<Uuid>,
    body: web::Json<AttachProofRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();

    let order = web::block(move || {
        service.attach_payment_proof(id, body.payment_proof_url, body.payment_method)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?
    .map_err(AppError::from)?;

    Ok(HttpResponse::Ok().json(OrderResponse::from_view(order)))
}
