pub mod catalog;
pub mod content;
pub mod orders;
pub mod promos;
pub mod reviews;
pub mod seed;
pub mod settings;

use actix_web::HttpResponse;

/// Service banner, served at `/` and `/api`.
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "storefront-service",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
