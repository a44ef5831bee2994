pub mod application;
pub mod auth;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod models;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use auth::AdminToken;
pub use db::{create_pool, DbPool};

use application::{order_service::OrderService, promo_service::PromoService};
use infrastructure::{order_repo::DieselOrderRepository, promo_repo::DieselPromoRepository};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::orders::create_order,
        handlers::orders::get_order,
        handlers::orders::get_order_summary,
        handlers::orders::list_orders,
        handlers::orders::transition_order,
        handlers::orders::attach_payment_proof,
        handlers::promos::validate_promo,
        handlers::promos::list_promos,
        handlers::promos::create_promo,
        handlers::promos::update_promo,
        handlers::promos::delete_promo,
        handlers::catalog::list_categories,
        handlers::catalog::create_category,
        handlers::catalog::update_category,
        handlers::catalog::delete_category,
        handlers::catalog::list_products,
        handlers::catalog::get_product,
        handlers::catalog::create_product,
        handlers::catalog::update_product,
        handlers::catalog::delete_product,
        handlers::reviews::list_reviews,
        handlers::reviews::create_review,
        handlers::reviews::update_review,
        handlers::reviews::delete_review,
        handlers::content::list_faqs,
        handlers::content::create_faq,
        handlers::content::update_faq,
        handlers::content::delete_faq,
        handlers::content::list_social_links,
        handlers::content::create_social_link,
        handlers::content::update_social_link,
        handlers::content::delete_social_link,
        handlers::content::list_payment_methods,
        handlers::content::list_all_payment_methods,
        handlers::content::create_payment_method,
        handlers::content::update_payment_method,
        handlers::content::delete_payment_method,
        handlers::settings::get_settings,
        handlers::settings::update_settings,
        handlers::seed::seed_demo_data,
    ),
    info(
        title = "Storefront Service API",
        description = "Order lifecycle, pricing and catalog API for a digital goods storefront."
    )
)]
struct ApiDoc;

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    admin_token: AdminToken,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let orders = web::Data::new(OrderService::new(DieselOrderRepository::new(pool.clone())));
    let promos = web::Data::new(PromoService::new(DieselPromoRepository::new(pool.clone())));
    let admin_token = web::Data::new(admin_token);

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(orders.clone())
            .app_data(promos.clone())
            .app_data(admin_token.clone())
            .wrap(Logger::default())
            .route("/", web::get().to(handlers::index))
            .service(
                web::scope("/api")
                    .route("", web::get().to(handlers::index))
                    .service(
                        web::scope("/orders")
                            .route("", web::post().to(handlers::orders::create_order))
                            .route("", web::get().to(handlers::orders::list_orders))
                            .route("/{id}", web::get().to(handlers::orders::get_order))
                            .route(
                                "/{id}/summary",
                                web::get().to(handlers::orders::get_order_summary),
                            )
                            .route(
                                "/{id}/status",
                                web::put().to(handlers::orders::transition_order),
                            )
                            .route(
                                "/{id}/payment-proof",
                                web::put().to(handlers::orders::attach_payment_proof),
                            ),
                    )
                    .service(
                        web::scope("/promo-codes")
                            .route("/validate", web::post().to(handlers::promos::validate_promo))
                            .route("", web::get().to(handlers::promos::list_promos))
                            .route("", web::post().to(handlers::promos::create_promo))
                            .route("/{id}", web::put().to(handlers::promos::update_promo))
                            .route("/{id}", web::delete().to(handlers::promos::delete_promo)),
                    )
                    .service(
                        web::scope("/categories")
                            .route("", web::get().to(handlers::catalog::list_categories))
                            .route("", web::post().to(handlers::catalog::create_category))
                            .route("/{id}", web::put().to(handlers::catalog::update_category))
                            .route(
                                "/{id}",
                                web::delete().to(handlers::catalog::delete_category),
                            ),
                    )
                    .service(
                        web::scope("/products")
                            .route("", web::get().to(handlers::catalog::list_products))
                            .route("", web::post().to(handlers::catalog::create_product))
                            .route("/{id}", web::get().to(handlers::catalog::get_product))
                            .route("/{id}", web::put().to(handlers::catalog::update_product))
                            .route("/{id}", web::delete().to(handlers::catalog::delete_product)),
                    )
                    .service(
                        web::scope("/reviews")
                            .route("", web::get().to(handlers::reviews::list_reviews))
                            .route("", web::post().to(handlers::reviews::create_review))
                            .route("/{id}", web::put().to(handlers::reviews::update_review))
                            .route("/{id}", web::delete().to(handlers::reviews::delete_review)),
                    )
                    .service(
                        web::scope("/faqs")
                            .route("", web::get().to(handlers::content::list_faqs))
                            .route("", web::post().to(handlers::content::create_faq))
                            .route("/{id}", web::put().to(handlers::content::update_faq))
                            .route("/{id}", web::delete().to(handlers::content::delete_faq)),
                    )
                    .service(
                        web::scope("/social-links")
                            .route("", web::get().to(handlers::content::list_social_links))
                            .route("", web::post().to(handlers::content::create_social_link))
                            .route(
                                "/{id}",
                                web::put().to(handlers::content::update_social_link),
                            )
                            .route(
                                "/{id}",
                                web::delete().to(handlers::content::delete_social_link),
                            ),
                    )
                    .service(
                        web::scope("/payment-methods")
                            .route("", web::get().to(handlers::content::list_payment_methods))
                            .route(
                                "",
                                web::post().to(handlers::content::create_payment_method),
                            )
                            .route(
                                "/{id}",
                                web::put().to(handlers::content::update_payment_method),
                            )
                            .route(
                                "/{id}",
                                web::delete().to(handlers::content::delete_payment_method),
                            ),
                    )
                    .service(
                        web::scope("/settings")
                            .route("", web::get().to(handlers::settings::get_settings))
                            .route("", web::put().to(handlers::settings::update_settings)),
                    )
                    .service(
                        web::scope("/admin")
                            .route(
                                "/payment-methods",
                                web::get().to(handlers::content::list_all_payment_methods),
                            )
                            .route("/seed", web::post().to(handlers::seed::seed_demo_data)),
                    ),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
